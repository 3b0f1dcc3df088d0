use dioxus::prelude::*;

use learningstack_core::model::{Certificate, CourseId};

use crate::context::AppContext;
use crate::views::{ErrorBanner, ViewError, ViewState, view_state_from_resource};

#[component]
pub fn CertificateView(course_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let certificates = ctx.certificates();
    let course = CourseId::new(course_id);

    let mut certificate = use_signal(|| None::<Certificate>);
    let mut error = use_signal(|| None::<ViewError>);
    let mut saved_to = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let resource = {
        let certificates = certificates.clone();
        use_resource(move || {
            let certificates = certificates.clone();
            let course = course.clone();
            async move {
                let issued = certificates
                    .issue(&course)
                    .await
                    .map_err(ViewError::from_err)?;
                certificate.set(Some(issued));
                Ok(())
            }
        })
    };

    let download = move |_: MouseEvent| {
        let Some(current) = certificate() else {
            return;
        };
        if saving() {
            return;
        }
        let certificates = certificates.clone();
        saving.set(true);
        spawn(async move {
            match certificates.save(&current).await {
                Ok(path) => {
                    error.set(None);
                    saved_to.set(Some(path.display().to_string()));
                }
                Err(err) => error.set(Some(ViewError::from_err(err))),
            }
            saving.set(false);
        });
    };

    let current = certificate();

    rsx! {
        div { class: "page",
            h2 { "Certificate" }

            match view_state_from_resource(&resource) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Preparing your certificate..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "banner-error", "{err.message()}" }
                },
                ViewState::Ready(()) => match current {
                    None => rsx! {},
                    Some(current) => rsx! {
                        label {
                            "Student name "
                            input {
                                value: "{current.student_name}",
                                oninput: move |evt| {
                                    if let Some(cert) = certificate.write().as_mut() {
                                        cert.student_name = evt.value();
                                    }
                                },
                            }
                        }
                        p { class: "muted", "Course: {current.course_name}" }
                        p { class: "muted", "Date: {current.date_label()}" }
                        p { class: "muted", "Certificate ID: {current.id}" }
                        div {
                            class: "certificate-preview",
                            dangerous_inner_html: current.render_svg(),
                        }
                        button {
                            disabled: !current.can_download() || saving(),
                            onclick: download,
                            "Download certificate"
                        }
                    },
                },
            }
            if let Some(path) = saved_to() {
                p { class: "banner-ok", "Saved to {path}" }
            }
            ErrorBanner { error: error() }
        }
    }
}
