use std::path::Path;

use dioxus::prelude::*;

use services::authoring::{CourseAuthoring, PreviewSlot, UploadOutcome};

use super::module_row::{ModuleRow, VideoPreviewPanel};
use crate::context::AppContext;
use crate::views::{ErrorBanner, ViewError};
use crate::vm::{map_module_rows, phase_label};

/// Add-course page: the course is created first, then each module uploads
/// on its own.
#[component]
pub fn AddCourseView() -> Element {
    let ctx = use_context::<AppContext>();
    let authoring_service = ctx.authoring();

    let mut authoring = use_signal(CourseAuthoring::new);
    let preview = use_signal(PreviewSlot::new);
    let mut error = use_signal(|| None::<ViewError>);
    let mut notice = use_signal(|| None::<String>);

    let mut report = move |result: Result<(), services::AuthoringError>| match result {
        Ok(()) => error.set(None),
        Err(err) => error.set(Some(ViewError::from_err(err))),
    };

    let create = {
        let service = authoring_service.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let details = match authoring.write().begin_create() {
                Ok(details) => details,
                Err(err) => {
                    error.set(Some(ViewError::from_err(err)));
                    return;
                }
            };
            let service = service.clone();
            spawn(async move {
                match service.create_course(&details).await {
                    Ok(created) => {
                        authoring.write().finish_create(Some(created.id));
                        error.set(None);
                        notice.set(created.message);
                    }
                    Err(err) => {
                        authoring.write().finish_create(None);
                        error.set(Some(ViewError::from_err(err)));
                    }
                }
            });
        }
    };

    let upload = use_callback(move |key: u32| {
        let upload = match authoring.write().prepare_upload(key) {
            Ok(upload) => upload,
            Err(err) => {
                error.set(Some(ViewError::from_err(err)));
                return;
            }
        };
        let service = authoring_service.clone();
        spawn(async move {
            let outcome = match service.upload_lesson(&upload).await {
                Ok(lesson_id) => {
                    error.set(None);
                    UploadOutcome::Uploaded(lesson_id)
                }
                Err(err) => {
                    error.set(Some(ViewError::from_err(err)));
                    UploadOutcome::Failed
                }
            };
            let _ = authoring.write().finish_upload(key, outcome);
        });
    });

    let attach = {
        let service = ctx.authoring();
        use_callback(move |(key, path): (u32, String)| {
            let result = service
                .probe_video(Path::new(&path))
                .and_then(|video| authoring.write().select_video(key, video));
            report(result);
        })
    };

    let (phase, created, creating, title, description) = {
        let state = authoring.read();
        (
            state.phase(),
            state.course_id().is_some(),
            state.is_creating(),
            state.course().title.clone(),
            state.course().description.clone(),
        )
    };
    let rows = map_module_rows(authoring.read().modules());
    let phase = phase_label(phase);

    rsx! {
        div { class: "page",
            h2 { "Add course" }
            p { class: "muted", "{phase}" }

            form { onsubmit: create,
                input {
                    placeholder: "Course title",
                    value: "{title}",
                    disabled: created || creating,
                    oninput: move |evt| {
                        let result = authoring.write().set_title(evt.value());
                        report(result);
                    },
                }
                textarea {
                    placeholder: "Description",
                    value: "{description}",
                    disabled: created || creating,
                    oninput: move |evt| {
                        let result = authoring.write().set_description(evt.value());
                        report(result);
                    },
                }
                if !created {
                    button { r#type: "submit", disabled: creating, "Create course" }
                }
            }
            if let Some(message) = notice() {
                p { class: "banner-ok", "{message}" }
            }

            if created {
                h3 { "Modules" }
                ul {
                    for row in rows {
                        ModuleRow {
                            key: "{row.key}",
                            row: row.clone(),
                            action_label: "Upload",
                            on_title: move |title: String| {
                                let result = authoring.write().set_module_title(row.key, title);
                                report(result);
                            },
                            on_attach: move |path: String| attach.call((row.key, path)),
                            on_clear: move |()| {
                                let result = authoring.write().clear_video(row.key);
                                report(result);
                            },
                            on_preview: move |path: String| {
                                let mut preview = preview;
                                preview.write().open(path);
                            },
                            on_action: move |()| upload.call(row.key),
                        }
                    }
                }
                button {
                    onclick: move |_| {
                        authoring.write().add_module();
                    },
                    "Add module"
                }
                VideoPreviewPanel { preview }
            }
            ErrorBanner { error: error() }
        }
    }
}
