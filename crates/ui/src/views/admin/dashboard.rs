use dioxus::prelude::*;
use dioxus_router::Link;

use learningstack_core::model::CourseId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ErrorBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::{CourseCardVm, map_course_cards};

#[component]
pub fn AdminDashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let authoring = ctx.authoring();

    let confirming = use_signal(|| None::<CourseId>);
    let mut error = use_signal(|| None::<ViewError>);

    let mut courses = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            let courses = catalog.list_courses().await.map_err(ViewError::from_err)?;
            Ok(map_course_cards(&courses))
        }
    });

    let delete = move |course: CourseId| {
        let authoring = authoring.clone();
        spawn(async move {
            match authoring.delete_course(&course).await {
                Ok(()) => {
                    error.set(None);
                    courses.restart();
                }
                Err(err) => error.set(Some(ViewError::from_err(err))),
            }
        });
    };

    rsx! {
        div { class: "page",
            h2 { "Courses" }
            Link { to: Route::AddCourse {}, "Add course" }

            match view_state_from_resource(&courses) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "banner-error", "{err.message()}" }
                },
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { class: "muted", "No courses yet." }
                    }
                    ul {
                        for card in cards {
                            CourseAdminRow {
                                key: "{card.id}",
                                card,
                                confirming,
                                on_delete: delete.clone(),
                            }
                        }
                    }
                },
            }
            ErrorBanner { error: error() }
        }
    }
}

/// Delete asks for a second click before calling the server.
#[component]
fn CourseAdminRow(
    card: CourseCardVm,
    confirming: Signal<Option<CourseId>>,
    on_delete: EventHandler<CourseId>,
) -> Element {
    let mut confirming = confirming;
    let id = card.id.clone();
    let armed = confirming.read().as_ref() == Some(&id);

    rsx! {
        li { class: "card",
            h3 { "{card.title}" }
            p { class: "muted", "{card.lessons_label}" }
            Link {
                to: Route::EditCourse { course_id: card.id.to_string() },
                "Edit"
            }
            " "
            Link {
                to: Route::AdminQuestions { course_id: card.id.to_string() },
                "Questions"
            }
            " "
            if armed {
                button {
                    onclick: move |_| {
                        confirming.set(None);
                        on_delete.call(id.clone());
                    },
                    "Confirm delete"
                }
                button { onclick: move |_| confirming.set(None), "Cancel" }
            } else {
                button {
                    onclick: move |_| confirming.set(Some(id.clone())),
                    "Delete"
                }
            }
        }
    }
}
