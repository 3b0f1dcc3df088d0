use dioxus::prelude::*;
use dioxus_router::use_navigator;

use learningstack_core::model::CourseId;
use services::LessonProgress;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LessonRowVm, map_lesson_rows, media_url};

#[component]
pub fn LessonsListView(course_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let catalog = ctx.catalog();
    let api_base_url = ctx.api_base_url().to_owned();

    let mut progress = use_signal(|| None::<LessonProgress>);
    let mut course_title = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<&'static str>);

    let course = CourseId::new(course_id.clone());
    let resource = use_resource(move || {
        let catalog = catalog.clone();
        let course = course.clone();
        async move {
            let listing = catalog.lessons(&course).await.map_err(ViewError::from_err)?;
            course_title.set(listing.course_title);
            progress.set(Some(LessonProgress::new(listing.lessons)));
            Ok(())
        }
    });

    let start_quiz = {
        let course_id = course_id.clone();
        move |_: MouseEvent| {
            let gate = progress
                .read()
                .as_ref()
                .map_or(Err(services::lessons::QUIZ_LOCKED), LessonProgress::enter_quiz);
            match gate {
                Ok(()) => {
                    notice.set(None);
                    let _ = navigator.push(Route::Quiz {
                        course_id: course_id.clone(),
                    });
                }
                Err(message) => notice.set(Some(message)),
            }
        }
    };

    let rows = progress.read().as_ref().map(map_lesson_rows).unwrap_or_default();
    let player = progress.read().as_ref().and_then(|progress| {
        let lesson = progress.selected()?;
        Some((
            lesson.title.clone(),
            lesson
                .video_url
                .as_deref()
                .map(|url| media_url(&api_base_url, url)),
        ))
    });
    let title = course_title().unwrap_or_else(|| "Lessons".to_owned());

    rsx! {
        div { class: "page",
            h2 { "{title}" }

            match view_state_from_resource(&resource) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "banner-error", "{err.message()}" }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some((lesson_title, video)) = player {
                        div { class: "player card",
                            h3 { "{lesson_title}" }
                            if let Some(src) = video {
                                video { controls: true, src: "{src}" }
                            } else {
                                p { class: "muted", "No video for this lesson." }
                            }
                        }
                    }
                    if rows.is_empty() {
                        p { class: "muted", "No lessons in this course yet." }
                    }
                    ul {
                        for row in rows {
                            LessonRow { key: "{row.id}", row, progress }
                        }
                    }
                    button { onclick: start_quiz, "Start quiz" }
                    if let Some(message) = notice() {
                        p { class: "banner-error", "{message}" }
                    }
                },
            }
        }
    }
}

#[component]
fn LessonRow(row: LessonRowVm, progress: Signal<Option<LessonProgress>>) -> Element {
    let mut progress = progress;
    let select_id = row.id.clone();
    let complete_id = row.id.clone();
    let bookmark_id = row.id.clone();
    let class = if row.selected {
        "lesson-row card selected"
    } else {
        "lesson-row card"
    };

    rsx! {
        li { class: "{class}",
            button {
                onclick: move |_| {
                    if let Some(progress) = progress.write().as_mut() {
                        progress.select(&select_id);
                    }
                },
                "{row.title}"
            }
            span { class: "muted", " {row.duration_label} " }
            label {
                input {
                    r#type: "checkbox",
                    checked: row.completed,
                    onchange: move |_| {
                        if let Some(progress) = progress.write().as_mut() {
                            progress.toggle_completed(&complete_id);
                        }
                    },
                }
                " Completed"
            }
            button {
                onclick: move |_| {
                    if let Some(progress) = progress.write().as_mut() {
                        progress.toggle_bookmark(&bookmark_id);
                    }
                },
                if row.bookmarked { "Bookmarked" } else { "Bookmark" }
            }
        }
    }
}
