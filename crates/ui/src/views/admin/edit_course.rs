use std::path::Path;

use dioxus::prelude::*;

use learningstack_core::model::{CourseId, Lesson, LessonId};
use services::AuthoringError;
use services::authoring::{CourseEditor, PreviewSlot};

use super::module_row::{ModuleRow, VideoPreviewPanel};
use crate::context::AppContext;
use crate::views::{ErrorBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::{duration_label, map_module_rows};

const UPDATED: &str = "Course updated successfully";

#[component]
pub fn EditCourseView(course_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let service = ctx.authoring();
    let course = CourseId::new(course_id);

    let mut editor = use_signal(|| None::<CourseEditor>);
    let preview = use_signal(PreviewSlot::new);
    let mut error = use_signal(|| None::<ViewError>);
    let mut notice = use_signal(|| None::<&'static str>);

    let resource = {
        let service = service.clone();
        use_resource(move || {
            let service = service.clone();
            let course = course.clone();
            async move {
                let loaded = service.load_editor(&course).await.map_err(ViewError::from_err)?;
                editor.set(Some(loaded));
                Ok(())
            }
        })
    };

    let mut report = move |result: Result<(), AuthoringError>| match result {
        Ok(()) => error.set(None),
        Err(err) => error.set(Some(ViewError::from_err(err))),
    };

    let mut edit = move |apply: &dyn Fn(&mut CourseEditor) -> Result<(), AuthoringError>| {
        let result = editor.write().as_mut().map_or(Ok(()), apply);
        report(result);
    };

    let attach = {
        let service = service.clone();
        use_callback(move |(key, path): (u32, String)| {
            match service.probe_video(Path::new(&path)) {
                Ok(video) => edit(&|editor| editor.select_video(key, video.clone())),
                Err(err) => report(Err(err)),
            }
        })
    };

    let delete_lesson = {
        let service = service.clone();
        use_callback(move |lesson: LessonId| {
            let Some(started) = editor
                .write()
                .as_mut()
                .map(|editor| editor.begin_delete(&lesson))
            else {
                return;
            };
            if let Err(err) = started {
                report(Err(err));
                return;
            }
            let service = service.clone();
            spawn(async move {
                let result = service.delete_lesson(&lesson).await;
                if let Some(editor) = editor.write().as_mut() {
                    editor.finish_delete(&lesson, result.is_ok());
                }
                report(result);
            });
        })
    };

    let save = move |evt: FormEvent| {
        evt.prevent_default();
        notice.set(None);
        let Some(started) = editor.write().as_mut().map(|editor| {
            editor
                .begin_save()
                .map(|(details, pending)| (editor.course_id().clone(), details, pending))
        }) else {
            return;
        };
        let (course_id, details, pending) = match started {
            Ok(started) => started,
            Err(err) => {
                report(Err(err));
                return;
            }
        };
        let service = service.clone();
        spawn(async move {
            let result = match service.save_edits(&course_id, &details, pending).await {
                Ok(outcomes) => editor
                    .write()
                    .as_mut()
                    .map_or(Ok(()), |editor| editor.finish_save(outcomes)),
                Err(err) => {
                    if let Some(editor) = editor.write().as_mut() {
                        editor.abort_save();
                    }
                    Err(err)
                }
            };
            if result.is_ok() {
                notice.set(Some(UPDATED));
            }
            report(result);
        });
    };

    let snapshot = editor.read().as_ref().map(|editor| {
        let lessons: Vec<(Lesson, bool)> = editor
            .existing_lessons()
            .iter()
            .map(|lesson| (lesson.clone(), editor.is_deleting(&lesson.id)))
            .collect();
        (
            editor.course().title.clone(),
            editor.course().description.clone(),
            editor.is_saving(),
            lessons,
            map_module_rows(editor.new_modules()),
        )
    });

    rsx! {
        div { class: "page",
            h2 { "Edit course" }

            match view_state_from_resource(&resource) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "banner-error", "{err.message()}" }
                },
                ViewState::Ready(()) => match snapshot {
                    None => rsx! {},
                    Some((title, description, saving, lessons, rows)) => rsx! {
                        form { onsubmit: save,
                            input {
                                placeholder: "Course title",
                                value: "{title}",
                                oninput: move |evt| {
                                    if let Some(editor) = editor.write().as_mut() {
                                        editor.set_title(evt.value());
                                    }
                                },
                            }
                            textarea {
                                placeholder: "Description",
                                value: "{description}",
                                oninput: move |evt| {
                                    if let Some(editor) = editor.write().as_mut() {
                                        editor.set_description(evt.value());
                                    }
                                },
                            }

                            h3 { "Lessons" }
                            if lessons.is_empty() {
                                p { class: "muted", "No lessons yet." }
                            }
                            ul {
                                for (lesson, deleting) in lessons {
                                    ExistingLessonRow {
                                        key: "{lesson.id}",
                                        lesson,
                                        deleting,
                                        on_delete: delete_lesson,
                                    }
                                }
                            }

                            h3 { "New modules" }
                            ul {
                                for row in rows {
                                    ModuleRow {
                                        key: "{row.key}",
                                        row: row.clone(),
                                        action_label: "Remove",
                                        on_title: move |title: String| {
                                            edit(&|editor| editor.set_module_title(row.key, title.clone()));
                                        },
                                        on_attach: move |path: String| attach.call((row.key, path)),
                                        on_clear: move |()| edit(&|editor| editor.clear_video(row.key)),
                                        on_preview: move |path: String| {
                                            let mut preview = preview;
                                            preview.write().open(path);
                                        },
                                        on_action: move |()| edit(&|editor| editor.remove_module(row.key)),
                                    }
                                }
                            }
                            button {
                                r#type: "button",
                                onclick: move |_| {
                                    if let Some(editor) = editor.write().as_mut() {
                                        editor.add_module();
                                    }
                                },
                                "Add module"
                            }
                            button { r#type: "submit", disabled: saving,
                                if saving { "Saving..." } else { "Save changes" }
                            }
                        }
                        VideoPreviewPanel { preview }
                    },
                },
            }
            if let Some(message) = notice() {
                p { class: "banner-ok", "{message}" }
            }
            ErrorBanner { error: error() }
        }
    }
}

#[component]
fn ExistingLessonRow(lesson: Lesson, deleting: bool, on_delete: EventHandler<LessonId>) -> Element {
    let mut armed = use_signal(|| false);
    let duration = duration_label(lesson.duration_minutes);
    let id = lesson.id.clone();

    rsx! {
        li { class: "card",
            span { "{lesson.order}. {lesson.title} " }
            span { class: "muted", "{duration}" }
            if deleting {
                span { class: "muted", " Deleting..." }
            } else if armed() {
                button {
                    r#type: "button",
                    onclick: move |_| {
                        armed.set(false);
                        on_delete.call(id.clone());
                    },
                    "Confirm delete"
                }
                button { r#type: "button", onclick: move |_| armed.set(false), "Cancel" }
            } else {
                button { r#type: "button", onclick: move |_| armed.set(true), "Delete" }
            }
        }
    }
}
