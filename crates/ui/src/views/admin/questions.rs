use dioxus::prelude::*;

use learningstack_core::model::{CourseId, QuestionId};
use learningstack_core::scoring::option_letter;
use services::QuestionManager;

use crate::context::AppContext;
use crate::views::{ErrorBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuestionRowVm, map_question_rows};

#[component]
pub fn QuestionManagerView(course_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let service = ctx.questions();
    let course = CourseId::new(course_id);

    let mut manager = use_signal(|| None::<QuestionManager>);
    let mut title = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);

    let resource = {
        let service = service.clone();
        use_resource(move || {
            let service = service.clone();
            let course = course.clone();
            async move {
                title.set(service.course_title(&course).await);
                let questions = service.list(&course).await.map_err(ViewError::from_err)?;
                manager.set(Some(QuestionManager::new(course, questions)));
                Ok(())
            }
        })
    };

    let edit = {
        let service = service.clone();
        use_callback(move |id: QuestionId| {
            let service = service.clone();
            spawn(async move {
                match service.load_draft(&id).await {
                    Ok(draft) => {
                        error.set(None);
                        if let Some(manager) = manager.write().as_mut() {
                            manager.open_edit(id, draft);
                        }
                    }
                    Err(err) => error.set(Some(ViewError::from_err(err))),
                }
            });
        })
    };

    let delete = {
        let service = service.clone();
        use_callback(move |id: QuestionId| {
            let started = manager
                .write()
                .as_mut()
                .is_some_and(|manager| manager.begin_delete(&id));
            if !started {
                return;
            }
            let service = service.clone();
            spawn(async move {
                let result = service.delete(&id).await;
                if let Some(manager) = manager.write().as_mut() {
                    manager.finish_delete(&id, result.is_ok());
                }
                match result {
                    Ok(()) => error.set(None),
                    Err(err) => error.set(Some(ViewError::from_err(err))),
                }
            });
        })
    };

    let save = use_callback(move |()| {
        let started = manager.write().as_mut().map(|manager| {
            manager
                .begin_save()
                .map(|started| started.map(|(editing, valid)| (manager.course_id().clone(), editing, valid)))
        });
        let (course, editing, valid) = match started {
            Some(Ok(Some(started))) => started,
            Some(Err(err)) => {
                error.set(Some(ViewError::from_err(err)));
                return;
            }
            Some(Ok(None)) | None => return,
        };
        let service = service.clone();
        spawn(async move {
            let reloaded = match service.save(&course, editing.as_ref(), &valid).await {
                Ok(questions) => {
                    error.set(None);
                    Some(questions)
                }
                Err(err) => {
                    error.set(Some(ViewError::from_err(err)));
                    None
                }
            };
            if let Some(manager) = manager.write().as_mut() {
                manager.finish_save(reloaded);
            }
        });
    });

    let (rows, form_open) = manager.read().as_ref().map_or((Vec::new(), false), |manager| {
        let rows: Vec<(QuestionRowVm, bool)> = map_question_rows(manager.questions())
            .into_iter()
            .map(|row| {
                let deleting = manager.is_deleting(&row.id);
                (row, deleting)
            })
            .collect();
        (rows, manager.form().is_some())
    });

    rsx! {
        div { class: "page",
            h2 { "Questions: {title}" }

            match view_state_from_resource(&resource) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "banner-error", "{err.message()}" }
                },
                ViewState::Ready(()) => rsx! {
                    if form_open {
                        QuestionFormPanel { manager, on_save: save }
                    } else {
                        button {
                            onclick: move |_| {
                                if let Some(manager) = manager.write().as_mut() {
                                    manager.open_new();
                                }
                            },
                            "Add question"
                        }
                    }
                    if rows.is_empty() {
                        p { class: "muted", "No questions yet." }
                    }
                    ul {
                        for (row, deleting) in rows {
                            QuestionRow {
                                key: "{row.id}",
                                row,
                                deleting,
                                on_edit: edit,
                                on_delete: delete,
                            }
                        }
                    }
                },
            }
            ErrorBanner { error: error() }
        }
    }
}

#[component]
fn QuestionRow(
    row: QuestionRowVm,
    deleting: bool,
    on_edit: EventHandler<QuestionId>,
    on_delete: EventHandler<QuestionId>,
) -> Element {
    let mut armed = use_signal(|| false);
    let edit_id = row.id.clone();
    let delete_id = row.id.clone();

    rsx! {
        li { class: "card",
            h3 { "{row.text}" }
            ul {
                for option in row.options.clone() {
                    li { "{option}" }
                }
            }
            p { class: "muted", "{row.correct_label}" }
            button { onclick: move |_| on_edit.call(edit_id.clone()), "Edit" }
            if deleting {
                span { class: "muted", " Deleting..." }
            } else if armed() {
                button {
                    onclick: move |_| {
                        armed.set(false);
                        on_delete.call(delete_id.clone());
                    },
                    "Confirm delete"
                }
                button { onclick: move |_| armed.set(false), "Cancel" }
            } else {
                button { onclick: move |_| armed.set(true), "Delete" }
            }
        }
    }
}

/// Add/edit form: question text, the answer options and the correct one.
#[component]
fn QuestionFormPanel(
    manager: Signal<Option<QuestionManager>>,
    on_save: EventHandler<()>,
) -> Element {
    let mut manager = manager;
    let Some((editing, text, options, correct, saving)) = manager.read().as_ref().and_then(|m| {
        let form = m.form()?;
        Some((
            form.editing.is_some(),
            form.draft.text.clone(),
            form.draft
                .options
                .iter()
                .map(|option| option.text.clone())
                .enumerate()
                .collect::<Vec<_>>(),
            form.draft.correct,
            form.saving,
        ))
    }) else {
        return rsx! {};
    };
    let heading = if editing { "Edit question" } else { "New question" };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        on_save.call(());
    };

    rsx! {
        form { class: "card", onsubmit: submit,
            h3 { "{heading}" }
            input {
                placeholder: "Question",
                value: "{text}",
                oninput: move |evt| {
                    if let Some(form) = manager.write().as_mut().and_then(QuestionManager::form_mut) {
                        form.draft.text = evt.value();
                    }
                },
            }
            for (index, option) in options {
                OptionInput {
                    key: "{index}",
                    index,
                    text: option,
                    correct: correct == Some(index),
                    manager,
                }
            }
            button { r#type: "submit", disabled: saving,
                if saving { "Saving..." } else { "Save question" }
            }
            button {
                r#type: "button",
                onclick: move |_| {
                    if let Some(manager) = manager.write().as_mut() {
                        manager.close_form();
                    }
                },
                "Cancel"
            }
        }
    }
}

#[component]
fn OptionInput(
    index: usize,
    text: String,
    correct: bool,
    manager: Signal<Option<QuestionManager>>,
) -> Element {
    let mut manager = manager;
    let letter = option_letter(index);

    rsx! {
        div { class: "option-input",
            label {
                input {
                    r#type: "radio",
                    name: "correct",
                    checked: correct,
                    onchange: move |_| {
                        if let Some(form) = manager.write().as_mut().and_then(QuestionManager::form_mut) {
                            form.draft.correct = Some(index);
                        }
                    },
                }
                " {letter}) "
            }
            input {
                placeholder: "Option {letter}",
                value: "{text}",
                oninput: move |evt| {
                    if let Some(form) = manager.write().as_mut().and_then(QuestionManager::form_mut) {
                        if let Some(option) = form.draft.options.get_mut(index) {
                            option.text = evt.value();
                        }
                    }
                },
            }
        }
    }
}
