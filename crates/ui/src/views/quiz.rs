use dioxus::prelude::*;
use dioxus_router::use_navigator;

use learningstack_core::model::CourseId;
use learningstack_core::scoring::QuizVerdict;
use services::{QuizAttempt, QuizError, QuizPhase};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ErrorBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizOptionVm, QuizQuestionVm, ResultRowVm, map_result_rows};

#[component]
pub fn QuizView(course_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();
    let course = CourseId::new(course_id.clone());

    let mut attempt = use_signal({
        let course = course.clone();
        move || QuizAttempt::new(course)
    });
    let mut error = use_signal(|| None::<ViewError>);

    let resource = use_resource(move || {
        let quiz = quiz.clone();
        let course = course.clone();
        async move {
            let questions = quiz.questions(&course).await.map_err(ViewError::from_err)?;
            attempt.write().load(questions);
            Ok(())
        }
    });

    let mut report = move |result: Result<(), QuizError>| match result {
        Ok(()) => error.set(None),
        Err(err) => error.set(Some(ViewError::from_err(err))),
    };

    let no_questions = QuizError::NoQuestions.to_string();
    let phase = attempt.read().phase();
    let question = QuizQuestionVm::from_attempt(&attempt.read());

    rsx! {
        div { class: "page",
            h2 { "Quiz" }

            match view_state_from_resource(&resource) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading questions..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "banner-error", "{err.message()}" }
                },
                ViewState::Ready(()) => match (phase, question) {
                    (QuizPhase::Submitted, _) => rsx! {
                        QuizResults { course_id: course_id.clone(), attempt }
                    },
                    (_, None) => rsx! {
                        p { class: "muted", "{no_questions}" }
                    },
                    (_, Some(question)) => rsx! {
                        div { class: "card",
                            p { class: "muted", "{question.progress_label}" }
                            h3 { "{question.text}" }
                            ul {
                                for option in question.options.clone() {
                                    QuizOptionRow { key: "{option.index}", option, attempt }
                                }
                            }
                            button {
                                disabled: !question.can_go_back,
                                onclick: move |_| attempt.write().previous(),
                                "Previous"
                            }
                            if question.is_last {
                                button {
                                    disabled: !question.can_advance,
                                    onclick: move |_| {
                                        let result = attempt.write().submit().map(|_| ());
                                        report(result);
                                    },
                                    "Submit"
                                }
                            } else {
                                button {
                                    disabled: !question.can_advance,
                                    onclick: move |_| {
                                        let result = attempt.write().next();
                                        report(result);
                                    },
                                    "Next"
                                }
                            }
                        }
                    },
                },
            }
            ErrorBanner { error: error() }
        }
    }
}

#[component]
fn QuizOptionRow(option: QuizOptionVm, attempt: Signal<QuizAttempt>) -> Element {
    let mut attempt = attempt;
    let index = option.index;

    rsx! {
        li {
            label {
                input {
                    r#type: "radio",
                    name: "answer",
                    checked: option.selected,
                    onchange: move |_| {
                        let _ = attempt.write().answer(index);
                    },
                }
                " {option.letter}) {option.text}"
            }
        }
    }
}

#[component]
fn QuizResults(course_id: String, attempt: Signal<QuizAttempt>) -> Element {
    let navigator = use_navigator();
    let Some(score) = attempt.read().score() else {
        return rsx! {};
    };
    let rows = map_result_rows(&attempt.read().results());
    let passed = score.verdict() == QuizVerdict::Passed;
    let certificate = Route::Certificate {
        course_id: course_id.clone(),
    };
    let lessons = Route::LessonsList { course_id };

    rsx! {
        div { class: "card",
            h3 { "Your score: {score.label()}%" }
            p { "{score.correct} of {score.total} correct" }
            table {
                thead {
                    tr {
                        th { "Question" }
                        th { "Your answer" }
                        th { "Correct answer" }
                    }
                }
                tbody {
                    for row in rows {
                        ResultRow { row }
                    }
                }
            }
            if passed {
                button {
                    onclick: move |_| {
                        let _ = navigator.push(certificate.clone());
                    },
                    "Get your certificate"
                }
            } else {
                p { "You need at least 50% to pass." }
                button {
                    onclick: move |_| {
                        let _ = navigator.push(lessons.clone());
                    },
                    "Back to lessons"
                }
            }
        }
    }
}

#[component]
fn ResultRow(row: ResultRowVm) -> Element {
    let class = if row.is_correct { "banner-ok" } else { "banner-error" };
    rsx! {
        tr { class: "{class}",
            td { "{row.text}" }
            td { "{row.chosen_label}" }
            td { "{row.correct_label}" }
        }
    }
}
