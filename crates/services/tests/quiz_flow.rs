use learningstack_core::access::{ADMIN_HOME_PATH, AccessDecision};
use learningstack_core::model::{CourseDraft, Credentials, QuestionDraft, User};
use learningstack_core::scoring::QuizVerdict;
use learningstack_core::time::fixed_clock;
use services::{AppServices, InMemoryApi, QuestionManager, QuizAttempt, QuizError};

fn admin() -> User {
    User {
        name: "Root".into(),
        email: "root@example.com".into(),
        role: "admin".into(),
        ..User::default()
    }
}

#[tokio::test]
async fn saved_question_is_answered_for_full_marks() {
    let api = InMemoryApi::new();
    api.add_account("secret", admin());
    let app = AppServices::in_memory(api.clone(), fixed_clock());

    assert!(!app.auth().admin_access().await.unwrap().is_granted());
    let login = app
        .auth()
        .admin_login(&Credentials {
            email: "root@example.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    assert_eq!(login.destination, ADMIN_HOME_PATH);
    assert_eq!(app.auth().admin_access().await.unwrap(), AccessDecision::Granted);

    let details = CourseDraft::new("Math", "Sums").validate().unwrap();
    let course = app.authoring().create_course(&details).await.unwrap().id;

    let mut manager = QuestionManager::new(course.clone(), Vec::new());
    manager.open_new();
    let form = manager.form_mut().unwrap();
    form.draft = QuestionDraft {
        text: "2+2?".into(),
        correct: Some(1),
        ..QuestionDraft::default()
    };
    for (option, text) in form.draft.options.iter_mut().zip(["3", "4", "5", "6"]) {
        option.text = text.into();
    }
    let (editing, valid) = manager.begin_save().unwrap().unwrap();
    let reloaded = app
        .questions()
        .save(&course, editing.as_ref(), &valid)
        .await
        .unwrap();
    manager.finish_save(Some(reloaded));

    let mut attempt = QuizAttempt::new(course.clone());
    attempt.load(app.quiz().questions(&course).await.unwrap());
    assert_eq!(attempt.questions().len(), 1);
    attempt.answer(1).unwrap();
    let score = attempt.submit().unwrap();
    assert_eq!(score.percent(), 100.0);
    assert_eq!(score.verdict(), QuizVerdict::Passed);

    let certificate = app.certificates().issue(&course).await.unwrap();
    assert_eq!(certificate.course_name, "Math");
}

#[tokio::test]
async fn course_without_questions_cannot_be_submitted() {
    let api = InMemoryApi::new();
    let app = AppServices::in_memory(api, fixed_clock());
    let details = CourseDraft::new("Empty", "Nothing").validate().unwrap();
    let course = app.authoring().create_course(&details).await.unwrap().id;

    let mut attempt = QuizAttempt::new(course.clone());
    attempt.load(app.quiz().questions(&course).await.unwrap());
    assert_eq!(attempt.submit(), Err(QuizError::NoQuestions));
}
