use std::time::Duration;

use learningstack_core::model::{
    CourseDraft, CourseId, Credentials, LessonDraft, QuestionDraft, User, VideoFile,
};
use services::{AppServices, QuizError};

use super::test_harness::{GUARDED_MARKER, ViewKind, in_memory_services, mount_view};

fn admin() -> User {
    User {
        name: "Root".into(),
        email: "root@example.com".into(),
        role: "admin".into(),
        ..User::default()
    }
}

async fn sign_in_admin(services: &AppServices) {
    services
        .auth()
        .admin_login(&Credentials {
            email: "root@example.com".into(),
            password: "secret".into(),
        })
        .await
        .expect("admin login");
}

async fn create_course(services: &AppServices, title: &str) -> CourseId {
    let details = CourseDraft::new(title, "About it").validate().unwrap();
    services
        .authoring()
        .create_course(&details)
        .await
        .expect("create course")
        .id
}

async fn add_question(services: &AppServices, course: &CourseId) {
    let mut draft = QuestionDraft {
        text: "2+2?".into(),
        correct: Some(1),
        ..QuestionDraft::default()
    };
    for (option, text) in draft.options.iter_mut().zip(["3", "4", "5", "6"]) {
        option.text = text.into();
    }
    let valid = draft.validate().unwrap();
    services
        .questions()
        .save(course, None, &valid)
        .await
        .expect("save question");
}

#[tokio::test(flavor = "current_thread")]
async fn home_lists_courses() {
    let (services, _api) = in_memory_services();
    create_course(&services, "Rust").await;

    let mut harness = mount_view(ViewKind::Home, &services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Rust"), "missing course title in {html}");
    assert!(html.contains("0 lessons"), "missing lesson count in {html}");
    assert!(html.contains("Open course"), "missing course link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn guard_hides_admin_pages_without_a_session() {
    let (services, _api) = in_memory_services();

    let mut harness = mount_view(ViewKind::Guarded, &services);
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains(GUARDED_MARKER), "guard leaked content: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn guard_hides_admin_pages_from_students() {
    let (services, api) = in_memory_services();
    api.add_account(
        "pw",
        User {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            role: "student".into(),
            ..User::default()
        },
    );
    services
        .auth()
        .login(&Credentials {
            email: "sam@example.com".into(),
            password: "pw".into(),
        })
        .await
        .expect("student login");

    let mut harness = mount_view(ViewKind::Guarded, &services);
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains(GUARDED_MARKER), "guard leaked content: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn guard_renders_admin_pages_for_admins() {
    let (services, api) = in_memory_services();
    api.add_account("secret", admin());
    sign_in_admin(&services).await;

    let mut harness = mount_view(ViewKind::Guarded, &services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains(GUARDED_MARKER), "missing guarded content in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_without_user_shows_no_details() {
    let (services, _api) = in_memory_services();

    let mut harness = mount_view(ViewKind::Profile, &services);
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains("Name:"), "profile rendered without a user: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lessons_list_shows_uploaded_lessons() {
    let (services, _api) = in_memory_services();
    let course = create_course(&services, "Rust").await;
    let draft = LessonDraft {
        title: "Intro".into(),
        video: Some(VideoFile::new("/v/intro.mp4", 1024, Duration::from_secs(300)).unwrap()),
        order: 1,
    };
    let upload = draft.validate(Some(&course)).unwrap();
    services
        .authoring()
        .upload_lesson(&upload)
        .await
        .expect("upload lesson");

    let mut harness = mount_view(ViewKind::LessonsList(course.to_string()), &services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Intro"), "missing lesson in {html}");
    assert!(html.contains("5 min"), "missing duration in {html}");
    assert!(html.contains("Start quiz"), "missing quiz button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_shows_first_question_with_lettered_options() {
    let (services, _api) = in_memory_services();
    let course = create_course(&services, "Math").await;
    add_question(&services, &course).await;

    let mut harness = mount_view(ViewKind::Quiz(course.to_string()), &services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("2+2?"), "missing question in {html}");
    assert!(html.contains("B) 4"), "missing option in {html}");
    assert!(html.contains("Submit"), "single question should offer submit: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_without_questions_says_so() {
    let (services, _api) = in_memory_services();
    let course = create_course(&services, "Empty").await;

    let mut harness = mount_view(ViewKind::Quiz(course.to_string()), &services);
    harness.settle().await;
    let html = harness.render();
    let expected = QuizError::NoQuestions.to_string();
    assert!(html.contains(&expected), "missing {expected} in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn certificate_names_the_course() {
    let (services, _api) = in_memory_services();
    let course = create_course(&services, "Math").await;

    let mut harness = mount_view(ViewKind::Certificate(course.to_string()), &services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Course: Math"), "missing course in {html}");
    assert!(html.contains("Date: 2023-11-14"), "missing date in {html}");
    assert!(html.contains("Download certificate"), "missing download in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_links_each_course() {
    let (services, api) = in_memory_services();
    api.add_account("secret", admin());
    sign_in_admin(&services).await;
    create_course(&services, "Rust").await;

    let mut harness = mount_view(ViewKind::AdminDashboard, &services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Rust"), "missing course in {html}");
    assert!(html.contains("Questions"), "missing questions link in {html}");
    assert!(html.contains("Delete"), "missing delete button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn edit_course_prefills_the_form() {
    let (services, _api) = in_memory_services();
    let course = create_course(&services, "Rust").await;

    let mut harness = mount_view(ViewKind::EditCourse(course.to_string()), &services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Rust"), "missing title in {html}");
    assert!(html.contains("No lessons yet."), "missing empty lessons in {html}");
    assert!(html.contains("Save changes"), "missing save in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_manager_lists_questions() {
    let (services, _api) = in_memory_services();
    let course = create_course(&services, "Math").await;
    add_question(&services, &course).await;

    let mut harness = mount_view(ViewKind::Questions(course.to_string()), &services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Questions: Math"), "missing title in {html}");
    assert!(html.contains("2+2?"), "missing question in {html}");
    assert!(html.contains("Correct: B) 4"), "missing correct label in {html}");
}
