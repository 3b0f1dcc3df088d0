//! The REST backend as one trait, so workflows can run against HTTP or an
//! in-process fake.

use async_trait::async_trait;

use learningstack_core::model::{
    Course, CourseDetails, CourseId, Credentials, Lesson, LessonId, LessonUpload, ProfileUpdate,
    Question, QuestionId, SignupDraft, User, ValidQuestion,
};

use crate::error::ApiError;

mod http;
mod memory;
mod wire;

pub use http::HttpApi;
pub use memory::InMemoryApi;

/// Body of `POST /auth/login`. Student and admin forms read different
/// fields of it, so it is handed over unjudged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginReply {
    pub success: Option<bool>,
    pub token: Option<String>,
    pub user: Option<User>,
    pub message: Option<String>,
}

/// A course in the catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSummary {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub lesson_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCourse {
    pub id: CourseId,
    pub message: Option<String>,
}

/// Lessons of one course, plus the course title when the backend embedded it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseLessons {
    pub course_title: Option<String>,
    pub lessons: Vec<Lesson>,
}

/// Calls of the learning backend. `token` is sent as a bearer header when
/// present.
#[async_trait]
pub trait LearningApi: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, credentials: &Credentials) -> Result<LoginReply, ApiError>;

    /// `POST /auth/signup`; returns the server's message, if any.
    async fn signup(&self, draft: &SignupDraft) -> Result<Option<String>, ApiError>;

    /// `PUT /user/update`; returns the updated user record.
    async fn update_profile(&self, token: &str, update: &ProfileUpdate)
    -> Result<User, ApiError>;

    /// `GET /courses/`
    async fn list_courses(&self) -> Result<Vec<CourseSummary>, ApiError>;

    /// `GET /courses/:id`
    async fn get_course(&self, token: Option<&str>, id: &CourseId) -> Result<Course, ApiError>;

    /// `POST /courses/`
    async fn create_course(
        &self,
        token: Option<&str>,
        details: &CourseDetails,
    ) -> Result<CreatedCourse, ApiError>;

    /// `PUT /courses/:id`
    async fn update_course(
        &self,
        token: Option<&str>,
        id: &CourseId,
        details: &CourseDetails,
    ) -> Result<(), ApiError>;

    /// `DELETE /courses/:id`
    async fn delete_course(&self, token: Option<&str>, id: &CourseId) -> Result<(), ApiError>;

    /// `POST /lessons/uploadLesson` (multipart); returns the new lesson id
    /// when the backend reports one.
    async fn upload_lesson(
        &self,
        token: Option<&str>,
        upload: &LessonUpload,
    ) -> Result<Option<LessonId>, ApiError>;

    /// `GET /lessons/course/:id`
    async fn list_lessons(
        &self,
        token: Option<&str>,
        course: &CourseId,
    ) -> Result<CourseLessons, ApiError>;

    /// `DELETE /lessons/:id`
    async fn delete_lesson(&self, token: Option<&str>, id: &LessonId) -> Result<(), ApiError>;

    /// `GET /questions/course/:id`
    async fn list_questions(
        &self,
        token: Option<&str>,
        course: &CourseId,
    ) -> Result<Vec<Question>, ApiError>;

    /// `GET /questions/:id`
    async fn get_question(&self, token: Option<&str>, id: &QuestionId)
    -> Result<Question, ApiError>;

    /// `POST /questions`
    async fn create_question(
        &self,
        token: Option<&str>,
        course: &CourseId,
        question: &ValidQuestion,
    ) -> Result<(), ApiError>;

    /// `PUT /questions/:id`
    async fn update_question(
        &self,
        token: Option<&str>,
        id: &QuestionId,
        question: &ValidQuestion,
    ) -> Result<(), ApiError>;

    /// `DELETE /questions/:id`
    async fn delete_question(&self, token: Option<&str>, id: &QuestionId)
    -> Result<(), ApiError>;
}
