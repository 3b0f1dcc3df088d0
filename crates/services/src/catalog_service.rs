use std::sync::Arc;

use learningstack_core::model::{CourseId, Lesson};
use storage::repository::Storage;

use crate::api::{CourseSummary, LearningApi};
use crate::error::RequestFailed;

/// Read-only course browsing for the home page, the dashboard and lesson
/// lists.
#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn LearningApi>,
    storage: Storage,
}

/// Lessons of a course as shown on the lesson list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonListing {
    pub course_title: Option<String>,
    pub lessons: Vec<Lesson>,
}

impl CatalogService {
    #[must_use]
    pub fn new(api: Arc<dyn LearningApi>, storage: Storage) -> Self {
        Self { api, storage }
    }

    // Lesson and course reads work without a session.
    async fn token(&self) -> Option<String> {
        self.storage.token().await.ok().flatten()
    }

    /// # Errors
    ///
    /// Returns `RequestFailed` when the course list cannot be fetched.
    pub async fn list_courses(&self) -> Result<Vec<CourseSummary>, RequestFailed> {
        self.api
            .list_courses()
            .await
            .map_err(|err| err.with_fallback("Failed to load courses."))
    }

    /// Course title, or `None` when it cannot be fetched.
    pub async fn course_title(&self, course: &CourseId) -> Option<String> {
        let token = self.token().await;
        self.api
            .get_course(token.as_deref(), course)
            .await
            .ok()
            .map(|course| course.title)
            .filter(|title| !title.is_empty())
    }

    /// # Errors
    ///
    /// Returns `RequestFailed` when the lessons cannot be fetched.
    pub async fn lessons(&self, course: &CourseId) -> Result<LessonListing, RequestFailed> {
        let token = self.token().await;
        let listed = self
            .api
            .list_lessons(token.as_deref(), course)
            .await
            .map_err(|err| err.with_fallback("Failed to load lessons."))?;
        Ok(LessonListing {
            course_title: listed.course_title,
            lessons: listed.lessons,
        })
    }
}
