use std::sync::Arc;

use tracing::debug;

use learningstack_core::model::{CourseId, Question};
use storage::repository::Storage;

use crate::api::LearningApi;
use crate::error::QuizServiceError;

/// Fetches the questions of a quiz once per course.
#[derive(Clone)]
pub struct QuizService {
    api: Arc<dyn LearningApi>,
    storage: Storage,
}

impl QuizService {
    #[must_use]
    pub fn new(api: Arc<dyn LearningApi>, storage: Storage) -> Self {
        Self { api, storage }
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Request` when the fetch fails.
    pub async fn questions(&self, course: &CourseId) -> Result<Vec<Question>, QuizServiceError> {
        let token = self.storage.token().await?;
        let questions = self
            .api
            .list_questions(token.as_deref(), course)
            .await
            .map_err(|err| err.with_fallback("Failed to load quiz questions."))?;
        debug!(course = %course, count = questions.len(), "quiz loaded");
        Ok(questions)
    }
}
