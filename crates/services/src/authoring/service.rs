use std::path::Path;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{info, warn};

use learningstack_core::model::{
    CourseDetails, CourseId, LessonId, LessonUpload, VideoFile,
};
use storage::repository::Storage;

use super::editor::CourseEditor;
use super::module::UploadOutcome;
use crate::api::{CreatedCourse, LearningApi};
use crate::error::AuthoringError;
use crate::video::VideoProbe;

/// Backend calls of the add-course and edit-course pages. Page state lives
/// in `CourseAuthoring` / `CourseEditor`; this service only talks to the API.
#[derive(Clone)]
pub struct AuthoringService {
    api: Arc<dyn LearningApi>,
    storage: Storage,
    probe: Arc<dyn VideoProbe>,
}

impl AuthoringService {
    #[must_use]
    pub fn new(api: Arc<dyn LearningApi>, storage: Storage, probe: Arc<dyn VideoProbe>) -> Self {
        Self {
            api,
            storage,
            probe,
        }
    }

    async fn token(&self) -> Result<Option<String>, AuthoringError> {
        Ok(self.storage.token().await?)
    }

    /// Reads size and duration of a local video.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Video` for oversized or unreadable files.
    pub fn probe_video(&self, path: &Path) -> Result<VideoFile, AuthoringError> {
        Ok(self.probe.probe(path)?)
    }

    /// `POST /courses/` with already validated details.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Request` carrying the server message.
    pub async fn create_course(
        &self,
        details: &CourseDetails,
    ) -> Result<CreatedCourse, AuthoringError> {
        let token = self.token().await?;
        let created = self
            .api
            .create_course(token.as_deref(), details)
            .await
            .map_err(|err| err.with_fallback("An error occurred while creating the course."))?;
        info!(course = %created.id, "course created");
        Ok(created)
    }

    /// Uploads one prepared lesson module.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Request` carrying the server message.
    pub async fn upload_lesson(
        &self,
        upload: &LessonUpload,
    ) -> Result<Option<LessonId>, AuthoringError> {
        let token = self.token().await?;
        let lesson_id = self
            .api
            .upload_lesson(token.as_deref(), upload)
            .await
            .map_err(|err| err.with_fallback("An error occurred while uploading the module."))?;
        info!(course = %upload.course_id, order = upload.order, "lesson uploaded");
        Ok(lesson_id)
    }

    /// Loads a course and its lessons into an editor.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Request` when either call fails.
    pub async fn load_editor(&self, course_id: &CourseId) -> Result<CourseEditor, AuthoringError> {
        const LOAD_FAILED: &str = "Failed to load course data. Please try again.";
        let token = self.token().await?;
        let course = self
            .api
            .get_course(token.as_deref(), course_id)
            .await
            .map_err(|err| err.with_fallback(LOAD_FAILED))?;
        let lessons = self
            .api
            .list_lessons(token.as_deref(), course_id)
            .await
            .map_err(|err| err.with_fallback(LOAD_FAILED))?;
        Ok(CourseEditor::new(&course, lessons.lessons))
    }

    /// # Errors
    ///
    /// Returns `AuthoringError::Request` when the server refuses the delete.
    pub async fn delete_lesson(&self, lesson: &LessonId) -> Result<(), AuthoringError> {
        let token = self.token().await?;
        self.api
            .delete_lesson(token.as_deref(), lesson)
            .await
            .map_err(|err| err.with_fallback("Failed to delete lesson"))?;
        info!(lesson = %lesson, "lesson deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AuthoringError::Request` when the server refuses the delete.
    pub async fn delete_course(&self, course: &CourseId) -> Result<(), AuthoringError> {
        let token = self.token().await?;
        self.api
            .delete_course(token.as_deref(), course)
            .await
            .map_err(|err| err.with_fallback("Failed to delete course"))?;
        info!(course = %course, "course deleted");
        Ok(())
    }

    /// Updates the course, then uploads every pending module concurrently.
    /// Each upload completes on its own; failures come back as
    /// `UploadOutcome::Failed` and nothing is rolled back.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Request` when the course update fails, in
    /// which case no upload is started.
    pub async fn save_edits(
        &self,
        course_id: &CourseId,
        details: &CourseDetails,
        pending: Vec<(u32, LessonUpload)>,
    ) -> Result<Vec<(u32, UploadOutcome)>, AuthoringError> {
        let token = self.token().await?;
        self.api
            .update_course(token.as_deref(), course_id, details)
            .await
            .map_err(|err| err.with_fallback("Failed to update course details"))?;
        info!(course = %course_id, uploads = pending.len(), "course updated");

        let keys: Vec<u32> = pending.iter().map(|(key, _)| *key).collect();
        let mut uploads = JoinSet::new();
        for (key, upload) in pending {
            let api = Arc::clone(&self.api);
            let token = token.clone();
            uploads.spawn(async move {
                let outcome = match api.upload_lesson(token.as_deref(), &upload).await {
                    Ok(lesson_id) => UploadOutcome::Uploaded(lesson_id),
                    Err(err) => {
                        warn!(lesson = %upload.title, error = %err, "lesson upload failed");
                        UploadOutcome::Failed
                    }
                };
                (key, outcome)
            });
        }

        let mut outcomes = Vec::with_capacity(keys.len());
        while let Some(joined) = uploads.join_next().await {
            match joined {
                Ok(result) => outcomes.push(result),
                Err(err) => warn!(error = %err, "upload task did not finish"),
            }
        }
        // A task that died without reporting counts as failed.
        for key in keys {
            if !outcomes.iter().any(|(done, _)| *done == key) {
                outcomes.push((key, UploadOutcome::Failed));
            }
        }
        outcomes.sort_by_key(|(key, _)| *key);
        Ok(outcomes)
    }
}
