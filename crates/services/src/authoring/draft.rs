use learningstack_core::model::{
    CourseDetails, CourseDraft, CourseId, LessonError, LessonUpload, VideoFile,
};

use super::module::{LessonModule, UploadOutcome};
use crate::error::AuthoringError;

/// Where a new course stands in the add-course workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthoringPhase {
    /// Title and description still editable; nothing sent yet.
    Draft,
    /// The course exists on the server; no module has started uploading.
    Created,
    /// At least one module is uploading or uploaded, but not all of them.
    ModulesInProgress,
    /// Every module is uploaded.
    Saved,
}

/// State of the add-course page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseAuthoring {
    course: CourseDraft,
    course_id: Option<CourseId>,
    creating: bool,
    modules: Vec<LessonModule>,
}

impl CourseAuthoring {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> AuthoringPhase {
        if self.course_id.is_none() {
            return AuthoringPhase::Draft;
        }
        let started = self
            .modules
            .iter()
            .filter(|module| module.is_uploading() || module.is_uploaded())
            .count();
        if !self.modules.is_empty() && self.modules.iter().all(LessonModule::is_uploaded) {
            AuthoringPhase::Saved
        } else if started > 0 {
            AuthoringPhase::ModulesInProgress
        } else {
            AuthoringPhase::Created
        }
    }

    #[must_use]
    pub fn course(&self) -> &CourseDraft {
        &self.course
    }

    #[must_use]
    pub fn course_id(&self) -> Option<&CourseId> {
        self.course_id.as_ref()
    }

    #[must_use]
    pub fn is_creating(&self) -> bool {
        self.creating
    }

    #[must_use]
    pub fn modules(&self) -> &[LessonModule] {
        &self.modules
    }

    /// # Errors
    ///
    /// Returns `AuthoringError::AlreadyCreated` once the course exists.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), AuthoringError> {
        self.ensure_draft()?;
        self.course.title = title.into();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AuthoringError::AlreadyCreated` once the course exists.
    pub fn set_description(&mut self, description: impl Into<String>) -> Result<(), AuthoringError> {
        self.ensure_draft()?;
        self.course.description = description.into();
        Ok(())
    }

    fn ensure_draft(&self) -> Result<(), AuthoringError> {
        if self.course_id.is_some() || self.creating {
            return Err(AuthoringError::AlreadyCreated);
        }
        Ok(())
    }

    /// Validates the course form and marks creation in flight.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::AlreadyCreated` when the course exists or is
    /// being created, and `AuthoringError::Course` when a field is blank.
    pub fn begin_create(&mut self) -> Result<CourseDetails, AuthoringError> {
        self.ensure_draft()?;
        let details = self.course.validate()?;
        self.creating = true;
        Ok(details)
    }

    /// Records the outcome of the create-course call. `None` returns the
    /// form to the draft phase.
    pub fn finish_create(&mut self, course_id: Option<CourseId>) {
        self.creating = false;
        self.course_id = course_id;
    }

    /// Appends a module whose key is its 1-based position.
    pub fn add_module(&mut self) -> u32 {
        let key = u32::try_from(self.modules.len())
            .unwrap_or(u32::MAX)
            .saturating_add(1);
        self.modules.push(LessonModule::new(key));
        key
    }

    fn module_mut(&mut self, key: u32) -> Result<&mut LessonModule, AuthoringError> {
        self.modules
            .iter_mut()
            .find(|module| module.key() == key)
            .ok_or(AuthoringError::UnknownModule)
    }

    /// # Errors
    ///
    /// Fails for unknown keys and for modules already uploading or uploaded.
    pub fn set_module_title(&mut self, key: u32, title: impl Into<String>) -> Result<(), AuthoringError> {
        self.module_mut(key)?.set_title(title)
    }

    /// # Errors
    ///
    /// Fails for unknown keys and for modules already uploading or uploaded.
    pub fn select_video(&mut self, key: u32, video: VideoFile) -> Result<(), AuthoringError> {
        self.module_mut(key)?.select_video(video)
    }

    /// # Errors
    ///
    /// Fails for unknown keys and for modules already uploading or uploaded.
    pub fn clear_video(&mut self, key: u32) -> Result<(), AuthoringError> {
        self.module_mut(key)?.clear_video()
    }

    /// Validates one module for upload and marks it uploading. A missing
    /// course is reported before anything about the module itself.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Lesson` for validation failures,
    /// `AuthoringError::ModuleBusy` when the module is already uploading and
    /// `AuthoringError::UnknownModule` for unknown keys.
    pub fn prepare_upload(&mut self, key: u32) -> Result<LessonUpload, AuthoringError> {
        if self.course_id.is_none() {
            return Err(LessonError::NoCourse.into());
        }
        let course_id = self.course_id.clone();
        self.module_mut(key)?.begin_upload(course_id.as_ref())
    }

    /// Records the outcome of one module upload.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::UnknownModule` for unknown keys.
    pub fn finish_upload(
        &mut self,
        key: u32,
        outcome: UploadOutcome,
    ) -> Result<(), AuthoringError> {
        self.module_mut(key)?.record(outcome);
        Ok(())
    }
}
