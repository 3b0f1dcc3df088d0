use std::collections::HashSet;

use learningstack_core::model::{
    Course, CourseDetails, CourseDraft, CourseId, Lesson, LessonId, LessonUpload, VideoFile,
};

use super::module::{LessonModule, UploadOutcome};
use crate::error::AuthoringError;

/// State of the edit-course page: the course form, lessons already on the
/// server and new modules waiting for the save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseEditor {
    course_id: CourseId,
    course: CourseDraft,
    existing: Vec<Lesson>,
    new_modules: Vec<LessonModule>,
    deleting: HashSet<LessonId>,
    saving: bool,
}

impl CourseEditor {
    /// Existing lessons are kept sorted by order.
    #[must_use]
    pub fn new(course: &Course, mut lessons: Vec<Lesson>) -> Self {
        lessons.sort_by_key(|lesson| lesson.order);
        Self {
            course_id: course.id.clone(),
            course: CourseDraft::new(course.title.clone(), course.description.clone()),
            existing: lessons,
            new_modules: Vec::new(),
            deleting: HashSet::new(),
            saving: false,
        }
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    #[must_use]
    pub fn course(&self) -> &CourseDraft {
        &self.course
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.course.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.course.description = description.into();
    }

    #[must_use]
    pub fn existing_lessons(&self) -> &[Lesson] {
        &self.existing
    }

    #[must_use]
    pub fn new_modules(&self) -> &[LessonModule] {
        &self.new_modules
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub fn is_deleting(&self, lesson: &LessonId) -> bool {
        self.deleting.contains(lesson)
    }

    /// Adds a module ordered after every existing lesson and new module.
    pub fn add_module(&mut self) -> u32 {
        let highest = self
            .existing
            .iter()
            .map(|lesson| lesson.order)
            .chain(self.new_modules.iter().map(LessonModule::key))
            .max()
            .unwrap_or(0);
        let key = highest.saturating_add(1);
        self.new_modules.push(LessonModule::new(key));
        key
    }

    /// Drops a module that was never uploaded. No server call is involved.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::UnknownModule` for unknown keys and
    /// `AuthoringError::ModuleBusy` while the module is uploading.
    pub fn remove_module(&mut self, key: u32) -> Result<(), AuthoringError> {
        let module = self.module(key)?;
        if module.is_uploading() {
            return Err(AuthoringError::ModuleBusy);
        }
        self.new_modules.retain(|module| module.key() != key);
        Ok(())
    }

    fn module(&self, key: u32) -> Result<&LessonModule, AuthoringError> {
        self.new_modules
            .iter()
            .find(|module| module.key() == key)
            .ok_or(AuthoringError::UnknownModule)
    }

    fn module_mut(&mut self, key: u32) -> Result<&mut LessonModule, AuthoringError> {
        self.new_modules
            .iter_mut()
            .find(|module| module.key() == key)
            .ok_or(AuthoringError::UnknownModule)
    }

    /// # Errors
    ///
    /// Fails for unknown keys and for modules already uploading.
    pub fn set_module_title(
        &mut self,
        key: u32,
        title: impl Into<String>,
    ) -> Result<(), AuthoringError> {
        self.module_mut(key)?.set_title(title)
    }

    /// # Errors
    ///
    /// Fails for unknown keys and for modules already uploading.
    pub fn select_video(&mut self, key: u32, video: VideoFile) -> Result<(), AuthoringError> {
        self.module_mut(key)?.select_video(video)
    }

    /// # Errors
    ///
    /// Fails for unknown keys and for modules already uploading.
    pub fn clear_video(&mut self, key: u32) -> Result<(), AuthoringError> {
        self.module_mut(key)?.clear_video()
    }

    /// Marks a server lesson as being deleted.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::ModuleBusy` when a delete is already running.
    pub fn begin_delete(&mut self, lesson: &LessonId) -> Result<(), AuthoringError> {
        if !self.deleting.insert(lesson.clone()) {
            return Err(AuthoringError::ModuleBusy);
        }
        Ok(())
    }

    /// The lesson leaves the list only when the server confirmed the delete.
    pub fn finish_delete(&mut self, lesson: &LessonId, deleted: bool) {
        self.deleting.remove(lesson);
        if deleted {
            self.existing.retain(|existing| existing.id != *lesson);
        }
    }

    /// Validates the course form and every new module that has a video, then
    /// marks those modules uploading. Modules without a video are skipped.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure; nothing is marked in that case.
    pub fn begin_save(
        &mut self,
    ) -> Result<(CourseDetails, Vec<(u32, LessonUpload)>), AuthoringError> {
        if self.saving {
            return Err(AuthoringError::ModuleBusy);
        }
        let details = self.course.validate()?;

        let mut pending = Vec::new();
        for module in &self.new_modules {
            if module.video().is_none() || module.is_uploaded() {
                continue;
            }
            if module.is_uploading() {
                return Err(AuthoringError::ModuleBusy);
            }
            // Validate on a copy so a later failure leaves every module untouched.
            let upload = module.clone().begin_upload(Some(&self.course_id))?;
            pending.push((module.key(), upload));
        }

        for (key, _) in &pending {
            if let Ok(module) = self.module_mut(*key) {
                module.record_uploading();
            }
        }
        self.saving = true;
        Ok((details, pending))
    }

    /// Applies upload outcomes. Uploaded modules become existing lessons.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::UploadsFailed` naming every module that failed.
    pub fn finish_save(
        &mut self,
        outcomes: Vec<(u32, UploadOutcome)>,
    ) -> Result<(), AuthoringError> {
        self.saving = false;
        let mut failed = Vec::new();
        for (key, outcome) in outcomes {
            let Some(index) = self.new_modules.iter().position(|m| m.key() == key) else {
                continue;
            };
            match outcome {
                UploadOutcome::Uploaded(lesson_id) => {
                    let module = self.new_modules.remove(index);
                    self.existing.push(Lesson {
                        id: lesson_id.unwrap_or_else(|| LessonId::new(format!("local-{key}"))),
                        title: module.title().to_owned(),
                        video_url: None,
                        duration_minutes: module.duration_minutes(),
                        order: key,
                        is_free: false,
                        course_id: Some(self.course_id.clone()),
                    });
                }
                UploadOutcome::Failed => {
                    let module = &mut self.new_modules[index];
                    failed.push(module.title().to_owned());
                    module.record(UploadOutcome::Failed);
                }
            }
        }
        self.existing.sort_by_key(|lesson| lesson.order);

        if failed.is_empty() {
            Ok(())
        } else {
            Err(AuthoringError::UploadsFailed { titles: failed })
        }
    }

    /// Ends a save whose course update failed before any upload started.
    pub fn abort_save(&mut self) {
        self.saving = false;
        for module in &mut self.new_modules {
            if module.is_uploading() {
                module.record(UploadOutcome::Failed);
            }
        }
    }
}
