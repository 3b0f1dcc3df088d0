use learningstack_core::model::{
    CourseId, LessonDraft, LessonId, LessonUpload, VideoFile, title_from_file_name,
};

use crate::error::AuthoringError;

/// Upload progress of one lesson module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    UnselectedVideo,
    VideoSelected,
    Uploading,
    Uploaded,
}

/// Result of one upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded(Option<LessonId>),
    Failed,
}

/// A lesson row of the authoring form. `key` is its local, 1-based id and
/// doubles as the upload order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonModule {
    key: u32,
    draft: LessonDraft,
    state: ModuleState,
    lesson_id: Option<LessonId>,
}

impl LessonModule {
    #[must_use]
    pub fn new(key: u32) -> Self {
        Self {
            key,
            draft: LessonDraft {
                order: key,
                ..LessonDraft::default()
            },
            state: ModuleState::UnselectedVideo,
            lesson_id: None,
        }
    }

    #[must_use]
    pub fn key(&self) -> u32 {
        self.key
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.draft.title
    }

    #[must_use]
    pub fn video(&self) -> Option<&VideoFile> {
        self.draft.video.as_ref()
    }

    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.video().map_or(0, VideoFile::duration_minutes)
    }

    #[must_use]
    pub fn state(&self) -> ModuleState {
        self.state
    }

    #[must_use]
    pub fn lesson_id(&self) -> Option<&LessonId> {
        self.lesson_id.as_ref()
    }

    #[must_use]
    pub fn is_uploaded(&self) -> bool {
        self.state == ModuleState::Uploaded
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.state == ModuleState::Uploading
    }

    fn ensure_editable(&self) -> Result<(), AuthoringError> {
        match self.state {
            ModuleState::Uploading => Err(AuthoringError::ModuleBusy),
            ModuleState::Uploaded => Err(AuthoringError::ModuleLocked),
            ModuleState::UnselectedVideo | ModuleState::VideoSelected => Ok(()),
        }
    }

    /// # Errors
    ///
    /// Fails once the module is uploading or uploaded.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), AuthoringError> {
        self.ensure_editable()?;
        self.draft.title = title.into();
        Ok(())
    }

    /// Attach a probed video. An empty title defaults to the file stem.
    ///
    /// # Errors
    ///
    /// Fails once the module is uploading or uploaded.
    pub fn select_video(&mut self, video: VideoFile) -> Result<(), AuthoringError> {
        self.ensure_editable()?;
        if self.draft.title.trim().is_empty() {
            self.draft.title = title_from_file_name(video.file_name());
        }
        self.draft.video = Some(video);
        self.state = ModuleState::VideoSelected;
        Ok(())
    }

    /// # Errors
    ///
    /// Fails once the module is uploading or uploaded.
    pub fn clear_video(&mut self) -> Result<(), AuthoringError> {
        self.ensure_editable()?;
        self.draft.video = None;
        self.state = ModuleState::UnselectedVideo;
        Ok(())
    }

    /// Validates against `course` and marks the module uploading.
    pub(crate) fn begin_upload(
        &mut self,
        course: Option<&CourseId>,
    ) -> Result<LessonUpload, AuthoringError> {
        self.ensure_editable()?;
        let upload = self.draft.validate(course)?;
        self.state = ModuleState::Uploading;
        Ok(upload)
    }

    pub(crate) fn record_uploading(&mut self) {
        self.state = ModuleState::Uploading;
    }

    pub(crate) fn record(&mut self, outcome: UploadOutcome) {
        match outcome {
            UploadOutcome::Uploaded(lesson_id) => {
                self.lesson_id = lesson_id;
                self.state = ModuleState::Uploaded;
            }
            UploadOutcome::Failed => {
                self.state = if self.draft.video.is_some() {
                    ModuleState::VideoSelected
                } else {
                    ModuleState::UnselectedVideo
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn video(name: &str) -> VideoFile {
        VideoFile::new(name, 10, Duration::from_secs(301)).unwrap()
    }

    #[test]
    fn selecting_video_defaults_empty_title() {
        let mut module = LessonModule::new(1);
        module.select_video(video("/v/intro.mp4")).unwrap();
        assert_eq!(module.title(), "intro");
        assert_eq!(module.state(), ModuleState::VideoSelected);
        assert_eq!(module.duration_minutes(), 5);
    }

    #[test]
    fn selecting_video_keeps_typed_title() {
        let mut module = LessonModule::new(1);
        module.set_title("Welcome").unwrap();
        module.select_video(video("/v/intro.mp4")).unwrap();
        assert_eq!(module.title(), "Welcome");
    }

    #[test]
    fn clearing_video_returns_to_unselected() {
        let mut module = LessonModule::new(2);
        module.select_video(video("a.mp4")).unwrap();
        module.clear_video().unwrap();
        assert_eq!(module.state(), ModuleState::UnselectedVideo);
        assert_eq!(module.duration_minutes(), 0);
    }

    #[test]
    fn uploading_module_refuses_a_second_upload() {
        let course = CourseId::new("c1");
        let mut module = LessonModule::new(1);
        module.select_video(video("a.mp4")).unwrap();
        module.begin_upload(Some(&course)).unwrap();
        assert!(matches!(
            module.begin_upload(Some(&course)),
            Err(AuthoringError::ModuleBusy)
        ));
    }

    #[test]
    fn uploaded_title_is_locked() {
        let course = CourseId::new("c1");
        let mut module = LessonModule::new(1);
        module.select_video(video("a.mp4")).unwrap();
        module.begin_upload(Some(&course)).unwrap();
        module.record(UploadOutcome::Uploaded(Some(LessonId::new("l1"))));
        assert!(module.is_uploaded());
        assert!(matches!(
            module.set_title("changed"),
            Err(AuthoringError::ModuleLocked)
        ));
    }

    #[test]
    fn failed_upload_returns_to_video_selected() {
        let course = CourseId::new("c1");
        let mut module = LessonModule::new(1);
        module.select_video(video("a.mp4")).unwrap();
        module.begin_upload(Some(&course)).unwrap();
        module.record(UploadOutcome::Failed);
        assert_eq!(module.state(), ModuleState::VideoSelected);
    }
}
