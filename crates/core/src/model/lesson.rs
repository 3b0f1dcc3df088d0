use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::model::ids::{CourseId, LessonId};

/// Largest video accepted for upload.
pub const MAX_VIDEO_BYTES: u64 = 10 * 1024 * 1024;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VideoError {
    #[error("File size exceeds 10 MB limit")]
    TooLarge { size_bytes: u64 },

    #[error("Could not read video metadata: {0}")]
    Unreadable(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("Please create the course first.")]
    NoCourse,

    #[error("Module title is required.")]
    MissingTitle,

    #[error("Please select a video file for this module.")]
    MissingVideo,
}

//
// ─── VIDEO ─────────────────────────────────────────────────────────────────────
//

/// A local video chosen for upload, with the metadata read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    path: PathBuf,
    file_name: String,
    size_bytes: u64,
    duration: Duration,
}

impl VideoFile {
    /// # Errors
    ///
    /// Returns `VideoError::TooLarge` when `size_bytes` exceeds [`MAX_VIDEO_BYTES`].
    pub fn new(
        path: impl Into<PathBuf>,
        size_bytes: u64,
        duration: Duration,
    ) -> Result<Self, VideoError> {
        if size_bytes > MAX_VIDEO_BYTES {
            return Err(VideoError::TooLarge { size_bytes });
        }
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path,
            file_name,
            size_bytes,
            duration,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        duration_minutes(self.duration)
    }
}

/// Whole minutes in `duration`, rounded down.
#[must_use]
pub fn duration_minutes(duration: Duration) -> u32 {
    u32::try_from(duration.as_secs() / 60).unwrap_or(u32::MAX)
}

/// File name with its last extension removed; `intro.final.mp4` → `intro.final`.
#[must_use]
pub fn title_from_file_name(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(0) | None => file_name.to_owned(),
        Some(dot) => file_name[..dot].to_owned(),
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// One lesson module of the authoring form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonDraft {
    pub title: String,
    pub video: Option<VideoFile>,
    pub order: u32,
}

/// Everything needed for a multipart lesson upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonUpload {
    pub course_id: CourseId,
    pub title: String,
    pub content: String,
    pub duration_minutes: u32,
    pub order: u32,
    pub video: VideoFile,
}

impl LessonDraft {
    /// Checks the module against the course it will be uploaded to. The course
    /// is checked first, so a missing course wins over any form problem.
    ///
    /// # Errors
    ///
    /// Returns the first failing `LessonError`.
    pub fn validate(&self, course: Option<&CourseId>) -> Result<LessonUpload, LessonError> {
        let course_id = course.ok_or(LessonError::NoCourse)?;
        if self.title.trim().is_empty() {
            return Err(LessonError::MissingTitle);
        }
        let video = self.video.as_ref().ok_or(LessonError::MissingVideo)?;

        Ok(LessonUpload {
            course_id: course_id.clone(),
            title: self.title.clone(),
            content: String::new(),
            duration_minutes: video.duration_minutes(),
            order: self.order,
            video: video.clone(),
        })
    }
}

//
// ─── ENTITY ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub video_url: Option<String>,
    pub duration_minutes: u32,
    pub order: u32,
    pub is_free: bool,
    pub course_id: Option<CourseId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(minutes: u64) -> VideoFile {
        VideoFile::new("/tmp/intro.mp4", 1024, Duration::from_secs(minutes * 60 + 59)).unwrap()
    }

    #[test]
    fn oversized_video_is_rejected() {
        let err = VideoFile::new("big.mp4", MAX_VIDEO_BYTES + 1, Duration::ZERO).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds 10 MB limit");
        assert!(VideoFile::new("ok.mp4", MAX_VIDEO_BYTES, Duration::ZERO).is_ok());
    }

    #[test]
    fn duration_rounds_down_to_minutes() {
        assert_eq!(duration_minutes(Duration::from_secs(59)), 0);
        assert_eq!(duration_minutes(Duration::from_secs(125)), 2);
        assert_eq!(video(5).duration_minutes(), 5);
    }

    #[test]
    fn title_strips_only_last_extension() {
        assert_eq!(title_from_file_name("intro.mp4"), "intro");
        assert_eq!(title_from_file_name("part.one.mov"), "part.one");
        assert_eq!(title_from_file_name("README"), "README");
        assert_eq!(title_from_file_name(".hidden"), ".hidden");
    }

    #[test]
    fn file_name_comes_from_path() {
        assert_eq!(video(1).file_name(), "intro.mp4");
    }

    #[test]
    fn missing_course_is_reported_before_form_errors() {
        let draft = LessonDraft::default();
        assert_eq!(draft.validate(None), Err(LessonError::NoCourse));

        let full = LessonDraft {
            title: "Intro".into(),
            video: Some(video(5)),
            order: 1,
        };
        assert_eq!(full.validate(None), Err(LessonError::NoCourse));
    }

    #[test]
    fn title_then_video_are_required() {
        let course = CourseId::new("c1");
        let mut draft = LessonDraft {
            title: " ".into(),
            video: None,
            order: 1,
        };
        assert_eq!(draft.validate(Some(&course)), Err(LessonError::MissingTitle));

        draft.title = "Intro".into();
        assert_eq!(draft.validate(Some(&course)), Err(LessonError::MissingVideo));

        draft.video = Some(video(5));
        let upload = draft.validate(Some(&course)).unwrap();
        assert_eq!(upload.course_id, course);
        assert_eq!(upload.duration_minutes, 5);
        assert_eq!(upload.order, 1);
        assert!(upload.content.is_empty());
    }
}
