//! Shared error types for the services crate.

use thiserror::Error;

use learningstack_core::model::{
    CertificateError, CourseError, LessonError, QuestionError, VideoError,
};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `LearningApi` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("request failed with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },
    #[error("network error: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("could not read local file: {0}")]
    LocalFile(String),
}

impl ApiError {
    /// The server's `message` when it sent one, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_owned(),
        }
    }

    /// Pairs the error with the text a page should show for it.
    #[must_use]
    pub fn with_fallback(self, fallback: &str) -> RequestFailed {
        RequestFailed {
            message: self.user_message(fallback),
            source: self,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// A failed backend call, displayed as the user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RequestFailed {
    pub message: String,
    #[source]
    pub source: ApiError,
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    /// Login or signup was refused; carries the text to show.
    #[error("{0}")]
    Rejected(String),
    #[error("No token found, please log in.")]
    NotSignedIn,
    #[error(transparent)]
    Request(#[from] RequestFailed),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the course authoring workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthoringError {
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Video(#[from] VideoError),
    #[error("Course already created.")]
    AlreadyCreated,
    #[error("No such lesson module.")]
    UnknownModule,
    #[error("This module is already uploading.")]
    ModuleBusy,
    #[error("This module has already been uploaded.")]
    ModuleLocked,
    #[error("Failed to upload lesson {}", titles.join(", "))]
    UploadsFailed { titles: Vec<String> },
    #[error(transparent)]
    Request(#[from] RequestFailed),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuestionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    #[error(transparent)]
    Invalid(#[from] QuestionError),
    #[error(transparent)]
    Request(#[from] RequestFailed),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by quiz taking.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("No questions available for this course.")]
    NoQuestions,
    #[error("Please select an answer first.")]
    Unanswered,
    #[error("Answer option out of range.")]
    OptionOutOfRange,
    #[error("The quiz has already been submitted.")]
    AlreadySubmitted,
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Request(#[from] RequestFailed),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CertificateService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CertificateServiceError {
    #[error(transparent)]
    Certificate(#[from] CertificateError),
    #[error("could not save certificate: {0}")]
    Io(#[from] std::io::Error),
    #[error("certificate path {0} is outside the download directory")]
    OutsideDownloadDir(std::path::PathBuf),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
