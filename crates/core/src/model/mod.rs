mod certificate;
mod course;
mod ids;
mod lesson;
mod question;
mod user;

pub use ids::{CourseId, LessonId, OptionId, ParseIdError, QuestionId};

pub use certificate::{
    CERTIFICATE_ID_ALPHABET, CERTIFICATE_ID_LEN, CERTIFICATE_ID_PREFIX, Certificate,
    CertificateError, CertificateId, UNKNOWN_COURSE,
};
pub use course::{Course, CourseDetails, CourseDraft, CourseError};
pub use lesson::{
    Lesson, LessonDraft, LessonError, LessonUpload, MAX_VIDEO_BYTES, VideoError, VideoFile,
    duration_minutes, title_from_file_name,
};
pub use question::{
    AnswerOption, OPTION_COUNT, OptionDraft, Question, QuestionDraft, QuestionError,
    ValidQuestion,
};
pub use user::{ADMIN_ROLE, Credentials, ProfileUpdate, Session, SignupDraft, User};
