#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod auth_service;
pub mod authoring;
pub mod catalog_service;
pub mod certificate_service;
pub mod config;
pub mod error;
pub mod lessons;
pub mod questions;
pub mod quiz;
pub mod video;

pub use learningstack_core::Clock;

pub use api::{HttpApi, InMemoryApi, LearningApi};
pub use app_services::AppServices;
pub use auth_service::{AdminLogin, AuthService};
pub use authoring::{AuthoringService, CourseAuthoring, CourseEditor};
pub use catalog_service::{CatalogService, LessonListing};
pub use certificate_service::CertificateService;
pub use config::ApiConfig;
pub use error::{
    ApiError, AppServicesError, AuthError, AuthoringError, CertificateServiceError,
    QuestionServiceError, QuizError, QuizServiceError, RequestFailed,
};
pub use lessons::LessonProgress;
pub use questions::{QuestionManager, QuestionService};
pub use quiz::{QuizAttempt, QuizPhase, QuizService};
