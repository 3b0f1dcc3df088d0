use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::api::{HttpApi, InMemoryApi, LearningApi};
use crate::auth_service::AuthService;
use crate::authoring::AuthoringService;
use crate::catalog_service::CatalogService;
use crate::certificate_service::CertificateService;
use crate::config::ApiConfig;
use crate::error::AppServicesError;
use crate::questions::QuestionService;
use crate::quiz::QuizService;
use crate::video::{Mp4Probe, VideoProbe};

/// Assembles app-facing services over one backend and one client store.
#[derive(Clone)]
pub struct AppServices {
    config: ApiConfig,
    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
    authoring: Arc<AuthoringService>,
    questions: Arc<QuestionService>,
    quiz: Arc<QuizService>,
    certificates: Arc<CertificateService>,
}

impl AppServices {
    /// Build services talking HTTP to `config.base_url`, with the session
    /// kept in `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or HTTP client
    /// setup fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: ApiConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let api: Arc<dyn LearningApi> = Arc::new(HttpApi::new(config.clone())?);
        Ok(Self::with_backend(api, storage, Arc::new(Mp4Probe), clock, config))
    }

    /// Build services over an in-process backend and in-memory storage.
    #[must_use]
    pub fn in_memory(api: InMemoryApi, clock: Clock) -> Self {
        Self::with_backend(
            Arc::new(api),
            Storage::in_memory(),
            Arc::new(Mp4Probe),
            clock,
            ApiConfig::default(),
        )
    }

    #[must_use]
    pub fn with_backend(
        api: Arc<dyn LearningApi>,
        storage: Storage,
        probe: Arc<dyn VideoProbe>,
        clock: Clock,
        config: ApiConfig,
    ) -> Self {
        let auth = Arc::new(AuthService::new(Arc::clone(&api), storage.clone()));
        let catalog = Arc::new(CatalogService::new(Arc::clone(&api), storage.clone()));
        let authoring = Arc::new(AuthoringService::new(
            Arc::clone(&api),
            storage.clone(),
            probe,
        ));
        let questions = Arc::new(QuestionService::new(Arc::clone(&api), storage.clone()));
        let quiz = Arc::new(QuizService::new(Arc::clone(&api), storage.clone()));
        let certificates = Arc::new(CertificateService::new(
            api,
            storage,
            clock,
            config.download_dir.clone(),
        ));

        Self {
            config,
            auth,
            catalog,
            authoring,
            questions,
            quiz,
            certificates,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn authoring(&self) -> Arc<AuthoringService> {
        Arc::clone(&self.authoring)
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn certificates(&self) -> Arc<CertificateService> {
        Arc::clone(&self.certificates)
    }
}
