use std::sync::Arc;

use services::{
    AuthService, AuthoringService, CatalogService, CertificateService, QuestionService,
    QuizService,
};

/// What the views need from the composition root.
pub trait UiApp: Send + Sync {
    /// Base URL of the REST API, used to resolve lesson video paths.
    fn api_base_url(&self) -> String;

    fn auth(&self) -> Arc<AuthService>;
    fn catalog(&self) -> Arc<CatalogService>;
    fn authoring(&self) -> Arc<AuthoringService>;
    fn questions(&self) -> Arc<QuestionService>;
    fn quiz(&self) -> Arc<QuizService>;
    fn certificates(&self) -> Arc<CertificateService>;
}

#[derive(Clone)]
pub struct AppContext {
    api_base_url: String,
    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
    authoring: Arc<AuthoringService>,
    questions: Arc<QuestionService>,
    quiz: Arc<QuizService>,
    certificates: Arc<CertificateService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            api_base_url: app.api_base_url(),
            auth: app.auth(),
            catalog: app.catalog(),
            authoring: app.authoring(),
            questions: app.questions(),
            quiz: app.quiz(),
            certificates: app.certificates(),
        }
    }

    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
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

// Provided by the composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
