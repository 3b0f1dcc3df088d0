use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use learningstack_core::time::fixed_clock;
use services::{
    AppServices, AuthService, AuthoringService, CatalogService, CertificateService,
    InMemoryApi, QuestionService, QuizService,
};

use crate::context::{UiApp, build_app_context};
use crate::views::{
    AdminDashboardView, AdminGuard, CertificateView, EditCourseView, HomeView, LessonsListView,
    ProfileView, QuestionManagerView, QuizView,
};

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn api_base_url(&self) -> String {
        self.services.config().base_url.clone()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn authoring(&self) -> Arc<AuthoringService> {
        self.services.authoring()
    }

    fn questions(&self) -> Arc<QuestionService> {
        self.services.questions()
    }

    fn quiz(&self) -> Arc<QuizService> {
        self.services.quiz()
    }

    fn certificates(&self) -> Arc<CertificateService> {
        self.services.certificates()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Profile,
    LessonsList(String),
    Quiz(String),
    Certificate(String),
    /// `AdminGuard` wrapping a marker paragraph.
    Guarded,
    AdminDashboard,
    EditCourse(String),
    Questions(String),
}

pub const GUARDED_MARKER: &str = "guarded admin content";

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    #[route("/login")]
    LoginStub {},
    #[route("/admin/login")]
    AdminLoginStub {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Profile => rsx! { ProfileView {} },
        ViewKind::LessonsList(course_id) => rsx! { LessonsListView { course_id } },
        ViewKind::Quiz(course_id) => rsx! { QuizView { course_id } },
        ViewKind::Certificate(course_id) => rsx! { CertificateView { course_id } },
        ViewKind::Guarded => rsx! {
            AdminGuard {
                p { "{GUARDED_MARKER}" }
            }
        },
        ViewKind::AdminDashboard => rsx! { AdminDashboardView {} },
        ViewKind::EditCourse(course_id) => rsx! { EditCourseView { course_id } },
        ViewKind::Questions(course_id) => rsx! { QuestionManagerView { course_id } },
    }
}

#[component]
fn LoginStub() -> Element {
    rsx! { p { "student login page" } }
}

#[component]
fn AdminLoginStub() -> Element {
    rsx! { p { "admin login page" } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// First render plus enough rounds for in-memory resources to resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Services over an in-memory backend. The API handle seeds accounts; the
/// services sign in and create data.
pub fn in_memory_services() -> (AppServices, InMemoryApi) {
    let api = InMemoryApi::new();
    (AppServices::in_memory(api.clone(), fixed_clock()), api)
}

pub fn mount_view(view: ViewKind, services: &AppServices) -> ViewHarness {
    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}
