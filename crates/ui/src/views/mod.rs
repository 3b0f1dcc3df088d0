mod account;
mod admin;
mod certificate;
mod home;
mod lessons;
mod quiz;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use account::{EditProfileView, LoginView, ProfileView, SignupView};
pub use admin::{
    AddCourseView, AdminDashboardView, AdminGuard, AdminLoginView, EditCourseView,
    QuestionManagerView,
};
pub use certificate::CertificateView;
pub use home::{HomeView, NotFoundView};
pub use lessons::LessonsListView;
pub use quiz::QuizView;
pub use state::{ErrorBanner, ViewError, ViewState, view_state_from_resource};
