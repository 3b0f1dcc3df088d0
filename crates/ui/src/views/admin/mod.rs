//! Admin pages. Everything except the login form renders inside
//! `AdminGuard`.

mod add_course;
mod dashboard;
mod edit_course;
mod guard;
mod login;
mod module_row;
mod questions;

pub use add_course::AddCourseView;
pub use dashboard::AdminDashboardView;
pub use edit_course::EditCourseView;
pub use guard::AdminGuard;
pub use login::AdminLoginView;
pub use questions::QuestionManagerView;
