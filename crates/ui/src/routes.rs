use std::str::FromStr;

use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use crate::context::AppContext;
use crate::views::{
    AddCourseView, AdminDashboardView, AdminGuard, AdminLoginView, CertificateView,
    EditCourseView, EditProfileView, HomeView, LessonsListView, LoginView, NotFoundView,
    ProfileView, QuestionManagerView, QuizView, SignupView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(StudentLayout)]
        #[route("/", HomeView)] Home {},
        #[route("/login", LoginView)] Login {},
        #[route("/signup", SignupView)] Signup {},
        #[route("/profile", ProfileView)] Profile {},
        #[route("/edit-profile", EditProfileView)] EditProfile {},
        #[route("/lessonslist/:course_id", LessonsListView)] LessonsList { course_id: String },
        #[route("/QuizPage/:course_id", QuizView)] Quiz { course_id: String },
        #[route("/CertificateGenerator/:course_id", CertificateView)] Certificate { course_id: String },
    #[end_layout]
    #[route("/admin/login", AdminLoginView)] AdminLogin {},
    #[redirect("/admin", || Route::AdminDashboard {})]
    #[layout(AdminLayout)]
        #[route("/admin/dashboard", AdminDashboardView)] AdminDashboard {},
        #[route("/admin/courses", AddCourseView)] AddCourse {},
        #[route("/admin/editcourse/:course_id", EditCourseView)] EditCourse { course_id: String },
        #[route("/admin/question/:course_id", QuestionManagerView)] AdminQuestions { course_id: String },
    #[end_layout]
    #[route("/:..segments", NotFoundView)] NotFound { segments: Vec<String> },
}

/// Maps a path from the access rules to a route.
#[must_use]
pub fn route_for_path(path: &str) -> Route {
    Route::from_str(path).unwrap_or(Route::AdminLogin {})
}

#[component]
fn StudentLayout() -> Element {
    rsx! {
        div { class: "student",
            TopBar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn TopBar() -> Element {
    rsx! {
        nav { class: "topbar",
            strong { "Learningstack" }
            Link { to: Route::Home {}, "Courses" }
            Link { to: Route::Profile {}, "Profile" }
            Link { to: Route::Login {}, "Login" }
            Link { to: Route::Signup {}, "Signup" }
        }
    }
}

#[component]
fn AdminLayout() -> Element {
    rsx! {
        AdminGuard {
            div { class: "app",
                AdminSidebar {}
                main { class: "content",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn AdminSidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();

    rsx! {
        nav { class: "sidebar",
            h1 { "Admin" }
            ul {
                li { Link { to: Route::AdminDashboard {}, "Dashboard" } }
                li { Link { to: Route::AddCourse {}, "Add course" } }
                li {
                    button {
                        onclick: move |_| {
                            let auth = auth.clone();
                            spawn(async move {
                                if auth.logout().await.is_ok() {
                                    let _ = navigator.replace(Route::AdminLogin {});
                                }
                            });
                        },
                        "Logout"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learningstack_core::access::{ADMIN_HOME_PATH, ADMIN_LOGIN_PATH, STUDENT_LOGIN_PATH};

    #[test]
    fn access_paths_map_to_routes() {
        assert!(route_for_path(ADMIN_LOGIN_PATH) == Route::AdminLogin {});
        assert!(route_for_path(ADMIN_HOME_PATH) == Route::AdminDashboard {});
        assert!(route_for_path(STUDENT_LOGIN_PATH) == Route::Login {});
    }

    #[test]
    fn course_routes_keep_their_paths() {
        let route = Route::Quiz {
            course_id: "c1".into(),
        };
        assert_eq!(route.to_string(), "/QuizPage/c1");
        let route = Route::AdminQuestions {
            course_id: "c1".into(),
        };
        assert_eq!(route.to_string(), "/admin/question/c1");
    }
}
