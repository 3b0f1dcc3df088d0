use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use learningstack_core::access::AccessDecision;
use learningstack_core::model::{Credentials, ProfileUpdate, SignupDraft, User};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ErrorBanner, ViewError, ViewState, view_state_from_resource};

// ─── Login ─────────────────────────────────────────────────────────────────────

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let auth = auth.clone();
        let credentials = Credentials {
            email: email(),
            password: password(),
        };
        busy.set(true);
        spawn(async move {
            match auth.login(&credentials).await {
                Ok(_) => {
                    error.set(None);
                    let _ = navigator.push(Route::Home {});
                }
                Err(err) => error.set(Some(ViewError::from_err(err))),
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "page",
            h2 { "Login" }
            form { onsubmit: submit,
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                button { r#type: "submit", disabled: busy(), "Login" }
            }
            ErrorBanner { error: error() }
            p {
                "No account yet? "
                Link { to: Route::Signup {}, "Sign up" }
            }
        }
    }
}

// ─── Signup ────────────────────────────────────────────────────────────────────

#[component]
pub fn SignupView() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);
    let mut notice = use_signal(|| None::<&'static str>);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let auth = auth.clone();
        let draft = SignupDraft {
            name: name(),
            email: email(),
            phone: phone(),
            password: password(),
        };
        busy.set(true);
        spawn(async move {
            match auth.signup(&draft).await {
                Ok(message) => {
                    error.set(None);
                    notice.set(Some(message));
                }
                Err(err) => error.set(Some(ViewError::from_err(err))),
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "page",
            h2 { "Sign up" }
            form { onsubmit: submit,
                input {
                    placeholder: "Name",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                input {
                    r#type: "tel",
                    placeholder: "Phone",
                    value: "{phone}",
                    oninput: move |evt| phone.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                button { r#type: "submit", disabled: busy(), "Sign up" }
            }
            if let Some(message) = notice() {
                p { class: "banner-ok",
                    "{message} "
                    Link { to: Route::Login {}, "Go to login" }
                }
            }
            ErrorBanner { error: error() }
        }
    }
}

// ─── Profile ───────────────────────────────────────────────────────────────────

/// Loads the stored user, sending visitors without one to the login page.
fn use_signed_in_user() -> Resource<Result<Option<User>, ViewError>> {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();

    use_resource(move || {
        let auth = auth.clone();
        async move {
            let decision = auth.student_access().await.map_err(ViewError::from_err)?;
            if let AccessDecision::Redirect(_) = decision {
                let _ = navigator.replace(Route::Login {});
                return Ok(None);
            }
            auth.current_user().await.map_err(ViewError::from_err)
        }
    })
}

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();
    let resource = use_signed_in_user();
    let mut error = use_signal(|| None::<ViewError>);

    let logout = move |_: MouseEvent| {
        let auth = auth.clone();
        spawn(async move {
            match auth.logout().await {
                Ok(()) => {
                    let _ = navigator.push(Route::Home {});
                }
                Err(err) => error.set(Some(ViewError::from_err(err))),
            }
        });
    };

    rsx! {
        div { class: "page",
            h2 { "Profile" }
            match view_state_from_resource(&resource) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(None) => rsx! {
                    p { class: "muted", "Please log in." }
                },
                ViewState::Ready(Some(user)) => rsx! {
                    div { class: "card",
                        p { "Name: {user.name}" }
                        p { "Email: {user.email}" }
                        p { "Phone: " {user.phone.clone().unwrap_or_default()} }
                    }
                    Link { to: Route::EditProfile {}, "Edit profile" }
                    button { onclick: logout, "Logout" }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "banner-error", "{err.message()}" }
                },
            }
            ErrorBanner { error: error() }
        }
    }
}

#[component]
pub fn EditProfileView() -> Element {
    let resource = use_signed_in_user();

    match view_state_from_resource(&resource) {
        ViewState::Ready(Some(user)) => rsx! {
            EditProfileForm { initial: ProfileUpdate::from_user(&user) }
        },
        ViewState::Error(err) => rsx! {
            div { class: "page",
                p { class: "banner-error", "{err.message()}" }
            }
        },
        _ => rsx! {
            div { class: "page",
                p { "Loading..." }
            }
        },
    }
}

#[component]
fn EditProfileForm(initial: ProfileUpdate) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();

    let mut name = use_signal(|| initial.name.clone());
    let mut phone = use_signal(|| initial.phone.clone());
    let mut error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let auth = auth.clone();
        let update = ProfileUpdate {
            name: name(),
            phone: phone(),
        };
        busy.set(true);
        spawn(async move {
            match auth.update_profile(&update).await {
                Ok(_) => {
                    error.set(None);
                    let _ = navigator.push(Route::Profile {});
                }
                Err(err) => error.set(Some(ViewError::from_err(err))),
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "page",
            h2 { "Edit profile" }
            form { onsubmit: submit,
                input {
                    placeholder: "Name",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                input {
                    r#type: "tel",
                    placeholder: "Phone",
                    value: "{phone}",
                    oninput: move |evt| phone.set(evt.value()),
                }
                button { r#type: "submit", disabled: busy(), "Save" }
            }
            ErrorBanner { error: error() }
        }
    }
}
