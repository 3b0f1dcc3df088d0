use dioxus::prelude::*;
use dioxus_router::use_navigator;

use learningstack_core::model::Credentials;

use crate::context::AppContext;
use crate::routes::route_for_path;
use crate::views::{ErrorBanner, ViewError};

#[component]
pub fn AdminLoginView() -> Element {
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
            match auth.admin_login(&credentials).await {
                Ok(login) => {
                    error.set(None);
                    let _ = navigator.push(route_for_path(login.destination));
                }
                Err(err) => error.set(Some(ViewError::from_err(err))),
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "page admin-login",
            h2 { "Admin login" }
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
        }
    }
}
