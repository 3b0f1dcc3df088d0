use dioxus::prelude::*;
use dioxus_router::use_navigator;

use learningstack_core::access::{ADMIN_SESSION_TIMEOUT, AccessDecision};
use services::AuthError;

use crate::context::AppContext;
use crate::routes::{Route, route_for_path};
use crate::views::{ViewError, ViewState, view_state_from_resource};

/// Renders `children` only for a stored admin session. Anyone else is sent
/// to the admin login, and a granted session is signed out after
/// `ADMIN_SESSION_TIMEOUT`.
#[component]
pub fn AdminGuard(children: Element) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();
    let mut expiry_error = use_signal(|| None::<ViewError>);

    let access = {
        let auth = auth.clone();
        use_resource(move || {
            let auth = auth.clone();
            async move {
                let decision = auth.admin_access().await.map_err(ViewError::from_err)?;
                if let AccessDecision::Redirect(path) = decision {
                    let _ = navigator.replace(route_for_path(path));
                }
                Ok(decision)
            }
        })
    };

    use_future(move || {
        let auth = auth.clone();
        async move {
            tokio::time::sleep(ADMIN_SESSION_TIMEOUT).await;
            match after_sign_out(auth.logout().await) {
                Ok(route) => {
                    let _ = navigator.replace(route);
                }
                Err(err) => expiry_error.set(Some(err)),
            }
        }
    });

    if let Some(err) = expiry_error() {
        return rsx! {
            p { class: "banner-error", "{err.message()}" }
        };
    }

    match view_state_from_resource(&access) {
        ViewState::Ready(AccessDecision::Granted) => rsx! { {children} },
        ViewState::Ready(AccessDecision::Redirect(_)) => rsx! {
            p { class: "muted", "Redirecting to admin login..." }
        },
        ViewState::Error(err) => rsx! {
            p { class: "banner-error", "{err.message()}" }
        },
        ViewState::Idle | ViewState::Loading => rsx! {
            p { class: "muted", "Checking access..." }
        },
    }
}

/// Leaves for the admin login only once the stored session is gone.
fn after_sign_out(result: Result<(), AuthError>) -> Result<Route, ViewError> {
    result
        .map(|()| Route::AdminLogin {})
        .map_err(ViewError::from_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_session_goes_to_admin_login() {
        assert!(after_sign_out(Ok(())) == Ok(Route::AdminLogin {}));
    }

    #[test]
    fn failed_sign_out_stays_with_the_error() {
        let outcome = after_sign_out(Err(AuthError::Rejected("storage is locked".into())));
        let message = outcome.err().map(|err| err.message().to_owned());
        assert_eq!(message.as_deref(), Some("storage is locked"));
    }
}
