//! Local route-guard decisions. Nothing here talks to the server: the guard
//! trusts whatever token and user record the client has stored.

use std::time::Duration;

use crate::model::User;

pub const ADMIN_LOGIN_PATH: &str = "/admin/login";
pub const ADMIN_HOME_PATH: &str = "/admin/dashboard";
pub const STUDENT_LOGIN_PATH: &str = "/login";

/// Admin pages sign the user out after this long on the page.
pub const ADMIN_SESSION_TIMEOUT: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    Redirect(&'static str),
}

impl AccessDecision {
    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self, AccessDecision::Granted)
    }
}

/// Admin routes render only with a non-empty token and an admin user.
#[must_use]
pub fn admin_access(token: Option<&str>, user: Option<&User>) -> AccessDecision {
    let has_token = token.is_some_and(|t| !t.is_empty());
    match user {
        Some(user) if has_token && user.is_admin() => AccessDecision::Granted,
        _ => AccessDecision::Redirect(ADMIN_LOGIN_PATH),
    }
}

/// Profile pages need a stored user record.
#[must_use]
pub fn student_access(user: Option<&User>) -> AccessDecision {
    match user {
        Some(_) => AccessDecision::Granted,
        None => AccessDecision::Redirect(STUDENT_LOGIN_PATH),
    }
}

/// Where a freshly logged-in user lands from the admin login form.
#[must_use]
pub fn admin_login_destination(user: &User) -> &'static str {
    if user.is_admin() {
        ADMIN_HOME_PATH
    } else {
        ADMIN_LOGIN_PATH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> User {
        User {
            name: "Ada".into(),
            role: role.into(),
            ..User::default()
        }
    }

    #[test]
    fn admin_with_token_is_granted() {
        let admin = user("admin");
        assert_eq!(admin_access(Some("tok"), Some(&admin)), AccessDecision::Granted);
    }

    #[test]
    fn anything_less_redirects_to_admin_login() {
        let admin = user("admin");
        let student = user("student");
        let redirect = AccessDecision::Redirect(ADMIN_LOGIN_PATH);

        assert_eq!(admin_access(None, Some(&admin)), redirect);
        assert_eq!(admin_access(Some(""), Some(&admin)), redirect);
        assert_eq!(admin_access(Some("tok"), None), redirect);
        assert_eq!(admin_access(Some("tok"), Some(&student)), redirect);
        assert_eq!(admin_access(None, None), redirect);
    }

    #[test]
    fn student_pages_need_a_user() {
        assert!(student_access(Some(&user("student"))).is_granted());
        assert_eq!(
            student_access(None),
            AccessDecision::Redirect(STUDENT_LOGIN_PATH)
        );
    }

    #[test]
    fn admin_login_routes_by_role() {
        assert_eq!(admin_login_destination(&user("admin")), ADMIN_HOME_PATH);
        assert_eq!(admin_login_destination(&user("student")), ADMIN_LOGIN_PATH);
    }
}
