use std::sync::Arc;

use tracing::info;

use learningstack_core::access::{self, AccessDecision};
use learningstack_core::model::{Credentials, ProfileUpdate, Session, SignupDraft, User};
use storage::repository::Storage;

use crate::api::LearningApi;
use crate::error::AuthError;

pub const SIGNUP_SUCCESS: &str = "Signup successful! Please login.";

/// Outcome of the admin login form.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminLogin {
    pub user: User,
    /// `/admin/dashboard` for admins, `/admin/login` for everyone else.
    pub destination: &'static str,
}

/// Login, signup, profile and the local session flags read by route guards.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn LearningApi>,
    storage: Storage,
}

impl AuthService {
    #[must_use]
    pub fn new(api: Arc<dyn LearningApi>, storage: Storage) -> Self {
        Self { api, storage }
    }

    /// Student login: succeeds whenever the reply carries a token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` with the server message or "Login failed!".
    pub async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        const FAILED: &str = "Login failed!";
        let reply = self
            .api
            .login(credentials)
            .await
            .map_err(|err| AuthError::Rejected(err.user_message(FAILED)))?;
        let Some(token) = reply.token else {
            return Err(AuthError::Rejected(
                reply.message.unwrap_or_else(|| FAILED.to_owned()),
            ));
        };

        let user = reply.user.unwrap_or_default();
        self.storage
            .save_session(&Session {
                token,
                user: user.clone(),
            })
            .await?;
        info!(role = %user.role, "signed in");
        Ok(user)
    }

    /// Admin login: succeeds when the reply says `success`; the session is
    /// stored whatever the role, and the destination depends on it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` with the text the admin form shows.
    pub async fn admin_login(&self, credentials: &Credentials) -> Result<AdminLogin, AuthError> {
        let reply = self.api.login(credentials).await.map_err(|err| {
            AuthError::Rejected(
                err.user_message("An unexpected error occurred. Please try again later."),
            )
        })?;
        if reply.success != Some(true) {
            return Err(AuthError::Rejected(
                reply
                    .message
                    .unwrap_or_else(|| "Login failed, please try again.".to_owned()),
            ));
        }

        let user = reply.user.unwrap_or_default();
        self.storage
            .save_session(&Session {
                token: reply.token.unwrap_or_default(),
                user: user.clone(),
            })
            .await?;
        let destination = access::admin_login_destination(&user);
        info!(admin = user.is_admin(), "admin form sign-in");
        Ok(AdminLogin { user, destination })
    }

    /// # Errors
    ///
    /// Returns `AuthError::Rejected` with the server message or "Signup failed!".
    pub async fn signup(&self, draft: &SignupDraft) -> Result<&'static str, AuthError> {
        self.api
            .signup(draft)
            .await
            .map_err(|err| AuthError::Rejected(err.user_message("Signup failed!")))?;
        info!("account registered");
        Ok(SIGNUP_SUCCESS)
    }

    /// Sends the new name and phone, then stores the returned user record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn` without a stored token and
    /// `AuthError::Request` when the server refuses the update.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, AuthError> {
        let token = self
            .storage
            .token()
            .await?
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::NotSignedIn)?;
        let user = self
            .api
            .update_profile(&token, update)
            .await
            .map_err(|err| err.with_fallback("Failed to update profile"))?;
        self.storage.save_user(&user).await?;
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session cannot be cleared.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.storage.clear_session().await?;
        info!("signed out");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if client storage cannot be read.
    pub async fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(self.storage.user().await?)
    }

    /// Guard decision for admin routes from the stored token and user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if client storage cannot be read.
    pub async fn admin_access(&self) -> Result<AccessDecision, AuthError> {
        let token = self.storage.token().await?;
        let user = self.storage.user().await?;
        Ok(access::admin_access(token.as_deref(), user.as_ref()))
    }

    /// Guard decision for the profile pages.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if client storage cannot be read.
    pub async fn student_access(&self) -> Result<AccessDecision, AuthError> {
        let user = self.storage.user().await?;
        Ok(access::student_access(user.as_ref()))
    }
}
