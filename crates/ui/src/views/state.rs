use std::fmt::Display;

use dioxus::prelude::*;

const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

/// A failure as a page shows it: one line of user-facing text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewError {
    message: String,
}

impl ViewError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return Self::default();
        }
        Self { message }
    }

    /// Uses the error's display text, which service errors keep user-facing.
    #[must_use]
    pub fn from_err(err: impl Display) -> Self {
        Self::new(err.to_string())
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for ViewError {
    fn default() -> Self {
        Self {
            message: GENERIC_MESSAGE.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::default()),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Inline error line shown under forms and lists.
#[component]
pub fn ErrorBanner(error: Option<ViewError>) -> Element {
    match error {
        Some(err) => rsx! {
            p { class: "banner-error", "{err.message()}" }
        },
        None => rsx! {},
    }
}
