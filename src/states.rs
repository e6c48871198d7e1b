//! Render-branch selection for data-driven pages.
//!
//! [`ViewState::select`] picks exactly one of loading, error, empty or content
//! with the fixed priority Loading > Error > Empty > Content. [`StatePanel`]
//! is the template-facing description of the three non-content branches.

use serde::Serialize;

use crate::fetch::{Emptiness, FetchError, Snapshot};
use crate::i18n::{Dictionary, ErrorText};

/// The branch a page renders for the current data state.
#[derive(Debug, PartialEq)]
pub enum ViewState<'a, T: ?Sized> {
    Loading,
    Error(&'a FetchError),
    Empty,
    Content(&'a T),
}

impl<'a, T: Emptiness + ?Sized> ViewState<'a, T> {
    /// Select the branch from raw flags.
    ///
    /// Absent data without an error counts as empty.
    pub fn select(
        is_loading: bool,
        error: Option<&'a FetchError>,
        is_empty: bool,
        data: Option<&'a T>,
    ) -> Self {
        if is_loading {
            return ViewState::Loading;
        }
        if let Some(error) = error {
            return ViewState::Error(error);
        }
        match data {
            Some(data) if !is_empty && !data.is_empty_sequence() => ViewState::Content(data),
            _ => ViewState::Empty,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Error(_) => "error",
            ViewState::Empty => "empty",
            ViewState::Content(_) => "content",
        }
    }
}

impl<'a, T: Emptiness> ViewState<'a, T> {
    pub fn from_snapshot(snapshot: &'a Snapshot<T>) -> Self {
        Self::select(
            snapshot.is_loading,
            snapshot.error.as_ref(),
            snapshot.is_empty,
            snapshot.data.as_deref(),
        )
    }
}

/// Resolve the message shown in the error panel.
///
/// An explicit message wins. Without an error the generic message is used.
/// Otherwise the error text is matched against known failure shapes and
/// falls back to the raw message.
pub fn error_message(explicit: Option<&str>, error: Option<&FetchError>, text: &ErrorText) -> String {
    if let Some(message) = explicit {
        return message.to_string();
    }
    let Some(error) = error else {
        return text.message.clone();
    };
    let raw = error.message();
    if raw.contains("fetch") || raw.contains("network") {
        text.network_error.clone()
    } else if raw.contains("500") || raw.contains("server") {
        text.server_error.clone()
    } else if raw.contains("404") {
        text.not_found.clone()
    } else {
        raw.to_string()
    }
}

/// A link button rendered under a state panel.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PanelAction {
    pub label: String,
    pub href: String,
}

/// Template data for the loading, error and empty partials.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatePanel {
    pub kind: &'static str,
    pub title: String,
    pub message: String,
    /// Seconds until the page refreshes itself; only set while loading.
    pub refresh_after: Option<u32>,
    pub actions: Vec<PanelAction>,
}

impl StatePanel {
    pub fn loading(t: &Dictionary, message: Option<&str>) -> Self {
        Self {
            kind: "loading",
            title: t.states.loading.title.clone(),
            message: message.unwrap_or(&t.states.loading.message).to_string(),
            refresh_after: Some(1),
            actions: Vec::new(),
        }
    }

    /// Error panel with a retry link back to the current page and a link home.
    pub fn error(t: &Dictionary, error: &FetchError, retry_href: &str, home_href: &str) -> Self {
        Self {
            kind: "error",
            title: t.states.error.title.clone(),
            message: error_message(None, Some(error), &t.states.error),
            refresh_after: None,
            actions: vec![
                PanelAction {
                    label: t.states.error.retry.clone(),
                    href: retry_href.to_string(),
                },
                PanelAction {
                    label: t.states.error.go_home.clone(),
                    href: home_href.to_string(),
                },
            ],
        }
    }

    pub fn empty(t: &Dictionary, title: Option<&str>, message: Option<&str>) -> Self {
        Self {
            kind: "empty",
            title: title.unwrap_or(&t.states.empty.title).to_string(),
            message: message.unwrap_or(&t.states.empty.message).to_string(),
            refresh_after: None,
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, label: &str, href: &str) -> Self {
        self.actions.push(PanelAction {
            label: label.to_string(),
            href: href.to_string(),
        });
        self
    }
}
