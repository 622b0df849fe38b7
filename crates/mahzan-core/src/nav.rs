//! Navigation state machine with role-gated view transitions.
//!
//! A single guard function decides every transition, so the admin gate lives
//! in one table-driven place instead of scattered inline checks. There is no
//! history stack; back-navigation is not modeled.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::identity::SessionSnapshot;

/// The finite set of views the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Home,
    Archive,
    IssueDetail,
    Admin,
    Login,
    Setup,
}

impl View {
    /// String form used in CLI parsing and rendering.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Archive => "archive",
            Self::IssueDetail => "issue",
            Self::Admin => "admin",
            Self::Login => "login",
            Self::Setup => "setup",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guard verdict for a requested transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDecision {
    /// Transition proceeds unconditionally.
    Allow,
    /// Transition is replaced by one to another view.
    Redirect(View),
    /// Transition is rejected in place with a user-visible reason.
    Deny(&'static str),
}

/// Evaluate whether a session may enter a view.
///
/// The admin view is the only protected one: no identity redirects to login,
/// an identity without the administrator role is denied in place, and the
/// role flag admits. Every other view is open.
#[must_use]
pub fn can_enter(view: View, session: &SessionSnapshot) -> NavDecision {
    match view {
        View::Admin => {
            if !session.is_authenticated() {
                NavDecision::Redirect(View::Login)
            } else if session.is_admin {
                NavDecision::Allow
            } else {
                NavDecision::Deny("Access denied. Admin privileges required.")
            }
        }
        _ => NavDecision::Allow,
    }
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// The active view changed (or was re-entered); the renderer scrolls to
    /// top before drawing it.
    Entered(View),
    /// The request was rejected; the active view is unchanged.
    Denied(&'static str),
}

/// Single-threaded navigation controller over the view set.
///
/// Holds the active view plus the issue-id parameter for the detail view.
/// Requesting the detail view without an id deliberately retains the prior
/// parameter (fallback to the last viewed issue).
#[derive(Debug, Clone)]
pub struct Navigator {
    current: View,
    issue_id: Option<String>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Start at the home view with no issue selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: View::Home,
            issue_id: None,
        }
    }

    #[must_use]
    pub const fn current(&self) -> View {
        self.current
    }

    /// Issue-id parameter for the detail view, if one has been selected.
    #[must_use]
    pub fn issue_id(&self) -> Option<&str> {
        self.issue_id.as_deref()
    }

    /// Request a transition, consulting the guard first.
    pub fn navigate(
        &mut self,
        view: View,
        issue_id: Option<String>,
        session: &SessionSnapshot,
    ) -> NavOutcome {
        let target = match can_enter(view, session) {
            NavDecision::Allow => view,
            NavDecision::Redirect(other) => other,
            NavDecision::Deny(reason) => return NavOutcome::Denied(reason),
        };

        self.current = target;
        if let Some(id) = issue_id {
            self.issue_id = Some(id);
        }
        NavOutcome::Entered(target)
    }
}
