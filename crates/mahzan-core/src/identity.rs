use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lightweight authenticated user identity for cross-crate passing.
///
/// Produced by `mahzan-auth`, consumed by the navigation guard and CLI.
/// Contains only data fields; no auth logic, no provider SDK calls.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserIdentity {
    /// Provider user ID.
    pub user_id: String,
    /// Email the account was registered with.
    pub email: String,
}

/// Read-only view of the session for guard checks and rendering.
///
/// Cheap to clone; taken from the session state holder at decision time so
/// the navigation guard never reaches into mutable session internals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub user: Option<UserIdentity>,
    /// Resolved administrator capability. Never assumed true on fetch errors.
    pub is_admin: bool,
}

impl SessionSnapshot {
    /// Snapshot of an unauthenticated session.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user: None,
            is_admin: false,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
