//! # mahzan-auth
//!
//! Session state and identity-provider access for Mahzan.
//!
//! Provides the [`IdentityProvider`] trait over the hosted provider's surface
//! (sign-in, sign-out, current-session lookup, profile-by-id), an HTTP
//! implementation (`reqwest`), credential storage (OS keychain with env and
//! file fallback), and the [`SessionState`] holder that derives the
//! administrator role flag.

pub mod error;
pub mod provider;
pub mod session;
pub mod token_store;

pub use error::AuthError;
pub use provider::{AuthSession, HttpIdentityProvider, IdentityProvider};
pub use session::SessionState;

/// Resolve the best available stored access token.
///
/// Priority: keyring → env var → file. Does NOT verify the token against the
/// provider; [`SessionState::refresh`] does that.
#[must_use]
pub fn resolve_token() -> Option<String> {
    token_store::load()
}

/// Clear stored credentials.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
pub fn forget_token() -> Result<(), AuthError> {
    token_store::delete()
}
