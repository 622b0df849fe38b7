//! Session lifecycle.
//!
//! `SessionState` is the single place the current identity and admin flag
//! live. Every read goes through [`SessionState::snapshot`], so callers
//! never see a half-updated identity/role pair.

use tracing::warn;

use mahzan_core::identity::{SessionSnapshot, UserIdentity};

use crate::error::AuthError;
use crate::provider::IdentityProvider;

/// Holds the authenticated user (if any), their admin flag, and the token
/// that backs the session.
#[derive(Debug)]
pub struct SessionState<P: IdentityProvider> {
    provider: P,
    access_token: Option<String>,
    user: Option<UserIdentity>,
    is_admin: bool,
}

impl<P: IdentityProvider> SessionState<P> {
    /// Start from a stored token, if one survived a previous run. The token
    /// is not validated here; call [`SessionState::refresh`] to resolve it.
    pub fn init(provider: P, stored_token: Option<String>) -> Self {
        Self {
            provider,
            access_token: stored_token,
            user: None,
            is_admin: false,
        }
    }

    /// Verify credentials, load the profile, and populate the session.
    /// Returns the access token so the caller can persist it.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<String, AuthError> {
        let session = self.provider.sign_in(email, password).await?;
        self.is_admin = self.load_admin_flag(&session.user.user_id).await;
        self.user = Some(session.user);
        self.access_token = Some(session.access_token.clone());
        Ok(session.access_token)
    }

    /// Re-resolve the stored token into an identity and role. An invalid or
    /// missing token leaves the session anonymous; it is not an error.
    pub async fn refresh(&mut self) -> Result<(), AuthError> {
        let Some(token) = self.access_token.clone() else {
            self.teardown();
            return Ok(());
        };

        match self.provider.current_user(&token).await? {
            Some(user) => {
                self.is_admin = self.load_admin_flag(&user.user_id).await;
                self.user = Some(user);
            }
            None => self.teardown(),
        }
        Ok(())
    }

    /// End the session. Local state is cleared unconditionally; a provider
    /// that cannot be reached never keeps a user signed in on this machine.
    pub async fn sign_out(&mut self) {
        if let Some(token) = self.access_token.take() {
            if let Err(error) = self.provider.sign_out(&token).await {
                warn!(%error, "provider sign-out failed; clearing local session anyway");
            }
        }
        self.teardown();
    }

    /// Drop all session state without contacting the provider.
    pub fn teardown(&mut self) {
        self.access_token = None;
        self.user = None;
        self.is_admin = false;
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user.clone(),
            is_admin: self.is_admin,
        }
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// A profile that cannot be fetched, or does not exist, resolves to a
    /// non-admin role. Identity itself is unaffected.
    async fn load_admin_flag(&self, user_id: &str) -> bool {
        match self.provider.profile_by_id(user_id).await {
            Ok(Some(profile)) => profile.is_admin,
            Ok(None) => false,
            Err(error) => {
                warn!(%error, user_id, "profile lookup failed; treating user as non-admin");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use mahzan_core::entities::UserProfile;

    use super::*;
    use crate::provider::AuthSession;

    #[derive(Default)]
    struct MockProvider {
        admin: bool,
        fail_profile: AtomicBool,
        fail_sign_out: AtomicBool,
        token_valid: AtomicBool,
    }

    impl MockProvider {
        fn with_admin(admin: bool) -> Self {
            Self {
                admin,
                token_valid: AtomicBool::new(true),
                ..Self::default()
            }
        }
    }

    impl IdentityProvider for MockProvider {
        async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
            if password == "wrong" {
                return Err(AuthError::SignInFailed("invalid credentials".into()));
            }
            Ok(AuthSession {
                access_token: "tok-1".into(),
                user: UserIdentity {
                    user_id: "user-1".into(),
                    email: email.into(),
                },
            })
        }

        async fn sign_out(&self, _access_token: &str) -> Result<(), AuthError> {
            if self.fail_sign_out.load(Ordering::SeqCst) {
                Err(AuthError::SignOutFailed("provider unreachable".into()))
            } else {
                Ok(())
            }
        }

        async fn current_user(&self, access_token: &str) -> Result<Option<UserIdentity>, AuthError> {
            if access_token == "tok-1" && self.token_valid.load(Ordering::SeqCst) {
                Ok(Some(UserIdentity {
                    user_id: "user-1".into(),
                    email: "reader@example.com".into(),
                }))
            } else {
                Ok(None)
            }
        }

        async fn profile_by_id(&self, user_id: &str) -> Result<Option<UserProfile>, AuthError> {
            if self.fail_profile.load(Ordering::SeqCst) {
                return Err(AuthError::ProfileLookupFailed("timeout".into()));
            }
            Ok(Some(UserProfile {
                id: user_id.to_string(),
                email: "reader@example.com".into(),
                is_admin: self.admin,
                created_at: Utc::now(),
            }))
        }
    }

    #[tokio::test]
    async fn sign_in_populates_identity_and_role() {
        let mut session = SessionState::init(MockProvider::with_admin(true), None);
        let token = session
            .sign_in("reader@example.com", "secret")
            .await
            .unwrap();

        assert_eq!(token, "tok-1");
        let snapshot = session.snapshot();
        assert!(snapshot.is_authenticated());
        assert!(snapshot.is_admin);
    }

    #[tokio::test]
    async fn failed_sign_in_leaves_session_anonymous() {
        let mut session = SessionState::init(MockProvider::with_admin(false), None);
        let result = session.sign_in("reader@example.com", "wrong").await;

        assert!(result.is_err());
        assert!(!session.snapshot().is_authenticated());
    }

    #[tokio::test]
    async fn refresh_resolves_stored_token() {
        let mut session =
            SessionState::init(MockProvider::with_admin(false), Some("tok-1".into()));
        session.refresh().await.unwrap();

        let snapshot = session.snapshot();
        assert!(snapshot.is_authenticated());
        assert!(!snapshot.is_admin);
    }

    #[tokio::test]
    async fn refresh_with_expired_token_goes_anonymous() {
        let provider = MockProvider::with_admin(true);
        provider.token_valid.store(false, Ordering::SeqCst);
        let mut session = SessionState::init(provider, Some("tok-1".into()));
        session.refresh().await.unwrap();

        assert!(!session.snapshot().is_authenticated());
        assert!(session.access_token().is_none());
    }

    #[tokio::test]
    async fn profile_failure_keeps_identity_but_drops_role() {
        let provider = MockProvider::with_admin(true);
        provider.fail_profile.store(true, Ordering::SeqCst);
        let mut session = SessionState::init(provider, Some("tok-1".into()));
        session.refresh().await.unwrap();

        let snapshot = session.snapshot();
        assert!(snapshot.is_authenticated());
        assert!(!snapshot.is_admin, "unresolvable profile must not grant admin");
    }

    #[tokio::test]
    async fn sign_out_clears_state_even_when_provider_fails() {
        let provider = MockProvider::with_admin(true);
        provider.fail_sign_out.store(true, Ordering::SeqCst);
        let mut session = SessionState::init(provider, None);
        session
            .sign_in("reader@example.com", "secret")
            .await
            .unwrap();

        session.sign_out().await;

        assert!(!session.snapshot().is_authenticated());
        assert!(session.access_token().is_none());
    }
}
