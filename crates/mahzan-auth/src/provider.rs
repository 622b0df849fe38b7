//! Identity provider surface.
//!
//! The hosted provider owns credential verification and the profile table;
//! this module only consumes its REST API. The trait seam exists so the
//! session holder can be driven by a simulated provider in tests.

use serde::Deserialize;

use mahzan_core::entities::UserProfile;
use mahzan_core::identity::UserIdentity;

use crate::error::AuthError;

/// An authenticated provider session: the bearer token plus who it belongs to.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub user: UserIdentity,
}

/// The four operations the hosted identity provider exposes.
pub trait IdentityProvider {
    /// Verify credentials and open a session.
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthSession, AuthError>> + Send;

    /// Invalidate a session on the provider side.
    fn sign_out(&self, access_token: &str) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// Resolve the user a token belongs to. `None` for an invalid or expired token.
    fn current_user(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<Option<UserIdentity>, AuthError>> + Send;

    /// Fetch the profile record for a user. `None` when no profile row exists.
    fn profile_by_id(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<UserProfile>, AuthError>> + Send;
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: WireUser,
}

/// `reqwest` client for a hosted provider with a Supabase-compatible surface.
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    base_url: String,
    anon_key: String,
    client: reqwest::Client,
}

impl HttpIdentityProvider {
    #[must_use]
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            anon_key: anon_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }
}

impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let response = self
            .client
            .post(self.auth_endpoint("token?grant_type=password"))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::SignInFailed(format!(
                "provider returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::SignInFailed(format!("malformed token response: {e}")))?;

        Ok(AuthSession {
            access_token: token.access_token,
            user: UserIdentity {
                user_id: token.user.id,
                email: token.user.email,
            },
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .post(self.auth_endpoint("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AuthError::SignOutFailed(format!(
                "provider returned {}",
                response.status()
            )))
        }
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<UserIdentity>, AuthError> {
        let response = self
            .client
            .get(self.auth_endpoint("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        // 401/403 means the token no longer names a session; that is an
        // anonymous state, not an error.
        if response.status() == reqwest::StatusCode::UNAUTHORIZED
            || response.status() == reqwest::StatusCode::FORBIDDEN
        {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AuthError::ProviderError(format!(
                "current-user lookup returned {}",
                response.status()
            )));
        }

        let user: WireUser = response
            .json()
            .await
            .map_err(|e| AuthError::ProviderError(format!("malformed user response: {e}")))?;

        Ok(Some(UserIdentity {
            user_id: user.id,
            email: user.email,
        }))
    }

    async fn profile_by_id(&self, user_id: &str) -> Result<Option<UserProfile>, AuthError> {
        let url = format!(
            "{}/rest/v1/user_profiles?id=eq.{user_id}&select=*",
            self.base_url
        );
        let response = self
            .client
            .get(url)
            .header("apikey", &self.anon_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::ProfileLookupFailed(format!(
                "provider returned {}",
                response.status()
            )));
        }

        let mut profiles: Vec<UserProfile> = response
            .json()
            .await
            .map_err(|e| AuthError::ProfileLookupFailed(format!("malformed profile response: {e}")))?;

        if profiles.is_empty() {
            Ok(None)
        } else {
            Ok(Some(profiles.remove(0)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let provider = HttpIdentityProvider::new("https://identity.example.com//", "anon");
        assert_eq!(
            provider.auth_endpoint("user"),
            "https://identity.example.com/auth/v1/user"
        );
    }
}
