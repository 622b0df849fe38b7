use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("sign-in failed: {0}")]
    SignInFailed(String),

    #[error("sign-out failed: {0}")]
    SignOutFailed(String),

    #[error("profile lookup failed: {0}")]
    ProfileLookupFailed(String),

    #[error("identity provider error: {0}")]
    ProviderError(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::ProviderError(error.to_string())
    }
}
