//! Persistence tiers for the provider access token.
//!
//! Lookups try the OS keychain first, then the `MAHZAN_AUTH__TOKEN`
//! environment variable, then `~/.mahzan/credentials`. Writes prefer the
//! keychain and degrade to the credentials file when no keychain is usable.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;

const KEYRING_USER: &str = "provider-access-token";
const TOKEN_ENV_VAR: &str = "MAHZAN_AUTH__TOKEN";

/// Which persistence tier a token was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Env,
    File,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

/// Persist an access token, preferring the OS keychain.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` when the keychain is unusable and
/// the credentials file cannot be written either.
pub fn store(token: &str) -> Result<(), AuthError> {
    if let Some(entry) = keyring_entry() {
        match entry.set_password(token) {
            Ok(()) => return Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; using credentials file");
            }
        }
    }
    write_credentials_file(token)
}

/// Look up a stored token across all tiers.
#[must_use]
pub fn load() -> Option<String> {
    keyring_token()
        .or_else(env_token)
        .or_else(read_credentials_file)
}

/// The tier [`load`] would currently read from, for status display.
#[must_use]
pub fn current_source() -> Option<TokenSource> {
    if keyring_token().is_some() {
        return Some(TokenSource::Keyring);
    }
    if env_token().is_some() {
        return Some(TokenSource::Env);
    }
    read_credentials_file().map(|_| TokenSource::File)
}

/// Remove the token from every writable tier.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file exists but
/// cannot be removed.
pub fn delete() -> Result<(), AuthError> {
    if let Some(entry) = keyring_entry() {
        // Absent keychain credentials are fine.
        let _ = entry.delete_credential();
    }

    let path = credentials_path()?;
    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
        })?;
    }
    Ok(())
}

// MAHZAN_KEYRING_SERVICE lets tests point at a scratch keychain service
// instead of the real one.
fn keyring_entry() -> Option<keyring::Entry> {
    let service =
        std::env::var("MAHZAN_KEYRING_SERVICE").unwrap_or_else(|_| "mahzan-cli".to_string());
    keyring::Entry::new(&service, KEYRING_USER).ok()
}

fn keyring_token() -> Option<String> {
    keyring_entry()?
        .get_password()
        .ok()
        .filter(|t| !t.is_empty())
}

fn env_token() -> Option<String> {
    std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty())
}

fn credentials_path() -> Result<PathBuf, AuthError> {
    let home = dirs::home_dir()
        .ok_or_else(|| AuthError::TokenStoreError("home directory not found".into()))?;
    Ok(home.join(".mahzan").join("credentials"))
}

fn write_credentials_file(token: &str) -> Result<(), AuthError> {
    let path = credentials_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| AuthError::TokenStoreError(format!("mkdir {}: {e}", dir.display())))?;
        restrict_mode(dir, 0o700);
    }
    fs::write(&path, token)
        .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;
    restrict_mode(&path, 0o600);
    Ok(())
}

fn read_credentials_file() -> Option<String> {
    let path = credentials_path().ok()?;
    fs::read_to_string(path).ok().filter(|t| !t.trim().is_empty())
}

#[cfg(unix)]
fn restrict_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(error) = fs::set_permissions(path, fs::Permissions::from_mode(mode)) {
        tracing::warn!(%error, path = %path.display(), "failed to restrict permissions");
    }
}

#[cfg(not(unix))]
fn restrict_mode(_path: &Path, _mode: u32) {}
