//! Cross-cutting error types for Mahzan.
//!
//! Domain-specific errors (`DatabaseError`, `AuthError`, `ConfigError`) are
//! defined in their respective crates; everything converges into `anyhow` at
//! the CLI boundary.

use thiserror::Error;

/// Errors that can be raised by any Mahzan crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (range, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
