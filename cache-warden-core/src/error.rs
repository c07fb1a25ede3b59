//! Errors produced by the cache engine itself.
//!
//! The HTTP-facing error taxonomy (conflicts, auth failures, bad request
//! bodies) lives in the server crate; this enum only covers what the
//! engine's own contract can fail with.

use thiserror::Error;

/// Errors returned by [`crate::cache::Cache`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The requested key is not present, or was present but has expired.
    #[error("key not found")]
    NotFound,

    /// `Cache::new` was asked for an eviction policy tag it doesn't
    /// recognize.
    #[error("invalid eviction policy: {0}")]
    InvalidPolicy(String),
}

/// Convenience alias for fallible engine operations.
pub type Result<T> = std::result::Result<T, Error>;
