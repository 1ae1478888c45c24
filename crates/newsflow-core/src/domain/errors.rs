//! Error taxonomy.
//!
//! Every error here is recovered at the boundary that produced it
//! (authoring flow, subscription setup, config load) and turned into a
//! user-facing message. Nothing in this module is allowed to take the
//! process down.
//!
//! Transport details stay behind strings: adapters map their own error
//! types (reqwest etc.) to messages before they cross a port, so the
//! caller never sees a backend's raw error payload structure.

use std::path::PathBuf;

use thiserror::Error;

/// Credential loading / parsing failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Realtime store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Credentials are absent or still placeholders. The store never
    /// attempts a connection in this state.
    #[error("realtime store is not configured")]
    Unconfigured,

    #[error("store request failed: {0}")]
    Transport(String),

    #[error("store rejected the write: {0}")]
    Rejected(String),

    #[error("store request timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Image hosting failures. No retry is performed internally.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("image upload failed: {0}")]
    Transport(String),

    #[error("image host returned HTTP {0}")]
    Status(u16),

    /// The host answered 2xx but flagged the upload as unsuccessful.
    #[error("image host reported an unsuccessful upload")]
    Rejected,

    #[error("image host response was malformed: {0}")]
    Malformed(String),

    #[error("image upload timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Draft field violations, detected before any network I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    MissingTitle,

    #[error("category must not be empty")]
    MissingCategory,

    /// "Home" is the no-filter sentinel, never a post category.
    #[error("\"Home\" is a filter, not a publishable category")]
    ReservedCategory,

    #[error("unknown category: {0:?}")]
    UnknownCategory(String),

    #[error("an image file is required")]
    MissingImage,

    #[error("content must not be empty")]
    MissingContent,
}

/// Why a `publish` call did not produce a post.
///
/// The variant tells the caller which step failed, which matters for
/// cleanup: a `Store` failure means the image was already uploaded and
/// is now orphaned (no compensating delete is attempted).
#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("image upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("post write failed: {0}")]
    Store(#[from] StoreError),
}
