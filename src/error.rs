//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for
//! `stagehand`. It uses the `thiserror` library to create a single `Error`
//! enum covering every anticipated failure mode of the staging core.
//!
//! The taxonomy is intentionally small:
//!
//! - Invalid or empty arguments (`InvalidArgument`, `UnsupportedArchive`).
//! - Missing paths (`NotFound`).
//! - Filesystem and extraction failures (`Io`, `Copy`, `Extract`).
//! - Network failures (`Network`).
//! - Parse-layer failures (`Json`, `Glob`, `UrlParse`, `ConfigParse`,
//!   `Descriptor`).
//!
//! Every error is propagated with `?` up to the binary entry point, which
//! converts it into a diagnostic message and a non-zero exit. There is no
//! localized recovery, partial-result emission, or automatic retry anywhere
//! below that boundary: a half-staged output tree is unsafe to package, so
//! any error stops forward progress.

use thiserror::Error;

/// Main error type for stagehand operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was null, empty, or missing.
    #[error("\"{name}\" cannot be null or empty")]
    InvalidArgument { name: String },

    /// An expected file or directory does not exist.
    #[error("{path} does not exist")]
    NotFound { path: String },

    /// A copy operation failed.
    #[error("copy failed: {src} -> {dst}: {message}")]
    Copy {
        src: String,
        dst: String,
        message: String,
    },

    /// A download failed. Fetches are single best-effort attempts; there is
    /// no retry policy.
    #[error("download failed for {url}: {message}")]
    Network { url: String, message: String },

    /// An archive URL without the expected `.zip` suffix was passed to a
    /// strict archive fetch.
    #[error("expected a .zip archive url: {url}")]
    UnsupportedArchive { url: String },

    /// Archive extraction failed, usually due to a corrupt download.
    #[error("failed to extract {archive}: {message}")]
    Extract { archive: String, message: String },

    /// A configuration file could not be parsed.
    #[error("failed to parse {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// A task descriptor failed validation.
    #[error("invalid task descriptor: {message}")]
    Descriptor { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
