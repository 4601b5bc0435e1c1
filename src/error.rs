//! Error types for validation, rendering, export and configuration.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown content type `{0}` (expected one of: url, text, access-key, wifi, email, phone)")]
pub struct UnknownContentType(pub String);

/// Why a URL-typed input was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlIssue {
    /// Not an absolute URL at all.
    Malformed,
    /// Parsed, but the scheme is neither `http` nor `https`.
    UnsupportedScheme(String),
}

impl fmt::Display for UrlIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlIssue::Malformed => f.write_str("please enter a valid URL (e.g. https://example.com)"),
            UrlIssue::UnsupportedScheme(_) => f.write_str("URLs must start with http:// or https://"),
        }
    }
}

/// Recoverable input errors, shown inline next to the input field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("content cannot be empty")]
    EmptyInput,

    #[error("{0}")]
    InvalidUrl(UrlIssue),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown export format `{0}` (expected png or svg)")]
pub struct UnknownExportFormat(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown svg mode `{0}` (expected vector or embedded)")]
pub struct UnknownSvgMode(pub String);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("content cannot be encoded as a QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("canvas of {size}px with a {quiet_zone}-module quiet zone is out of range")]
    Geometry { size: u32, quiet_zone: u32 },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Reasons a submission is refused before any work is scheduled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("a QR code is already being generated")]
    Busy,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Umbrella error for the generator workflow.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl GeneratorError {
    /// The validation error behind this failure, if that is what it was.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            GeneratorError::Submit(SubmitError::Invalid(e)) => Some(e),
            _ => None,
        }
    }
}
