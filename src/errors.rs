//! # Error Types Module
//!
//! This module defines the error types of the guide core and of the startup
//! configuration. Catalog lookups report absence through `CatalogError`; the
//! router turns every such error into a polite fallback message, so none of
//! them ever reaches the user as text.

use std::path::PathBuf;

/// Custom error types for catalog and navigation operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A slug, menu or artist is absent from the catalog
    NotFound {
        /// What was looked up ("menu", "artist", "classic item", ...)
        kind: String,
        /// The missing key
        key: String,
    },
    /// An image path does not exist on disk
    MissingAsset(PathBuf),
    /// A token matches no known navigation pattern
    MalformedToken(String),
    /// The content definition breaks a catalog invariant
    Invalid(String),
    /// The content definition could not be deserialized
    Parse(String),
}

impl CatalogError {
    pub fn not_found(kind: impl Into<String>, key: impl Into<String>) -> Self {
        CatalogError::NotFound {
            kind: kind.into(),
            key: key.into(),
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::NotFound { kind, key } => write!(f, "Not found: {kind} '{key}'"),
            CatalogError::MissingAsset(path) => write!(f, "Missing asset: {}", path.display()),
            CatalogError::MalformedToken(token) => write!(f, "Malformed token: {token:?}"),
            CatalogError::Invalid(msg) => write!(f, "Invalid catalog: {msg}"),
            CatalogError::Parse(msg) => write!(f, "Catalog parse error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err.to_string())
    }
}

/// Errors raised while reading the process configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither `BOT_TOKEN` nor `TELEGRAM_BOT_TOKEN` is set
    MissingToken,
    /// A variable is set to a value that cannot be used
    InvalidValue {
        /// Variable name
        key: String,
        /// Offending value
        value: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingToken => {
                write!(f, "Missing bot token: set BOT_TOKEN or TELEGRAM_BOT_TOKEN")
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {key}: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
