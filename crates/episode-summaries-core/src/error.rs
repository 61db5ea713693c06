//! Error types for the episode summaries scraper
//!
//! This module defines all error types used throughout the library.
//! ScraperError implements Serialize so hosts can report it as plain text.

use std::path::PathBuf;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for scraper operations
#[derive(Error, Debug)]
pub enum ScraperError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Requested page does not exist (HTTP 404)
    #[error("Page not found: {0}")]
    NotFound(String),

    /// URL pattern has no `{}` season slot
    #[error("Invalid URL pattern: {0}")]
    InvalidPattern(String),

    /// Writing the output document failed
    #[error("Failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScraperError {
    /// True for the errors raised while fetching a season page.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            ScraperError::HttpError(_) | ScraperError::HttpStatus { .. } | ScraperError::NotFound(_)
        )
    }
}

/// Serialize ScraperError as its display string
impl Serialize for ScraperError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;
