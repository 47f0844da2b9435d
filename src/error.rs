//! Error types for loading and rendering the article feed.

use thiserror::Error;

/// Everything that can abort a load.
///
/// None of these are recovered from inside the loader. A failed load leaves
/// already appended fragments in place and does not move the cursor.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Transport failure talking to the backend
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("GET {path} returned {status}: {body}")]
    Status {
        status: u16,
        path: String,
        /// Truncated response body
        body: String,
    },

    /// Response body was not the expected JSON
    #[error("Malformed JSON from {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Base URL or request path could not be joined
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The render target is not in the document
    #[error("No element with id '{0}' in document")]
    MissingContainer(String),

    /// Writing the rendered output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            LoadError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            LoadError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, LoadError>;
