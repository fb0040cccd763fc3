//! GitHub API error types.
//!
//! API failures surface to the orchestrator step that made the call; there
//! is no retry layer in this core. The only categorization callers need is
//! "was this a 404" (PR lookup maps it to `None`) versus everything else.

use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// A failed platform API call.
#[derive(Debug, Error)]
pub struct GatewayError {
    /// The HTTP status of GitHub's response, when there was one.
    pub status: Option<u16>,

    /// A human-readable description of the failure.
    pub message: String,

    /// The underlying octocrab error, if available.
    #[source]
    pub source: Option<octocrab::Error>,
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(code) => write!(f, "GitHub API error (HTTP {}): {}", code, self.message),
            None => write!(f, "GitHub API error: {}", self.message),
        }
    }
}

impl GatewayError {
    /// Categorizes an octocrab error, extracting the HTTP status when GitHub
    /// answered the request.
    pub fn from_octocrab(err: octocrab::Error) -> Self {
        let status = match &err {
            octocrab::Error::GitHub { source, .. } => Some(source.status_code.as_u16()),
            _ => None,
        };
        GatewayError {
            status,
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Creates an error without an octocrab source.
    pub fn without_source(status: Option<u16>, message: impl Into<String>) -> Self {
        GatewayError {
            status,
            message: message.into(),
            source: None,
        }
    }

    /// True if GitHub answered 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        self.status == Some(StatusCode::NOT_FOUND.as_u16())
    }
}
