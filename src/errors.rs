//! Error types for analysis requests.
//!
//! Errors fall into three categories:
//! - Input errors (`PathNotFound`): the caller asked for something that does
//!   not exist. Surfaced as a 400 response.
//! - Tool invocation errors (`ToolNotFound`, `ToolSpawn`, `ToolFailed`,
//!   `InvalidToolOutput`, `Io`): an engine could not run or reported a
//!   failure. The whole request fails; no partial results are produced.
//! - Configuration errors (`Config`): raised at startup only.
//!
//! Version lookups never produce an error; they recover to `"unknown"`
//! (see [`crate::versions`]).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for analysis operations
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The requested code path does not exist
    #[error("Path does not exist: {}", path.display())]
    PathNotFound { path: PathBuf },

    /// The engine binary could not be located
    #[error("Tool '{tool}' not found: {message}")]
    ToolNotFound { tool: String, message: String },

    /// The engine process could not be started
    #[error("Failed to run '{tool}': {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine exited with a status that signals failure
    #[error("'{tool}' exited with status {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    /// The engine ran but its output could not be interpreted
    #[error("Unexpected output from '{tool}': {message}")]
    InvalidToolOutput { tool: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A background worker panicked or was cancelled
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Create a path-not-found error
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    /// Create a tool-not-found error
    pub fn tool_not_found(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolNotFound {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-output error
    pub fn invalid_output(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidToolOutput {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the caller caused this error and can fix it.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// HTTP status this error maps to at the request boundary.
    pub fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "analysis request failed");
        } else {
            tracing::debug!(error = %self, "rejected analysis request");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
