//! User-facing error taxonomy for submissions

use thiserror::Error;

pub const GENERIC_REJECTION: &str =
    "An error occurred while fetching recommendations. Please try again.";

/// What went wrong, independent of the message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing to send; handled locally without a request
    InvalidInput,
    /// No response obtained (connection, DNS, timeout)
    Unreachable,
    /// Response received with a failing status
    Rejected,
    /// Response received but without the expected data
    MalformedResponse,
}

/// Normalized error carried by a failed request state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ClientError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
}

impl ClientError {
    pub fn invalid_input() -> Self {
        Self {
            kind: ErrorKind::InvalidInput,
            message: "Enter a query or a job description URL.".to_string(),
            status: None,
        }
    }

    pub fn unreachable(endpoint: &str) -> Self {
        Self {
            kind: ErrorKind::Unreachable,
            message: format!(
                "Unable to connect to the backend server at {endpoint}. Please ensure the server is running."
            ),
            status: None,
        }
    }

    /// Service answered with a failing status. Falls back to a generic message
    /// when the service gave no error text.
    pub fn rejected(status: u16, service_message: Option<String>) -> Self {
        Self {
            kind: ErrorKind::Rejected,
            message: service_message.unwrap_or_else(|| GENERIC_REJECTION.to_string()),
            status: Some(status),
        }
    }

    pub fn malformed(status: u16) -> Self {
        Self {
            kind: ErrorKind::MalformedResponse,
            message: "The recommendation service returned an unexpected response.".to_string(),
            status: Some(status),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of the response, when one was received
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}
