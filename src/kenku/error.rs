//! Failure classification for remote-control API calls
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Category of a failed remote call, used to pick the user-facing reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection refused, DNS failure or any other send-level failure
    NetworkUnavailable,
    /// The request exceeded the client timeout
    Timeout,
    /// The API answered with a non-2xx status
    HttpError { status: u16, body: Option<String> },
    /// Request construction, body transfer or redirect failures
    GenericError,
    /// Response shape not recognized, or an error outside the categories above
    Unknown,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::NetworkUnavailable => write!(f, "network unavailable"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpError { status, .. } => write!(f, "HTTP {status}"),
            FailureKind::GenericError => write!(f, "generic error"),
            FailureKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A remote-call failure normalized into a [`FailureKind`]
///
/// Produced once per failed call at the client boundary. Never retried.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ClassifiedFailure {
    pub kind: FailureKind,
    pub message: String,
    #[source]
    pub cause: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl ClassifiedFailure {
    /// Classify a transport-level error raised by reqwest
    ///
    /// `task` describes what was attempted, e.g. "fetch soundboard state".
    pub fn from_reqwest(error: reqwest::Error, task: &str) -> Self {
        let kind = classify_reqwest(&error);
        let message = describe(&kind, task, &error.to_string());
        Self {
            kind,
            message,
            cause: Some(Box::new(error)),
        }
    }

    /// Classify a non-2xx response
    pub fn from_status(status: u16, body: Option<String>, task: &str) -> Self {
        let body = body.filter(|b| !b.trim().is_empty());
        let detail = match &body {
            Some(body) => format!("status {status}: {body}"),
            None => format!("status {status}"),
        };
        let kind = FailureKind::HttpError { status, body };
        let message = describe(&kind, task, &detail);
        Self {
            kind,
            message,
            cause: None,
        }
    }

    /// Classify a response body that does not match the expected JSON shape
    pub fn from_decode(error: serde_json::Error, task: &str) -> Self {
        let kind = FailureKind::Unknown;
        let message = describe(&kind, task, &error.to_string());
        Self {
            kind,
            message,
            cause: Some(Box::new(error)),
        }
    }

    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }
}

/// Map a reqwest error onto the failure taxonomy
///
/// Timeouts are checked first: reqwest flags a timed-out send as a request error as well.
pub fn classify_reqwest(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        FailureKind::Timeout
    } else if error.is_connect() {
        FailureKind::NetworkUnavailable
    } else if error.is_status() {
        FailureKind::HttpError {
            status: error.status().map(|s| s.as_u16()).unwrap_or_default(),
            body: None,
        }
    } else if error.is_builder() || error.is_body() || error.is_redirect() {
        FailureKind::GenericError
    } else if error.is_request() {
        FailureKind::NetworkUnavailable
    } else {
        FailureKind::Unknown
    }
}

fn describe(kind: &FailureKind, task: &str, detail: &str) -> String {
    match kind {
        FailureKind::NetworkUnavailable => {
            format!("KenkuFM remote-control API unavailable when trying to {task}: {detail}")
        }
        FailureKind::Timeout => format!("Timed out when trying to {task}: {detail}"),
        FailureKind::HttpError { .. } => {
            format!("Got HTTP error when trying to {task}: {detail}")
        }
        FailureKind::GenericError => format!("Got error when trying to {task}: {detail}"),
        FailureKind::Unknown => {
            format!("Got unexpected failure when trying to {task}: {detail}")
        }
    }
}
