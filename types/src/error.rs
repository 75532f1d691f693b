//! Error-kind taxonomy shared across the workspace.
//!
//! Every engine crate defines its own error enum and projects it onto
//! [`ErrorKind`]; the service layer flattens any failure into a
//! [`WeftError`] (one kind plus a human-readable message) for callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The closed set of failure categories exposed to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed intent (e.g. both vote directions set, or neither).
    Validation,
    /// The actor is not allowed to perform the operation.
    Permission,
    /// The operation is not valid given current state.
    Conflict,
    /// A referenced subject, user, or edge does not exist.
    NotFound,
    /// Failure at the storage boundary.
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Validation => "validation",
            Self::Permission => "permission",
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
            Self::Storage => "storage",
        };
        write!(f, "{s}")
    }
}

/// Wire-level error: the outbound failure contract is one kind plus a
/// message, never partial data.
#[derive(Clone, Debug, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct WeftError {
    pub kind: ErrorKind,
    pub message: String,
}

impl WeftError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
