//! Common result and error types for the Aion place-and-route core.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates an internal inconsistency (a bug in Aion or in a device
/// description), not a recoverable placement decision. Binding contract
/// violations are not reported through this type at all; they panic.
pub type AionResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug, not a user input problem.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
