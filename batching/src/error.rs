use thiserror::Error;

/// Errors from batch construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    /// Recipients and amounts must pair up one-to-one.
    #[error("recipient count ({recipients}) does not match amount count ({amounts})")]
    LengthMismatch { recipients: usize, amounts: usize },
}
