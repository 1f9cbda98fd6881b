//! Error types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// A required named argument is absent or empty.
    #[error("missing argument: {0}")]
    MissingArgument(String),

    /// Hex, JSON or binary decoding failed on an argument or on stored state.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    /// Referenced owner, dataset or instance is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// Input failed a structural check.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The state lookup reported non-existence or non-match for the instance.
    #[error("invalid proof for instance {0}")]
    ProofInvalid(String),

    /// The block source reported an error status or returned no blocks.
    #[error("block stream failure: {0}")]
    StreamFailure(String),

    /// No policy accepted the instruction's signatures.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("encoding failed: {0}")]
    Codec(String),
}

pub type Result<T> = core::result::Result<T, ContractError>;
