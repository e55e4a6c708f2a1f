use thiserror::Error;

/// Error type for JWT operations.
///
/// The variants are kept apart for logging; callers that face end users
/// collapse them into a single "invalid token" outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token signature does not match")]
    InvalidSignature,

    #[error("Token signed with an unexpected algorithm")]
    InvalidAlgorithm,

    #[error("Token issuer is not accepted")]
    InvalidIssuer,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}
