//! Error types shared across the Denkmal crates.

use thiserror::Error;

/// A path token that violates the `@{lng},{lat},{zoom}z` grammar.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("map token must start with '@' and end with 'z': {token}")]
    MissingDelimiters { token: String },

    #[error("map token must carry exactly 3 fields, got {count}: {token}")]
    FieldCount { token: String, count: usize },

    #[error("map token field '{field}' is not a finite number: {token}")]
    InvalidNumber { token: String, field: &'static str },
}

/// A failed request against the CMS API.
///
/// Carried through shared in-flight futures, hence `Clone`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("request failed: {reason}")]
    Transport { reason: String },

    #[error("request returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("response decode failed: {reason}")]
    Decode { reason: String },
}
