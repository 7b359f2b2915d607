//! Error types for the client.

use crate::config::ConfigError;
use denkmal_core::{GatewayError, TokenError};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Token(#[from] TokenError),
}
