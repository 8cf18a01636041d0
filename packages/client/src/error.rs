//! Client-level error types.

use thiserror::Error;

use crate::domain::{TokenStoreError, ValueObjectError};

/// Errors that end the interactive session.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid configuration: {0}")]
    InvalidValue(#[from] ValueObjectError),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("terminal error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),
}
