//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Identifier is not a positive integer
    #[error("{kind} must be a positive integer (got: {value})")]
    IdInvalid { kind: &'static str, value: String },

    /// AuthToken validation error
    #[error("AuthToken cannot be empty")]
    TokenEmpty,

    /// Fullname validation error
    #[error("Masukkan fullname!")]
    FullnameEmpty,

    /// Fullname too long error
    #[error("Fullname cannot exceed {max} characters (got {actual})")]
    FullnameTooLong { max: usize, actual: usize },

    /// Username validation error
    #[error("Masukkan username!")]
    UsernameEmpty,

    /// Username length error
    #[error("Username must be {min}-{max} characters (got {actual})")]
    UsernameLength {
        min: usize,
        max: usize,
        actual: usize,
    },

    /// Email validation error
    #[error("Masukkan email valid!")]
    EmailInvalid(String),

    /// Email too long error
    #[error("Email cannot exceed {max} characters (got {actual})")]
    EmailTooLong { max: usize, actual: usize },

    /// Password validation error
    #[error("Masukkan password!")]
    PasswordEmpty,

    /// Password too short error
    #[error("Password minimal {min} karakter!")]
    PasswordTooShort { min: usize, actual: usize },

    /// Gender validation error
    #[error("Jenis kelamin must be Man or Woman (got: {0})")]
    GenderInvalid(String),

    /// Birth date validation error
    #[error("Tanggal lahir must use YYYY-MM-DD (got: {0})")]
    BirthDateInvalid(String),

    /// Base URL validation error
    #[error("Base URL must be an absolute http(s) URL (got: {0})")]
    BaseUrlInvalid(String),
}

/// Errors returned by backend gateways.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend answered with a non-success status.
    #[error("request rejected with status {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Rejected {
        status: u16,
        /// The `error` field of the response body, if any.
        message: Option<String>,
    },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Message supplied by the backend, used in user-facing notices.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Whether the backend rejected the stored credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Rejected { status: 401, .. })
    }
}

/// Errors raised by the token store.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token store I/O error: {0}")]
    Io(#[from] std::io::Error),
}
