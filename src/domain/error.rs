use thiserror::Error;

/// Flat classification of store failures, for callers that match on the
/// failure category without destructuring the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadData,
    EncodingFailed,
    DecodingError,
    ItemNotFound,
    UnexpectedData,
    ServiceError,
    Unknown,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Cannot store an absent value")]
    BadData,

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Decoding failed: {0}")]
    DecodingError(String),

    #[error("Item not found")]
    ItemNotFound,

    #[error("Unexpected payload shape: {0}")]
    UnexpectedData(String),

    #[error("Secret service error: {message}")]
    ServiceError {
        status: Option<i32>,
        message: String,
    },

    #[error("Unknown secret service failure")]
    Unknown,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::BadData => ErrorKind::BadData,
            StoreError::EncodingFailed(_) => ErrorKind::EncodingFailed,
            StoreError::DecodingError(_) => ErrorKind::DecodingError,
            StoreError::ItemNotFound => ErrorKind::ItemNotFound,
            StoreError::UnexpectedData(_) => ErrorKind::UnexpectedData,
            StoreError::ServiceError { .. } => ErrorKind::ServiceError,
            StoreError::Unknown => ErrorKind::Unknown,
        }
    }

    /// Native status code reported by the host facility, when one was.
    pub fn status(&self) -> Option<i32> {
        match self {
            StoreError::ServiceError { status, .. } => *status,
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            StoreError::EncodingFailed(m)
            | StoreError::DecodingError(m)
            | StoreError::UnexpectedData(m)
            | StoreError::ServiceError { message: m, .. } => Some(m),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
