//! Client-side error type.
//!
//! Every variant renders as the single user-visible message shown next to the
//! failed action; the UI does not branch on the kind.

use thiserror::Error;

use crate::storage::StorageError;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The API answered with a success status but a body of the wrong shape.
    #[error("unexpected response from API: {0}")]
    UnexpectedBody(String),

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A form failed its required-field check; nothing was sent.
    #[error("{0}")]
    Validation(String),

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("admin login required (run `blog login`)")]
    AdminRequired,
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}
