//! API error types.

use thiserror::Error;

/// Everything that can go wrong with a single API request.
///
/// Transport problems, a non-zero status field and a missing payload field are
/// kept apart here even though the store reports them all the same way.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server returned HTTP status {0}")]
    HttpStatus(u16),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Server reported error status {0}")]
    ServerStatus(i64),

    #[error("Response is missing field '{0}'")]
    MissingField(&'static str),
}

impl ApiError {
    /// Maps the `error` status field of a response.
    pub fn check_status(status: Option<i64>) -> Result<(), ApiError> {
        match status {
            Some(0) => Ok(()),
            Some(code) => Err(ApiError::ServerStatus(code)),
            None => Err(ApiError::MissingField("error")),
        }
    }
}
