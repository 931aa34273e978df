//! HTTP client for the nideriji remote API.
//!
//! Every endpoint takes a form-encoded body and answers with JSON carrying an
//! `error` status field where `0` means success. Credentials travel in a
//! [`RequestConfig`] that callers pass to each request.

mod client;
mod error;
mod protocol;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{ApiClient, RequestConfig, AUTH_HEADER, DEFAULT_SERVER_URL, DEFAULT_USER_AGENT};
pub use error::ApiError;
pub use protocol::{
    DiariesResponse, LoginResponse, LoginSnapshot, NewDiary, StatusResponse, SyncMarkers,
    SyncResponse, SyncSnapshot,
};
