//! Nideriji Core Library
//!
//! Client-side pieces of the nideriji diary service: the remote API client,
//! the session/sync store that mediates between a front end and that API, and
//! pure formatting helpers for rendering entries.

pub mod api;
pub mod format;
pub mod models;
pub mod store;

pub use api::{ApiClient, ApiError, RequestConfig, DEFAULT_SERVER_URL, DEFAULT_USER_AGENT};
pub use format::{
    format_content, format_date, format_day, format_timestamp, format_title, to_chinese_num,
    DateParts,
};
pub use models::{DiaryEntry, PairedUserProfile, UserProfile};
pub use store::{DiaryLookup, DiaryStore, PairedState, SessionPhase, StoreState, WriteOutcome};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
