//! Request and response bodies for the remote API.

use chrono::NaiveDate;
use serde::Deserialize;

use super::error::ApiError;
use crate::models::{DiaryEntry, PairedUserProfile, UserProfile};

/// Form fields for a request body. Absent values are left out of the form.
pub(crate) type FormFields = Vec<(&'static str, String)>;

/// Bare status reply, used by endpoints whose only payload is success.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub error: Option<i64>,
}

impl StatusResponse {
    pub fn check(&self) -> Result<(), ApiError> {
        ApiError::check_status(self.error)
    }
}

/// Reply to `POST /login/`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub error: Option<i64>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub userid: Option<i64>,
    #[serde(default)]
    pub user_config: Option<UserProfile>,
}

/// A login reply that passed every check, ready to become session state.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginSnapshot {
    pub token: String,
    pub user_id: Option<i64>,
    pub profile: UserProfile,
}

impl LoginResponse {
    pub fn into_snapshot(self) -> Result<LoginSnapshot, ApiError> {
        ApiError::check_status(self.error)?;
        let token = self
            .token
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingField("token"))?;
        let profile = self
            .user_config
            .ok_or(ApiError::MissingField("user_config"))?;

        Ok(LoginSnapshot {
            token,
            user_id: self.userid,
            profile,
        })
    }
}

/// The four "last synced" markers sent to `POST /v2/sync/`.
///
/// A zero marker asks for everything in that category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncMarkers {
    pub user_config_ts: i64,
    pub diaries_ts: i64,
    pub readmark_ts: i64,
    pub images_ts: i64,
}

impl SyncMarkers {
    /// Markers requesting a full snapshot.
    pub fn full() -> Self {
        Self::default()
    }

    pub(crate) fn to_form(self) -> FormFields {
        vec![
            ("user_config_ts", self.user_config_ts.to_string()),
            ("diaries_ts", self.diaries_ts.to_string()),
            ("readmark_ts", self.readmark_ts.to_string()),
            ("images_ts", self.images_ts.to_string()),
        ]
    }
}

/// Reply to `POST /v2/sync/`.
#[derive(Debug, Deserialize)]
pub struct SyncResponse {
    pub error: Option<i64>,
    #[serde(default)]
    pub user_config: Option<UserProfile>,
    #[serde(default)]
    pub diaries: Option<Vec<DiaryEntry>>,
    #[serde(default)]
    pub diaries_paired: Option<Vec<DiaryEntry>>,
}

/// A validated sync reply. Applying it replaces all synced state at once.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncSnapshot {
    pub user_id: Option<i64>,
    pub profile: UserProfile,
    pub paired: Option<PairedUserProfile>,
    pub diaries: Vec<DiaryEntry>,
    pub paired_diaries: Vec<DiaryEntry>,
}

impl SyncResponse {
    pub fn into_snapshot(self) -> Result<SyncSnapshot, ApiError> {
        ApiError::check_status(self.error)?;
        let profile = self
            .user_config
            .ok_or(ApiError::MissingField("user_config"))?;
        let paired = profile.paired_user_config.clone();

        // Partner entries are only kept alongside a partner profile.
        let paired_diaries = match paired {
            Some(_) => self.diaries_paired.unwrap_or_default(),
            None => Vec::new(),
        };

        Ok(SyncSnapshot {
            user_id: profile.userid,
            profile,
            paired,
            diaries: self.diaries.unwrap_or_default(),
            paired_diaries,
        })
    }
}

/// Form body for `POST /write/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiary {
    pub date: NaiveDate,
    pub title: Option<String>,
    pub content: String,
}

impl NewDiary {
    pub(crate) fn to_form(&self) -> FormFields {
        let mut fields = vec![("date", self.date.format("%Y-%m-%d").to_string())];
        if let Some(title) = &self.title {
            fields.push(("title", title.clone()));
        }
        fields.push(("content", self.content.clone()));
        fields
    }
}

/// Reply to `POST /diary/all_by_ids/{owner}/`.
#[derive(Debug, Deserialize)]
pub struct DiariesResponse {
    pub error: Option<i64>,
    #[serde(default)]
    pub diaries: Option<Vec<DiaryEntry>>,
}

impl DiariesResponse {
    /// The first returned entry, if the reply succeeded and carried one.
    pub fn into_first(self) -> Result<DiaryEntry, ApiError> {
        ApiError::check_status(self.error)?;
        self.diaries
            .and_then(|diaries| diaries.into_iter().next())
            .ok_or(ApiError::MissingField("diaries"))
    }
}
