//! Session and sync store.
//!
//! [`DiaryStore`] owns the session, the user's and partner's profiles and both
//! diary collections. Its four operations are the only way that state
//! changes. None of them return an error: failures are logged through
//! `tracing` and reported as `false` or an error sentinel, and in every
//! failure case the state is left exactly as it was.

mod outcome;
mod state;

pub use outcome::{DiaryLookup, WriteOutcome};
pub use state::{PairedState, SessionPhase, StoreState};

use chrono::NaiveDate;

use crate::api::{ApiClient, ApiError, LoginSnapshot, NewDiary, RequestConfig, SyncMarkers};
use crate::models::DiaryEntry;

/// Client-side state container for one diary session.
#[derive(Debug)]
pub struct DiaryStore {
    api: ApiClient,
    request: RequestConfig,
    state: StoreState,
}

impl DiaryStore {
    /// Creates an empty, unauthenticated store.
    pub fn new(api: ApiClient, request: RequestConfig) -> Self {
        Self {
            api,
            request,
            state: StoreState::default(),
        }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    /// Headers every request currently carries.
    pub fn request_config(&self) -> &RequestConfig {
        &self.request
    }

    /// Logs in and, on success, runs one full sync before returning `true`.
    ///
    /// `true` only means the credentials were accepted; the sync result is
    /// visible through [`DiaryStore::phase`].
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        let login = match self.request_login(email, password).await {
            Ok(login) => login,
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                return false;
            }
        };

        tracing::debug!("Logged in as user {:?}", login.user_id);
        self.request = self.request.authenticated(login.token.clone());
        self.state.apply_login(login);

        if !self.sync_data().await {
            tracing::warn!("Initial sync after login failed");
        }
        true
    }

    /// Pulls a full snapshot and replaces all synced state with it.
    pub async fn sync_data(&mut self) -> bool {
        let result = self
            .api
            .sync(&self.request, SyncMarkers::full())
            .await
            .and_then(|response| response.into_snapshot());

        match result {
            Ok(snapshot) => {
                tracing::debug!(
                    "Synced {} own and {} paired diaries",
                    snapshot.diaries.len(),
                    snapshot.paired_diaries.len()
                );
                self.state.apply_sync(snapshot);
                true
            }
            Err(e) => {
                tracing::warn!("Sync failed: {}", e);
                false
            }
        }
    }

    /// Submits a new entry, then re-syncs so the entry shows up in
    /// [`StoreState::diaries`] with its server id.
    pub async fn write_diary(
        &mut self,
        date: NaiveDate,
        title: Option<&str>,
        content: &str,
    ) -> WriteOutcome {
        let diary = NewDiary {
            date,
            title: title.map(str::to_string),
            content: content.to_string(),
        };

        let result = self
            .api
            .write_diary(&self.request, &diary)
            .await
            .and_then(|response| response.check());

        match result {
            Ok(()) => {
                self.sync_data().await;
                WriteOutcome::Success
            }
            Err(e) => {
                tracing::warn!("Write diary failed: {}", e);
                WriteOutcome::Error
            }
        }
    }

    /// Fetches one entry by owner and id without touching stored collections.
    pub async fn get_diary(&self, owner_id: i64, diary_id: i64) -> DiaryLookup {
        match self.request_diary(owner_id, diary_id).await {
            Ok(entry) => DiaryLookup::Found(entry),
            Err(e) => {
                tracing::warn!("Get diary {} of user {} failed: {}", diary_id, owner_id, e);
                DiaryLookup::Error
            }
        }
    }

    async fn request_login(&self, email: &str, password: &str) -> Result<LoginSnapshot, ApiError> {
        self.api
            .login(&self.request, email, password)
            .await?
            .into_snapshot()
    }

    async fn request_diary(&self, owner_id: i64, diary_id: i64) -> Result<DiaryEntry, ApiError> {
        self.api
            .diaries_by_ids(&self.request, owner_id, &[diary_id])
            .await?
            .into_first()
    }
}
