//! In-memory session and sync state owned by the store.

use serde::Serialize;

use crate::api::{LoginSnapshot, SyncSnapshot};
use crate::models::{DiaryEntry, PairedUserProfile, UserProfile};

/// Where the store is in its login lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No token held
    Unauthenticated,
    /// Token held, no sync has succeeded since login
    Authenticated,
    /// Token held and at least one sync succeeded since login
    Synced,
}

/// Partner profile together with the partner's entries.
///
/// Both are replaced or cleared as one value, so partner entries never
/// outlive the profile they belong to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairedState {
    pub profile: PairedUserProfile,
    pub diaries: Vec<DiaryEntry>,
}

impl PairedState {
    pub fn user_id(&self) -> Option<i64> {
        self.profile.userid
    }
}

/// Everything the store knows. Only [`DiaryStore`](super::DiaryStore)
/// operations mutate it; everyone else reads through the accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreState {
    #[serde(skip)]
    token: Option<String>,
    user_id: Option<i64>,
    user_info: Option<UserProfile>,
    paired: Option<PairedState>,
    diaries: Vec<DiaryEntry>,
    synced: bool,
}

impl StoreState {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    pub fn user_info(&self) -> Option<&UserProfile> {
        self.user_info.as_ref()
    }

    pub fn paired(&self) -> Option<&PairedState> {
        self.paired.as_ref()
    }

    pub fn paired_info(&self) -> Option<&PairedUserProfile> {
        self.paired.as_ref().map(|p| &p.profile)
    }

    pub fn paired_id(&self) -> Option<i64> {
        self.paired.as_ref().and_then(PairedState::user_id)
    }

    /// Own entries in server order.
    pub fn diaries(&self) -> &[DiaryEntry] {
        &self.diaries
    }

    /// Partner entries in server order; empty when unpaired.
    pub fn paired_diaries(&self) -> &[DiaryEntry] {
        match &self.paired {
            Some(paired) => &paired.diaries,
            None => &[],
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.token, self.synced) {
            (None, _) => SessionPhase::Unauthenticated,
            (Some(_), false) => SessionPhase::Authenticated,
            (Some(_), true) => SessionPhase::Synced,
        }
    }

    /// Starts a session from a validated login reply.
    ///
    /// Partner entries from any earlier session are dropped; the sync that
    /// follows login brings them back.
    pub(crate) fn apply_login(&mut self, login: LoginSnapshot) {
        let paired = login.profile.paired_user_config.clone();

        self.token = Some(login.token);
        self.user_id = login.user_id;
        self.user_info = Some(login.profile);
        self.paired = paired.map(|profile| PairedState {
            profile,
            diaries: Vec::new(),
        });
        self.synced = false;
    }

    /// Replaces all synced state at once.
    pub(crate) fn apply_sync(&mut self, sync: SyncSnapshot) {
        if sync.user_id.is_some() {
            self.user_id = sync.user_id;
        }
        self.user_info = Some(sync.profile);
        self.paired = sync.paired.map(|profile| PairedState {
            profile,
            diaries: sync.paired_diaries,
        });
        self.diaries = sync.diaries;
        self.synced = true;
    }
}
