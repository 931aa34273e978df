//! Results of the store operations that report a sentinel instead of `bool`.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::models::DiaryEntry;

/// Outcome of [`DiaryStore::write_diary`](super::DiaryStore::write_diary).
///
/// Renders as `Success` or `error`; callers compare against those strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Success,
    Error,
}

impl WriteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteOutcome::Success => "Success",
            WriteOutcome::Error => "error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, WriteOutcome::Success)
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of [`DiaryStore::get_diary`](super::DiaryStore::get_diary).
///
/// Serializes as the entry itself, or as the bare string `error`.
#[derive(Debug, Clone, PartialEq)]
pub enum DiaryLookup {
    Found(DiaryEntry),
    Error,
}

impl DiaryLookup {
    pub fn entry(&self) -> Option<&DiaryEntry> {
        match self {
            DiaryLookup::Found(entry) => Some(entry),
            DiaryLookup::Error => None,
        }
    }

    pub fn into_entry(self) -> Option<DiaryEntry> {
        match self {
            DiaryLookup::Found(entry) => Some(entry),
            DiaryLookup::Error => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DiaryLookup::Error)
    }
}

impl Serialize for DiaryLookup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DiaryLookup::Found(entry) => entry.serialize(serializer),
            DiaryLookup::Error => serializer.serialize_str(WriteOutcome::Error.as_str()),
        }
    }
}
