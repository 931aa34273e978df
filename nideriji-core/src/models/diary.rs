use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::format::local_datetime_from_unix;

/// A single diary record as returned by the sync and lookup endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: i64,
    /// Owner's user id
    #[serde(default)]
    pub user: Option<i64>,
    pub date: NaiveDate,
    #[serde(default)]
    pub title: Option<String>,
    /// Empty when the server sends `null`
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Creation time in unix seconds
    #[serde(default)]
    pub createdtime: Option<i64>,
    #[serde(default)]
    pub ts: Option<i64>,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl DiaryEntry {
    /// Local time the entry was written, falling back to midnight of its date.
    pub fn written_at(&self) -> NaiveDateTime {
        self.createdtime
            .and_then(local_datetime_from_unix)
            .unwrap_or_else(|| self.date.and_time(NaiveTime::MIN))
    }
}

impl fmt::Display for DiaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.title.as_deref().filter(|t| !t.is_empty());
        match title {
            Some(title) => writeln!(f, "{} - {}", self.date, title)?,
            None => writeln!(f, "{}", self.date)?,
        }
        writeln!(f, "{}", "=".repeat(30))?;

        if let Some(weather) = self.weather.as_deref().filter(|w| !w.is_empty()) {
            writeln!(f, "Weather: {}", weather)?;
        }
        if let Some(mood) = self.mood.as_deref().filter(|m| !m.is_empty()) {
            writeln!(f, "Mood: {}", mood)?;
        }

        writeln!(f)?;
        write!(f, "{}", self.content)
    }
}
