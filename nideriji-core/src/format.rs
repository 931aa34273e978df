//! Display helpers for dates, titles and content snippets.
//!
//! All functions are pure. Lengths are counted in characters, not rendered
//! width, so a CJK title and an ASCII title truncate at the same count.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

/// Titles and snippets longer than this are truncated.
pub const SNIPPET_CHARS: usize = 10;

const ELLIPSIS: &str = "...";

const WEEKDAYS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

const NUMERALS: [&str; 11] = [
    "零", "一", "二", "三", "四", "五", "六", "七", "八", "九", "十",
];

/// Display fields derived from a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateParts {
    /// Day of month, 1-31
    pub day: u32,
    /// Weekday label such as `星期日`
    pub week: String,
    /// 24-hour `HH:mm`
    pub time: String,
    /// Month, 1-12
    pub month: u32,
}

pub fn format_date(datetime: NaiveDateTime) -> DateParts {
    let weekday = datetime.weekday().num_days_from_sunday() as usize;
    DateParts {
        day: datetime.day(),
        week: format!("星期{}", WEEKDAYS[weekday]),
        time: format!("{:02}:{:02}", datetime.hour(), datetime.minute()),
        month: datetime.month(),
    }
}

/// [`format_date`] for a bare calendar date, treated as midnight.
pub fn format_day(date: NaiveDate) -> DateParts {
    format_date(date.and_time(NaiveTime::MIN))
}

/// [`format_date`] for a unix timestamp in seconds, rendered in local time.
pub fn format_timestamp(secs: i64) -> Option<DateParts> {
    local_datetime_from_unix(secs).map(format_date)
}

pub fn local_datetime_from_unix(secs: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0).map(|utc| utc.with_timezone(&Local).naive_local())
}

/// Title shown in lists: the entry date when there is no title, otherwise
/// the title cut to [`SNIPPET_CHARS`] characters.
pub fn format_title(title: Option<&str>, date: NaiveDate) -> String {
    match title {
        None | Some("") => date.format("%Y-%m-%d").to_string(),
        Some(title) if title.chars().count() > SNIPPET_CHARS => {
            let head: String = title.chars().take(SNIPPET_CHARS).collect();
            head + ELLIPSIS
        }
        Some(title) => title.to_string(),
    }
}

/// One-line preview of entry content.
///
/// Long content is cut to [`SNIPPET_CHARS`] characters before line breaks are
/// removed, so a preview spanning a line break is shorter than the limit.
pub fn format_content(content: Option<&str>) -> String {
    let trimmed = match content {
        None | Some("") => return String::new(),
        Some(content) => content.trim(),
    };

    if trimmed.chars().count() > SNIPPET_CHARS {
        let head: String = trimmed.chars().take(SNIPPET_CHARS).collect();
        strip_line_breaks(&head) + ELLIPSIS
    } else {
        strip_line_breaks(trimmed)
    }
}

fn strip_line_breaks(text: &str) -> String {
    text.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// Chinese numeral for `0..=99`. Larger values have no defined rendering and
/// yield `None`.
pub fn to_chinese_num(num: u32) -> Option<String> {
    let num = num as usize;
    let ones = |n: usize| if n % 10 == 0 { "" } else { NUMERALS[n % 10] };

    match num {
        0..=10 => Some(NUMERALS[num].to_string()),
        11..=19 => Some(format!("十{}", ones(num))),
        20..=99 => Some(format!("{}十{}", NUMERALS[num / 10], ones(num))),
        _ => None,
    }
}
