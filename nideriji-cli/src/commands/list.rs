use chrono::{Datelike, NaiveDate};
use clap::Args;
use nideriji_core::{
    format_content, format_date, format_day, format_title, to_chinese_num, DiaryEntry,
};

use super::OutputFormat;
use crate::config::Config;
use crate::session;

/// List synced diary entries
#[derive(Args)]
pub struct ListCommand {
    /// List the paired user's entries instead of your own
    #[arg(long, short)]
    paired: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl ListCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let store = session::open(config).await?;
        let state = store.state();

        if self.paired && state.paired().is_none() {
            return Err("Not paired with another user".into());
        }
        let diaries = if self.paired {
            state.paired_diaries()
        } else {
            state.diaries()
        };

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(diaries)?);
            }
            OutputFormat::Text => {
                if diaries.is_empty() {
                    println!("No diaries found.");
                    return Ok(());
                }
                for line in render_list(diaries) {
                    println!("{}", line);
                }
            }
        }

        Ok(())
    }
}

/// Lines for the text listing, with a heading whenever the month changes.
/// Entries stay in server order.
fn render_list(diaries: &[DiaryEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_month = None;

    for entry in diaries {
        let month = (entry.date.year(), entry.date.month());
        if current_month != Some(month) {
            if current_month.is_some() {
                lines.push(String::new());
            }
            lines.push(month_heading(entry.date));
            current_month = Some(month);
        }
        lines.push(entry_line(entry));
    }

    lines
}

fn month_heading(date: NaiveDate) -> String {
    let parts = format_day(date);
    let month = to_chinese_num(parts.month).unwrap_or_else(|| parts.month.to_string());
    format!("{}月 {}", month, date.year())
}

fn entry_line(entry: &DiaryEntry) -> String {
    let day = format_day(entry.date);
    let time = format_date(entry.written_at()).time;
    let title = format_title(entry.title.as_deref(), entry.date);
    let snippet = format_content(Some(&entry.content));

    format!(
        "  {:>2} {} {}  [{}] {}  {}",
        day.day, day.week, time, entry.id, title, snippet
    )
}
