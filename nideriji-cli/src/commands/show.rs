use clap::Args;
use nideriji_core::{format_date, format_day, DiaryEntry, DiaryLookup};

use super::OutputFormat;
use crate::config::Config;
use crate::session;

/// Show a single diary entry fetched from the server
#[derive(Args)]
pub struct ShowCommand {
    /// Diary ID
    diary_id: i64,

    /// Owner's user ID, defaults to your own
    #[arg(long, short)]
    owner: Option<i64>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl ShowCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let store = session::open(config).await?;
        let owner = self
            .owner
            .or_else(|| store.state().user_id())
            .ok_or("Unknown user ID; pass --owner")?;

        let lookup = store.get_diary(owner, self.diary_id).await;
        println!("{}", render_lookup(&lookup, &self.format, self.diary_id, owner)?);
        Ok(())
    }
}

fn render_lookup(
    lookup: &DiaryLookup,
    format: &OutputFormat,
    diary_id: i64,
    owner: i64,
) -> Result<String, Box<dyn std::error::Error>> {
    match (lookup, format) {
        (DiaryLookup::Found(_), OutputFormat::Json) => Ok(serde_json::to_string_pretty(lookup)?),
        (DiaryLookup::Found(entry), OutputFormat::Text) => Ok(render_entry(entry)),
        (DiaryLookup::Error, _) => {
            Err(format!("Diary not found: {} (owner {})", diary_id, owner).into())
        }
    }
}

fn render_entry(entry: &DiaryEntry) -> String {
    let day = format_day(entry.date);
    let time = format_date(entry.written_at()).time;
    format!(
        "{}\n\n{}月{}日 {} {}",
        entry, day.month, day.day, day.week, time
    )
}
