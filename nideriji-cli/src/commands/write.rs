use chrono::{Local, NaiveDate};
use clap::Args;
use std::io::Read;

use crate::config::Config;
use crate::session;

/// Write a new diary entry
#[derive(Args)]
pub struct WriteCommand {
    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long, short)]
    date: Option<String>,

    /// Entry title; the date is shown when omitted
    #[arg(long, short)]
    title: Option<String>,

    /// Entry content; read from stdin when omitted
    content: Option<String>,
}

impl WriteCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let date = parse_date(self.date.as_deref())?;
        let content = match &self.content {
            Some(content) => content.clone(),
            None => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };

        let mut store = session::open(config).await?;
        let outcome = store
            .write_diary(date, self.title.as_deref(), &content)
            .await;

        if !outcome.is_success() {
            return Err(format!("Failed to write diary for {} ({})", date, outcome).into());
        }

        println!("{}: wrote diary for {}", outcome, date);
        println!("{} diaries after sync", store.state().diaries().len());
        Ok(())
    }
}

fn parse_date(input: Option<&str>) -> Result<NaiveDate, String> {
    match input {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD format.", s)),
        None => Ok(Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2024-03-05")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
        assert_eq!(parse_date(None).unwrap(), Local::now().date_naive());
    }

    #[test]
    fn test_parse_date_invalid() {
        let err = parse_date(Some("03/05/2024")).unwrap_err();
        assert!(err.contains("YYYY-MM-DD"));
    }
}
