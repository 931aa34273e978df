use clap::Args;
use nideriji_core::{DiaryStore, SessionPhase};

use crate::config::Config;
use crate::session;

/// Log in and show a summary of the synced account
#[derive(Args)]
pub struct LoginCommand {}

impl LoginCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let store = session::open(config).await?;
        print_summary(&store);
        Ok(())
    }
}

fn print_summary(store: &DiaryStore) {
    let state = store.state();

    let name = state
        .user_info()
        .map(|profile| profile.display_name())
        .unwrap_or("(unknown)");
    match state.user_id() {
        Some(id) => println!("Logged in as {} (user {})", name, id),
        None => println!("Logged in as {}", name),
    }

    match (state.paired_info(), state.paired_id()) {
        (Some(paired), Some(id)) => println!("Paired with {} (user {})", paired.display_name(), id),
        (Some(paired), None) => println!("Paired with {}", paired.display_name()),
        (None, _) => println!("Not paired"),
    }

    if store.phase() == SessionPhase::Synced {
        println!(
            "Diaries: {} own, {} paired",
            state.diaries().len(),
            state.paired_diaries().len()
        );
    } else {
        println!("Sync failed; diaries are not available.");
    }
}
