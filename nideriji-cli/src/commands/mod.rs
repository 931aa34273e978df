mod config_cmd;
mod list;
mod login;
mod show;
mod write;

use clap::ValueEnum;

pub use config_cmd::ConfigCommand;
pub use list::ListCommand;
pub use login::LoginCommand;
pub use show::ShowCommand;
pub use write::WriteCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
