use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::repository::ItemRepository;
use crate::store::{self, StoreOptions};

pub mod list;
pub mod tui;

#[derive(Parser)]
#[command(name = "keyview")]
#[command(
    about = "Browse, filter and reveal entries of the desktop secret store",
    long_about = None
)]
#[command(version)]
#[command(help_expected = true)]
pub struct Cli {
    /// Collection alias to browse
    #[arg(
        long,
        env = "KEYVIEW_COLLECTION",
        default_value = "default",
        global = true
    )]
    pub collection: String,

    /// Timeout in seconds for each secret store call
    #[arg(long, env = "KEYVIEW_TIMEOUT", default_value_t = 5, global = true)]
    pub timeout: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Write logs to this file (the TUI owns the terminal, so logs are discarded otherwise)
    #[arg(long, env = "KEYVIEW_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List items, optionally filtered by a search query
    List(list::ListCommand),

    /// Interactive browser (default)
    Tui(tui::TuiCommand),
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Some(Commands::List(cmd)) => cmd.run(self).await,
            Some(Commands::Tui(cmd)) => cmd.run(self).await,
            None => tui::TuiCommand.run(self).await,
        }
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            collection: self.collection.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }

    /// Connect to the secret store and take the one-time snapshot
    pub fn load_repository(&self) -> Result<ItemRepository> {
        let store = store::connect(&self.store_options())?;
        ItemRepository::load(store.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_tui() {
        let cli = Cli::try_parse_from(["keyview"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.collection, "default");
        assert_eq!(cli.store_options().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_list_with_query_and_global_flags() {
        let cli = Cli::try_parse_from([
            "keyview",
            "ls",
            "bank",
            "--collection",
            "session",
            "--timeout",
            "1",
        ])
        .unwrap();

        let Some(Commands::List(cmd)) = &cli.command else {
            panic!("expected list command");
        };
        assert_eq!(cmd.query.as_deref(), Some("bank"));
        assert_eq!(cli.store_options().collection, "session");
        assert_eq!(cli.store_options().timeout, Duration::from_secs(1));
    }
}
