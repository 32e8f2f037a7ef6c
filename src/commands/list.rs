use clap::Args;
use tabled::settings::{
    Color, Format, Modify, Style, Width,
    object::{Columns, Rows},
};
use tabled::{Table, Tabled};

use crate::commands::Cli;
use crate::error::Result;
use crate::filter::filter;
use crate::repository::ItemRepository;

#[derive(Debug, Args)]
#[command(visible_aliases = ["ls"])]
pub struct ListCommand {
    /// Only show items whose identifier or username contains this (case-insensitive)
    pub query: Option<String>,

    /// Show long identifiers without wrapping
    #[arg(short, long)]
    pub full: bool,

    /// Print identifiers only, one per line
    #[arg(long)]
    pub plain: bool,
}

#[derive(Debug, Tabled, PartialEq, Eq)]
struct ItemRow {
    #[tabled(rename = "Identifier")]
    identifier: String,
    #[tabled(rename = "Username")]
    username: String,
}

impl ListCommand {
    pub async fn run(&self, cli: &Cli) -> Result<()> {
        let repository = cli.load_repository()?;
        tracing::debug!(
            "Listing collection '{}' with query {:?}",
            cli.collection,
            self.query
        );

        let rows = self.rows(&repository);
        if rows.is_empty() {
            if !self.plain {
                println!("No matching items");
            }
            return Ok(());
        }

        if self.plain {
            for row in rows {
                println!("{}", row.identifier);
            }
            return Ok(());
        }

        println!("{}", self.table(rows));
        Ok(())
    }

    fn rows(&self, repository: &ItemRepository) -> Vec<ItemRow> {
        filter(repository.records(), self.query.as_deref().unwrap_or(""))
            .into_iter()
            .map(|index| {
                let record = &repository.records()[index];
                ItemRow {
                    identifier: record.identifier.clone(),
                    username: record.username.clone(),
                }
            })
            .collect()
    }

    fn table(&self, rows: Vec<ItemRow>) -> Table {
        let mut table = Table::new(rows);
        table.with(Style::empty());

        // Apply colors only if enabled
        if console::colors_enabled() {
            table.with(
                Modify::new(Rows::first())
                    .with(Color::FG_BRIGHT_BLUE)
                    .with(Format::content(|s| format!("\x1b[1m{}\x1b[0m", s))),
            );
        }

        if !self.full {
            table.with(Modify::new(Columns::first()).with(Width::wrap(60)));
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::{MemoryEntry, MemoryStore};

    fn command(query: &str) -> ListCommand {
        ListCommand {
            query: Some(query.to_string()),
            full: false,
            plain: false,
        }
    }

    fn repository() -> ItemRepository {
        let store = MemoryStore::new(vec![
            MemoryEntry::new("Email", &[("username", "alice")], b"hunter2"),
            MemoryEntry::new("Bank", &[("application", "web"), ("username", "bob")], b"pin"),
        ]);
        ItemRepository::load(&store).unwrap()
    }

    #[test]
    fn test_rows_follow_filter() {
        let repository = repository();

        let all = command("").rows(&repository);
        assert_eq!(
            all.iter().map(|r| r.identifier.as_str()).collect::<Vec<_>>(),
            vec!["Bank: web", "Email"]
        );

        let filtered = command("BOB").rows(&repository);
        assert_eq!(
            filtered,
            vec![ItemRow {
                identifier: "Bank: web".to_string(),
                username: "bob".to_string(),
            }]
        );
    }

    #[test]
    fn test_table_never_contains_secrets() {
        let repository = repository();
        let cmd = command("");
        let table = cmd.table(cmd.rows(&repository)).to_string();

        assert!(table.contains("Identifier"));
        assert!(table.contains("alice"));
        assert!(!table.contains("hunter2"));
    }
}
