//! TUI command - Interactive secret store browser

use std::time::Duration;

use clap::Args;

use crate::commands::Cli;
use crate::error::{KeyviewError, Result};
use crate::tui::ui;
use crate::tui::{App, Event, EventHandler, enter_terminal};

#[derive(Debug, Args)]
pub struct TuiCommand;

impl TuiCommand {
    pub async fn run(&self, cli: &Cli) -> Result<()> {
        // Snapshot before touching the terminal so a dead backend is reported
        // on a normal screen
        let repository = cli.load_repository()?;
        let mut app = App::new(repository, cli.collection.clone());

        let (mut terminal, _guard) = enter_terminal()?;
        let mut events = EventHandler::new(Duration::from_millis(250));

        while app.running {
            terminal
                .draw(|frame| ui::render(&mut app, frame))
                .map_err(|e| KeyviewError::Terminal(format!("Failed to render: {}", e)))?;

            match events.next().await {
                Some(Event::Key(key)) => app.handle_key(key),
                Some(Event::Mouse(mouse)) => app.handle_mouse(mouse),
                Some(Event::Tick) => {}
                None => break,
            }
        }

        Ok(())
    }
}
