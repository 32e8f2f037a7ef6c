//! Terminal setup and teardown

use std::io::{self, Stdout, stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::error::{KeyviewError, Result};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Switch to raw mode on the alternate screen.
///
/// The returned guard restores the terminal when dropped, on both the normal
/// and the error path.
pub fn enter_terminal() -> Result<(Tui, TerminalGuard)> {
    install_panic_hook();

    let setup = || -> io::Result<Tui> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Terminal::new(CrosstermBackend::new(stdout()))
    };

    match setup() {
        Ok(terminal) => Ok((terminal, TerminalGuard)),
        Err(e) => {
            let _ = leave_terminal();
            Err(KeyviewError::Terminal(format!(
                "Failed to initialize terminal: {}",
                e
            )))
        }
    }
}

/// Restore the terminal to its original state
pub fn leave_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Restores the terminal when dropped
pub struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = leave_terminal();
    }
}

/// Restore the terminal before the panic message is printed
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = leave_terminal();
        original_hook(panic_info);
    }));
}
