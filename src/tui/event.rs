//! Terminal event collection
//!
//! A background task polls crossterm and forwards events over a channel, so
//! the main loop handles them one at a time in arrival order.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Poll timeout or terminal resize; triggers a redraw
    Tick,
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // crossterm polling blocks, keep it off the async workers
        tokio::task::spawn_blocking(move || {
            loop {
                let event = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(CrosstermEvent::Key(key)) => Event::Key(key),
                        Ok(CrosstermEvent::Mouse(mouse)) => Event::Mouse(mouse),
                        Ok(CrosstermEvent::Resize(_, _)) => Event::Tick,
                        Ok(_) => continue,
                        Err(e) => {
                            tracing::warn!("Failed to read terminal event: {}", e);
                            continue;
                        }
                    }
                } else {
                    Event::Tick
                };

                // Receiver gone: the app has quit
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Wait for the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
