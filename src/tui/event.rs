//! Terminal event pump
//!
//! A background thread polls crossterm and forwards key and resize events,
//! plus a tick at a fixed rate. The tick is what lets store subscriptions
//! and toast expiry make progress while the user is idle.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

pub const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
    /// The terminal could not be read; the loop should stop
    Failed(String),
}

pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                let forwarded = match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        // Ignore key release/repeat reports on terminals that send them
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            sender.send(Event::Key(key))
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => sender.send(Event::Resize(w, h)),
                        Ok(_) => Ok(()),
                        Err(e) => {
                            let _ = sender.send(Event::Failed(e.to_string()));
                            return;
                        }
                    },
                    Ok(false) => Ok(()),
                    Err(e) => {
                        let _ = sender.send(Event::Failed(e.to_string()));
                        return;
                    }
                };
                if forwarded.is_err() {
                    return;
                }

                if last_tick.elapsed() >= tick_rate {
                    if sender.send(Event::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { receiver }
    }

    /// Block until the next event
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.receiver.recv()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}
