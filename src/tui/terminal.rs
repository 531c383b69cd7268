//! Terminal setup and teardown
//!
//! The panic hook restores the terminal before the panic message prints.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

use crate::config::settings::Settings;
use crate::storage::Storage;

use super::app::App;
use super::event::{Event, EventHandler};
use super::handler::handle_key;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI until the user quits
pub fn run_tui(storage: &Storage, settings: &Settings) -> Result<()> {
    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, storage, settings);
    restore_terminal()?;
    result
}

fn event_loop(terminal: &mut Tui, storage: &Storage, settings: &Settings) -> Result<()> {
    let mut app = App::new(storage, settings);
    let events = EventHandler::default();
    tracing::info!("tui started");

    while !app.should_quit {
        terminal.draw(|frame| super::views::render(frame, &app))?;

        match events.next()? {
            Event::Key(key) => {
                handle_key(&mut app, key);
                // Deliver store changes caused by the key right away
                app.poll_subscriptions();
            }
            Event::Resize(_, _) => {}
            Event::Tick => app.tick(),
            Event::Failed(error) => {
                tracing::error!(%error, "terminal input failed");
                return Err(crate::error::SpendlogError::Tui(error).into());
            }
        }
    }

    tracing::info!("tui stopped");
    Ok(())
}
