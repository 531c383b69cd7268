//! Tracing setup
//!
//! The subscriber is installed at most once per process. CLI commands log to
//! stderr; the TUI logs to a file so the alternate screen stays clean.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Where log lines go
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

/// Build the filter from `RUST_LOG`, falling back to `default_directive`
fn build_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("spendlog=warn"))
}

/// Install the global tracing subscriber
pub fn init_tracing(default_directive: &str, target: LogTarget<'_>) {
    TRACING_INIT.call_once(|| {
        let filter = build_filter(default_directive);

        let installed = match target {
            LogTarget::Stderr => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            LogTarget::File(path) => {
                match OpenOptions::new().create(true).append(true).open(path) {
                    Ok(file) => fmt()
                        .with_env_filter(filter)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file))
                        .try_init(),
                    // No log file, no logging; the TUI must not write to stderr
                    Err(_) => Ok(()),
                }
            }
        };

        if let Err(e) = installed {
            eprintln!("Warning: failed to install log subscriber: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_directive_falls_back() {
        // Must not panic on garbage input
        let _ = build_filter("spendlog=[[[");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing("spendlog=debug", LogTarget::Stderr);
        init_tracing("spendlog=trace", LogTarget::Stderr);
    }
}
