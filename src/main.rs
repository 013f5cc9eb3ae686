#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::fs;
use std::io::{self, stdout};
use std::path::Path;

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use ugcreg::config::Config;
use ugcreg::tui::App;
use ugcreg::tui::widgets::HeaderCallbacks;

/// File the application log is written to, inside the data directory.
const LOG_FILE: &str = "ugcreg.log";

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    let data_dir = config.data_dir()?;
    fs::create_dir_all(&data_dir)?;
    let _guard = init_logging(&data_dir);
    tracing::info!(data_dir = %data_dir.display(), sink = ?config.sink, "starting");

    let header = HeaderCallbacks::new(
        || tracing::info!("sign-in requested"),
        || tracing::info!("sign-up requested"),
    );
    let mut app = App::from_config(&config, header)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = app.run(&mut terminal);

    let restore_result = restore_terminal();
    tracing::info!("exiting");
    match result {
        Err(e) => Err(e.into()),
        Ok(()) => restore_result.map_err(Into::into),
    }
}

/// Routes `tracing` output to a file; the terminal belongs to the UI.
///
/// `RUST_LOG` overrides the default `ugcreg=info` filter. The returned guard
/// flushes buffered lines when dropped.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn init_logging(dir: &Path) -> WorkerGuard {
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ugcreg=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen);
    raw_result.and(screen_result)
}
