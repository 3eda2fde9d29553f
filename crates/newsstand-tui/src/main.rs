//! Newsstand - browse a directory of news sources in the terminal
//!
//! Built with Ratatui and crossterm.

mod app;
mod config;
mod handlers;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use newsstand_core::{catalog, Directory, JsonFileStore, Language, MemoryStore};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use app::{App, AppState, Store};

/// Newsstand - a directory of news sources
#[derive(Parser, Debug)]
#[command(name = "newsstand")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Catalog language: hindi or malayalam (overrides config)
    #[arg(short, long)]
    language: Option<Language>,

    /// Catalog directory or base URL (overrides config)
    #[arg(long, value_name = "LOCATION")]
    catalog: Option<String>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("newsstand=info".parse()?))
        .with_writer(std::io::stderr) // Write logs to stderr to not interfere with TUI
        .init();

    let args = Args::parse();

    let mut config = config::Config::load(args.config)?;
    if let Some(language) = args.language {
        config.language = language;
    }
    if let Some(catalog) = args.catalog {
        tracing::info!("Overriding catalog location from CLI: {}", catalog);
        config.catalog_location = catalog;
    }

    tracing::info!(
        "Starting Newsstand ({}) with catalog at {}",
        config.language.name(),
        config.catalog_location
    );

    let store = open_store(config.storage_path.clone());
    let source = catalog::source_for(&config.catalog_location, config.language)
        .context("Failed to resolve catalog location")?;
    let directory = Directory::open(source.as_ref(), config.language, store, config.icon_settings());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(directory);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Open the persistent store, falling back to memory for this session.
fn open_store(path: Option<PathBuf>) -> Store {
    let Some(path) = path.or_else(JsonFileStore::default_path) else {
        tracing::warn!("No data directory; favorites and added entries will not be saved");
        return Box::new(MemoryStore::new());
    };

    match JsonFileStore::open(&path) {
        Ok(store) => {
            tracing::info!("Using storage at {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!("Storage unavailable, keeping state in memory: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if handlers::handle_key(app, key) {
                    break;
                }
            }
        }

        if matches!(app.state, AppState::Quit) {
            break;
        }
    }

    Ok(())
}
