//! Folio - Terminal portfolio viewer
//!
//! Renders a personal portfolio site in the terminal, with persisted
//! presentation preferences for palette, typography, density, and
//! motion.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use folio::constants::APP_BINARY_NAME;
use folio::preferences::PreferenceStore;
use folio::tui::{restore_terminal, run_app, setup_terminal, AppState};

/// Folio - Terminal portfolio viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Jump straight to a section, e.g. "projects" or "#projects"
    #[arg(short, long, value_name = "ID")]
    section: Option<String>,

    /// Read and write preferences at this path instead of the default
    /// configuration directory
    #[arg(long, value_name = "FILE")]
    prefs_file: Option<PathBuf>,

    /// Delete the stored preference record and exit
    #[arg(long)]
    reset_preferences: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let store = match cli.prefs_file {
        Some(path) => PreferenceStore::at_path(path),
        None => PreferenceStore::open_default()?,
    };

    if cli.reset_preferences {
        store.reset()?;
        println!("Preferences reset. Run {APP_BINARY_NAME} to start fresh.");
        return Ok(());
    }

    let mut state = AppState::new(store, cli.section.as_deref());

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut state, &mut terminal);
    restore_terminal(terminal)?;

    result
}
