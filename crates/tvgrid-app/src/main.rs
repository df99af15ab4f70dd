//! tvgrid desktop entry point.
//!
//! Drives the home screen from stdin, one remote key per line:
//! `w/a/s/d` (or `up/down/left/right`) move focus, `ok` (or an empty line)
//! confirms, `menu` edits the focused slot, `back` leaves an overlay and
//! `q` quits. The screen is re-rendered as text after every key.

mod app_state;
mod input;
mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use app_state::AppState;
use input::{InputResult, handle_input, parse_line};
use tvgrid_core::config::LauncherConfig;
use tvgrid_core::home::HomeScreen;
use tvgrid_core::platform::{ManifestDirectory, ProcessLauncher};
use tvgrid_core::prefs::FilePrefs;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!("Starting tvgrid (host package {})", config.host_package);

    let prefs = FilePrefs::open(&config.prefs_path)
        .with_context(|| format!("opening {}", config.prefs_path.display()))?;
    let directory = ManifestDirectory::load(&config.manifest_path)
        .with_context(|| format!("loading {}", config.manifest_path.display()))?;
    let mut home = HomeScreen::new(Arc::new(directory), prefs, ProcessLauncher::new(), &config)?;
    let mut state = AppState::new();

    let mut stdout = io::stdout();
    write!(stdout, "{}", render::render(&state, &home))?;
    stdout.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        home.pump();
        let Some(remote) = parse_line(&line) else {
            writeln!(stdout, "unknown key: {}", line.trim())?;
            continue;
        };
        if handle_input(remote, &mut state, &mut home) == InputResult::Quit {
            break;
        }
        home.pump();
        for notice in home.take_notices() {
            writeln!(stdout, "! {}", notice.message)?;
        }
        write!(stdout, "{}", render::render(&state, &home))?;
        stdout.flush()?;
    }

    home.teardown();
    let running = home.launcher().running();
    if running > 0 {
        log::info!("Leaving {running} launched app(s) running");
    }
    log::info!("tvgrid shut down cleanly");
    Ok(())
}

/// Resolve the launcher config from the first CLI argument, then
/// `TVGRID_CONFIG`, else built-in defaults.
fn load_config() -> Result<LauncherConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TVGRID_CONFIG").ok())
        .map(PathBuf::from);
    match path {
        Some(path) => LauncherConfig::load(&path)
            .with_context(|| format!("loading config {}", path.display())),
        None => {
            log::info!("No config given, using defaults");
            Ok(LauncherConfig::default())
        },
    }
}
