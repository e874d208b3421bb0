//! StockSent TUI: one-screen dashboard for price trend and headline sentiment.
//!
//! Layout:
//! 1. Query box
//! 2. One-month close chart
//! 3. Headlines with scores | prediction card
//! 4. Status bar

mod app;
mod input;
mod theme;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use stocksent_core::logging::{install_logging, LogTarget, LoggingConfig};
use stocksent_core::{AppConfig, Pipeline, PipelineError, ProviderMode};

use crate::app::AppState;

#[derive(Parser)]
#[command(name = "stocksent-tui", about = "StockSent terminal dashboard")]
struct Args {
    /// Path to a TOML config file. Defaults to the platform config dir.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use synthetic prices and sample headlines; no network access.
    #[arg(long, default_value_t = false)]
    offline: bool,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    // Stderr belongs to the terminal; log to a file unless one was chosen.
    let mut log_config = LoggingConfig::from_env("info");
    if log_config.target == LogTarget::Stderr {
        if let Some(path) = LoggingConfig::default_log_file() {
            log_config = log_config.with_file(path);
        }
    }
    if log_config.target != LogTarget::Stderr {
        if let Err(e) = install_logging(&log_config) {
            eprintln!("warning: logging disabled: {e}");
        }
    }

    let config = AppConfig::load(args.config.as_deref()).context("loading config")?;
    let mode = if args.offline {
        ProviderMode::Offline
    } else {
        ProviderMode::Live
    };
    let pipeline = Pipeline::from_config(&config, mode)?;
    tracing::info!(?pipeline, "starting dashboard");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut app = AppState::new(args.offline);
    if !args.offline && !config.has_api_key() {
        app.set_warning("No news API key set (NEWS_API_KEY); headlines will be empty");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app, &pipeline);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    pipeline: &Pipeline,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. A submitted query runs after the "fetching" frame is on screen.
        if let Some(query) = app.take_pending() {
            let outcome = pipeline.run_catching(&query);
            if let Err(e) = &outcome {
                tracing::warn!(query = %query, error = %e, "query failed");
                // The panic hook restored the terminal; take it back.
                if matches!(e, PipelineError::Internal { .. }) {
                    enable_raw_mode()?;
                    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
                    terminal.clear()?;
                }
            }
            app.apply_outcome(&query, outcome);
            // Keys typed while blocked are stale.
            while event::poll(Duration::ZERO)? {
                let _ = event::read()?;
            }
            continue;
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
