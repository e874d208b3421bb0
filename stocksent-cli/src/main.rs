//! StockSent CLI: fuse one month of prices with headline sentiment.
//!
//! Commands:
//! - `analyze`: run one query and print the report (or JSON)
//! - `shell`: interactive prompt, one query per line (default)
//! - `resolve`: show which ticker a query maps to
//! - `tickers`: list the allow-list
//! - `init-config`: write the default config file

mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use stocksent_core::logging::{install_logging, LoggingConfig};
use stocksent_core::{AppConfig, Pipeline, ProviderMode};

#[derive(Parser)]
#[command(
    name = "stocksent",
    about = "StockSent — stock trend and headline sentiment analyzer"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to the platform config dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use synthetic prices and sample headlines; no network access.
    #[arg(long, global = true, default_value_t = false)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one company name or ticker.
    Analyze {
        /// Company name or ticker (e.g., AAPL, Tesla).
        #[arg(required = true)]
        query: Vec<String>,

        /// Print the full report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Interactive prompt; `quit`, `exit` or EOF leaves.
    Shell,
    /// Show the ticker a query resolves to.
    Resolve {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// List the ticker allow-list.
    Tickers,
    /// Write the default config file.
    InitConfig {
        /// Destination. Defaults to the platform config dir.
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = install_logging(&LoggingConfig::from_env("warn")) {
        eprintln!("warning: logging disabled: {e}");
    }

    let mode = if cli.offline {
        ProviderMode::Offline
    } else {
        ProviderMode::Live
    };

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Analyze { query, json } => {
            let config = AppConfig::load(cli.config.as_deref())?;
            run_analyze(&config, mode, &query.join(" "), json)
        }
        Commands::Shell => {
            let config = AppConfig::load(cli.config.as_deref())?;
            run_shell(&config, mode)
        }
        Commands::Resolve { query } => {
            let config = AppConfig::load(cli.config.as_deref())?;
            run_resolve(&config, &query.join(" "))
        }
        Commands::Tickers => {
            let config = AppConfig::load(cli.config.as_deref())?;
            for symbol in config.ticker_list().symbols() {
                println!("{symbol}");
            }
            Ok(())
        }
        Commands::InitConfig { path, force } => run_init_config(path, force),
    }
}

fn run_analyze(config: &AppConfig, mode: ProviderMode, query: &str, json: bool) -> Result<()> {
    let pipeline = Pipeline::from_config(config, mode)?;
    match pipeline.run_catching(query) {
        Ok(report) if json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Ok(report) => {
            print!("{}", render::report(&report));
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run_shell(config: &AppConfig, mode: ProviderMode) -> Result<()> {
    let pipeline = Pipeline::from_config(config, mode)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Stock Sentiment Analyzer");
    println!("Type a company name or ticker (e.g., AAPL, TSLA, MSFT). `quit` to leave.");
    loop {
        print!("\n> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
            return Ok(());
        }

        println!("Fetching data and analyzing sentiment...");
        match pipeline.run_catching(query) {
            Ok(report) => print!("{}", render::report(&report)),
            Err(e) => {
                tracing::debug!(error = %e, "query failed");
                println!("Error [{}]: {e}", e.category());
            }
        }
    }
}

fn run_resolve(config: &AppConfig, query: &str) -> Result<()> {
    let resolver = stocksent_core::resolver::TickerResolver::new(config.ticker_list());
    match resolver.resolve(query) {
        Some(res) => {
            println!("{} (score {})", res.ticker, res.score);
            Ok(())
        }
        None => {
            if let Some(best) = resolver.best_match(query) {
                eprintln!(
                    "no match (closest: {} at {}, need {})",
                    best.ticker,
                    best.score,
                    resolver.threshold()
                );
            } else {
                eprintln!("no match");
            }
            std::process::exit(1);
        }
    }
}

fn run_init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => AppConfig::default_path().context("no platform config directory; pass --path")?,
    };
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }
    AppConfig::default().write_to(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["stocksent"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn analyze_joins_words_and_reads_global_flags() {
        let cli =
            Cli::try_parse_from(["stocksent", "analyze", "hdfc", "bank", "--json", "--offline"])
                .unwrap();
        assert!(cli.offline);
        match cli.command {
            Some(Commands::Analyze { query, json }) => {
                assert_eq!(query.join(" "), "hdfc bank");
                assert!(json);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn init_config_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        run_init_config(Some(path.clone()), false).unwrap();
        assert!(run_init_config(Some(path.clone()), false).is_err());
        run_init_config(Some(path.clone()), true).unwrap();
        assert!(AppConfig::from_file(&path).is_ok());
    }
}
