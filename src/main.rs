//! # Holo - Terminal Dashboard Shell
//!
//! Six small apps behind one dock: dashboard stats, weather lookup,
//! a notes editor, a music placeholder, a calculator, and an assistant
//! stub. One selector drives which input is visible and what the body
//! pane renders.

mod app;
mod assistant;
mod calculator;
mod config;
pub mod constants;
mod models;
mod notes;
mod stats;
mod ui;
mod utils;
mod weather;

use anyhow::Result;
use clap::Parser;

use config::Config;
use constants::MIN_REFRESH_MS;

/// Holo - Terminal Dashboard Shell
#[derive(Parser, Debug)]
#[command(name = "holo", version, about = "A terminal dashboard shell — six small apps behind one dock")]
struct Cli {
    /// City for weather lookups (defaults to the built-in location)
    #[arg(long, short = 'c')]
    city: Option<String>,

    /// Color theme (default, nord, dracula)
    #[arg(long, short = 't')]
    theme: Option<String>,

    /// Dashboard refresh rate in milliseconds
    #[arg(long, short = 'r')]
    refresh_rate: Option<u64>,

    /// Skip all network calls; weather reports the static offline reading
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load and apply CLI overrides to config
    let mut config = Config::load();
    if let Some(city) = cli.city {
        config.city = Some(city);
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(rate) = cli.refresh_rate {
        config.refresh_interval_ms = rate.max(MIN_REFRESH_MS);
    }

    // Build and run the application
    let mut app = app::App::new(&config, cli.offline);
    app.run().await
}
