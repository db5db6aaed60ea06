//! Cartolayer CLI - Command-line interface
//!
//! Composes the administrative boundary map on a headless surface and
//! reports what ended up on it.

mod commands;
mod error;
mod runner;

use cartolayer::catalog::LogicalLayer;
use cartolayer::style::StyleKey;
use clap::{Parser, Subcommand};
use commands::config::ConfigCommands;

#[derive(Parser)]
#[command(name = "cartolayer")]
#[command(version = cartolayer::VERSION)]
#[command(about = "Compose administrative boundaries over a switchable basemap", long_about = None)]
struct Cli {
    /// Mirror log output to stdout with debug verbosity
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose the map and print the resulting layer stack
    Compose {
        /// Basemap style (terrain, dark, light)
        #[arg(long)]
        style: Option<StyleKey>,

        /// Make a layer visible initially (repeatable)
        #[arg(long, value_name = "LAYER")]
        show: Vec<LogicalLayer>,

        /// Hide a layer initially (repeatable)
        #[arg(long, value_name = "LAYER")]
        hide: Vec<LogicalLayer>,
    },

    /// Compose the map and report the feature under a position
    Hover {
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Basemap style (terrain, dark, light)
        #[arg(long)]
        style: Option<StyleKey>,

        /// Make a layer visible initially (repeatable)
        #[arg(long, value_name = "LAYER")]
        show: Vec<LogicalLayer>,

        /// Hide a layer initially (repeatable)
        #[arg(long, value_name = "LAYER")]
        hide: Vec<LogicalLayer>,
    },

    /// Fetch and decode every layer's geometry without composing
    Check,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compose { style, show, hide } => {
            commands::compose::run(commands::compose::ComposeArgs {
                debug: cli.debug,
                style,
                show,
                hide,
            })
            .await
        }
        Commands::Hover {
            lon,
            lat,
            style,
            show,
            hide,
        } => {
            commands::hover::run(commands::hover::HoverArgs {
                debug: cli.debug,
                lon,
                lat,
                style,
                show,
                hide,
            })
            .await
        }
        Commands::Check => commands::check::run(cli.debug).await,
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
