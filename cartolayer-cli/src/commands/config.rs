//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init`.

use clap::Subcommand;
use cartolayer::catalog::LogicalLayer;
use cartolayer::config::{config_file_path, ConfigFile};
use cartolayer::style::StyleKey;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Init { force } => run_init(force),
    }
}

fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

fn run_show() -> Result<(), CliError> {
    let config = ConfigFile::load()?;

    println!("[map]");
    println!("  style = {}", config.map.style);
    println!("  center = {}, {}", config.map.center_lon, config.map.center_lat);
    println!("  zoom = {}", config.map.zoom);
    println!("  navigation_control = {}", config.map.navigation_control);

    println!("[styles]");
    for key in StyleKey::ALL {
        println!("  {} = {}", key, config.styles.url(key).unwrap_or("(not set)"));
    }

    println!("[data]");
    println!("  base = {}", config.data.base);
    for layer in LogicalLayer::ALL {
        println!("  {} = {}", layer, config.data.endpoint(layer));
    }

    println!("[visibility]");
    for (layer, visible) in config.visibility.iter() {
        println!("  {} = {}", layer, visible);
    }

    println!("[download]");
    println!("  timeout = {}", config.download.timeout);

    println!("[logging]");
    println!("  file = {}", config.logging.file.display());

    Ok(())
}

fn run_init(force: bool) -> Result<(), CliError> {
    let path = config_file_path();
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    ConfigFile::default().save_to(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
