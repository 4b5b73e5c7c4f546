//! Overlay Compositor CLI: compose a base and an overlay image into a PNG.
//!
//! Usage:
//!   compositor compose [--base <PATH>] [--overlay <PATH>]   Render and export a PNG
//!   compositor plan [--base <PATH>] [--overlay <PATH>]      Print the draw calls only
//!   compositor replay <SCRIPT>                              Run a JSONL command script
//!   compositor layout show|set|overlay|reset                Manage persisted layout settings
//!   compositor config show|init                             Inspect or create the config file

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use compositor_common::config::{config_file_path, AppConfig};

mod commands;

use commands::CompositionArgs;

#[derive(Parser)]
#[command(
    name = "compositor",
    about = "Place an overlay image on a base image and export the result as PNG",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/overlay-compositor/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Persisted settings file, overriding the config
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a composition and export it as PNG
    Compose {
        #[command(flatten)]
        composition: CompositionArgs,

        /// Output file name without extension (blank uses "canvas_output")
        #[arg(short, long, default_value = "")]
        filename: String,

        /// Output directory (defaults to the configured export directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Print the draw calls of a composition without rasterizing it
    Plan {
        #[command(flatten)]
        composition: CompositionArgs,

        /// Print the draw calls as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a JSONL script of image loads and UI commands
    Replay {
        /// Path to the script
        script: PathBuf,

        /// Output directory for exports triggered by the script
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Do not write layout changes back to the settings file
        #[arg(long)]
        ephemeral: bool,
    },

    /// Inspect or change the persisted layout settings
    Layout {
        #[command(subcommand)]
        action: commands::layout::LayoutAction,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config_file_path);
    let mut config = AppConfig::load_from(&config_path);
    if let Some(settings) = cli.settings {
        config.settings_file = settings;
    }

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    compositor_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Compose {
            composition,
            filename,
            output_dir,
        } => commands::compose::run(&config, composition, filename, output_dir),
        Commands::Plan { composition, json } => commands::plan::run(&config, composition, json),
        Commands::Replay {
            script,
            output_dir,
            ephemeral,
        } => commands::replay::run(&config, script, output_dir, ephemeral),
        Commands::Layout { action } => commands::layout::run(&config, action),
        Commands::Config { action } => commands::config::run(&config, &config_path, action),
    }
}
