use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use doodle_engine::Config;
use doodle_engine::session::{self, StorageOptions};
use std::path::{Path, PathBuf};

mod replay;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("DOODLE_ENGINE_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "doodle-engine")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Raster doodle engine: replay pointer scripts and export JPEG doodles"
)]
struct Cli {
    /// Use this config file instead of ~/.config/doodle-engine/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON pointer/tool script on a fresh surface and export the result
    Replay(ReplayArgs),

    /// Inspect or clear the autosaved draft
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
}

#[derive(Args, Debug)]
pub(crate) struct ReplayArgs {
    /// Script file: a JSON array of steps
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Write the flattened JPEG here instead of the draft directory
    #[arg(long, short = 'o', value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Logical surface width
    #[arg(long, default_value_t = 400.0)]
    pub width: f64,

    /// Logical surface height
    #[arg(long, default_value_t = 400.0)]
    pub height: f64,

    /// Device pixel ratio
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Seed the surface from a PNG/JPEG file or a file holding base64 / a data URL
    #[arg(long, value_name = "FILE", conflicts_with = "restore")]
    pub seed: Option<PathBuf>,

    /// Seed the surface from the autosaved draft
    #[arg(long)]
    pub restore: bool,

    /// Print the export as a data URL on stdout
    #[arg(long)]
    pub data_url: bool,

    /// Show notices as desktop notifications
    #[arg(long)]
    pub notify: bool,
}

#[derive(Subcommand, Debug)]
enum DraftAction {
    /// Show where the autosaved draft lives and what it holds
    Info,
    /// Delete the autosaved draft
    Clear,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let (config, config_dir) = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Replay(args) => replay::run(&args, &config, &config_dir),
        Command::Draft { action } => {
            let options = session::options_from_config(&config.storage, &config_dir)?;
            match action {
                DraftAction::Info => print_draft_info(&options),
                DraftAction::Clear => clear_draft(&options),
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<(Config, PathBuf)> {
    match path {
        Some(path) => {
            let config = Config::load_from(path)?;
            let dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok((config, dir))
        }
        None => Ok((Config::load()?, Config::config_dir()?)),
    }
}

fn print_draft_info(options: &StorageOptions) -> Result<()> {
    let inspection = session::inspect_draft(options)?;
    println!("Draft file: {}", inspection.draft_path.display());
    if !inspection.exists {
        println!("  (no autosaved draft)");
        return Ok(());
    }

    if let Some(size) = inspection.size_bytes {
        println!("  Size: {size} bytes");
    }
    if let Some(modified) = inspection.modified {
        let modified: chrono::DateTime<chrono::Local> = modified.into();
        println!("  Modified: {}", modified.format("%Y-%m-%d %H:%M:%S"));
    }
    match inspection.dimensions {
        Some((width, height)) => println!("  Dimensions: {width}x{height}"),
        None => println!("  Dimensions: unreadable"),
    }
    Ok(())
}

fn clear_draft(options: &StorageOptions) -> Result<()> {
    let outcome = session::clear_drafts(options)
        .with_context(|| format!("failed to clear drafts in {}", options.base_dir.display()))?;
    if outcome.removed_draft {
        println!("Removed {}", options.draft_file_path().display());
    } else {
        println!("No autosaved draft to remove");
    }
    Ok(())
}
