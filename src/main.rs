//! AgriDesk - crop, soil and fertilizer prediction in the terminal
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use agri_app::config::{init_config, ConfigOverrides};
use agri_core::PredictionMode;
use agridesk::RunOptions;
use clap::{Parser, ValueEnum};

/// AgriDesk - crop, soil and fertilizer prediction in the terminal
#[derive(Parser, Debug)]
#[command(name = "agridesk")]
#[command(about = "Crop, soil and fertilizer prediction and field management", long_about = None)]
struct Args {
    /// Path to config.toml (defaults to the per-user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Base URL of the prediction service
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Base URL of the field store
    #[arg(long, value_name = "URL")]
    store_url: Option<String>,

    /// Prediction mode selected at startup
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Write a commented default config file and exit
    #[arg(long)]
    init_config: bool,

    /// Write the effective settings (file plus the flags above) to the
    /// config file and exit
    #[arg(long, conflicts_with = "init_config")]
    save_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Crop,
    Soil,
    Fertilizer,
}

impl From<ModeArg> for PredictionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Crop => PredictionMode::CropPrediction,
            ModeArg::Soil => PredictionMode::SoilPrediction,
            ModeArg::Fertilizer => PredictionMode::FertilizerPrediction,
        }
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    if args.init_config {
        let Some(path) = agridesk::config_path(args.config.as_deref()) else {
            eprintln!("No config directory on this platform; pass --config PATH");
            std::process::exit(1);
        };
        init_config(&path)?;
        eprintln!("Config file: {}", path.display());
        return Ok(());
    }

    let options = RunOptions {
        config_path: args.config,
        overrides: ConfigOverrides {
            prediction_base_url: args.api_url,
            store_base_url: args.store_url,
            default_mode: args.mode.map(PredictionMode::from),
        },
    };

    if args.save_config {
        let path = agridesk::save_effective_settings(&options)?;
        eprintln!("Saved settings to {}", path.display());
        return Ok(());
    }

    agridesk::run(options).await?;
    Ok(())
}
