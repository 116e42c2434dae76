//! CLI argument definitions and shared statics.

use clap::{ArgAction, Args, Parser, Subcommand};
use dialin_core::RoastLevel;
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "dialin", version, about = "Espresso dial-in assistant")]
pub struct Cli {
    /// Path to config TOML; built-in defaults are used when omitted
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print results and errors as JSON and log as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

/// One shot as entered on the command line. Missing values come from
/// `[defaults]` in the config.
#[derive(Args, Debug, Clone)]
pub struct ShotArgs {
    /// Taste balance: 0 = very sour, 50 = balanced, 100 = very bitter
    #[arg(long, value_name = "0-100", allow_negative_numbers = true)]
    pub taste: f64,
    /// Dose in grams
    #[arg(long, value_name = "GRAMS")]
    pub dose: Option<f64>,
    /// Yield in grams
    #[arg(long = "yield", value_name = "GRAMS")]
    pub yield_g: Option<f64>,
    /// Brew time in seconds
    #[arg(long, value_name = "SECONDS")]
    pub time: Option<f64>,
    /// Current grinder setting
    #[arg(long, value_name = "SETTING")]
    pub grind: Option<f64>,
    /// Roast level: light, medium, dark, or a 0-100 roast percentage
    #[arg(long, value_name = "LEVEL")]
    pub roast: Option<RoastLevel>,
    /// Also enforce the interactive form limits (dose 5-30 g, yield 10-100 g, ...)
    #[arg(long, action = ArgAction::SetTrue)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend adjustments for one shot
    Calibrate(ShotArgs),
    /// Calibrate every shot in a CSV file and print the capped history, newest first
    Batch {
        /// CSV with headers roast,grind,dose,time,yield,taste
        #[arg(long, value_name = "FILE")]
        shots: PathBuf,
    },
    /// Suggested yield slider bounds for a dose
    YieldRange {
        /// Dose in grams
        #[arg(long, value_name = "GRAMS")]
        dose: f64,
    },
    /// Describe the configured grinder and how far one recommendation may move it
    Grinder,
}
