#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! `dialin`: command-line driver for the espresso dial-in engine.

mod calibrate;
mod cli;
mod error_fmt;
mod logging;

use clap::Parser;
use cli::{Cli, Commands, JSON_MODE};
use dialin_config::Config;
use eyre::{Result, WrapErr};
use std::path::Path;

fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read config {}", path.display()))?;
    let cfg = dialin_config::load_toml(&text).wrap_err("invalid configuration")?;
    cfg.validate().wrap_err("invalid configuration")?;
    Ok(cfg)
}

fn run(cli: Cli) -> Result<()> {
    color_eyre::install()?;
    let cfg = load_config(cli.config.as_deref())?;
    logging::init(cli.json, &cli.log_level, &cfg.logging)?;
    tracing::debug!(config = ?cli.config, "configuration loaded");

    match &cli.cmd {
        Commands::Calibrate(args) => calibrate::run_calibrate(&cfg, args, cli.json),
        Commands::Batch { shots } => calibrate::run_batch(&cfg, shots, cli.json),
        Commands::YieldRange { dose } => calibrate::run_yield_range(*dose, cli.json),
        Commands::Grinder => calibrate::run_grinder(&cfg, cli.json),
    }
}

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(err) = run(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", error_fmt::format_error_json(&err));
        } else {
            eprintln!("{}", error_fmt::humanize(&err));
        }
        std::process::exit(error_fmt::exit_code_for_error(&err));
    }
}
