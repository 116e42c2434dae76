//! Command implementations: config mapping, engine invocation, output.

use crate::cli::ShotArgs;
use dialin_config::{Config, DefaultsCfg};
use dialin_core::{
    BrewParameters, CalibrationError, CalibrationHistory, CalibrationResult, Calibrator,
    FormLimits, GrindScale, HistoryEntry, ValidationErrors, yield_range_for,
};
use dialin_core::util::fmt_amount;
use eyre::Result;
use serde_json::{Value, json};
use std::path::Path;

/// Build the calibrator described by the config (policy + optional grinder).
pub fn build_calibrator(cfg: &Config) -> Result<Calibrator> {
    let scale = cfg
        .grinder
        .as_ref()
        .map(GrindScale::try_from)
        .transpose()
        .map_err(eyre::Report::new)?;
    Calibrator::builder()
        .with_policy((&cfg.policy).into())
        .with_optional_grind_scale(scale)
        .try_build()
}

/// Fill unspecified shot values from `[defaults]`.
pub fn shot_params(defaults: &DefaultsCfg, args: &ShotArgs) -> BrewParameters {
    BrewParameters {
        roast: args.roast.unwrap_or_else(|| defaults.roast.into()),
        grind_size: args.grind.unwrap_or(defaults.grind_size),
        dose_g: args.dose.unwrap_or(defaults.dose_g),
        brew_time_s: args.time.unwrap_or(defaults.brew_time_s),
        yield_g: args.yield_g.unwrap_or(defaults.yield_g),
        taste_balance: args.taste,
    }
}

pub fn render_text(result: &CalibrationResult) -> String {
    format!(
        "Grind:     {}\nDose:      {}\nYield:     {}\nBrew time: {}\n\n{}",
        result.grind_adjustment,
        result.dose_adjustment,
        result.yield_adjustment,
        result.brew_time_target,
        result.explanation
    )
}

pub fn result_json(params: &BrewParameters, result: &CalibrationResult) -> Value {
    json!({
        "band": result.band.as_str(),
        "ratio": params.extraction_ratio(),
        "grind_adjustment": result.grind_adjustment,
        "dose_adjustment": result.dose_adjustment,
        "yield_adjustment": result.yield_adjustment,
        "brew_time_target": result.brew_time_target,
        "explanation": result.explanation,
        "grind_decision": result.grind_decision.map(|d| json!({
            "direction": d.direction.as_str(),
            "steps": d.steps,
            "amount": d.amount,
        })),
    })
}

fn entry_json(entry: &HistoryEntry) -> Value {
    let p = &entry.params;
    json!({
        "params": {
            "roast": p.roast.as_str(),
            "grind": p.grind_size,
            "dose": p.dose_g,
            "time": p.brew_time_s,
            "yield": p.yield_g,
            "taste": p.taste_balance,
        },
        "result": result_json(p, &entry.result),
    })
}

pub fn run_calibrate(cfg: &Config, args: &ShotArgs, json: bool) -> Result<()> {
    let calibrator = build_calibrator(cfg)?;
    let params = shot_params(&cfg.defaults, args);
    if args.strict {
        FormLimits::default()
            .validate(&params)
            .map_err(|f| eyre::Report::new(CalibrationError::Invalid(f)))?;
    }

    let result = calibrator.compute(&params)?;
    tracing::info!(
        band = result.band.as_str(),
        ratio = params.extraction_ratio(),
        roast = params.roast.as_str(),
        "calibration complete"
    );

    if json {
        println!("{}", result_json(&params, &result));
    } else {
        println!("{}", render_text(&result));
    }
    Ok(())
}

pub fn run_batch(cfg: &Config, shots: &Path, json: bool) -> Result<()> {
    let rows = dialin_config::load_shots_csv(shots)?;
    let calibrator = build_calibrator(cfg)?;
    let mut history = CalibrationHistory::new(cfg.history.capacity);

    let mut skipped = 0_usize;
    for (idx, row) in rows.iter().enumerate() {
        let params = BrewParameters::from(row);
        match calibrator.compute(&params) {
            Ok(result) => {
                if let Some(evicted) = history.push(params, result) {
                    tracing::debug!(
                        taste = evicted.params.taste_balance,
                        "history full; dropped oldest calibration"
                    );
                }
            }
            Err(e) => {
                skipped += 1;
                tracing::warn!(row = idx + 2, error = %e, "skipping shot");
            }
        }
    }
    tracing::info!(
        rows = rows.len(),
        kept = history.len(),
        skipped,
        "batch complete"
    );

    if json {
        let entries: Vec<Value> = history.iter().map(entry_json).collect();
        println!("{}", json!({ "history": entries, "skipped": skipped }));
        return Ok(());
    }

    if history.is_empty() {
        println!("No valid shots in {}.", shots.display());
        return Ok(());
    }
    for (i, entry) in history.iter().enumerate() {
        let p = &entry.params;
        println!(
            "#{} {} roast, {}g in, {}g out, {}s, taste {}",
            i + 1,
            p.roast,
            fmt_amount(p.dose_g),
            fmt_amount(p.yield_g),
            fmt_amount(p.brew_time_s),
            fmt_amount(p.taste_balance)
        );
        println!("{}\n", render_text(&entry.result));
    }
    if skipped > 0 {
        println!("Skipped {skipped} invalid shot(s).");
    }
    Ok(())
}

pub fn run_yield_range(dose: f64, json: bool) -> Result<()> {
    if !(dose.is_finite() && dose > 0.0) {
        let mut fields = ValidationErrors::new();
        fields.add("dose", "must be greater than 0");
        return Err(eyre::Report::new(CalibrationError::Invalid(fields)));
    }
    let r = yield_range_for(dose);
    if json {
        println!(
            "{}",
            json!({ "dose": dose, "min": r.min, "default": r.default, "max": r.max })
        );
    } else {
        println!(
            "Yield range for {}g dose: min {}g, default {}g, max {}g",
            fmt_amount(dose),
            fmt_amount(r.min),
            fmt_amount(r.default),
            fmt_amount(r.max)
        );
    }
    Ok(())
}

pub fn run_grinder(cfg: &Config, json: bool) -> Result<()> {
    let calibrator = build_calibrator(cfg)?;
    let Some(scale) = calibrator.grind_scale() else {
        if json {
            println!("{}", json!({ "grinder": Value::Null }));
        } else {
            println!("No grinder configured; grind advice uses generic settings.");
        }
        return Ok(());
    };

    let range = scale.range();
    if json {
        println!(
            "{}",
            json!({
                "grinder": scale.describe(),
                "min_steps": range.min_steps,
                "max_steps": range.max_steps,
                "default_step": range.default_step,
            })
        );
    } else {
        println!("{}", scale.describe());
        println!(
            "One recommendation moves it {} to {} (step {}).",
            fmt_amount(range.min_steps),
            fmt_amount(range.max_steps),
            fmt_amount(range.default_step)
        );
    }
    Ok(())
}
