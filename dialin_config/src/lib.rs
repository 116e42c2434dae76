#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and shot CSV parsing for the dial-in assistant.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - The shot CSV loader enforces headers and reports bad rows by line number.
use serde::Deserialize;

/// Roast level as written in TOML and CSV (`light`, `medium`, `dark`).
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoastCfg {
    Light,
    #[default]
    Medium,
    Dark,
}

/// Grinder addressing scheme.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GrinderKind {
    /// Stepless grinder with a known minimal increment.
    #[serde(alias = "absolute")]
    Continuous,
    /// Labeled discrete positions.
    Stepped,
    /// Counted clicks from the current position.
    #[serde(alias = "clicked")]
    Clicks,
}

/// Label type of a stepped grinder.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GrindUnit {
    Numbers,
    Letters,
}

/// A stepped grinder bound: either a number (`min = 1`) or a letter (`min = "A"`).
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum StepValue {
    Number(f64),
    Letter(String),
}

impl StepValue {
    /// Returns the value as an uppercase A-Z letter, if it is exactly one.
    pub fn as_letter(&self) -> Option<char> {
        match self {
            StepValue::Letter(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_uppercase() => Some(c),
                    _ => None,
                }
            }
            StepValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            StepValue::Number(n) => Some(*n),
            StepValue::Letter(_) => None,
        }
    }
}

/// `[grinder]` section.
///
/// Example:
/// ```toml
/// [grinder]
/// type = "stepped"
/// unit = "numbers"
/// min = 1
/// max = 40
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GrinderCfg {
    #[serde(rename = "type")]
    pub kind: GrinderKind,
    /// Continuous grinders only. Defaults to 1.0.
    #[serde(default)]
    pub step_size: Option<f64>,
    /// Stepped grinders only.
    #[serde(default)]
    pub unit: Option<GrindUnit>,
    #[serde(default)]
    pub min: Option<StepValue>,
    #[serde(default)]
    pub max: Option<StepValue>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PolicyCfg {
    /// Half-width of the balanced taste band around 50.
    pub dead_zone: f64,
    /// Target yield/dose ratio.
    pub target_ratio: f64,
    /// Weight of the yield-ratio deviation relative to taste.
    pub yield_weight: f64,
    pub dose_step_g: f64,
    pub yield_step_g: f64,
    /// Acceptable brew time window (seconds). `pivot` splits it into the
    /// shorter window used for bitter shots and the longer one for sour shots.
    pub brew_time_min_s: f64,
    pub brew_time_pivot_s: f64,
    pub brew_time_max_s: f64,
    /// Grind settings below this are already fine; narrow the generic advice.
    pub fine_grind_below: f64,
    /// Grind settings above this are already coarse; narrow the generic advice.
    pub coarse_grind_above: f64,
}

impl Default for PolicyCfg {
    fn default() -> Self {
        Self {
            dead_zone: 10.0,
            target_ratio: 2.0,
            yield_weight: 0.5,
            dose_step_g: 0.5,
            yield_step_g: 2.0,
            brew_time_min_s: 25.0,
            brew_time_pivot_s: 28.0,
            brew_time_max_s: 32.0,
            fine_grind_below: 10.0,
            coarse_grind_above: 30.0,
        }
    }
}

/// Values used when the CLI is not given a parameter explicitly.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DefaultsCfg {
    pub roast: RoastCfg,
    pub grind_size: f64,
    pub dose_g: f64,
    pub brew_time_s: f64,
    pub yield_g: f64,
}

impl Default for DefaultsCfg {
    fn default() -> Self {
        Self {
            roast: RoastCfg::Medium,
            grind_size: 15.0,
            dose_g: 18.0,
            brew_time_s: 30.0,
            yield_g: 36.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HistoryCfg {
    /// Number of calibrations retained, newest first.
    pub capacity: usize,
}

impl Default for HistoryCfg {
    fn default() -> Self {
        Self { capacity: 10 }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Grinder description; when absent, grind advice is phrased generically.
    #[serde(default)]
    pub grinder: Option<GrinderCfg>,
    #[serde(default)]
    pub policy: PolicyCfg,
    #[serde(default)]
    pub defaults: DefaultsCfg,
    #[serde(default)]
    pub history: HistoryCfg,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Shot CSV schema.
///
/// Expected headers:
/// roast,grind,dose,time,yield,taste
///
/// Example:
/// roast,grind,dose,time,yield,taste
/// medium,15,18,28,36,50
/// light,14,18,24,30,20
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ShotRow {
    pub roast: RoastCfg,
    pub grind: f64,
    pub dose: f64,
    pub time: f64,
    #[serde(rename = "yield")]
    pub yield_g: f64,
    pub taste: f64,
}

pub const SHOT_HEADERS: [&str; 6] = ["roast", "grind", "dose", "time", "yield", "taste"];

pub fn load_shots_csv(path: &std::path::Path) -> eyre::Result<Vec<ShotRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open shot CSV {:?}: {}", path, e))?;

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != SHOT_HEADERS {
        eyre::bail!(
            "shot CSV must have headers '{}', got: {}",
            SHOT_HEADERS.join(","),
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<ShotRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }
    if rows.is_empty() {
        eyre::bail!("shot CSV {:?} contains no rows", path);
    }
    Ok(rows)
}

impl Config {
    /// Checks the sections this crate owns. `[grinder]` and `[policy]` are
    /// checked when the calibrator is built from them.
    pub fn validate(&self) -> eyre::Result<()> {
        // Defaults
        let d = &self.defaults;
        for (key, v) in [
            ("dose_g", d.dose_g),
            ("brew_time_s", d.brew_time_s),
            ("yield_g", d.yield_g),
        ] {
            if !(v.is_finite() && v > 0.0) {
                eyre::bail!("defaults.{key} must be > 0");
            }
        }
        if !d.grind_size.is_finite() {
            eyre::bail!("defaults.grind_size must be a finite number");
        }

        // History
        if self.history.capacity == 0 {
            eyre::bail!("history.capacity must be >= 1");
        }

        // Logging
        if let Some(r) = self.logging.rotation.as_deref()
            && !matches!(r, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        Ok(())
    }
}
