//! Brew inputs and calibration outputs.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseRoastError;
use crate::grind::GrindDecision;

/// Lower bound of the taste slider (fully sour).
pub const TASTE_MIN: f64 = 0.0;
/// Upper bound of the taste slider (fully bitter).
pub const TASTE_MAX: f64 = 100.0;
/// Taste value that means "balanced".
pub const TASTE_MIDPOINT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum RoastLevel {
    Light,
    #[default]
    Medium,
    Dark,
}

impl RoastLevel {
    /// Map a 0-100 roast slider position onto a level: up to 33 is light,
    /// up to 66 is medium, anything darker is dark.
    pub fn from_percent(percent: f64) -> Self {
        if percent <= 33.0 {
            RoastLevel::Light
        } else if percent <= 66.0 {
            RoastLevel::Medium
        } else {
            RoastLevel::Dark
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoastLevel::Light => "light",
            RoastLevel::Medium => "medium",
            RoastLevel::Dark => "dark",
        }
    }

    /// Roast-specific sentence appended to every explanation.
    pub fn advice(self) -> Option<&'static str> {
        match self {
            RoastLevel::Light => Some(
                "Light roasts typically benefit from higher temperatures and longer ratios.",
            ),
            RoastLevel::Medium => None,
            RoastLevel::Dark => {
                Some("Dark roasts typically benefit from lower temperatures and shorter ratios.")
            }
        }
    }
}

impl fmt::Display for RoastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoastLevel {
    type Err = ParseRoastError;

    /// Accepts `light`, `medium`, `dark` (any case) or a slider percentage.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        match t.to_ascii_lowercase().as_str() {
            "light" => Ok(RoastLevel::Light),
            "medium" => Ok(RoastLevel::Medium),
            "dark" => Ok(RoastLevel::Dark),
            _ => match t.parse::<f64>() {
                Ok(p) if (0.0..=100.0).contains(&p) => Ok(RoastLevel::from_percent(p)),
                _ => Err(ParseRoastError(s.to_string())),
            },
        }
    }
}

/// One submitted shot. Immutable per call; see [`BrewParameters::validate`]
/// for the preconditions the engine relies on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrewParameters {
    pub roast: RoastLevel,
    /// Current grinder position, in the grinder's own units.
    pub grind_size: f64,
    pub dose_g: f64,
    pub brew_time_s: f64,
    pub yield_g: f64,
    /// 0 = very sour, 50 = balanced, 100 = very bitter.
    pub taste_balance: f64,
}

impl BrewParameters {
    /// Yield over dose. Only meaningful for a validated (positive) dose.
    pub fn extraction_ratio(&self) -> f64 {
        self.yield_g / self.dose_g
    }
}

/// Where the reported taste falls relative to the balanced dead zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TasteBand {
    /// Under-extracted.
    Sour,
    Balanced,
    /// Over-extracted.
    Bitter,
}

impl TasteBand {
    pub fn as_str(self) -> &'static str {
        match self {
            TasteBand::Sour => "sour",
            TasteBand::Balanced => "balanced",
            TasteBand::Bitter => "bitter",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationResult {
    pub grind_adjustment: String,
    pub dose_adjustment: String,
    pub yield_adjustment: String,
    pub brew_time_target: String,
    pub explanation: String,
    /// Classified taste band that drove the recommendation.
    pub band: TasteBand,
    /// Grind move phrased through a grind scale; `None` when no scale was
    /// supplied or the grind should stay where it is.
    pub grind_decision: Option<GrindDecision>,
}
