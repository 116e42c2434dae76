//! Tunable policy constants for the calibration engine.
//!
//! This is the runtime form used by `Calibrator`. It is separate from the
//! TOML-deserialized `dialin_config::PolicyCfg`; see `conversions`.

use crate::types::{TASTE_MIDPOINT, TasteBand};
use crate::validation::ValidationErrors;

#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationPolicy {
    /// Taste within `50 ± dead_zone` counts as balanced. Default: 10.
    pub dead_zone: f64,
    /// Target yield/dose ratio. Default: 2.0.
    pub target_ratio: f64,
    /// Weight of the yield-ratio deviation; taste carries weight 1. Default: 0.5.
    pub yield_weight: f64,
    /// Fixed dose change recommended for an unbalanced shot (grams).
    pub dose_step_g: f64,
    /// Fixed yield change recommended for an unbalanced shot (grams).
    pub yield_step_g: f64,
    /// Acceptable brew time window, seconds.
    pub brew_time_min_s: f64,
    /// Splits the window: sour shots aim above it, bitter shots below it.
    pub brew_time_pivot_s: f64,
    pub brew_time_max_s: f64,
    /// Generic grind advice narrows when the grind is already this fine.
    pub fine_grind_below: f64,
    /// Generic grind advice narrows when the grind is already this coarse.
    pub coarse_grind_above: f64,
}

impl Default for CalibrationPolicy {
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

/// Brew time relative to the acceptable window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrewSpeed {
    TooFast,
    Good,
    TooSlow,
}

impl CalibrationPolicy {
    /// Band edges are exclusive: `50 - dead_zone` itself is balanced.
    pub fn classify(&self, taste: f64) -> TasteBand {
        if taste < TASTE_MIDPOINT - self.dead_zone {
            TasteBand::Sour
        } else if taste > TASTE_MIDPOINT + self.dead_zone {
            TasteBand::Bitter
        } else {
            TasteBand::Balanced
        }
    }

    pub fn assess_brew_time(&self, seconds: f64) -> BrewSpeed {
        if seconds < self.brew_time_min_s {
            BrewSpeed::TooFast
        } else if seconds > self.brew_time_max_s {
            BrewSpeed::TooSlow
        } else {
            BrewSpeed::Good
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        errs.require_within("dead_zone", self.dead_zone, &(0.0..=TASTE_MIDPOINT));
        if self.dead_zone >= TASTE_MIDPOINT {
            errs.add("dead_zone", "must be below 50");
        }
        errs.require_positive("target_ratio", self.target_ratio);
        if !(self.yield_weight.is_finite() && self.yield_weight >= 0.0) {
            errs.add("yield_weight", "must be 0 or greater");
        }
        errs.require_positive("dose_step_g", self.dose_step_g);
        errs.require_positive("yield_step_g", self.yield_step_g);
        errs.require_positive("brew_time_min_s", self.brew_time_min_s);
        errs.require_positive("brew_time_max_s", self.brew_time_max_s);
        if !(self.brew_time_min_s <= self.brew_time_pivot_s
            && self.brew_time_pivot_s <= self.brew_time_max_s)
        {
            errs.add("brew_time_pivot_s", "must lie within the brew time window");
        }
        if !(self.fine_grind_below <= self.coarse_grind_above) {
            errs.add("fine_grind_below", "must not exceed coarse_grind_above");
        }
        errs.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bands_match_forty_sixty() {
        let p = CalibrationPolicy::default();
        assert_eq!(p.classify(39.9), TasteBand::Sour);
        assert_eq!(p.classify(40.0), TasteBand::Balanced);
        assert_eq!(p.classify(60.0), TasteBand::Balanced);
        assert_eq!(p.classify(60.1), TasteBand::Bitter);
    }

    #[test]
    fn brew_window_is_inclusive() {
        let p = CalibrationPolicy::default();
        assert_eq!(p.assess_brew_time(24.9), BrewSpeed::TooFast);
        assert_eq!(p.assess_brew_time(25.0), BrewSpeed::Good);
        assert_eq!(p.assess_brew_time(32.0), BrewSpeed::Good);
        assert_eq!(p.assess_brew_time(33.0), BrewSpeed::TooSlow);
    }

    #[test]
    fn default_policy_is_valid() {
        CalibrationPolicy::default().validate().unwrap();
    }
}
