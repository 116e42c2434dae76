//! `From`/`TryFrom` implementations bridging `dialin_config` types to `dialin_core` types.

use dialin_config::{GrindUnit, GrinderCfg, GrinderKind, PolicyCfg, RoastCfg, ShotRow};

use crate::config::CalibrationPolicy;
use crate::error::BuildError;
use crate::grind::{GrindScale, SteppedRange};
use crate::types::{BrewParameters, RoastLevel};

// ── RoastLevel ───────────────────────────────────────────────────────────────

impl From<RoastCfg> for RoastLevel {
    fn from(c: RoastCfg) -> Self {
        match c {
            RoastCfg::Light => RoastLevel::Light,
            RoastCfg::Medium => RoastLevel::Medium,
            RoastCfg::Dark => RoastLevel::Dark,
        }
    }
}

// ── CalibrationPolicy ────────────────────────────────────────────────────────

impl From<&PolicyCfg> for CalibrationPolicy {
    fn from(c: &PolicyCfg) -> Self {
        Self {
            dead_zone: c.dead_zone,
            target_ratio: c.target_ratio,
            yield_weight: c.yield_weight,
            dose_step_g: c.dose_step_g,
            yield_step_g: c.yield_step_g,
            brew_time_min_s: c.brew_time_min_s,
            brew_time_pivot_s: c.brew_time_pivot_s,
            brew_time_max_s: c.brew_time_max_s,
            fine_grind_below: c.fine_grind_below,
            coarse_grind_above: c.coarse_grind_above,
        }
    }
}

// ── GrindScale ───────────────────────────────────────────────────────────────

impl TryFrom<&GrinderCfg> for GrindScale {
    type Error = BuildError;

    /// Shape check only; numeric bounds are checked by `GrindScale::validate`.
    fn try_from(c: &GrinderCfg) -> Result<Self, Self::Error> {
        match c.kind {
            GrinderKind::Continuous => Ok(GrindScale::Continuous {
                step_size: c.step_size.unwrap_or(1.0),
            }),
            GrinderKind::Clicks => Ok(GrindScale::ClickBased),
            GrinderKind::Stepped => {
                let (Some(min), Some(max)) = (&c.min, &c.max) else {
                    return Err(BuildError::InvalidConfig(
                        "grinder.min and grinder.max are required for stepped grinders",
                    ));
                };
                match c.unit {
                    Some(GrindUnit::Numbers) => match (min.as_number(), max.as_number()) {
                        (Some(min), Some(max)) => {
                            Ok(GrindScale::Stepped(SteppedRange::Numeric { min, max }))
                        }
                        _ => Err(BuildError::InvalidConfig(
                            "grinder.min and grinder.max must both be numbers",
                        )),
                    },
                    Some(GrindUnit::Letters) => match (min.as_letter(), max.as_letter()) {
                        (Some(min), Some(max)) => {
                            Ok(GrindScale::Stepped(SteppedRange::Lettered { min, max }))
                        }
                        _ => Err(BuildError::InvalidConfig(
                            "grinder.min and grinder.max must both be single uppercase letters (A-Z)",
                        )),
                    },
                    None => Err(BuildError::InvalidConfig(
                        "grinder.unit is required for stepped grinders",
                    )),
                }
            }
        }
    }
}

// ── BrewParameters ───────────────────────────────────────────────────────────

impl From<&ShotRow> for BrewParameters {
    fn from(r: &ShotRow) -> Self {
        Self {
            roast: r.roast.into(),
            grind_size: r.grind,
            dose_g: r.dose,
            brew_time_s: r.time,
            yield_g: r.yield_g,
            taste_balance: r.taste,
        }
    }
}
