//! Calibration engine.
//!
//! Given one shot's parameters and taste feedback, decide how to move grind,
//! dose, yield and brew time, and explain why. Stateless: every call is a
//! pure function of its inputs and the calibrator's policy.

use crate::config::{BrewSpeed, CalibrationPolicy};
use crate::error::CalibrationError;
use crate::grind::{AdjustmentRange, Direction, GrindDecision, GrindScale, range_for};
use crate::types::{BrewParameters, CalibrationResult, TASTE_MIDPOINT, TasteBand};
use crate::util::fmt_amount;

/// Decide direction and size of a grind move.
///
/// Taste deviation from balance carries full weight; the deviation of the
/// yield ratio from its target carries `policy.yield_weight`. The weighted
/// magnitude is scaled to `range.max_steps`, snapped to the default step and
/// clamped into the range. Taste exactly at the midpoint goes coarser.
pub fn compute_adjustment(
    taste: f64,
    yield_ratio: f64,
    range: &AdjustmentRange,
    policy: &CalibrationPolicy,
) -> GrindDecision {
    let direction = if taste < TASTE_MIDPOINT {
        Direction::Finer
    } else {
        Direction::Coarser
    };

    let taste_dev = ((taste - TASTE_MIDPOINT).abs() / TASTE_MIDPOINT).min(1.0);
    let yield_dev = (yield_ratio - policy.target_ratio).abs() / policy.target_ratio;
    let magnitude = taste_dev + policy.yield_weight * yield_dev;

    let raw = magnitude * range.max_steps;
    let amount = range.clamp((raw / range.default_step).round() * range.default_step);
    let steps = steps_of(amount, range.default_step);

    tracing::trace!(
        taste,
        yield_ratio,
        magnitude,
        amount,
        steps,
        direction = direction.as_str(),
        "grind adjustment"
    );

    GrindDecision {
        direction,
        amount,
        steps,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn steps_of(amount: f64, default_step: f64) -> u32 {
    let n = (amount / default_step).round();
    if n.is_finite() && n >= 1.0 {
        n.min(f64::from(u32::MAX)) as u32
    } else {
        1
    }
}

/// Computes recommendations under one policy, optionally for one grinder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calibrator {
    pub(crate) policy: CalibrationPolicy,
    pub(crate) scale: Option<GrindScale>,
}

impl Calibrator {
    pub fn policy(&self) -> &CalibrationPolicy {
        &self.policy
    }

    pub fn grind_scale(&self) -> Option<&GrindScale> {
        self.scale.as_ref()
    }

    /// Compute a full recommendation for one shot.
    ///
    /// Parameters are checked against the engine's preconditions first; any
    /// violation fails the whole call with `CalibrationError::Invalid`.
    pub fn compute(&self, params: &BrewParameters) -> Result<CalibrationResult, CalibrationError> {
        params.validate().map_err(CalibrationError::Invalid)?;

        let ratio = params.extraction_ratio();
        let band = self.policy.classify(params.taste_balance);
        let speed = self.policy.assess_brew_time(params.brew_time_s);

        let mut result = match band {
            TasteBand::Sour => self.under_extracted(params, ratio, speed),
            TasteBand::Bitter => self.over_extracted(params, ratio, speed),
            TasteBand::Balanced => self.balanced(params, ratio, speed),
        };

        if let Some(advice) = params.roast.advice() {
            result.explanation.push(' ');
            result.explanation.push_str(advice);
        }

        tracing::debug!(
            band = band.as_str(),
            ratio,
            roast = params.roast.as_str(),
            grind = %result.grind_adjustment,
            "calibration computed"
        );
        Ok(result)
    }

    fn grind_move(&self, params: &BrewParameters, ratio: f64) -> Option<(GrindDecision, String)> {
        self.scale.as_ref().map(|scale| {
            let d = compute_adjustment(params.taste_balance, ratio, &range_for(scale), &self.policy);
            (d, d.phrase(scale))
        })
    }

    fn under_extracted(
        &self,
        params: &BrewParameters,
        ratio: f64,
        speed: BrewSpeed,
    ) -> CalibrationResult {
        let p = &self.policy;
        let (grind_decision, grind_adjustment) = match self.grind_move(params, ratio) {
            Some((d, text)) => (Some(d), text),
            None => {
                let span = if params.grind_size < p.fine_grind_below {
                    "1-2"
                } else {
                    "2-3"
                };
                (None, format!("Grind finer by {span} settings"))
            }
        };
        let prefix = if speed == BrewSpeed::TooFast {
            "Your shot is running too fast. "
        } else {
            ""
        };
        CalibrationResult {
            grind_adjustment,
            dose_adjustment: format!("Reduce dose by {}g", fmt_amount(p.dose_step_g)),
            yield_adjustment: format!("Increase yield by {}g", fmt_amount(p.yield_step_g)),
            brew_time_target: format!(
                "Aim for {}-{} seconds",
                fmt_amount(p.brew_time_pivot_s),
                fmt_amount(p.brew_time_max_s)
            ),
            explanation: format!(
                "{prefix}Your coffee is under-extracted. We recommend grinding finer and slightly reducing the dose to improve extraction."
            ),
            band: TasteBand::Sour,
            grind_decision,
        }
    }

    fn over_extracted(
        &self,
        params: &BrewParameters,
        ratio: f64,
        speed: BrewSpeed,
    ) -> CalibrationResult {
        let p = &self.policy;
        let (grind_decision, grind_adjustment) = match self.grind_move(params, ratio) {
            Some((d, text)) => (Some(d), text),
            None => {
                let span = if params.grind_size > p.coarse_grind_above {
                    "1-2"
                } else {
                    "2-3"
                };
                (None, format!("Grind coarser by {span} settings"))
            }
        };
        let prefix = if speed == BrewSpeed::TooSlow {
            "Your shot is running too slow. "
        } else {
            ""
        };
        CalibrationResult {
            grind_adjustment,
            dose_adjustment: format!("Increase dose by {}g", fmt_amount(p.dose_step_g)),
            yield_adjustment: format!("Reduce yield by {}g", fmt_amount(p.yield_step_g)),
            brew_time_target: format!(
                "Aim for {}-{} seconds",
                fmt_amount(p.brew_time_min_s),
                fmt_amount(p.brew_time_pivot_s)
            ),
            explanation: format!(
                "{prefix}Your coffee is over-extracted. We recommend grinding coarser and slightly increasing the dose to reduce extraction."
            ),
            band: TasteBand::Bitter,
            grind_decision,
        }
    }

    /// Taste is fine; only a brew time outside the window earns a one-step nudge.
    fn balanced(&self, params: &BrewParameters, ratio: f64, speed: BrewSpeed) -> CalibrationResult {
        let p = &self.policy;
        let nudge = match speed {
            BrewSpeed::TooFast => Some(Direction::Finer),
            BrewSpeed::TooSlow => Some(Direction::Coarser),
            BrewSpeed::Good => None,
        };

        let (grind_decision, grind_adjustment) = match (nudge, self.scale.as_ref()) {
            (None, _) => (None, "Current grind size is good".to_string()),
            (Some(direction), Some(scale)) => {
                let d = GrindDecision {
                    direction,
                    amount: range_for(scale).min_steps,
                    steps: 1,
                };
                (Some(d), d.phrase(scale))
            }
            (Some(direction), None) => (None, format!("Try {direction} by 1 setting")),
        };

        let (brew_time_target, finetune) = match speed {
            BrewSpeed::Good => ("Current brew time is good".to_string(), ""),
            BrewSpeed::TooFast | BrewSpeed::TooSlow => (
                format!(
                    "Aim for {}-{} seconds (currently {}s)",
                    fmt_amount(p.brew_time_min_s),
                    fmt_amount(p.brew_time_max_s),
                    fmt_amount(params.brew_time_s)
                ),
                if speed == BrewSpeed::TooFast {
                    " Consider a slightly finer grind to slow down the shot."
                } else {
                    " Consider a slightly coarser grind to speed up the shot."
                },
            ),
        };

        CalibrationResult {
            grind_adjustment,
            dose_adjustment: "Current dose is good".to_string(),
            yield_adjustment: format!("Maintain current ratio of 1:{ratio:.1}"),
            brew_time_target,
            explanation: format!(
                "Your parameters are well balanced!{finetune} Make minor adjustments based on taste preferences."
            ),
            band: TasteBand::Balanced,
            grind_decision,
        }
    }
}

/// Compute a recommendation with the default policy.
///
/// With a grind scale, grind advice is phrased in that grinder's terms;
/// without one it falls back to generic "settings".
pub fn compute_calibration(
    params: &BrewParameters,
    scale: Option<&GrindScale>,
) -> Result<CalibrationResult, CalibrationError> {
    if let Some(s) = scale {
        s.validate().map_err(CalibrationError::InvalidScale)?;
    }
    let calibrator = Calibrator {
        policy: CalibrationPolicy::default(),
        scale: scale.copied(),
    };
    calibrator.compute(params)
}
