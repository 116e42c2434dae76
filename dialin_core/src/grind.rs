//! Grind-scale adapter.
//!
//! Grinders are addressed in one of three ways: a continuous dial with a
//! known minimal increment, labeled stepped positions (numbers or letters),
//! or clicks counted from the current position. This module bounds how far a
//! single recommendation may move each kind of grinder and phrases the move
//! in the grinder's own terms.
//!
//! Both [`range_for`] and [`format`] match exhaustively on [`GrindScale`];
//! a new grinder kind must be handled in each.

use std::fmt;

use crate::util::{fmt_amount, plural};

/// Largest value a numbered stepped grinder may be labeled with.
pub const MAX_STEP_LABEL: f64 = 65_535.0;
/// Largest step size a continuous grinder may declare.
pub const MAX_STEP_SIZE: f64 = 10.0;

/// Fraction of a numbered stepped range a single move may cover.
const STEPPED_MAX_FRACTION: f64 = 0.2;
/// Continuous moves are capped at this many increments.
const CONTINUOUS_MAX_INCREMENTS: f64 = 3.0;
const CLICKS_MAX: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Finer,
    Coarser,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Finer => "finer",
            Direction::Coarser => "coarser",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labels of a stepped grinder. Both bounds share one label type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SteppedRange {
    Numeric { min: f64, max: f64 },
    /// Uppercase A-Z, ordered alphabetically.
    Lettered { min: char, max: char },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrindScale {
    Continuous { step_size: f64 },
    Stepped(SteppedRange),
    ClickBased,
}

/// Bounds on a single grind move, in grinder units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentRange {
    pub min_steps: f64,
    pub max_steps: f64,
    pub default_step: f64,
}

impl AdjustmentRange {
    /// Clamp `x` into `[min_steps, max_steps]`. Does not panic on odd ranges.
    #[inline]
    pub fn clamp(&self, x: f64) -> f64 {
        x.max(self.min_steps).min(self.max_steps)
    }
}

/// A decided grind move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrindDecision {
    pub direction: Direction,
    /// Clamped move in grinder units (a multiple of the default step).
    pub amount: f64,
    /// `amount` expressed in default steps; at least 1.
    pub steps: u32,
}

impl GrindDecision {
    /// Phrase this decision for `scale`.
    pub fn phrase(&self, scale: &GrindScale) -> String {
        format(self.direction, self.steps, scale)
    }
}

pub fn range_for(scale: &GrindScale) -> AdjustmentRange {
    match scale {
        GrindScale::Continuous { step_size } => AdjustmentRange {
            min_steps: *step_size,
            max_steps: step_size * CONTINUOUS_MAX_INCREMENTS,
            default_step: *step_size,
        },
        GrindScale::Stepped(SteppedRange::Numeric { min, max }) => AdjustmentRange {
            min_steps: 1.0,
            max_steps: ((max - min) * STEPPED_MAX_FRACTION).floor().max(1.0),
            default_step: 1.0,
        },
        // One letter at a time.
        GrindScale::Stepped(SteppedRange::Lettered { .. }) => AdjustmentRange {
            min_steps: 1.0,
            max_steps: 1.0,
            default_step: 1.0,
        },
        GrindScale::ClickBased => AdjustmentRange {
            min_steps: 1.0,
            max_steps: CLICKS_MAX,
            default_step: 1.0,
        },
    }
}

/// Human text for moving `steps` default steps in `direction` on `scale`.
///
/// Pluralization follows the step count, not the displayed amount: a
/// continuous grinder with step size 0.1 moved one step reads "by 0.1 step".
pub fn format(direction: Direction, steps: u32, scale: &GrindScale) -> String {
    let n = f64::from(steps);
    match scale {
        GrindScale::Continuous { step_size } => {
            let amount = n * step_size;
            format!(
                "Adjust grinder {direction} by {} {}",
                fmt_amount(amount),
                plural(steps, "step", "steps")
            )
        }
        GrindScale::Stepped(range) => {
            let way = match direction {
                Direction::Finer => "down",
                Direction::Coarser => "up",
            };
            let unit = match range {
                SteppedRange::Numeric { .. } => plural(steps, "number", "numbers"),
                SteppedRange::Lettered { .. } => plural(steps, "letter", "letters"),
            };
            format!("Move {way} {steps} {unit}")
        }
        GrindScale::ClickBased => {
            let way = match direction {
                Direction::Finer => "right",
                Direction::Coarser => "left",
            };
            format!("Turn {way} {steps} {}", plural(steps, "click", "clicks"))
        }
    }
}

impl GrindScale {
    pub fn range(&self) -> AdjustmentRange {
        range_for(self)
    }

    /// One-line description of the grinder, e.g. "Stepped (numbers) from 1 to 40".
    pub fn describe(&self) -> String {
        match self {
            GrindScale::Continuous { step_size } => {
                format!("Continuous with {} step size", fmt_amount(*step_size))
            }
            GrindScale::Stepped(SteppedRange::Numeric { min, max }) => format!(
                "Stepped (numbers) from {} to {}",
                fmt_amount(*min),
                fmt_amount(*max)
            ),
            GrindScale::Stepped(SteppedRange::Lettered { min, max }) => {
                format!("Stepped (letters) from {min} to {max}")
            }
            GrindScale::ClickBased => "Click-based adjustments".to_string(),
        }
    }
}
