//! Structured input validation.
//!
//! Every check reports into a [`ValidationErrors`] map keyed by field name, so
//! callers can render per-field messages without parsing error strings.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

use crate::grind::{GrindScale, SteppedRange};
use crate::types::{BrewParameters, TASTE_MAX, TASTE_MIN};

/// Field name → first failure reason for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. Only the first reason per field is kept.
    pub fn add(&mut self, field: &'static str, reason: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    pub(crate) fn require_positive(&mut self, field: &'static str, v: f64) {
        if !v.is_finite() {
            self.add(field, "must be a finite number");
        } else if v <= 0.0 {
            self.add(field, "must be greater than 0");
        }
    }

    pub(crate) fn require_within(
        &mut self,
        field: &'static str,
        v: f64,
        range: &RangeInclusive<f64>,
    ) {
        if !v.is_finite() {
            self.add(field, "must be a finite number");
        } else if !range.contains(&v) {
            self.add(
                field,
                format!("must be between {} and {}", range.start(), range.end()),
            );
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, reason)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field} {reason}")?;
        }
        Ok(())
    }
}

impl BrewParameters {
    /// Preconditions of the calibration engine: positive dose, brew time and
    /// yield, taste within 0..=100. Values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        errs.require_positive("dose", self.dose_g);
        errs.require_positive("brew_time", self.brew_time_s);
        errs.require_positive("yield", self.yield_g);
        errs.require_within("taste_balance", self.taste_balance, &(TASTE_MIN..=TASTE_MAX));
        if !self.grind_size.is_finite() {
            errs.add("grind_size", "must be a finite number");
        }
        errs.into_result()
    }
}

impl GrindScale {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        match self {
            GrindScale::Continuous { step_size } => {
                if !(step_size.is_finite() && *step_size > 0.0) {
                    errs.add("step_size", "must be a positive number");
                } else if *step_size > crate::grind::MAX_STEP_SIZE {
                    errs.add("step_size", "cannot be larger than 10");
                }
            }
            GrindScale::Stepped(SteppedRange::Numeric { min, max }) => {
                let labels = 0.0..=crate::grind::MAX_STEP_LABEL;
                errs.require_within("min_value", *min, &labels);
                errs.require_within("max_value", *max, &labels);
                if errs.is_empty() && max <= min {
                    errs.add("max_value", "must be greater than minimum value");
                }
            }
            GrindScale::Stepped(SteppedRange::Lettered { min, max }) => {
                if !min.is_ascii_uppercase() {
                    errs.add("min_value", "must be an uppercase letter (A-Z)");
                }
                if !max.is_ascii_uppercase() {
                    errs.add("max_value", "must be an uppercase letter (A-Z)");
                }
                if errs.is_empty() && max <= min {
                    errs.add("max_value", "must be greater than minimum value");
                }
            }
            GrindScale::ClickBased => {}
        }
        errs.into_result()
    }
}

/// Input limits of the interactive dial-in form. Stricter than the engine's
/// own preconditions; applied by callers that collect values from a person.
#[derive(Debug, Clone, PartialEq)]
pub struct FormLimits {
    pub grind_size: RangeInclusive<f64>,
    pub dose_g: RangeInclusive<f64>,
    pub brew_time_s: RangeInclusive<f64>,
    pub yield_g: RangeInclusive<f64>,
    pub taste_balance: RangeInclusive<f64>,
}

impl Default for FormLimits {
    fn default() -> Self {
        Self {
            grind_size: 1.0..=50.0,
            dose_g: 5.0..=30.0,
            brew_time_s: 10.0..=60.0,
            yield_g: 10.0..=100.0,
            taste_balance: TASTE_MIN..=TASTE_MAX,
        }
    }
}

impl FormLimits {
    pub fn validate(&self, params: &BrewParameters) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        errs.require_within("grind_size", params.grind_size, &self.grind_size);
        errs.require_within("dose", params.dose_g, &self.dose_g);
        errs.require_within("brew_time", params.brew_time_s, &self.brew_time_s);
        errs.require_within("yield", params.yield_g, &self.yield_g);
        errs.require_within("taste_balance", params.taste_balance, &self.taste_balance);
        errs.into_result()
    }
}
