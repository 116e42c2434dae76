#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core espresso dial-in logic (I/O-free).
//!
//! Given one shot's brew parameters and how it tasted, the engine recommends
//! grind, dose, yield and brew-time adjustments with a short explanation.
//!
//! ## Architecture
//!
//! - **Grind scale** (`grind`): bounds and phrasing for continuous, stepped
//!   and click-based grinders
//! - **Engine** (`engine`): taste banding, the weighted grind heuristic and
//!   result assembly (`Calibrator`)
//! - **Policy** (`config`): tunable thresholds; mapped from `dialin_config`
//!   in `conversions`
//! - **Validation** (`validation`): field → reason maps for inputs
//! - **History** (`history`): bounded newest-first log kept by callers
//!
//! Every computation is a pure function of its arguments; `Calibrator` is
//! immutable once built and can be shared freely between threads.

pub mod builder;
pub mod config;
pub mod conversions;
pub mod engine;
pub mod error;
pub mod grind;
pub mod history;
pub mod types;
pub mod util;
pub mod validation;

pub use builder::CalibratorBuilder;
pub use config::{BrewSpeed, CalibrationPolicy};
pub use engine::{Calibrator, compute_adjustment, compute_calibration};
pub use error::{BuildError, CalibrationError, ParseRoastError};
pub use grind::{AdjustmentRange, Direction, GrindDecision, GrindScale, SteppedRange, range_for};
pub use history::{CalibrationHistory, DEFAULT_HISTORY_CAPACITY, HistoryEntry};
pub use types::{BrewParameters, CalibrationResult, RoastLevel, TasteBand};
pub use util::{YieldRange, yield_range_for};
pub use validation::{FormLimits, ValidationErrors};
