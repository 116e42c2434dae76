//! Builder for `Calibrator`.
//!
//! `try_build()` checks the policy and the grind scale once, so `compute`
//! only has to validate the per-shot parameters.

use crate::config::CalibrationPolicy;
use crate::engine::Calibrator;
use crate::error::{BuildError, Result};
use crate::grind::GrindScale;

#[derive(Debug, Default, Clone)]
pub struct CalibratorBuilder {
    policy: Option<CalibrationPolicy>,
    scale: Option<GrindScale>,
}

impl Calibrator {
    /// Start building a Calibrator.
    pub fn builder() -> CalibratorBuilder {
        CalibratorBuilder::default()
    }
}

impl CalibratorBuilder {
    pub fn with_policy(mut self, policy: CalibrationPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_grind_scale(mut self, scale: GrindScale) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set or clear the grind scale; `None` selects generic grind phrasing.
    pub fn with_optional_grind_scale(mut self, scale: Option<GrindScale>) -> Self {
        self.scale = scale;
        self
    }

    pub fn try_build(self) -> Result<Calibrator> {
        let policy = self.policy.unwrap_or_default();
        policy
            .validate()
            .map_err(|e| eyre::Report::new(BuildError::InvalidPolicy(e)))?;
        if let Some(scale) = &self.scale {
            scale
                .validate()
                .map_err(|e| eyre::Report::new(BuildError::InvalidGrindScale(e)))?;
        }
        let grinder = self
            .scale
            .as_ref()
            .map_or_else(|| "generic".to_string(), GrindScale::describe);
        tracing::debug!(%grinder, "calibrator built");
        Ok(Calibrator {
            policy,
            scale: self.scale,
        })
    }
}
