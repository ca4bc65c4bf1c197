//! Discretization settings for an analysis run.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::loads::SweepDirection;

/// Sampling controls for the internal-force solver.
///
/// Missing fields deserialize to their defaults, so `{}` is a valid settings
/// object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Spacing of SFD/BMD sample positions along the span (mm)
    pub step_mm: f64,
    /// Spacing of the sweep grid (mm); no coarser than `step_mm`
    pub sweep_step_mm: f64,
    /// Direction a moving pattern travels
    pub sweep_direction: SweepDirection,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            step_mm: 1.0,
            sweep_step_mm: 1.0,
            sweep_direction: SweepDirection::LeftToRight,
        }
    }
}

impl AnalysisSettings {
    pub fn validate(&self) -> CalcResult<()> {
        validate_steps(self.step_mm, self.sweep_step_mm)
    }
}

/// A grid step must be positive and finite.
pub(crate) fn validate_step(field: &str, step_mm: f64) -> CalcResult<()> {
    if !(step_mm.is_finite() && step_mm > 0.0) {
        return Err(CalcError::invalid_load(field, step_mm.to_string(), "Step must be positive"));
    }
    Ok(())
}

/// Both steps valid, and the sweep grid no coarser than the sample grid so
/// every sample position is loaded directly.
pub(crate) fn validate_steps(step_mm: f64, sweep_step_mm: f64) -> CalcResult<()> {
    validate_step("step_mm", step_mm)?;
    validate_step("sweep_step_mm", sweep_step_mm)?;
    if sweep_step_mm > step_mm {
        return Err(CalcError::invalid_load(
            "sweep_step_mm",
            sweep_step_mm.to_string(),
            format!("Sweep step must not exceed the sample step ({} mm)", step_mm),
        ));
    }
    Ok(())
}
