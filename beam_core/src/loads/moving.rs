//! Moving axle loads.
//!
//! An [`AxlePattern`] is an ordered list of axle loads with fixed spacing,
//! leading axle first. Placing the pattern at a leading-axle position yields
//! an ordinary [`StationaryLoads`] containing only the axles currently on the
//! span; axles that have not yet entered or have already left contribute
//! nothing.

use serde::{Deserialize, Serialize};

use super::{PointLoad, Reactions, StationaryLoads};
use crate::errors::{CalcError, CalcResult};

/// Wheel spacing of the six-wheel test train (mm), leading wheel first
pub const SIX_WHEEL_SPACINGS_MM: [f64; 5] = [176.0, 164.0, 176.0, 164.0, 176.0];

/// Direction the pattern travels across the span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SweepDirection {
    /// Enters at the left support; trailing axles are left of the leader
    #[default]
    LeftToRight,
    /// Enters at the right support; trailing axles are right of the leader
    RightToLeft,
}

impl SweepDirection {
    pub fn display_name(&self) -> &'static str {
        match self {
            SweepDirection::LeftToRight => "Left to right",
            SweepDirection::RightToLeft => "Right to left",
        }
    }
}

/// Axle loads at fixed relative spacing.
///
/// `spacings_mm[i]` is the gap between axle `i` and axle `i + 1`.
///
/// ## JSON Example
///
/// ```json
/// { "axle_loads_n": [66.7, 66.7, 66.7], "spacings_mm": [176.0, 164.0] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxlePattern {
    pub axle_loads_n: Vec<f64>,
    #[serde(default)]
    pub spacings_mm: Vec<f64>,
}

impl AxlePattern {
    /// Create a validated pattern
    pub fn new(axle_loads_n: Vec<f64>, spacings_mm: Vec<f64>) -> CalcResult<Self> {
        let pattern = AxlePattern {
            axle_loads_n,
            spacings_mm,
        };
        pattern.validate()?;
        Ok(pattern)
    }

    /// Six equal wheel loads sharing `total_weight_n`
    ///
    /// # Example
    /// ```rust
    /// use beam_core::loads::AxlePattern;
    ///
    /// let train = AxlePattern::six_wheel_train(400.0);
    /// assert_eq!(train.axle_count(), 6);
    /// assert!((train.length_mm() - 856.0).abs() < 1e-9);
    /// ```
    pub fn six_wheel_train(total_weight_n: f64) -> Self {
        AxlePattern {
            axle_loads_n: vec![total_weight_n / 6.0; 6],
            spacings_mm: SIX_WHEEL_SPACINGS_MM.to_vec(),
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.axle_loads_n.is_empty() {
            return Err(CalcError::invalid_load("axle_loads_n", "[]", "Axle pattern must contain at least one axle"));
        }
        if self.spacings_mm.len() + 1 != self.axle_loads_n.len() {
            return Err(CalcError::invalid_load(
                "spacings_mm",
                format!("{:?}", self.spacings_mm),
                format!(
                    "Expected {} spacings for {} axles",
                    self.axle_loads_n.len() - 1,
                    self.axle_loads_n.len()
                ),
            ));
        }
        if let Some(load) = self.axle_loads_n.iter().find(|l| !l.is_finite()) {
            return Err(CalcError::invalid_load("axle_loads_n", load.to_string(), "Axle loads must be finite"));
        }
        if let Some(gap) = self.spacings_mm.iter().find(|s| !(s.is_finite() && **s >= 0.0)) {
            return Err(CalcError::invalid_load(
                "spacings_mm",
                gap.to_string(),
                "Spacings must be non-negative",
            ));
        }
        Ok(())
    }

    pub fn axle_count(&self) -> usize {
        self.axle_loads_n.len()
    }

    /// Distance from the leading to the trailing axle (mm)
    pub fn length_mm(&self) -> f64 {
        self.spacings_mm.iter().sum()
    }

    pub fn total_load_n(&self) -> f64 {
        self.axle_loads_n.iter().sum()
    }

    /// Distance of each axle behind the leading axle (mm)
    pub fn offsets_mm(&self) -> Vec<f64> {
        std::iter::once(0.0)
            .chain(self.spacings_mm.iter().scan(0.0, |acc, gap| {
                *acc += gap;
                Some(*acc)
            }))
            .collect()
    }

    /// Axle positions along the beam for a leading-axle position
    pub fn axle_positions(&self, lead_mm: f64, direction: SweepDirection) -> Vec<f64> {
        self.offsets_mm()
            .into_iter()
            .map(|offset| match direction {
                SweepDirection::LeftToRight => lead_mm - offset,
                SweepDirection::RightToLeft => lead_mm + offset,
            })
            .collect()
    }

    /// The loads actually on the span with the leading axle at `lead_mm`
    pub fn place(&self, lead_mm: f64, span_mm: f64, direction: SweepDirection) -> StationaryLoads {
        let point_loads = self
            .axle_positions(lead_mm, direction)
            .into_iter()
            .zip(self.axle_loads_n.iter())
            .filter(|(x, _)| (0.0..=span_mm).contains(x))
            .map(|(x, &p)| PointLoad::new(x, p))
            .collect();
        StationaryLoads {
            point_loads,
            distributed_loads: Vec::new(),
        }
    }

    /// Support reactions with the leading axle at `lead_mm`
    pub fn reactions(&self, span_mm: f64, lead_mm: f64, direction: SweepDirection) -> CalcResult<Reactions> {
        super::validate_span(span_mm)?;
        self.validate()?;
        Ok(self.place(lead_mm, span_mm, direction).reactions_unchecked(span_mm))
    }

    /// Leading-axle positions that stand every axle on every station, in
    /// travel order and without repeats.
    ///
    /// Moment at a station is piecewise linear in the lead position, with
    /// kinks only where an axle crosses the station or a support, so the
    /// extremes over a full sweep occur at these positions. With stations
    /// covering [0, L] the sweep runs from first entry until the last axle
    /// leaves.
    pub fn sweep_positions(&self, stations_mm: &[f64], direction: SweepDirection) -> Vec<f64> {
        let offsets = self.offsets_mm();
        let mut leads: Vec<f64> = offsets
            .iter()
            .flat_map(|offset| {
                stations_mm.iter().map(move |x| match direction {
                    SweepDirection::LeftToRight => x + offset,
                    SweepDirection::RightToLeft => x - offset,
                })
            })
            .collect();
        match direction {
            SweepDirection::LeftToRight => leads.sort_by(|a, b| a.total_cmp(b)),
            SweepDirection::RightToLeft => leads.sort_by(|a, b| b.total_cmp(a)),
        }
        leads.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
        leads
    }
}
