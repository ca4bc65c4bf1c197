//! # Load Cases
//!
//! Loads on a simply-supported span, in N and mm, positive downward.
//!
//! - [`StationaryLoads`] - point loads plus uniformly distributed loads
//! - [`AxlePattern`] - a train of axle loads at fixed spacing that is swept
//!   across the span
//! - [`LoadCase`] - either of the two, as supplied by a caller
//!
//! # Example
//!
//! ```
//! use beam_core::loads::{PointLoad, StationaryLoads};
//!
//! let loads = StationaryLoads::new().with_point_load(PointLoad::new(600.0, 1000.0));
//! let reactions = loads.reactions(1200.0).unwrap();
//!
//! assert!((reactions.left_n - 500.0).abs() < 1e-9);
//! assert!((reactions.total_n() - 1000.0).abs() < 1e-9);
//! ```

pub mod moving;

pub use moving::{AxlePattern, SweepDirection};

use serde::{Deserialize, Serialize};

use crate::equations::beam::{partial_uniform_reactions, point_load_reactions};
use crate::errors::{CalcError, CalcResult};

/// Concentrated load at a position along the span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// Distance from the left support (mm)
    pub position_mm: f64,
    /// Magnitude (N), positive downward
    pub magnitude_n: f64,
}

impl PointLoad {
    pub fn new(position_mm: f64, magnitude_n: f64) -> Self {
        PointLoad {
            position_mm,
            magnitude_n,
        }
    }
}

/// Uniform line load, over the whole span unless `start_mm`/`end_mm` are set.
///
/// ## JSON Example
///
/// ```json
/// { "intensity_n_per_mm": 0.5 }
/// { "intensity_n_per_mm": 2.0, "start_mm": 0.0, "end_mm": 300.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// Load per unit length (N/mm), positive downward
    pub intensity_n_per_mm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_mm: Option<f64>,
}

impl DistributedLoad {
    /// Uniform load over the full span
    pub fn full(intensity_n_per_mm: f64) -> Self {
        DistributedLoad {
            intensity_n_per_mm,
            start_mm: None,
            end_mm: None,
        }
    }

    /// Uniform load over [start, end]
    pub fn partial(intensity_n_per_mm: f64, start_mm: f64, end_mm: f64) -> Self {
        DistributedLoad {
            intensity_n_per_mm,
            start_mm: Some(start_mm),
            end_mm: Some(end_mm),
        }
    }

    /// Loaded extent on a span of `span_mm`
    pub fn extent(&self, span_mm: f64) -> (f64, f64) {
        (self.start_mm.unwrap_or(0.0), self.end_mm.unwrap_or(span_mm))
    }

    /// Resultant force (N)
    pub fn total_n(&self, span_mm: f64) -> f64 {
        let (a, b) = self.extent(span_mm);
        self.intensity_n_per_mm * (b - a)
    }

    /// Resultant of the part of this load lying left of `x_mm`
    fn total_left_of(&self, x_mm: f64, span_mm: f64) -> f64 {
        let (a, b) = self.extent(span_mm);
        let covered = (x_mm.min(b) - a).max(0.0);
        self.intensity_n_per_mm * covered
    }
}

/// Support reactions of a simply-supported span (N, positive upward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Reactions {
    pub left_n: f64,
    pub right_n: f64,
}

impl Reactions {
    pub fn total_n(&self) -> f64 {
        self.left_n + self.right_n
    }
}

impl std::ops::Add for Reactions {
    type Output = Reactions;

    fn add(self, other: Reactions) -> Reactions {
        Reactions {
            left_n: self.left_n + other.left_n,
            right_n: self.right_n + other.right_n,
        }
    }
}

/// Which side of a discontinuity a shear value is taken on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Just left of x: loads at x are not yet applied
    Left,
    /// Just right of x: loads at x are applied
    Right,
}

/// Fixed set of loads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationaryLoads {
    #[serde(default)]
    pub point_loads: Vec<PointLoad>,
    #[serde(default)]
    pub distributed_loads: Vec<DistributedLoad>,
}

impl StationaryLoads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a point load and return self (builder pattern)
    pub fn with_point_load(mut self, load: PointLoad) -> Self {
        self.point_loads.push(load);
        self
    }

    /// Add a distributed load and return self (builder pattern)
    pub fn with_distributed_load(mut self, load: DistributedLoad) -> Self {
        self.distributed_loads.push(load);
        self
    }

    /// Check every load lies on [0, span] with finite magnitude
    pub fn validate(&self, span_mm: f64) -> CalcResult<()> {
        validate_span(span_mm)?;
        for (i, load) in self.point_loads.iter().enumerate() {
            let field = format!("point_loads[{}]", i);
            if !load.magnitude_n.is_finite() {
                return Err(CalcError::invalid_load(field, load.magnitude_n.to_string(), "Magnitude must be finite"));
            }
            if !(0.0..=span_mm).contains(&load.position_mm) {
                return Err(CalcError::invalid_load(
                    field,
                    load.position_mm.to_string(),
                    format!("Position must lie within the span [0, {}]", span_mm),
                ));
            }
        }
        for (i, load) in self.distributed_loads.iter().enumerate() {
            let field = format!("distributed_loads[{}]", i);
            if !load.intensity_n_per_mm.is_finite() {
                return Err(CalcError::invalid_load(
                    field,
                    load.intensity_n_per_mm.to_string(),
                    "Intensity must be finite",
                ));
            }
            let (a, b) = load.extent(span_mm);
            if !(a >= 0.0 && b <= span_mm && a < b) {
                return Err(CalcError::invalid_load(
                    field,
                    format!("[{}, {}]", a, b),
                    format!("Extent must be a non-empty interval within [0, {}]", span_mm),
                ));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.point_loads.is_empty() && self.distributed_loads.is_empty()
    }

    /// Sum of all applied loads (N)
    pub fn total_n(&self, span_mm: f64) -> f64 {
        let points: f64 = self.point_loads.iter().map(|p| p.magnitude_n).sum();
        let lines: f64 = self.distributed_loads.iter().map(|d| d.total_n(span_mm)).sum();
        points + lines
    }

    /// Support reactions from ΣF = 0 and ΣM about the left support
    pub fn reactions(&self, span_mm: f64) -> CalcResult<Reactions> {
        self.validate(span_mm)?;
        Ok(self.reactions_unchecked(span_mm))
    }

    pub(crate) fn reactions_unchecked(&self, span_mm: f64) -> Reactions {
        let points = self.point_loads.iter().map(|p| {
            let (left_n, right_n) = point_load_reactions(p.magnitude_n, p.position_mm, span_mm);
            Reactions { left_n, right_n }
        });
        let lines = self.distributed_loads.iter().map(|d| {
            let (a, b) = d.extent(span_mm);
            let (left_n, right_n) = partial_uniform_reactions(d.intensity_n_per_mm, a, b, span_mm);
            Reactions { left_n, right_n }
        });
        points.chain(lines).fold(Reactions::default(), |acc, r| acc + r)
    }

    /// Shear at `x_mm` given the left reaction, on the chosen side of any
    /// point load sitting exactly at `x_mm`.
    pub fn shear_at(&self, x_mm: f64, span_mm: f64, left_reaction_n: f64, side: Side) -> f64 {
        let points: f64 = self
            .point_loads
            .iter()
            .filter(|p| match side {
                Side::Left => p.position_mm < x_mm,
                Side::Right => p.position_mm <= x_mm,
            })
            .map(|p| p.magnitude_n)
            .sum();
        let lines: f64 = self
            .distributed_loads
            .iter()
            .map(|d| d.total_left_of(x_mm, span_mm))
            .sum();
        left_reaction_n - points - lines
    }

    /// Positions in the open interval (from, to) where shear has a kink or jump
    pub fn breakpoints_between(&self, from_mm: f64, to_mm: f64, span_mm: f64) -> Vec<f64> {
        let mut points: Vec<f64> = self
            .point_loads
            .iter()
            .map(|p| p.position_mm)
            .chain(self.distributed_loads.iter().flat_map(|d| {
                let (a, b) = d.extent(span_mm);
                [a, b]
            }))
            .filter(|&x| x > from_mm && x < to_mm)
            .collect();
        points.sort_by(f64::total_cmp);
        points.dedup();
        points
    }
}

/// A load case as supplied by the caller.
///
/// ## JSON Example
///
/// ```json
/// { "type": "Stationary", "point_loads": [ { "position_mm": 600.0, "magnitude_n": 1000.0 } ] }
/// { "type": "Moving", "axle_loads_n": [200.0, 200.0], "spacings_mm": [176.0] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LoadCase {
    /// Loads fixed in place
    Stationary(StationaryLoads),
    /// Axle train swept across the span
    Moving(AxlePattern),
}

impl LoadCase {
    pub fn validate(&self, span_mm: f64) -> CalcResult<()> {
        match self {
            LoadCase::Stationary(loads) => loads.validate(span_mm),
            LoadCase::Moving(pattern) => {
                validate_span(span_mm)?;
                pattern.validate()
            }
        }
    }

    /// Total applied load (N): the magnitude scaled by a factor of safety to
    /// obtain a failure load.
    pub fn total_load_n(&self, span_mm: f64) -> f64 {
        match self {
            LoadCase::Stationary(loads) => loads.total_n(span_mm),
            LoadCase::Moving(pattern) => pattern.total_load_n(),
        }
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, LoadCase::Moving(_))
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LoadCase::Stationary(_) => "Stationary",
            LoadCase::Moving(_) => "Moving",
        }
    }
}

pub(crate) fn validate_span(span_mm: f64) -> CalcResult<()> {
    if !(span_mm.is_finite() && span_mm > 0.0) {
        return Err(CalcError::invalid_load("span_mm", span_mm.to_string(), "Span must be positive"));
    }
    Ok(())
}
