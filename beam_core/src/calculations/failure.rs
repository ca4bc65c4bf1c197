//! # Factor of Safety
//!
//! Every failure mode reduces to a capacity (MPa) and a stress demand that is
//! linear in either the bending moment or the shear force. The evaluator
//! computes, for each mode, the stress a unit force produces at the critical
//! fibre, then scans the internal-force samples for the smallest
//! capacity / demand ratio.
//!
//! Moment-driven modes are checked separately for sagging and hogging since
//! the compressed side (and, for webs, the buckled depth) flips with the sign
//! of the moment. A mode that never sees demand reports FOS = +∞ with no
//! location.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::internal_forces::{ForceRange, InternalForces};
use super::stress::{self, CompressedFibre, PlateCheck, PlateSupport};
use crate::errors::{ensure_finite, CalcError, CalcResult};
use crate::materials::MaterialLimits;
use crate::section::{CrossSection, SegmentId};

/// Mechanism by which the girder can fail
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum FailureMode {
    FlexuralTension,
    FlexuralCompression,
    ShearAtNeutralAxis,
    ShearAtGlue { level_mm: f64 },
    PlateBucklingFlange { segment: SegmentId },
    PlateBucklingWeb { segment: SegmentId },
    WebShearBuckling { segment: SegmentId },
}

impl FailureMode {
    /// Mode checked by a declared plate
    pub fn for_plate(plate: &PlateCheck) -> Self {
        match plate.support {
            PlateSupport::BothEdgesRestrained | PlateSupport::OneEdgeFree => {
                FailureMode::PlateBucklingFlange { segment: plate.segment }
            }
            PlateSupport::WebFlexure => FailureMode::PlateBucklingWeb { segment: plate.segment },
            PlateSupport::WebShear => FailureMode::WebShearBuckling { segment: plate.segment },
        }
    }

    /// True for modes driven by shear rather than moment
    pub fn is_shear_mode(&self) -> bool {
        matches!(
            self,
            FailureMode::ShearAtNeutralAxis | FailureMode::ShearAtGlue { .. } | FailureMode::WebShearBuckling { .. }
        )
    }
}

impl fmt::Display for FailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureMode::FlexuralTension => write!(f, "Flexural tension"),
            FailureMode::FlexuralCompression => write!(f, "Flexural compression"),
            FailureMode::ShearAtNeutralAxis => write!(f, "Shear at neutral axis"),
            FailureMode::ShearAtGlue { level_mm } => write!(f, "Glue shear at y = {:.2} mm", level_mm),
            FailureMode::PlateBucklingFlange { segment } => write!(f, "Flange buckling ({})", segment),
            FailureMode::PlateBucklingWeb { segment } => write!(f, "Web flexural buckling ({})", segment),
            FailureMode::WebShearBuckling { segment } => write!(f, "Web shear buckling ({})", segment),
        }
    }
}

/// Outcome of one failure mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeResult {
    pub mode: FailureMode,
    /// Capacity at the governing point (MPa)
    pub capacity_mpa: f64,
    /// Peak stress demand at the governing point (MPa, 0 if never loaded)
    pub demand_mpa: f64,
    /// capacity / demand; +∞ (serialized as null) when never loaded
    pub fos: f64,
    /// Span position of the governing point (mm)
    pub location_mm: Option<f64>,
    /// Total applied load × FOS (N)
    pub failure_load_n: f64,
}

impl ModeResult {
    pub fn passes(&self) -> bool {
        self.fos >= 1.0
    }
}

/// Per-mode results and the governing one
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FosReport {
    /// Every mode checked, none dropped
    pub modes: Vec<ModeResult>,
    /// Mode with the smallest FOS (first one on ties)
    pub governing: ModeResult,
}

impl FosReport {
    pub fn governing_fos(&self) -> f64 {
        self.governing.fos
    }

    pub fn failure_load_n(&self) -> f64 {
        self.governing.failure_load_n
    }

    pub fn passes(&self) -> bool {
        self.governing.passes()
    }

    pub fn mode(&self, mode: &FailureMode) -> Option<&ModeResult> {
        self.modes.iter().find(|r| &r.mode == mode)
    }
}

// ============================================================================
// Criteria
// ============================================================================

/// Capacity and the stress produced by a unit force
#[derive(Debug, Clone, Copy)]
struct StressLimit {
    capacity_mpa: f64,
    stress_per_unit: f64,
}

impl StressLimit {
    /// `None` when a unit force puts no demand on the mode
    fn new(capacity_mpa: f64, stress_per_unit: f64) -> Option<Self> {
        (stress_per_unit > 0.0).then_some(StressLimit {
            capacity_mpa,
            stress_per_unit,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Criterion {
    mode: FailureMode,
    /// Applies to a positive moment (per N·mm)
    sagging: Option<StressLimit>,
    /// Applies to a negative moment (per N·mm of magnitude)
    hogging: Option<StressLimit>,
    /// Applies to |V| (per N)
    shear: Option<StressLimit>,
}

impl Criterion {
    fn moment(mode: FailureMode, sagging: Option<StressLimit>, hogging: Option<StressLimit>) -> Self {
        Criterion {
            mode,
            sagging,
            hogging,
            shear: None,
        }
    }

    fn shear(mode: FailureMode, limit: Option<StressLimit>) -> Self {
        Criterion {
            mode,
            sagging: None,
            hogging: None,
            shear: limit,
        }
    }

    /// (capacity, demand) pairs at one sample
    fn demands(&self, range: &ForceRange) -> impl Iterator<Item = (f64, f64)> {
        let sagging = self
            .sagging
            .filter(|_| range.max_moment_nmm > 0.0)
            .map(|l| (l.capacity_mpa, range.max_moment_nmm * l.stress_per_unit));
        let hogging = self
            .hogging
            .filter(|_| range.min_moment_nmm < 0.0)
            .map(|l| (l.capacity_mpa, -range.min_moment_nmm * l.stress_per_unit));
        let shear = self
            .shear
            .map(|l| (l.capacity_mpa, range.abs_shear_n() * l.stress_per_unit));
        sagging.into_iter().chain(hogging).chain(shear)
    }

    /// Capacity reported when the mode is never loaded
    fn nominal_capacity(&self) -> f64 {
        self.sagging
            .or(self.hogging)
            .or(self.shear)
            .map(|l| l.capacity_mpa)
            .unwrap_or(f64::INFINITY)
    }
}

/// Material-level checks every section gets
fn section_criteria(section: &CrossSection, material: &MaterialLimits) -> CalcResult<Vec<Criterion>> {
    let props = section.properties();
    let (top, bottom) = (props.top_mm, props.bottom_mm);

    let mut criteria = vec![
        Criterion::moment(
            FailureMode::FlexuralTension,
            StressLimit::new(material.tensile_strength_mpa, -stress::flexural_stress(1.0, bottom, props)?),
            StressLimit::new(material.tensile_strength_mpa, -stress::flexural_stress(-1.0, top, props)?),
        ),
        Criterion::moment(
            FailureMode::FlexuralCompression,
            StressLimit::new(material.compressive_strength_mpa, stress::flexural_stress(1.0, top, props)?),
            StressLimit::new(material.compressive_strength_mpa, stress::flexural_stress(-1.0, bottom, props)?),
        ),
        Criterion::shear(
            FailureMode::ShearAtNeutralAxis,
            StressLimit::new(material.shear_strength_mpa, stress::shear_stress(1.0, props.centroid_mm, props)?),
        ),
    ];

    for level in &props.glue_levels {
        criteria.push(Criterion::shear(
            FailureMode::ShearAtGlue {
                level_mm: level.height_mm,
            },
            StressLimit::new(
                material.glue_shear_strength_mpa,
                stress::glue_shear_stress(1.0, level.height_mm, props)?,
            ),
        ));
    }
    Ok(criteria)
}

/// Buckling check of one declared plate
fn plate_criterion(plate: &PlateCheck, section: &CrossSection, material: &MaterialLimits) -> CalcResult<Criterion> {
    plate.validate(section)?;
    let props = section.properties();
    let segment = section.segment(plate.segment)?;
    let mode = FailureMode::for_plate(plate);

    match plate.support {
        PlateSupport::WebShear => {
            // Web shear peaks where the web is closest to the neutral axis
            let height = props.centroid_mm.clamp(segment.position_mm, segment.top());
            let capacity = stress::plate_buckling_stress(plate, section, material, CompressedFibre::Top)?;
            Ok(Criterion::shear(
                mode,
                StressLimit::new(capacity, stress::shear_stress(1.0, height, props)?),
            ))
        }
        PlateSupport::BothEdgesRestrained | PlateSupport::OneEdgeFree | PlateSupport::WebFlexure => {
            // Peak compression in the plate sits at its edge farthest from the centroid
            let sagging_unit = stress::flexural_stress(1.0, segment.top(), props)?;
            let hogging_unit = stress::flexural_stress(-1.0, segment.position_mm, props)?;

            let limit = |unit: f64, fibre: CompressedFibre| -> CalcResult<Option<StressLimit>> {
                if unit > 0.0 {
                    let capacity = stress::plate_buckling_stress(plate, section, material, fibre)?;
                    Ok(StressLimit::new(capacity, unit))
                } else {
                    Ok(None)
                }
            };
            Ok(Criterion::moment(
                mode,
                limit(sagging_unit, CompressedFibre::Top)?,
                limit(hogging_unit, CompressedFibre::Bottom)?,
            ))
        }
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Scan the samples for the smallest capacity / demand of one criterion.
fn evaluate_criterion(criterion: &Criterion, ranges: &[ForceRange], applied_load_n: f64) -> CalcResult<ModeResult> {
    // (fos, capacity, demand, position)
    let mut worst: Option<(f64, f64, f64, f64)> = None;
    for range in ranges {
        for (capacity, demand) in criterion.demands(range) {
            if demand <= 0.0 {
                continue;
            }
            let fos = capacity / demand;
            if worst.map_or(true, |(best, ..)| fos < best) {
                worst = Some((fos, capacity, demand, range.position_mm));
            }
        }
    }

    let result = match worst {
        Some((fos, capacity, demand, position)) => ModeResult {
            mode: criterion.mode,
            capacity_mpa: capacity,
            demand_mpa: demand,
            fos: ensure_finite("factor of safety", fos)?,
            location_mm: Some(position),
            failure_load_n: applied_load_n * fos,
        },
        None => ModeResult {
            mode: criterion.mode,
            capacity_mpa: criterion.nominal_capacity(),
            demand_mpa: 0.0,
            fos: f64::INFINITY,
            location_mm: None,
            failure_load_n: f64::INFINITY,
        },
    };
    Ok(result)
}

/// Factor of safety of every failure mode.
///
/// Modes are listed as: flexural tension, flexural compression, shear at the
/// neutral axis, glue levels bottom to top, then the declared plates in
/// order. `applied_load_n` scales FOS into a failure load.
pub fn evaluate(
    forces: &InternalForces,
    section: &CrossSection,
    material: &MaterialLimits,
    plates: &[PlateCheck],
    applied_load_n: f64,
) -> CalcResult<FosReport> {
    material.validate()?;
    if !applied_load_n.is_finite() {
        return Err(CalcError::invalid_load(
            "applied_load_n",
            applied_load_n.to_string(),
            "Applied load must be finite",
        ));
    }

    let mut criteria = section_criteria(section, material)?;
    for plate in plates {
        criteria.push(plate_criterion(plate, section, material)?);
    }

    let ranges = forces.ranges();
    let modes = criteria
        .iter()
        .map(|c| evaluate_criterion(c, &ranges, applied_load_n))
        .collect::<CalcResult<Vec<_>>>()?;

    let mut governing = &modes[0];
    for result in &modes[1..] {
        if result.fos < governing.fos {
            governing = result;
        }
    }
    let governing = governing.clone();

    log::info!(
        "Governing mode: {} (FOS {:.3}, failure load {:.1} N)",
        governing.mode,
        governing.fos,
        governing.failure_load_n
    );
    for result in &modes {
        log::debug!("  {}: FOS {:.3}", result.mode, result.fos);
    }

    Ok(FosReport { modes, governing })
}
