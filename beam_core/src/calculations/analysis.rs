//! # Girder Analysis
//!
//! Runs the whole pipeline for one built-up girder on a simply-supported
//! span: section reduction, internal forces (diagram or moving-load
//! envelope), stresses and the factor of safety of every failure mode.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::calculations::analysis::{calculate, AnalysisInput};
//! use beam_core::loads::{LoadCase, PointLoad, StationaryLoads};
//! use beam_core::materials::MaterialLimits;
//! use beam_core::section::{CrossSectionBuilder, Segment};
//! use beam_core::settings::AnalysisSettings;
//!
//! let input = AnalysisInput {
//!     label: "Solid block".to_string(),
//!     span_mm: 1200.0,
//!     section: CrossSectionBuilder::new().with_segment(Segment::new(1, 80.0, 100.0, 0.0)),
//!     load_case: LoadCase::Stationary(
//!         StationaryLoads::new().with_point_load(PointLoad::new(600.0, 1000.0)),
//!     ),
//!     material: MaterialLimits::matboard(),
//!     plates: vec![],
//!     settings: AnalysisSettings::default(),
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.peak_moment_nmm - 300_000.0).abs() < 1e-6);
//! assert!(result.governing_fos() > 1.0);
//! ```
//!
//! ## JSON Input
//!
//! ```json
//! {
//!   "label": "Box girder",
//!   "span_mm": 1200.0,
//!   "section": {
//!     "segments": [
//!       { "id": 1, "width_mm": 80.0, "height_mm": 1.27, "position_mm": 0.0 },
//!       { "id": 2, "width_mm": 1.27, "height_mm": 72.46, "position_mm": 1.27 }
//!     ],
//!     "glue_joints": [{ "segment_a": 1, "segment_b": 2, "thickness_mm": 5.0 }]
//!   },
//!   "load_case": { "type": "Moving", "axle_loads_n": [200.0, 200.0], "spacings_mm": [176.0] },
//!   "plates": [{ "segment": 2, "support": "WebShear", "diaphragm_spacing_mm": 400.0 }],
//!   "settings": { "step_mm": 2.0 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::failure::{self, FosReport};
use super::internal_forces::{self, InternalForces};
use super::stress::PlateCheck;
use crate::errors::CalcResult;
use crate::loads::{validate_span, LoadCase, Reactions};
use crate::materials::MaterialLimits;
use crate::section::{CrossSection, CrossSectionBuilder, GlueLevel};
use crate::settings::AnalysisSettings;

/// Everything needed to analyze one girder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    /// User-provided label (e.g., "Design 0")
    #[serde(default)]
    pub label: String,

    /// Distance between the supports (mm)
    pub span_mm: f64,

    /// Segments and glue joints, finalized during the run
    pub section: CrossSectionBuilder,

    pub load_case: LoadCase,

    /// Allowable stresses; matboard when omitted
    #[serde(default)]
    pub material: MaterialLimits,

    /// Plates checked for local buckling
    #[serde(default)]
    pub plates: Vec<PlateCheck>,

    #[serde(default)]
    pub settings: AnalysisSettings,
}

impl AnalysisInput {
    /// Validate everything that can be checked before the section is built
    pub fn validate(&self) -> CalcResult<()> {
        validate_span(self.span_mm)?;
        self.load_case.validate(self.span_mm)?;
        self.material.validate()?;
        self.settings.validate()
    }
}

/// Reduced section properties, for reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub total_area_mm2: f64,
    pub centroid_mm: f64,
    pub moment_of_inertia_mm4: f64,
    pub depth_mm: f64,
    /// Centroid to top fibre (mm)
    pub y_top_mm: f64,
    /// Centroid to bottom fibre (mm)
    pub y_bottom_mm: f64,
    pub section_modulus_top_mm3: f64,
    pub section_modulus_bottom_mm3: f64,
    /// Q at the centroid (mm³)
    pub first_moment_at_centroid_mm3: f64,
    pub glue_levels: Vec<GlueLevel>,
}

impl SectionSummary {
    pub fn from_section(section: &CrossSection) -> Self {
        let props = section.properties();
        SectionSummary {
            total_area_mm2: props.total_area_mm2,
            centroid_mm: props.centroid_mm,
            moment_of_inertia_mm4: props.moment_of_inertia_mm4,
            depth_mm: props.depth_mm(),
            y_top_mm: props.y_top_mm(),
            y_bottom_mm: props.y_bottom_mm(),
            section_modulus_top_mm3: props.section_modulus_top_mm3(),
            section_modulus_bottom_mm3: props.section_modulus_bottom_mm3(),
            first_moment_at_centroid_mm3: props.first_moment_above(props.centroid_mm),
            glue_levels: props.glue_levels.clone(),
        }
    }
}

/// Results of a girder analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub label: String,
    pub span_mm: f64,

    // === Loads ===
    /// Total applied load that FOS scales into a failure load (N)
    pub applied_load_n: f64,
    /// Support reactions; only defined for a stationary load case
    pub reactions: Option<Reactions>,

    // === Section ===
    pub section: SectionSummary,

    // === Demand ===
    /// Largest |M| anywhere on the span (N·mm)
    pub peak_moment_nmm: f64,
    /// Largest |V| anywhere on the span (N)
    pub peak_shear_n: f64,
    /// SFD/BMD or moving-load envelope
    pub forces: InternalForces,

    // === Capacity ===
    pub fos: FosReport,
}

impl AnalysisResult {
    pub fn governing_fos(&self) -> f64 {
        self.fos.governing_fos()
    }

    pub fn failure_load_n(&self) -> f64 {
        self.fos.failure_load_n()
    }

    /// True when no failure mode has FOS below 1
    pub fn passes(&self) -> bool {
        self.fos.passes()
    }
}

/// Analyze a girder.
///
/// # Returns
///
/// * `Ok(AnalysisResult)` - forces and every failure mode's FOS
/// * `Err(CalcError)` - the first invalid input or degenerate quantity found;
///   no partial results are produced
pub fn calculate(input: &AnalysisInput) -> CalcResult<AnalysisResult> {
    input.validate()?;
    let section = input.section.finalize()?;

    let forces = internal_forces::solve(&input.load_case, input.span_mm, &input.settings)?;
    let applied_load_n = input.load_case.total_load_n(input.span_mm);
    let reactions = match &input.load_case {
        LoadCase::Stationary(loads) => Some(loads.reactions(input.span_mm)?),
        LoadCase::Moving(_) => None,
    };

    let ranges = forces.ranges();
    let peak_moment_nmm = ranges
        .iter()
        .map(|r| r.max_moment_nmm.abs().max(r.min_moment_nmm.abs()))
        .fold(0.0, f64::max);
    let peak_shear_n = ranges.iter().map(|r| r.abs_shear_n()).fold(0.0, f64::max);

    let fos = failure::evaluate(&forces, &section, &input.material, &input.plates, applied_load_n)?;

    log::info!(
        "{}: {} over {} mm, governing FOS {:.3} ({})",
        if input.label.is_empty() { "Girder" } else { input.label.as_str() },
        input.load_case.display_name(),
        input.span_mm,
        fos.governing_fos(),
        fos.governing.mode
    );

    Ok(AnalysisResult {
        label: input.label.clone(),
        span_mm: input.span_mm,
        applied_load_n,
        reactions,
        section: SectionSummary::from_section(&section),
        peak_moment_nmm,
        peak_shear_n,
        forces,
        fos,
    })
}
