//! Stresses at a height in a finalized section, and local-buckling capacities
//! of its thin plates.
//!
//! Heights are measured from the bottom of the section. Flexural stress is
//! positive in compression; a sagging (positive) moment compresses the
//! material above the centroid.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::calculations::stress::{flexural_stress, shear_stress};
//! use beam_core::section::{CrossSectionBuilder, Segment};
//!
//! let section = CrossSectionBuilder::new()
//!     .with_segment(Segment::new(1, 80.0, 100.0, 0.0))
//!     .finalize()
//!     .unwrap();
//! let props = section.properties();
//!
//! // Sagging moment: top fibre in compression, bottom in tension
//! assert!(flexural_stress(300_000.0, 100.0, props).unwrap() > 0.0);
//! assert!(flexural_stress(300_000.0, 0.0, props).unwrap() < 0.0);
//!
//! // 1.5 V / A at the neutral axis of a rectangle
//! let tau = shear_stress(500.0, 50.0, props).unwrap();
//! assert!((tau - 1.5 * 500.0 / 8000.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations;
use crate::errors::{ensure_finite, CalcError, CalcResult};
use crate::materials::MaterialLimits;
use crate::section::{CrossSection, CrossSectionProperties, SegmentId};

/// σ = M (h - ȳ) / I, positive in compression
pub fn flexural_stress(moment_nmm: f64, height_mm: f64, props: &CrossSectionProperties) -> CalcResult<f64> {
    check_inertia(props)?;
    ensure_finite(
        "flexural stress",
        equations::flexural_stress(moment_nmm, height_mm, props.centroid_mm, props.moment_of_inertia_mm4),
    )
}

/// τ = V Q(h) / (I b(h)), with b(h) the total material width crossing `height_mm`
pub fn shear_stress(shear_n: f64, height_mm: f64, props: &CrossSectionProperties) -> CalcResult<f64> {
    check_inertia(props)?;
    let width = props.width_at(height_mm);
    if width <= 0.0 {
        return Err(CalcError::degenerate_section(height_mm, "no material crosses this height"));
    }
    ensure_finite(
        "shear stress",
        equations::jourawski_shear_stress(
            shear_n,
            props.first_moment_above(height_mm),
            props.moment_of_inertia_mm4,
            width,
        ),
    )
}

/// τ = V Q(h) / (I t_glue(h)), with t_glue the summed glue thickness at the level
pub fn glue_shear_stress(shear_n: f64, height_mm: f64, props: &CrossSectionProperties) -> CalcResult<f64> {
    check_inertia(props)?;
    let thickness = props.glue_thickness_at(height_mm);
    if thickness <= 0.0 {
        return Err(CalcError::degenerate_section(height_mm, "no glue declared at this height"));
    }
    ensure_finite(
        "glue shear stress",
        equations::jourawski_shear_stress(
            shear_n,
            props.first_moment_above(height_mm),
            props.moment_of_inertia_mm4,
            thickness,
        ),
    )
}

fn check_inertia(props: &CrossSectionProperties) -> CalcResult<()> {
    if props.moment_of_inertia_mm4 > 0.0 {
        Ok(())
    } else {
        Err(CalcError::degenerate_section(props.centroid_mm, "second moment of area is zero"))
    }
}

// ============================================================================
// Local Buckling
// ============================================================================

/// Edge restraint of a thin plate, which sets its buckling coefficient k
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlateSupport {
    /// Flange strip held along both long edges (k = 4)
    BothEdgesRestrained,
    /// Flange outstand with one free edge (k = 0.425)
    OneEdgeFree,
    /// Web under a linearly varying flexural compression (k = 6)
    WebFlexure,
    /// Web in shear (k = 5)
    WebShear,
}

impl PlateSupport {
    pub fn buckling_coefficient(&self) -> f64 {
        match self {
            PlateSupport::BothEdgesRestrained => 4.0,
            PlateSupport::OneEdgeFree => 0.425,
            PlateSupport::WebFlexure => 6.0,
            PlateSupport::WebShear => 5.0,
        }
    }

    /// Webs are vertical plates: their thickness is the segment width
    pub fn is_web(&self) -> bool {
        matches!(self, PlateSupport::WebFlexure | PlateSupport::WebShear)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlateSupport::BothEdgesRestrained => "Both edges restrained",
            PlateSupport::OneEdgeFree => "One edge free",
            PlateSupport::WebFlexure => "Web flexure",
            PlateSupport::WebShear => "Web shear",
        }
    }
}

/// Side of the section in flexural compression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressedFibre {
    /// Sagging moment
    Top,
    /// Hogging moment
    Bottom,
}

/// A segment declared for a local-buckling check.
///
/// Flange plates buckle across `unsupported_width_mm` (default: the segment
/// width) with thickness equal to the segment height. Webs use the segment
/// width as thickness; a flexural web defaults to the depth of its compressed
/// part, and a shear web uses its full height plus the optional diaphragm
/// spacing.
///
/// ## JSON Example
///
/// ```json
/// { "segment": 1, "support": "BothEdgesRestrained", "unsupported_width_mm": 75.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateCheck {
    pub segment: SegmentId,
    pub support: PlateSupport,
    #[serde(default)]
    pub unsupported_width_mm: Option<f64>,
    #[serde(default)]
    pub diaphragm_spacing_mm: Option<f64>,
}

impl PlateCheck {
    pub fn new(segment: impl Into<SegmentId>, support: PlateSupport) -> Self {
        PlateCheck {
            segment: segment.into(),
            support,
            unsupported_width_mm: None,
            diaphragm_spacing_mm: None,
        }
    }

    pub fn with_unsupported_width(mut self, width_mm: f64) -> Self {
        self.unsupported_width_mm = Some(width_mm);
        self
    }

    pub fn with_diaphragm_spacing(mut self, spacing_mm: f64) -> Self {
        self.diaphragm_spacing_mm = Some(spacing_mm);
        self
    }

    fn label(&self) -> String {
        format!("plate check on {}", self.segment)
    }

    pub fn validate(&self, section: &CrossSection) -> CalcResult<()> {
        section.segment(self.segment)?;
        let optional = [
            ("unsupported_width_mm", self.unsupported_width_mm),
            ("diaphragm_spacing_mm", self.diaphragm_spacing_mm),
        ];
        for (field, value) in optional {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(CalcError::invalid_geometry(
                        self.label(),
                        format!("{} must be positive, got {}", field, v),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Critical buckling stress (MPa) of a declared plate.
///
/// `compressed` only matters for a flexural web without an explicit width:
/// the buckled depth is the part of the web on the compressed side of the
/// centroid. Returns `DegenerateSection` if that depth is zero.
pub fn plate_buckling_stress(
    plate: &PlateCheck,
    section: &CrossSection,
    material: &MaterialLimits,
    compressed: CompressedFibre,
) -> CalcResult<f64> {
    let segment = section.segment(plate.segment)?;
    let k = plate.support.buckling_coefficient();
    let (e, nu) = (material.elastic_modulus_mpa, material.poisson_ratio);

    let stress = match plate.support {
        PlateSupport::BothEdgesRestrained | PlateSupport::OneEdgeFree => {
            let b = plate.unsupported_width_mm.unwrap_or(segment.width_mm);
            equations::plate_buckling_stress(k, e, nu, segment.height_mm, b)
        }
        PlateSupport::WebFlexure => {
            let b = match plate.unsupported_width_mm {
                Some(b) => b,
                None => compressed_depth(segment.position_mm, segment.top(), section, compressed),
            };
            if b <= 0.0 {
                return Err(CalcError::degenerate_section(
                    section.properties().centroid_mm,
                    format!("web {} has no compressed depth", segment.id),
                ));
            }
            equations::plate_buckling_stress(k, e, nu, segment.width_mm, b)
        }
        PlateSupport::WebShear => {
            equations::web_shear_buckling_stress(k, e, nu, segment.width_mm, segment.height_mm, plate.diaphragm_spacing_mm)
        }
    };
    ensure_finite("plate buckling stress", stress)
}

/// Depth of the part of [bottom, top] on the compressed side of the centroid
pub(crate) fn compressed_depth(bottom_mm: f64, top_mm: f64, section: &CrossSection, compressed: CompressedFibre) -> f64 {
    let centroid = section.properties().centroid_mm;
    let depth = match compressed {
        CompressedFibre::Top => top_mm - bottom_mm.max(centroid),
        CompressedFibre::Bottom => top_mm.min(centroid) - bottom_mm,
    };
    depth.max(0.0)
}
