//! Geometric reduction of a finalized section.
//!
//! Besides ȳ and I, the section is flattened into [`WidthBand`]s: horizontal
//! slices between consecutive segment edges, each carrying the total material
//! width crossing it. The bands make b(y) and Q(y) piecewise closed-form.

use serde::{Deserialize, Serialize};

use super::{GlueLevel, Segment};
use crate::equations::section::{parallel_axis_term, section_modulus};
use crate::errors::{ensure_finite, CalcError, CalcResult};

/// Horizontal slice of the section with constant total width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthBand {
    pub bottom_mm: f64,
    pub top_mm: f64,
    /// Sum of the widths of every segment covering the slice (0 for a gap)
    pub width_mm: f64,
}

impl WidthBand {
    fn contains(&self, y: f64) -> bool {
        self.bottom_mm <= y && y < self.top_mm
    }
}

/// Derived properties of a cross-section, computed once at finalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionProperties {
    /// Σ A (mm²)
    pub total_area_mm2: f64,
    /// ȳ = Σ(A·y_c)/ΣA, measured from the bottom (mm)
    pub centroid_mm: f64,
    /// I = Σ(I_local + A·(y_c - ȳ)²) (mm⁴)
    pub moment_of_inertia_mm4: f64,
    /// Lowest segment edge (mm)
    pub bottom_mm: f64,
    /// Highest segment edge (mm)
    pub top_mm: f64,
    /// b(y), bottom to top
    pub bands: Vec<WidthBand>,
    /// Glue interfaces, bottom to top
    pub glue_levels: Vec<GlueLevel>,
}

impl CrossSectionProperties {
    pub(crate) fn compute(segments: &[Segment], glue_levels: Vec<GlueLevel>) -> CalcResult<Self> {
        let total_area: f64 = segments.iter().map(Segment::area).sum();
        let weighted: f64 = segments.iter().map(|s| s.area() * s.center()).sum();
        let centroid = ensure_finite("centroid", weighted / total_area)?;

        let moment_of_inertia: f64 = segments
            .iter()
            .map(|s| s.local_moment_of_inertia() + parallel_axis_term(s.area(), s.center() - centroid))
            .sum();
        let moment_of_inertia = ensure_finite("second moment of area", moment_of_inertia)?;
        if moment_of_inertia <= 0.0 {
            return Err(CalcError::degenerate_section(centroid, "second moment of area is zero"));
        }

        let bottom = segments.iter().map(|s| s.position_mm).fold(f64::INFINITY, f64::min);
        let top = segments.iter().map(Segment::top).fold(f64::NEG_INFINITY, f64::max);

        Ok(CrossSectionProperties {
            total_area_mm2: total_area,
            centroid_mm: centroid,
            moment_of_inertia_mm4: moment_of_inertia,
            bottom_mm: bottom,
            top_mm: top,
            bands: build_bands(segments),
            glue_levels,
        })
    }

    /// Overall depth of the section (mm)
    pub fn depth_mm(&self) -> f64 {
        self.top_mm - self.bottom_mm
    }

    /// Distance from the centroid to the top fibre (mm)
    pub fn y_top_mm(&self) -> f64 {
        self.top_mm - self.centroid_mm
    }

    /// Distance from the centroid to the bottom fibre (mm)
    pub fn y_bottom_mm(&self) -> f64 {
        self.centroid_mm - self.bottom_mm
    }

    /// Section modulus for the top fibre, I / y_top (mm³)
    pub fn section_modulus_top_mm3(&self) -> f64 {
        section_modulus(self.moment_of_inertia_mm4, self.y_top_mm())
    }

    /// Section modulus for the bottom fibre, I / y_bottom (mm³)
    pub fn section_modulus_bottom_mm3(&self) -> f64 {
        section_modulus(self.moment_of_inertia_mm4, self.y_bottom_mm())
    }

    /// Q(h): first moment about the centroid of all material above `height_mm`.
    ///
    /// Segments straddling `height_mm` are clipped there. Because the first
    /// moment of the whole section about its centroid is zero, this equals the
    /// magnitude of the first moment of the material below the cut.
    pub fn first_moment_above(&self, height_mm: f64) -> f64 {
        self.bands
            .iter()
            .filter(|band| band.top_mm > height_mm)
            .map(|band| {
                let lo = band.bottom_mm.max(height_mm);
                let area = band.width_mm * (band.top_mm - lo);
                let arm = (band.top_mm + lo) / 2.0 - self.centroid_mm;
                area * arm
            })
            .sum()
    }

    /// Total material width crossing `height_mm`.
    ///
    /// On an edge between two bands the smaller width governs; at the extreme
    /// faces the side that has material is used. Zero outside the section.
    pub fn width_at(&self, height_mm: f64) -> f64 {
        let eps = 1e-9 * self.depth_mm().max(1.0);
        let above = self.width_at_point(height_mm + eps);
        let below = self.width_at_point(height_mm - eps);
        if above > 0.0 && below > 0.0 {
            above.min(below)
        } else {
            above.max(below)
        }
    }

    fn width_at_point(&self, y: f64) -> f64 {
        self.bands
            .iter()
            .find(|band| band.contains(y))
            .map(|band| band.width_mm)
            .unwrap_or(0.0)
    }

    /// Summed glue thickness declared at `height_mm`, zero if no glue there
    pub fn glue_thickness_at(&self, height_mm: f64) -> f64 {
        self.glue_levels
            .iter()
            .find(|level| (level.height_mm - height_mm).abs() <= super::glue::LEVEL_TOLERANCE_MM)
            .map(|level| level.thickness_mm)
            .unwrap_or(0.0)
    }
}

/// Slice the section at every segment edge and sum the widths in each slice.
fn build_bands(segments: &[Segment]) -> Vec<WidthBand> {
    let mut edges: Vec<f64> = segments
        .iter()
        .flat_map(|s| [s.position_mm, s.top()])
        .collect();
    edges.sort_by(f64::total_cmp);
    edges.dedup();

    edges
        .windows(2)
        .map(|pair| {
            let (bottom, top) = (pair[0], pair[1]);
            let mid = (bottom + top) / 2.0;
            let width = segments
                .iter()
                .filter(|s| s.position_mm <= mid && mid < s.top())
                .map(|s| s.width_mm)
                .sum();
            WidthBand {
                bottom_mm: bottom,
                top_mm: top,
                width_mm: width,
            }
        })
        .collect()
}
