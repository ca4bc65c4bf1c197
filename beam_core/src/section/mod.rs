//! # Built-up Cross-Sections
//!
//! A cross-section is assembled from axis-aligned rectangular plates
//! ([`Segment`]) and optional glue joints between vertically adjacent plates
//! ([`GlueJoint`]). Assembly happens in a [`CrossSectionBuilder`]; calling
//! [`CrossSectionBuilder::finalize`] validates everything and reduces the
//! geometry once into an immutable [`CrossSection`] carrying its
//! [`CrossSectionProperties`].
//!
//! Heights are measured upward from the bottom of the section, in mm.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::section::{CrossSectionBuilder, Segment};
//!
//! // Two 80 x 10 plates, one at the bottom and one at the top of a 100 mm section
//! let section = CrossSectionBuilder::new()
//!     .with_segment(Segment::new(1, 80.0, 10.0, 0.0))
//!     .with_segment(Segment::new(2, 80.0, 10.0, 90.0))
//!     .finalize()
//!     .unwrap();
//!
//! assert!((section.properties().centroid_mm - 50.0).abs() < 1e-12);
//! ```

pub mod glue;
pub mod properties;

pub use glue::{GlueJoint, GlueLevel};
pub use properties::{CrossSectionProperties, WidthBand};

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::equations::section::{rectangular_area, rectangular_moment_of_inertia};
use crate::errors::{CalcError, CalcResult};

/// Caller-assigned identifier of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub u32);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

impl From<u32> for SegmentId {
    fn from(id: u32) -> Self {
        SegmentId(id)
    }
}

/// One rectangular plate of the section.
///
/// ## JSON Example
///
/// ```json
/// { "id": 1, "width_mm": 100.0, "height_mm": 1.27, "position_mm": 0.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Identifier referenced by glue joints and plate checks
    pub id: SegmentId,
    /// Horizontal extent (mm)
    pub width_mm: f64,
    /// Vertical extent, i.e. plate thickness for a flange (mm)
    pub height_mm: f64,
    /// Height of the bottom edge above the bottom of the section (mm)
    pub position_mm: f64,
}

impl Segment {
    /// Create a segment
    pub fn new(id: impl Into<SegmentId>, width_mm: f64, height_mm: f64, position_mm: f64) -> Self {
        Segment {
            id: id.into(),
            width_mm,
            height_mm,
            position_mm,
        }
    }

    pub fn area(&self) -> f64 {
        rectangular_area(self.width_mm, self.height_mm)
    }

    /// Height of the top edge
    pub fn top(&self) -> f64 {
        self.position_mm + self.height_mm
    }

    /// Height of the segment's own centroid
    pub fn center(&self) -> f64 {
        self.position_mm + self.height_mm / 2.0
    }

    /// Second moment of area about the segment's own centroid
    pub fn local_moment_of_inertia(&self) -> f64 {
        rectangular_moment_of_inertia(self.width_mm, self.height_mm)
    }

    /// Return a copy moved vertically by `offset_mm`
    pub fn shifted(&self, offset_mm: f64) -> Self {
        Segment {
            position_mm: self.position_mm + offset_mm,
            ..*self
        }
    }

    /// Check width > 0, height > 0, position ≥ 0 (all finite)
    pub fn validate(&self) -> CalcResult<()> {
        let item = format!("segment {}", self.id);
        if !(self.width_mm.is_finite() && self.width_mm > 0.0) {
            return Err(CalcError::invalid_geometry(
                item,
                format!("width must be positive, got {}", self.width_mm),
            ));
        }
        if !(self.height_mm.is_finite() && self.height_mm > 0.0) {
            return Err(CalcError::invalid_geometry(
                item,
                format!("height must be positive, got {}", self.height_mm),
            ));
        }
        if !(self.position_mm.is_finite() && self.position_mm >= 0.0) {
            return Err(CalcError::invalid_geometry(
                item,
                format!("position must be non-negative, got {}", self.position_mm),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} x {} mm at y = {} mm",
            self.id, self.width_mm, self.height_mm, self.position_mm
        )
    }
}

/// Mutable assembly phase of a cross-section.
///
/// This is also the serialized form of a section definition:
///
/// ```json
/// {
///   "segments": [
///     { "id": 1, "width_mm": 80.0, "height_mm": 1.27, "position_mm": 0.0 },
///     { "id": 2, "width_mm": 100.0, "height_mm": 1.27, "position_mm": 1.27 }
///   ],
///   "glue_joints": [
///     { "segment_a": 1, "segment_b": 2, "thickness_mm": 10.0 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionBuilder {
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub glue_joints: Vec<GlueJoint>,
}

impl CrossSectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment and return self (builder pattern)
    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Add a glue joint and return self (builder pattern)
    pub fn with_glue_joint(mut self, joint: GlueJoint) -> Self {
        self.glue_joints.push(joint);
        self
    }

    /// Append a segment
    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Append a glue joint
    pub fn add_glue_joint(&mut self, joint: GlueJoint) {
        self.glue_joints.push(joint);
    }

    /// Remove a segment by id, returning it if present.
    ///
    /// Glue joints referring to it are left alone and will fail `finalize`.
    pub fn remove_segment(&mut self, id: SegmentId) -> Option<Segment> {
        let pos = self.segments.iter().position(|s| s.id == id)?;
        Some(self.segments.remove(pos))
    }

    /// Validate the assembly and reduce it to an immutable section.
    ///
    /// The builder is left untouched, so it can be edited and finalized again.
    pub fn finalize(&self) -> CalcResult<CrossSection> {
        if self.segments.is_empty() {
            return Err(CalcError::invalid_geometry(
                "cross-section",
                "at least one segment is required",
            ));
        }

        let mut seen = HashSet::new();
        for segment in &self.segments {
            segment.validate()?;
            if !seen.insert(segment.id) {
                return Err(CalcError::invalid_geometry(
                    format!("segment {}", segment.id),
                    "duplicate segment id",
                ));
            }
        }

        let glue_levels = glue::resolve_levels(&self.segments, &self.glue_joints)?;
        let properties = CrossSectionProperties::compute(&self.segments, glue_levels)?;

        log::debug!(
            "Finalized section: {} segments, {} glue levels, ybar = {:.3} mm, I = {:.1} mm^4",
            self.segments.len(),
            properties.glue_levels.len(),
            properties.centroid_mm,
            properties.moment_of_inertia_mm4
        );

        Ok(CrossSection {
            segments: self.segments.clone(),
            glue_joints: self.glue_joints.clone(),
            properties,
        })
    }
}

/// A finalized cross-section. Geometry and properties cannot change; edit the
/// builder and finalize again instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossSection {
    segments: Vec<Segment>,
    glue_joints: Vec<GlueJoint>,
    properties: CrossSectionProperties,
}

impl CrossSection {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn glue_joints(&self) -> &[GlueJoint] {
        &self.glue_joints
    }

    pub fn properties(&self) -> &CrossSectionProperties {
        &self.properties
    }

    /// Look up a segment by id
    pub fn segment(&self, id: SegmentId) -> CalcResult<&Segment> {
        self.segments.iter().find(|s| s.id == id).ok_or_else(|| {
            CalcError::invalid_geometry(format!("segment {}", id), "no segment with this id")
        })
    }

    /// First moment of area of the material above `height_mm`
    pub fn first_moment_above(&self, height_mm: f64) -> f64 {
        self.properties.first_moment_above(height_mm)
    }

    /// Rebuild this section moved vertically by `offset_mm`
    pub fn shifted(&self, offset_mm: f64) -> CalcResult<CrossSection> {
        CrossSectionBuilder {
            segments: self.segments.iter().map(|s| s.shifted(offset_mm)).collect(),
            glue_joints: self.glue_joints.clone(),
        }
        .finalize()
    }
}
