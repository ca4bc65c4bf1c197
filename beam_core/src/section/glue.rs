//! Glue joints between vertically adjacent segments.
//!
//! Each joint is declared by the caller with its own contact thickness (the
//! width of the bonded strip). Joints whose interfaces share a height form a
//! [`GlueLevel`]; the thickness resisting shear flow at that level is the sum
//! of every joint declared there.

use serde::{Deserialize, Serialize};

use super::{Segment, SegmentId};
use crate::errors::{CalcError, CalcResult};

/// Two interface heights closer than this are the same level (mm)
pub const LEVEL_TOLERANCE_MM: f64 = 1e-6;

/// Bonded interface between two segments.
///
/// ## JSON Example
///
/// ```json
/// { "segment_a": 2, "segment_b": 5, "thickness_mm": 5.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlueJoint {
    pub segment_a: SegmentId,
    pub segment_b: SegmentId,
    /// Contact width of the glued strip (mm)
    pub thickness_mm: f64,
}

impl GlueJoint {
    pub fn new(segment_a: impl Into<SegmentId>, segment_b: impl Into<SegmentId>, thickness_mm: f64) -> Self {
        GlueJoint {
            segment_a: segment_a.into(),
            segment_b: segment_b.into(),
            thickness_mm,
        }
    }

    fn label(&self) -> String {
        format!("glue joint {}-{}", self.segment_a, self.segment_b)
    }

    /// Height of the shared edge, or an error if the two segments do not touch
    /// top-to-bottom.
    fn interface_height(&self, a: &Segment, b: &Segment) -> CalcResult<f64> {
        if (a.top() - b.position_mm).abs() <= LEVEL_TOLERANCE_MM {
            Ok(a.top())
        } else if (b.top() - a.position_mm).abs() <= LEVEL_TOLERANCE_MM {
            Ok(b.top())
        } else {
            Err(CalcError::invalid_geometry(
                self.label(),
                format!(
                    "segments are not vertically adjacent ({} spans {}..{}, {} spans {}..{})",
                    a.id,
                    a.position_mm,
                    a.top(),
                    b.id,
                    b.position_mm,
                    b.top()
                ),
            ))
        }
    }
}

/// All glue declared at one interface height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlueLevel {
    /// Interface height above the bottom of the section (mm)
    pub height_mm: f64,
    /// Summed contact thickness of every joint at this height (mm)
    pub thickness_mm: f64,
    /// The segment pairs glued at this height
    pub joints: Vec<(SegmentId, SegmentId)>,
}

/// Validate glue joints against the segments and group them by height.
///
/// Levels are returned sorted bottom to top.
pub(crate) fn resolve_levels(segments: &[Segment], joints: &[GlueJoint]) -> CalcResult<Vec<GlueLevel>> {
    let find = |joint: &GlueJoint, id: SegmentId| {
        segments.iter().find(|s| s.id == id).ok_or_else(|| {
            CalcError::invalid_geometry(joint.label(), format!("references unknown segment {}", id))
        })
    };

    let mut levels: Vec<GlueLevel> = Vec::new();
    for joint in joints {
        if !(joint.thickness_mm.is_finite() && joint.thickness_mm > 0.0) {
            return Err(CalcError::invalid_geometry(
                joint.label(),
                format!("thickness must be positive, got {}", joint.thickness_mm),
            ));
        }
        if joint.segment_a == joint.segment_b {
            return Err(CalcError::invalid_geometry(joint.label(), "a segment cannot be glued to itself"));
        }

        let a = find(joint, joint.segment_a)?;
        let b = find(joint, joint.segment_b)?;
        let height = joint.interface_height(a, b)?;

        match levels
            .iter_mut()
            .find(|level| (level.height_mm - height).abs() <= LEVEL_TOLERANCE_MM)
        {
            Some(level) => {
                level.thickness_mm += joint.thickness_mm;
                level.joints.push((joint.segment_a, joint.segment_b));
            }
            None => levels.push(GlueLevel {
                height_mm: height,
                thickness_mm: joint.thickness_mm,
                joints: vec![(joint.segment_a, joint.segment_b)],
            }),
        }
    }

    levels.sort_by(|a, b| a.height_mm.total_cmp(&b.height_mm));
    Ok(levels)
}
