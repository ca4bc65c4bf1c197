//! # Girder Calculations
//!
//! The analysis pipeline, leaves first:
//!
//! - [`internal_forces`] - SFD/BMD sampling and moving-load envelopes
//! - [`stress`] - Flexural, shear and glue stresses; plate buckling capacities
//! - [`failure`] - Factor of safety per failure mode
//! - [`analysis`] - `AnalysisInput` -> `calculate` -> `AnalysisResult`
//!
//! Like every entry point in this crate, [`calculate`] is a pure function of
//! a JSON-serializable input.

pub mod analysis;
pub mod failure;
pub mod internal_forces;
pub mod stress;

// Re-export commonly used types
pub use analysis::{calculate, AnalysisInput, AnalysisResult, SectionSummary};
pub use failure::{FailureMode, FosReport, ModeResult};
pub use internal_forces::{Envelope, EnvelopeSample, ForceSample, InternalForceProfile, InternalForces};
pub use stress::{CompressedFibre, PlateCheck, PlateSupport};
