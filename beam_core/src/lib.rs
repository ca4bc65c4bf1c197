//! # beam_core - Built-up Girder Analysis Engine
//!
//! `beam_core` computes the structural response and failure margins of a
//! simply-supported girder glued together from thin rectangular plates. All
//! inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: Inputs implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Eager Validation**: A run returns a complete result or an error
//!
//! ## Quick Start
//!
//! ```rust
//! use beam_core::calculations::{calculate, AnalysisInput};
//! use beam_core::loads::{AxlePattern, LoadCase};
//! use beam_core::materials::MaterialLimits;
//! use beam_core::section::{CrossSectionBuilder, GlueJoint, Segment};
//! use beam_core::settings::AnalysisSettings;
//!
//! // Two 100 x 10 flanges on a 10 x 80 web
//! let section = CrossSectionBuilder::new()
//!     .with_segment(Segment::new(1, 100.0, 10.0, 0.0))
//!     .with_segment(Segment::new(2, 10.0, 80.0, 10.0))
//!     .with_segment(Segment::new(3, 100.0, 10.0, 90.0))
//!     .with_glue_joint(GlueJoint::new(1, 2, 10.0))
//!     .with_glue_joint(GlueJoint::new(2, 3, 10.0));
//!
//! let input = AnalysisInput {
//!     label: "I-girder".to_string(),
//!     span_mm: 1200.0,
//!     section,
//!     load_case: LoadCase::Moving(AxlePattern::six_wheel_train(400.0)),
//!     material: MaterialLimits::matboard(),
//!     plates: vec![],
//!     settings: AnalysisSettings { step_mm: 10.0, sweep_step_mm: 10.0, ..Default::default() },
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("{}: FOS {:.2}", result.fos.governing.mode, result.governing_fos());
//! ```
//!
//! ## Modules
//!
//! - [`section`] - Segments, glue joints and reduced section properties
//! - [`loads`] - Stationary loads and moving axle patterns
//! - [`calculations`] - Internal forces, stresses and factors of safety
//! - [`equations`] - Closed-form mechanics formulas
//! - [`materials`] - Allowable stresses and named presets
//! - [`settings`] - Discretization settings
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod loads;
pub mod materials;
pub mod section;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, AnalysisInput, AnalysisResult};
pub use errors::{CalcError, CalcResult};
pub use loads::{AxlePattern, LoadCase, StationaryLoads};
pub use materials::MaterialLimits;
pub use section::{CrossSection, CrossSectionBuilder, GlueJoint, Segment};
pub use settings::AnalysisSettings;
