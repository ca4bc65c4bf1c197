//! # Structural Mechanics Equations
//!
//! Closed-form formulas used by the analysis pipeline. Keeping them in one
//! place lets each formula be checked against a textbook independently of
//! the code that strings them together.
//!
//! ## Modules
//!
//! - [`beam`] - Simply-supported statics (reactions)
//! - [`section`] - Rectangle properties and the stress formulas
//! - [`buckling`] - Thin-plate local buckling
//!
//! ## Sign Conventions
//!
//! - **Loads**: Positive downward (gravity direction)
//! - **Reactions**: Positive upward
//! - **Moment**: Positive sags the beam (compression on the top fibre)
//! - **Shear**: Positive when the left side moves up relative to the right
//! - **Flexural stress**: Positive in compression
//!
//! ## References
//!
//! - Gere & Goodno, Mechanics of Materials, Ch. 5
//! - Timoshenko & Gere, Theory of Elastic Stability, Ch. 9

pub mod beam;
pub mod buckling;
pub mod section;

pub use beam::{moment_reactions, partial_uniform_reactions, point_load_reactions};

pub use buckling::{plate_buckling_stress, plate_rigidity_factor, web_shear_buckling_stress};

pub use section::{
    flexural_stress,
    jourawski_shear_stress,
    parallel_axis_term,
    rectangular_area,
    rectangular_moment_of_inertia,
    section_modulus,
};
