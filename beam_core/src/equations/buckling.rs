//! # Thin-Plate Buckling
//!
//! Critical stresses for flat plates loaded in their own plane.
//!
//! ## Notation
//!
//! - `k` = Buckling coefficient for the edge-support condition
//! - `E` = Elastic modulus, `ν` = Poisson's ratio
//! - `t` = Plate thickness
//! - `b` = Unsupported plate width (loaded edges excluded)
//! - `h` = Web depth, `a` = spacing between transverse stiffeners
//!
//! ## References
//!
//! - Timoshenko & Gere, Theory of Elastic Stability, §9.2 and §9.7

use std::f64::consts::PI;

/// π²E/(12(1-ν²)), the factor shared by every plate formula below
#[inline]
pub fn plate_rigidity_factor(e: f64, nu: f64) -> f64 {
    PI * PI * e / (12.0 * (1.0 - nu * nu))
}

/// Critical compressive stress of a plate
///
/// # Formula
/// σ_cr = k·π²E/(12(1-ν²))·(t/b)²
///
/// # Example
/// ```rust
/// use beam_core::equations::buckling::plate_buckling_stress;
///
/// // 1.27 mm plate, 75 mm between webs, both edges held (k = 4)
/// let sigma = plate_buckling_stress(4.0, 4000.0, 0.2, 1.27, 75.0);
/// assert!((sigma - 3.93).abs() < 0.01);
/// ```
#[inline]
pub fn plate_buckling_stress(k: f64, e: f64, nu: f64, t: f64, b: f64) -> f64 {
    k * plate_rigidity_factor(e, nu) * (t / b).powi(2)
}

/// Critical shear stress of a web panel
///
/// # Formula
/// τ_cr = k·π²E/(12(1-ν²))·((t/h)² + (t/a)²)
///
/// Without transverse stiffeners (`a = None`) only the depth term remains.
#[inline]
pub fn web_shear_buckling_stress(k: f64, e: f64, nu: f64, t: f64, h: f64, a: Option<f64>) -> f64 {
    let stiffener_term = a.map(|a| (t / a).powi(2)).unwrap_or(0.0);
    k * plate_rigidity_factor(e, nu) * ((t / h).powi(2) + stiffener_term)
}
