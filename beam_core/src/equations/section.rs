//! # Cross-Section Formulas
//!
//! Rectangle properties used to reduce a built-up section, and the two beam
//! stress formulas that consume the reduced properties.
//!
//! ## Notation
//!
//! - `A` = Area
//! - `I` = Second moment of area about the centroidal axis
//! - `Q` = First moment of area of the material beyond a cut
//! - `ȳ` = Centroid height, measured from the bottom of the section
//! - `b` = Width, `h` = height (thickness) of a rectangle
//!
//! ## References
//!
//! - Gere & Goodno, Mechanics of Materials, §5.5 (flexure), §5.8 (shear)

// =============================================================================
// RECTANGLE PROPERTIES
// =============================================================================

/// Area of a rectangle
///
/// # Example
/// ```rust
/// use beam_core::equations::section::rectangular_area;
///
/// assert_eq!(rectangular_area(80.0, 100.0), 8000.0);
/// ```
#[inline]
pub fn rectangular_area(b: f64, h: f64) -> f64 {
    b * h
}

/// Second moment of area of a rectangle about its own centroid
///
/// ```text
///     ┌─────────┐
///   h │ ════════│ ← local axis at h/2
///     └─────────┘
///          b
/// ```
///
/// # Formula
/// I = bh³/12
///
/// # Example
/// ```rust
/// use beam_core::equations::section::rectangular_moment_of_inertia;
///
/// // 80 x 100 rectangle
/// let i = rectangular_moment_of_inertia(80.0, 100.0);
/// assert!((i - 6_666_666.667).abs() < 0.01);
/// ```
#[inline]
pub fn rectangular_moment_of_inertia(b: f64, h: f64) -> f64 {
    b * h.powi(3) / 12.0
}

/// Parallel-axis transfer term A·d²
///
/// Added to a part's local I to move it onto the section centroid.
#[inline]
pub fn parallel_axis_term(area: f64, offset: f64) -> f64 {
    area * offset * offset
}

/// Elastic section modulus S = I / c for a fibre at distance c
#[inline]
pub fn section_modulus(i: f64, c: f64) -> f64 {
    i / c
}

// =============================================================================
// STRESS FORMULAS
// =============================================================================

/// Navier flexural stress
///
/// # Formula
/// σ = M·(y - ȳ)/I
///
/// With positive (sagging) moment the top fibre has y > ȳ and the result is
/// positive, so the returned stress is positive in compression.
#[inline]
pub fn flexural_stress(m: f64, y: f64, centroid: f64, i: f64) -> f64 {
    m * (y - centroid) / i
}

/// Jourawski shear stress
///
/// # Formula
/// τ = V·Q/(I·b)
///
/// `b` is the width resisting the horizontal shear flow at the cut: the
/// material width for web shear, or the glue thickness for a glued joint.
///
/// # Example
/// ```rust
/// use beam_core::equations::section::jourawski_shear_stress;
///
/// let tau = jourawski_shear_stress(2000.0, 40_000.0, 1.5e6, 5.0);
/// assert!((tau - 10.6667).abs() < 1e-3);
/// ```
#[inline]
pub fn jourawski_shear_stress(v: f64, q: f64, i: f64, b: f64) -> f64 {
    v * q / (i * b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_rectangle_properties() {
        assert!(approx_eq(rectangular_area(80.0, 100.0), 8000.0));
        assert!(approx_eq(rectangular_moment_of_inertia(80.0, 100.0), 80.0 * 1.0e6 / 12.0));
    }

    #[test]
    fn test_parallel_axis() {
        // 80x10 plate whose centre sits 45 mm from the axis
        assert!(approx_eq(parallel_axis_term(800.0, 45.0), 1_620_000.0));
        assert!(approx_eq(parallel_axis_term(800.0, -45.0), 1_620_000.0));
    }

    #[test]
    fn test_flexural_stress_sign() {
        // Sagging moment: top in compression (+), bottom in tension (-)
        let top = flexural_stress(300_000.0, 100.0, 50.0, 6_666_666.667);
        let bottom = flexural_stress(300_000.0, 0.0, 50.0, 6_666_666.667);
        assert!(top > 0.0);
        assert!(bottom < 0.0);
        assert!(approx_eq(top, -bottom));
        assert_eq!(flexural_stress(300_000.0, 50.0, 50.0, 6_666_666.667), 0.0);
    }

    #[test]
    fn test_rectangle_shear_matches_average_factor() {
        // Solid rectangle: τ_max = 1.5 V/A
        let (b, h, v) = (80.0, 100.0, 500.0);
        let i = rectangular_moment_of_inertia(b, h);
        let q = b * (h / 2.0) * (h / 4.0);
        let tau = jourawski_shear_stress(v, q, i, b);
        assert!(approx_eq(tau, 1.5 * v / (b * h)));
    }

    #[test]
    fn test_section_modulus() {
        let i = rectangular_moment_of_inertia(80.0, 100.0);
        assert!(approx_eq(section_modulus(i, 50.0), 80.0 * 100.0 * 100.0 / 6.0));
    }
}
