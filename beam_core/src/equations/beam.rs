//! # Simply-Supported Statics
//!
//! Reaction formulas for a beam with a pin at the left support (x = 0) and a
//! roller at the right support (x = L). All reactions come from ΣF = 0 and
//! ΣM = 0 taken about the left support.
//!
//! ## Notation
//!
//! - `L` = Span length
//! - `a` = Load position from left support
//! - `P` = Point load magnitude
//! - `w` = Uniform load intensity (force per unit length)
//! - `R1` = Left reaction, `R2` = Right reaction

/// Reactions from a resultant force and its moment about the left support.
///
/// # Formulas
/// - R2 = ΣM_left / L
/// - R1 = ΣF - R2
///
/// Every other reaction helper reduces to this one so superposition is exact.
#[inline]
pub fn moment_reactions(total_force: f64, moment_about_left: f64, l: f64) -> (f64, f64) {
    let r2 = moment_about_left / l;
    (total_force - r2, r2)
}

/// Reactions for point load P at position a on span L
///
/// ```text
///        P
///        ↓
///    ────┬────────────
///    △   a            △
///   R1  ←───────L────→ R2
/// ```
///
/// # Formulas
/// - R1 = P(L-a)/L
/// - R2 = Pa/L
#[inline]
pub fn point_load_reactions(p: f64, a: f64, l: f64) -> (f64, f64) {
    moment_reactions(p, p * a, l)
}

/// Reactions for uniform load w between positions a and b
///
/// # Formulas
/// - W = w(b-a), acting at c = (a+b)/2
/// - R2 = Wc/L
/// - R1 = W - R2
#[inline]
pub fn partial_uniform_reactions(w: f64, a: f64, b: f64, l: f64) -> (f64, f64) {
    let total = w * (b - a);
    let centroid = (a + b) / 2.0;
    moment_reactions(total, total * centroid, l)
}
