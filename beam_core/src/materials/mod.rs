//! # Material Limits
//!
//! Allowable stresses and elastic constants for the sheet material a girder is
//! built from. Every failure-mode capacity is read from a [`MaterialLimits`].
//!
//! ## Example
//!
//! ```rust
//! use beam_core::materials::MaterialLimits;
//!
//! let board = MaterialLimits::preset("matboard").unwrap();
//! assert_eq!(board.compressive_strength_mpa, 6.0);
//!
//! assert!(MaterialLimits::preset("balsa").is_err());
//! ```
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "tensile_strength_mpa": 30.0,
//!   "compressive_strength_mpa": 6.0,
//!   "shear_strength_mpa": 4.0,
//!   "glue_shear_strength_mpa": 2.0,
//!   "elastic_modulus_mpa": 4000.0,
//!   "poisson_ratio": 0.2
//! }
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Allowable stresses (MPa) and elastic constants of a sheet material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialLimits {
    /// Allowable flexural tension
    pub tensile_strength_mpa: f64,
    /// Allowable flexural compression
    pub compressive_strength_mpa: f64,
    /// Allowable shear in the material
    pub shear_strength_mpa: f64,
    /// Allowable shear in glued joints
    pub glue_shear_strength_mpa: f64,
    /// Young's modulus E
    pub elastic_modulus_mpa: f64,
    /// Poisson's ratio ν
    pub poisson_ratio: f64,
}

static PRESETS: Lazy<HashMap<&'static str, MaterialLimits>> = Lazy::new(|| {
    let mut presets = HashMap::new();
    presets.insert("matboard", MaterialLimits::matboard());
    presets
});

impl MaterialLimits {
    /// 1.27 mm matboard with contact-cement joints
    pub fn matboard() -> Self {
        MaterialLimits {
            tensile_strength_mpa: 30.0,
            compressive_strength_mpa: 6.0,
            shear_strength_mpa: 4.0,
            glue_shear_strength_mpa: 2.0,
            elastic_modulus_mpa: 4000.0,
            poisson_ratio: 0.2,
        }
    }

    /// Look up a named material (case-insensitive)
    pub fn preset(name: &str) -> CalcResult<Self> {
        PRESETS
            .get(name.trim().to_lowercase().as_str())
            .copied()
            .ok_or_else(|| CalcError::material_not_found(name))
    }

    /// Names of every built-in material, sorted
    pub fn preset_names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = PRESETS.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn validate(&self) -> CalcResult<()> {
        let strengths = [
            ("tensile_strength_mpa", self.tensile_strength_mpa),
            ("compressive_strength_mpa", self.compressive_strength_mpa),
            ("shear_strength_mpa", self.shear_strength_mpa),
            ("glue_shear_strength_mpa", self.glue_shear_strength_mpa),
            ("elastic_modulus_mpa", self.elastic_modulus_mpa),
        ];
        for (field, value) in strengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }
        // Plate rigidity divides by 1 - ν²
        if !(self.poisson_ratio.is_finite() && (0.0..0.5).contains(&self.poisson_ratio)) {
            return Err(CalcError::invalid_input(
                "poisson_ratio",
                self.poisson_ratio.to_string(),
                "Must be in [0, 0.5)",
            ));
        }
        Ok(())
    }
}

impl Default for MaterialLimits {
    fn default() -> Self {
        MaterialLimits::matboard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matboard_preset() {
        let board = MaterialLimits::preset("matboard").unwrap();
        assert_eq!(board, MaterialLimits::matboard());
        assert_eq!(board.tensile_strength_mpa, 30.0);
        assert_eq!(board.glue_shear_strength_mpa, 2.0);
        assert_eq!(board.elastic_modulus_mpa, 4000.0);
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_preset_lookup_is_case_insensitive() {
        assert!(MaterialLimits::preset(" MatBoard ").is_ok());
    }

    #[test]
    fn test_unknown_preset() {
        let err = MaterialLimits::preset("balsa").unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
        assert!(err.to_string().contains("balsa"));
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(MaterialLimits::preset_names(), vec!["matboard"]);
    }

    #[test]
    fn test_validation() {
        let mut m = MaterialLimits::matboard();
        m.shear_strength_mpa = 0.0;
        assert_eq!(m.validate().unwrap_err().error_code(), "INVALID_INPUT");

        let mut m = MaterialLimits::matboard();
        m.poisson_ratio = 0.5;
        assert!(m.validate().is_err());

        let mut m = MaterialLimits::matboard();
        m.elastic_modulus_mpa = f64::NAN;
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&MaterialLimits::matboard()).unwrap();
        assert!(json.contains("glue_shear_strength_mpa"));
        let back: MaterialLimits = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MaterialLimits::matboard());
    }
}
