//! # Error Types
//!
//! Structured error types for beam_core. Every failure names its kind and the
//! offending input so a caller (or a front-end) can report it without parsing
//! strings.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_mm: f64) -> CalcResult<()> {
//!     if span_mm <= 0.0 {
//!         return Err(CalcError::invalid_load(
//!             "span_mm",
//!             span_mm.to_string(),
//!             "Span must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_span(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for beam_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for analysis operations.
///
/// Validation is eager: geometry and loads are rejected when they are built,
/// so a run either produces a complete result or one of these.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Malformed or degenerate segment / glue data
    #[error("Invalid geometry in {item}: {reason}")]
    InvalidGeometry { item: String, reason: String },

    /// Malformed load case or non-positive span
    #[error("Invalid load for '{field}': {value} - {reason}")]
    InvalidLoad {
        field: String,
        value: String,
        reason: String,
    },

    /// No material (or no glue) at a queried height
    #[error("Degenerate section at y = {height_mm} mm: {reason}")]
    DegenerateSection { height_mm: f64, reason: String },

    /// A computed quantity came out NaN or infinite
    #[error("Numeric divergence computing {quantity}: {reason}")]
    NumericDivergence { quantity: String, reason: String },

    /// A settings or material value is invalid
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Material preset not found
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },
}

impl CalcError {
    /// Create an InvalidGeometry error
    pub fn invalid_geometry(item: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            item: item.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidLoad error
    pub fn invalid_load(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidLoad {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DegenerateSection error
    pub fn degenerate_section(height_mm: f64, reason: impl Into<String>) -> Self {
        CalcError::DegenerateSection {
            height_mm,
            reason: reason.into(),
        }
    }

    /// Create a NumericDivergence error
    pub fn numeric_divergence(quantity: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::NumericDivergence {
            quantity: quantity.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::InvalidLoad { .. } => "INVALID_LOAD",
            CalcError::DegenerateSection { .. } => "DEGENERATE_SECTION",
            CalcError::NumericDivergence { .. } => "NUMERIC_DIVERGENCE",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Reject NaN/infinite intermediates instead of letting them leak into results.
pub(crate) fn ensure_finite(quantity: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::numeric_divergence(quantity, format!("result is {}", value)))
    }
}
