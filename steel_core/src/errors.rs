//! # Error Types
//!
//! Structured error types for steel_core. Every failure is scoped to a single
//! evaluation: nothing here is retried and nothing is fatal to the process.
//!
//! A search that finds no adequate section is *not* an error; it returns an
//! empty list.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_mm: f64) -> CalcResult<()> {
//!     if span_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
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

/// Result type alias for steel_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for engine operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A caller-supplied value violates a precondition (non-positive length, negative load, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Designation not present in the catalog
    #[error("Section not found: {designation}")]
    SectionNotFound { designation: String },

    /// Reference data is malformed (unparseable value, negative property, zero resistance)
    #[error("Data integrity fault in {family} '{designation}': {property} - {reason}")]
    DataIntegrity {
        family: String,
        designation: String,
        property: String,
        reason: String,
    },

    /// The calculator does not cover this section family or class
    #[error("Unsupported section '{designation}' for {calculation}: {reason}")]
    UnsupportedSection {
        designation: String,
        calculation: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a SectionNotFound error
    pub fn section_not_found(designation: impl Into<String>) -> Self {
        CalcError::SectionNotFound {
            designation: designation.into(),
        }
    }

    /// Create a DataIntegrity error
    pub fn data_integrity(
        family: impl Into<String>,
        designation: impl Into<String>,
        property: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::DataIntegrity {
            family: family.into(),
            designation: designation.into(),
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedSection error
    pub fn unsupported_section(
        designation: impl Into<String>,
        calculation: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::UnsupportedSection {
            designation: designation.into(),
            calculation: calculation.into(),
            reason: reason.into(),
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

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for faults in the reference data rather than in the request
    pub fn is_data_fault(&self) -> bool {
        matches!(self, CalcError::DataIntegrity { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::SectionNotFound { .. } => "SECTION_NOT_FOUND",
            CalcError::DataIntegrity { .. } => "DATA_INTEGRITY",
            CalcError::UnsupportedSection { .. } => "UNSUPPORTED_SECTION",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("span_mm", "-5.0", "Span must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
        assert!(json.contains("\"type\":\"InvalidInput\""));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::section_not_found("W1x1").error_code(), "SECTION_NOT_FOUND");
        assert_eq!(
            CalcError::unsupported_section("L76x76x6.4", "moment", "angles").error_code(),
            "UNSUPPORTED_SECTION"
        );
    }

    #[test]
    fn test_data_fault_flag() {
        let fault = CalcError::data_integrity("W", "W310x39", "Ix", "not a number");
        assert!(fault.is_data_fault());
        assert!(!CalcError::missing_field("grade").is_data_fault());
        assert!(fault.to_string().contains("W310x39"));
    }
}
