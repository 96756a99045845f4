//! Error types for NeoDB.
//!
//! All errors are strongly typed using thiserror. The taxonomy mirrors the
//! load pipeline's policy: structural errors (a source file violating its
//! documented schema) are fatal and abort the load, while known domain gaps
//! (a blank name, an unknown diameter, an approach whose designation matches
//! no loaded NEO) are encoded in the data model and never surface here.

use thiserror::Error;

/// Structural errors raised during record normalization.
///
/// These indicate that a required field is missing or that a field the
/// source documents as always-valid failed to parse. There is no
/// partial-record recovery: a single structural error aborts the load.
#[derive(Debug, Error)]
pub enum StructuralError {
    #[error("Required field '{field}' is missing")]
    MissingField {
        field: String,
    },

    #[error("Unrecognized calendar date '{value}'")]
    InvalidCalendarDate {
        value: String,
    },

    #[error("Field '{field}' has unparsable numeric value '{value}'")]
    InvalidNumber {
        field: String,
        value: String,
    },
}

/// Errors raised while reading the raw source files.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data row has {actual} values but the field list names {expected}")]
    MalformedTable {
        expected: usize,
        actual: usize,
    },
}

/// Top-level error type for NeoDB.
///
/// This enum encompasses all possible errors that can occur when loading
/// and linking the two source datasets.
#[derive(Debug, Error)]
pub enum NeoError {
    #[error("Structural error: {0}")]
    Structural(#[from] StructuralError),

    #[error("Extract error: {0}")]
    Extract(#[from] ExtractError),
}

impl NeoError {
    /// Returns true if this is a structural (schema-violation) error.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_))
    }

    /// Returns true if this error came from reading a source file.
    #[must_use]
    pub const fn is_extract(&self) -> bool {
        matches!(self, Self::Extract(_))
    }
}

/// Result type alias for NeoDB operations.
pub type NeoResult<T> = Result<T, NeoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_error_missing_field() {
        let err = StructuralError::MissingField {
            field: "pdes".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("pdes"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_structural_error_invalid_number() {
        let err = StructuralError::InvalidNumber {
            field: "dist".to_string(),
            value: "not-a-distance".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("dist"));
        assert!(msg.contains("not-a-distance"));
    }

    #[test]
    fn test_structural_error_invalid_date() {
        let err = StructuralError::InvalidCalendarDate {
            value: "whenever".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("whenever"));
    }

    #[test]
    fn test_neo_error_from_structural() {
        let err: NeoError = StructuralError::MissingField {
            field: "des".to_string(),
        }
        .into();
        assert!(err.is_structural());
        assert!(!err.is_extract());
    }

    #[test]
    fn test_neo_error_from_extract() {
        let err: NeoError = ExtractError::MalformedTable {
            expected: 12,
            actual: 3,
        }
        .into();
        assert!(err.is_extract());
        let msg = format!("{err}");
        assert!(msg.contains("12"));
        assert!(msg.contains('3'));
    }
}
