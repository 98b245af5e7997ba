//! Neofield: near-Earth object records for NASA's NEO and close-approach datasets
//!
//! This crate models near-Earth objects (NEOs) and their close approaches to
//! Earth. Records are built from the loosely-typed values a dataset loader
//! produces, linked to each other once, and then rendered or serialized for
//! export.

use thiserror::Error;

pub mod linking;
pub mod models;
pub mod time;

// Re-export commonly used types
pub use linking::{link, LinkedCatalog};
pub use models::{
    ApproachInfo, ApproachRecord, CloseApproach, FieldValue, NearEarthObject, NeoInfo, NeoRecord,
};
pub use time::ApproachTime;

/// Main error type for the neofield library
#[derive(Debug, Error)]
pub enum NeoError {
    #[error("Cannot convert {field} value {value} to a number")]
    InvalidNumber {
        /// Name of the input field being coerced
        field: &'static str,
        /// Rendering of the offending value, e.g. `"abc"` or `null`
        value: String,
    },

    /// Holds the rendered input value, e.g. `"maybe"` or `true`
    #[error("Unrecognized hazard flag: {0}")]
    InvalidHazardFlag(String),

    #[error("Cannot parse approach time {input:?}: {source}")]
    TimeParse {
        /// The raw text that failed to parse
        input: String,
        /// The last parser error encountered
        source: chrono::ParseError,
    },

    #[error("Julian date {0} is outside the representable range")]
    JulianDateOutOfRange(f64),

    #[error("Close approach of {designation:?} is not linked to a near-Earth object")]
    NotLinked {
        /// Designation the approach was recorded against
        designation: String,
    },
}

/// Result type for neofield operations
pub type Result<T> = std::result::Result<T, NeoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = NeoError::InvalidHazardFlag("\"maybe\"".to_string());
        assert_eq!(err.to_string(), "Unrecognized hazard flag: \"maybe\"");

        let err = NeoError::NotLinked {
            designation: "433".to_string(),
        };
        assert!(err.to_string().contains("\"433\""));

        let err = NeoError::InvalidNumber {
            field: "diameter",
            value: "\"abc\"".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot convert diameter value \"abc\" to a number"
        );
    }
}
