//! Error types for catalog loading and lookups

use thiserror::Error;

/// Result type for placement operations
pub type Result<T> = std::result::Result<T, PlacementError>;

/// Core error type for placement operations
///
/// The selection engine itself never fails; these errors only come from the
/// edges (reading catalog snapshots, resolving ids, parsing user input).
#[derive(Error, Debug)]
pub enum PlacementError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two instances in one catalog share an id
    #[error("Duplicate instance id in catalog: {0}")]
    DuplicateInstance(String),

    /// Two regions in one catalog share an id
    #[error("Duplicate region id in catalog: {0}")]
    DuplicateRegion(String),

    /// Instance id not present in the catalog
    #[error("Instance {0} not found")]
    UnknownInstance(String),

    /// Region id not present in the catalog
    #[error("Region {0} not found")]
    UnknownRegion(String),

    /// A string could not be parsed into the expected enum
    #[error("Invalid {kind}: {value}")]
    InvalidValue { kind: &'static str, value: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PlacementError {
    /// Create an invalid value error
    pub fn invalid(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            kind,
            value: value.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PlacementError::invalid("region scope", "planetary");
        assert_eq!(err.to_string(), "Invalid region scope: planetary");

        let err = PlacementError::UnknownRegion("mars".to_string());
        assert_eq!(err.to_string(), "Region mars not found");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: PlacementError = parse.unwrap_err().into();
        assert!(matches!(err, PlacementError::Json(_)));
    }
}
