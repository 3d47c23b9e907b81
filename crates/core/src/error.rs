//! Error types for template resolution.

use thiserror::Error;

/// Configuration errors raised while resolving a label-sheet template.
///
/// All variants are fatal to construction. The grid engine itself has no
/// failure modes of its own: grid exhaustion starts a new page, it never
/// errors, and canvas failures surface through the canvas's error type
/// without translation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The preset key does not exist in the format catalog.
    #[error("unknown label format: {key}")]
    UnknownFormat { key: String },

    /// A measurement unit outside the supported set ("mm", "in").
    #[error("unsupported measurement unit: {0}")]
    UnsupportedUnit(String),

    /// Resolved geometry violates a template invariant.
    #[error("invalid template: {0}")]
    InvalidTemplate(String),
}

/// Result type alias for template resolution.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_format() {
        let err = ConfigError::UnknownFormat {
            key: "NOPE9999".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("unknown label format"));
        assert!(msg.contains("NOPE9999"));
    }

    #[test]
    fn test_error_display_unsupported_unit() {
        let err = ConfigError::UnsupportedUnit("pt".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("unsupported measurement unit"));
        assert!(msg.contains("pt"));
    }

    #[test]
    fn test_error_display_invalid_template() {
        let err = ConfigError::InvalidTemplate("columns must be at least 1".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("columns must be at least 1"));
    }

    #[test]
    fn test_result_type_alias() {
        fn resolves() -> Result<u32> {
            Ok(7)
        }
        assert_eq!(resolves().unwrap(), 7);
    }
}
