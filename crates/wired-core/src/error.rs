//! Error types for mod management.

use thiserror::Error;

/// Result type for mod operations.
pub type Result<T> = std::result::Result<T, ModError>;

/// Errors produced by the mod contract and registry.
#[derive(Debug, Error)]
pub enum ModError {
    /// No registered mod matches the requested name.
    #[error("mod not found: {0}")]
    NotFound(String),

    /// A mod with the same name is already registered.
    #[error("mod already registered: {0}")]
    AlreadyRegistered(String),

    /// The payload or its content type does not match what the mod accepts.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Persistence or directory creation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration payload could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModError {
    /// Validation error for a content type the mod does not accept.
    pub fn unsupported_content_type(got: &str, expected: &str) -> Self {
        Self::Validation(format!(
            "unsupported content type {got:?}, expected {expected:?}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_includes_name() {
        let err = ModError::NotFound("Camera".to_string());
        assert_eq!(err.to_string(), "mod not found: Camera");
    }

    #[test]
    fn unsupported_content_type_is_validation() {
        let err = ModError::unsupported_content_type("text/plain", "application/json");
        assert!(matches!(err, ModError::Validation(_)));
        assert!(err.to_string().contains("text/plain"));
    }
}
