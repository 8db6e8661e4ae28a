/// Core error types for Cadence
use thiserror::Error;

/// Result type alias using `CadenceError`
pub type Result<T> = std::result::Result<T, CadenceError>;

/// Core error type for Cadence
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CadenceError {
    /// Rejected user input (for example an empty playlist name)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catalog could not be built
    #[error("Catalog error: {0}")]
    Catalog(String),
}

impl CadenceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_message() {
        let err = CadenceError::catalog("duplicate song id: 3");
        assert_eq!(err.to_string(), "Catalog error: duplicate song id: 3");
    }

    #[test]
    fn validation_message() {
        let err = CadenceError::validation("Playlist name must not be empty");
        assert_eq!(
            err.to_string(),
            "Validation error: Playlist name must not be empty"
        );
    }
}
