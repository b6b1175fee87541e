//! Error types for the Schemaver core library

use crate::version::VersionError;
use thiserror::Error;

/// Main error type for Schemaver core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The previous version string could not be incremented
    #[error("Cannot increment version '{version}': {source}")]
    Version {
        version: String,
        #[source]
        source: VersionError,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn version(version: impl Into<String>, source: VersionError) -> Self {
        Self::Version {
            version: version.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::version("x.y", VersionError::InvalidFormat("Expected format X.Y.Z, got: x.y".into()));
        assert_eq!(
            err.to_string(),
            "Cannot increment version 'x.y': Invalid version format: Expected format X.Y.Z, got: x.y"
        );
    }
}
