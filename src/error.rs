//! Error types for the command-line driver.
//!
//! Library failures are [`crate::bundler::Error`]; this module wraps them
//! together with argument, manifest and I/O failures of the binary.

use thiserror::Error;

/// Result type alias for driver operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all driver operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Lowering errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// The manifest could not be read or is malformed
    #[error("Invalid manifest {path}: {reason}")]
    InvalidManifest {
        /// Manifest path
        path: String,
        /// Reason for the error
        reason: String,
    },

    /// One or more targets failed to lower
    #[error("{failed} of {total} targets failed to lower")]
    LoweringFailed {
        /// Number of failed targets
        failed: usize,
        /// Number of targets attempted
        total: usize,
    },
}

impl BundlerError {
    /// Whether the failure is attributed to a single target, so that other
    /// targets of the same run are unaffected.
    pub fn is_target_local(&self) -> bool {
        matches!(self, Self::Bundler(e) if e.target().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_errors_are_local() {
        let err: BundlerError = crate::bundler::Error::configuration("//baz:bar", "x").into();
        assert!(err.is_target_local());

        let err: BundlerError = CliError::InvalidArguments {
            reason: "x".into(),
        }
        .into();
        assert!(!err.is_target_local());
    }

    #[test]
    fn test_lowering_failed_message() {
        let err = CliError::LoweringFailed { failed: 1, total: 3 };
        assert_eq!(err.to_string(), "1 of 3 targets failed to lower");
    }
}
