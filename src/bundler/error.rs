//! Error types for bundle lowering.
//!
//! Every failure here is a permanent defect in the resolved input, never a
//! transient condition, so nothing in this crate retries. A failure aborts
//! the lowering of the target it is attributed to and nothing else.

use crate::bundler::substitution::TemplateError;
use std::fmt::Display;
use thiserror::Error;

/// Result type alias for lowering operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Lowering error.
#[derive(Debug, Error)]
pub enum Error {
    /// A substitution pattern could not be compiled.
    #[error("{target}: {source}")]
    Template {
        /// User-visible label of the target the template belongs to.
        target: String,
        /// The underlying pattern error, carrying the offending template.
        #[source]
        source: TemplateError,
    },

    /// The bundle description is inconsistent.
    #[error("{target}: invalid bundle configuration: {reason}")]
    Configuration {
        /// User-visible label of the misconfigured target.
        target: String,
        /// What is wrong with it.
        reason: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Creates a template error attributed to `target`.
    pub fn template(target: impl Display, source: TemplateError) -> Self {
        Self::Template {
            target: target.to_string(),
            source,
        }
    }

    /// Creates a configuration error attributed to `target`.
    pub fn configuration(target: impl Display, reason: impl Into<String>) -> Self {
        Self::Configuration {
            target: target.to_string(),
            reason: reason.into(),
        }
    }

    /// Label of the target the error is attributed to, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Template { target, .. } | Self::Configuration { target, .. } => Some(target),
            Self::Io(_) | Self::GenericError(_) => None,
        }
    }
}

/// Attaches a message to a missing value or a failed result.
pub trait Context<T> {
    /// Converts `self` into a [`Result`], using `msg` as the error message.
    fn context<C: Display>(self, msg: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, msg: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, msg: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{msg}: {e}")))
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
