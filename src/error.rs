//! Error handling for the embed harness
//!
//! This module defines custom error types and a Result alias for use
//! throughout the crate. The configuration state machine itself never
//! fails; errors come from the ambient layers (config files, operator
//! commands, logging setup) and from collaborator requests, which are
//! logged rather than propagated.

use thiserror::Error;

/// Main error type for embed harness operations
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to operator command parsing
    #[error("Command error: {0}")]
    Command(String),

    /// Errors reported by the embedding collaborator
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<HarnessError>,
    },
}

impl HarnessError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        HarnessError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for embed harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
