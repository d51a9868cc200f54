//! Result and error types for AppFW.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for AppFW operations
pub type AppResult<T> = Result<T, AppError>;

/// Errors that can occur in AppFW
#[derive(Debug, Error)]
pub enum AppError {
    /// A configuration file does not exist
    #[error("Config file '{}' not found", path.display())]
    ConfigNotFound {
        /// Path that was opened
        path: PathBuf,
    },

    /// A configuration file is not valid JSON for its schema
    #[error("Error parsing JSON in the file '{}': {source}", path.display())]
    ConfigParse {
        /// Path that was parsed
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Element name is absent from the locator file
    #[error("No locator found for '{name}' in '{source_name}'")]
    LocatorNotFound {
        /// Logical element name
        name: String,
        /// Locator file or store label
        source_name: String,
    },

    /// Element has no definition for the active platform
    #[error("No locator found for '{name}' on platform '{platform}'")]
    PlatformLocatorMissing {
        /// Logical element name
        name: String,
        /// Active platform
        platform: String,
    },

    /// Locator type string does not map to a supported strategy
    #[error("Invalid locator type: {locator_type}")]
    InvalidLocatorType {
        /// The rejected type string
        locator_type: String,
    },

    /// Test data entry is absent
    #[error("No test data found for test '{test_name}' in '{source_name}'")]
    TestDataNotFound {
        /// Requested test name
        test_name: String,
        /// Data file label
        source_name: String,
    },

    /// Test data entry lacks a string field a flow needs
    #[error("Test data field '{field}' is missing or not a string")]
    TestDataField {
        /// Field name
        field: String,
    },

    /// Element was not present before the timeout elapsed
    #[error("Element '{name}' not found after {ms}ms")]
    ElementNotFound {
        /// Logical element name
        name: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Element was not found by the swipe-retry loop
    #[error("Element '{name}' not found after {swipes} swipes")]
    ScrollExhausted {
        /// Logical element name
        name: String,
        /// Number of attempts performed
        swipes: u32,
    },

    /// Requested context is not offered by the session
    #[error("Context {name} not found. Available contexts: {available:?}")]
    ContextNotFound {
        /// Requested context
        name: String,
        /// Contexts reported by the driver
        available: Vec<String>,
    },

    /// The driver or automation server reported a failure
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Page source is not well-formed XML
    #[error("Error parsing screen source: {message}")]
    MalformedHierarchy {
        /// Parser message
        message: String,
    },

    /// A page-source file was expected but is missing
    #[error("The file {} does not exist. Please fetch the page source first.", path.display())]
    PageSourceMissing {
        /// Expected page-source path
        path: PathBuf,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// True for errors the swipe-retry loop may recover from
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::ElementNotFound { .. })
    }

    /// True for lookup errors (unknown name, type, test or context)
    #[must_use]
    pub const fn is_lookup(&self) -> bool {
        matches!(
            self,
            Self::LocatorNotFound { .. }
                | Self::PlatformLocatorMissing { .. }
                | Self::InvalidLocatorType { .. }
                | Self::TestDataNotFound { .. }
                | Self::TestDataField { .. }
                | Self::ContextNotFound { .. }
        )
    }

    /// True for missing or malformed configuration files
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::ConfigNotFound { .. } | Self::ConfigParse { .. })
    }
}
