//! Result and error types for the probe.

use thiserror::Error;

/// Result type for probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while driving or verifying a page
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Page-level error (script evaluation, page creation, closing)
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Input simulation error (key dispatch)
    #[error("Input simulation failed: {message}")]
    Input {
        /// Error message
        message: String,
    },

    /// No element matched the locator at the time of the call
    #[error("No element matches {locator}")]
    ElementNotFound {
        /// Rendered locator
        locator: String,
    },

    /// A wait condition never became true within its budget
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// Budget in milliseconds
        ms: u64,
        /// Description of the condition
        waited_for: String,
    },

    /// The page rendered fewer editable regions than the UI contract requires
    #[error("Structural mismatch for {selector}: expected at least {expected} regions, found {found}")]
    StructuralMismatch {
        /// Selector used to count regions
        selector: String,
        /// Minimum region count required
        expected: usize,
        /// Region count observed when the wait gave up
        found: usize,
    },

    /// Extracted output did not satisfy the scenario's predicate
    #[error("[{scenario}] input \"{input}\": expected output to {predicate}, got \"{actual}\"")]
    AssertionFailure {
        /// Scenario identifier
        scenario: String,
        /// Literal input used
        input: String,
        /// Description of the failed predicate
        predicate: String,
        /// Output that was extracted
        actual: String,
    },

    /// Invalid regular expression in a `matches` predicate
    #[error("Invalid pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// Source pattern
        pattern: String,
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ProbeError {
    /// Create a page error
    #[must_use]
    pub fn page(message: impl Into<String>) -> Self {
        Self::Page {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error is a predicate failure rather than a harness or page fault
    #[must_use]
    pub const fn is_assertion(&self) -> bool {
        matches!(self, Self::AssertionFailure { .. })
    }

    /// Short machine-readable kind, used in reports
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BrowserLaunch { .. } => "browser_launch",
            Self::Navigation { .. } => "navigation",
            Self::Page { .. } => "page",
            Self::Input { .. } => "input",
            Self::ElementNotFound { .. } => "element_not_found",
            Self::Timeout { .. } => "timeout",
            Self::StructuralMismatch { .. } => "structural_mismatch",
            Self::AssertionFailure { .. } => "assertion_failure",
            Self::InvalidPattern { .. } => "invalid_pattern",
            Self::Config { .. } => "config",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Yaml(_) => "yaml",
        }
    }
}
