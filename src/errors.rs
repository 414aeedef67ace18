//! Error types for job scraping
//!
//! `DriverError` comes from the remote control surface, `ScrapeError` is what
//! the engine returns to its caller. `ExtractionFailure` and `AdvanceFailure`
//! are recovered locally and only ever reach the error log.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for engine operations
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Result type alias for remote control surface calls
pub type DriverResult<T> = Result<T, DriverError>;

/// Failure reported by a `PageDriver`
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DriverError {
    /// No element matched the locator
    #[error("no element matches '{locator}'")]
    NotFound { locator: String },

    /// Navigation did not complete
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// Any other browser command failure
    #[error("browser command failed: {0}")]
    Command(String),
}

impl DriverError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors returned by the engine to its caller
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A required element never appeared
    #[error("timed out after {elapsed:?} waiting for '{locator}'")]
    Timeout { locator: String, elapsed: Duration },

    /// The browser session is not signed in
    #[error("session is not signed in; sign in before scraping")]
    NotSignedIn,

    /// Search URL could not be built
    #[error("invalid search URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Remote control surface failure
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// Configuration is missing something the operation needs
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export failed
    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),
}

impl ScrapeError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Card sub-field read by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Title,
    Link,
    Company,
    Location,
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Title => "title",
            Self::Link => "link",
            Self::Company => "company",
            Self::Location => "location",
        })
    }
}

/// Why a single card did not produce a record
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionFailure {
    #[error("{field} element not found: {cause}")]
    MissingElement { field: CardField, cause: String },

    #[error("{field} element has no '{attribute}' attribute")]
    MissingAttribute {
        field: CardField,
        attribute: &'static str,
    },

    #[error("failed to read {field}: {cause}")]
    Read { field: CardField, cause: String },

    #[error("{field} is empty")]
    EmptyField { field: CardField },
}

impl ExtractionFailure {
    #[must_use]
    pub fn field(&self) -> CardField {
        match self {
            Self::MissingElement { field, .. }
            | Self::MissingAttribute { field, .. }
            | Self::Read { field, .. }
            | Self::EmptyField { field } => *field,
        }
    }
}

/// Why the next page could not be reached; always ends pagination normally
#[derive(Debug, Error)]
pub enum AdvanceFailure {
    #[error("next page control not found: {0}")]
    Missing(ScrapeError),

    #[error("next page control is disabled")]
    Disabled,

    #[error("failed to inspect next page control: {0}")]
    Inspect(DriverError),

    #[error("failed to click next page control: {0}")]
    Click(DriverError),
}
