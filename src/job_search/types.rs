//! Data structures for job search runs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ExtractionFailure;

/// One job listing read from a result card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Link target of the card's title element
    pub source_url: String,
}

/// Result of extracting one card
pub type CardOutcome = Result<JobRecord, ExtractionFailure>;

/// Where a card sits, for error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPosition<'a> {
    /// `index` is 0-based within the page, `page` is 1-based
    Results { page: usize, index: usize },
    Recommended { area: &'a str, index: usize },
}

impl fmt::Display for CardPosition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Results { page, index } => write!(f, "page {page}, card {}", index + 1),
            Self::Recommended { area, index } => write!(f, "area '{area}', card {}", index + 1),
        }
    }
}

/// Pagination controller states
///
/// `Init -> LoadingContainer -> ExtractingPage -> Advancing ->
/// (LoadingContainer | Done)`, with `Failed` reachable from `LoadingContainer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageState {
    Init,
    LoadingContainer,
    ExtractingPage,
    Advancing,
    Done,
    Failed,
}

impl PageState {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// Mutable state of one search invocation
#[derive(Debug, Clone)]
pub struct SearchSession {
    pub(crate) search_term: String,
    pub(crate) location: Option<String>,
    pub(crate) records: Vec<JobRecord>,
    /// Cards that produced no record
    pub(crate) error_count: usize,
    pub(crate) pages_visited: usize,
    pub(crate) state: PageState,
}

impl SearchSession {
    #[must_use]
    pub fn new(search_term: impl Into<String>, location: Option<String>) -> Self {
        Self {
            search_term: search_term.into(),
            location,
            records: Vec::new(),
            error_count: 0,
            pages_visited: 0,
            state: PageState::Init,
        }
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Records in page-visit order, DOM order within a page
    #[must_use]
    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    #[must_use]
    pub fn pages_visited(&self) -> usize {
        self.pages_visited
    }

    #[must_use]
    pub fn state(&self) -> PageState {
        self.state
    }
}

/// What a finished search returns to its caller
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub search_term: String,
    pub location: Option<String>,
    pub records: Vec<JobRecord>,
    pub pages_visited: usize,
    /// Cards that produced no record
    pub error_count: usize,
    /// Error log entries written during this run. Includes the card failures
    /// plus advance failures and container timeouts.
    pub logged_errors: usize,
    pub terminal: PageState,
}

impl RunSummary {
    pub(crate) fn from_session(session: SearchSession, logged_errors: usize) -> Self {
        Self {
            search_term: session.search_term,
            location: session.location,
            records: session.records,
            pages_visited: session.pages_visited,
            error_count: session.error_count,
            logged_errors,
            terminal: session.state,
        }
    }
}

/// Records from one named area of the recommended-jobs page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaJobs {
    pub name: String,
    pub records: Vec<JobRecord>,
    pub failed_cards: usize,
}

/// Area name to records, in page order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecommendedJobs {
    pub areas: Vec<AreaJobs>,
}

impl RecommendedJobs {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AreaJobs> {
        self.areas.iter().find(|a| a.name == name)
    }

    #[must_use]
    pub fn total_records(&self) -> usize {
        self.areas.iter().map(|a| a.records.len()).sum()
    }
}
