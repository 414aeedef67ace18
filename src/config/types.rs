//! Core configuration types for job scraping
//!
//! This module contains the `ScrapeConfig` struct that carries every tunable
//! the engine uses: locators, wait timings, settle delay, scroll stops and the
//! page limit.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::locators::LocatorSet;
use crate::utils::{
    DEFAULT_ELEMENT_TIMEOUT_MS, DEFAULT_FIELD_TIMEOUT_MS, DEFAULT_MAX_PAGES,
    DEFAULT_MAX_POLL_INTERVAL_MS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SCROLL_FRACTIONS,
    DEFAULT_SETTLE_DELAY_MS, SIGNED_IN_TIMEOUT_MS,
};

/// Main configuration struct for a scraping run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Site root for job pages, e.g. `https://www.example.com/jobs/`.
    ///
    /// **INVARIANT:** Always has a scheme and a trailing `/` once built or
    /// validated, so joining `search` appends a segment.
    pub(crate) base_url: String,

    pub(crate) locators: LocatorSet,

    /// Timeout for required elements (results container, next control)
    ///
    /// Default: 10 seconds
    pub(crate) element_timeout_ms: u64,

    /// Timeout for the title sub-element inside an already rendered card
    ///
    /// Default: 2 seconds
    pub(crate) field_timeout_ms: u64,

    /// Timeout for the signed-in marker check
    ///
    /// Default: 5 seconds
    pub(crate) signed_in_timeout_ms: u64,

    /// First poll interval for element waits; doubles after every miss
    pub(crate) poll_interval_ms: u64,

    /// Cap for the poll interval
    pub(crate) max_poll_interval_ms: u64,

    /// Pause after each scroll/focus so asynchronous rendering catches up
    ///
    /// Default: 3 seconds. Zero disables the pause.
    pub(crate) settle_delay_ms: u64,

    /// Fractions of the results container height to scroll through, in order
    ///
    /// Default: `[0.3, 0.6, 1.0]`
    pub(crate) scroll_fractions: Vec<f64>,

    /// Maximum number of result pages visited in one search run
    ///
    /// Default: 100
    pub(crate) max_pages: usize,

    /// Durable error log. `None` keeps entries in memory only.
    pub(crate) error_log_path: Option<PathBuf>,

    /// Names for the areas on the recommended-jobs page, by position.
    /// A `None` slot skips the area at that index.
    pub(crate) recommended_areas: Vec<Option<String>>,

    /// Areas whose `class` attribute contains this marker are skipped
    pub(crate) recommended_skip_marker: Option<String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            locators: LocatorSet::default(),
            element_timeout_ms: DEFAULT_ELEMENT_TIMEOUT_MS,
            field_timeout_ms: DEFAULT_FIELD_TIMEOUT_MS,
            signed_in_timeout_ms: SIGNED_IN_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_poll_interval_ms: DEFAULT_MAX_POLL_INTERVAL_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            scroll_fractions: DEFAULT_SCROLL_FRACTIONS.to_vec(),
            max_pages: DEFAULT_MAX_PAGES,
            error_log_path: None,
            recommended_areas: Vec::new(),
            recommended_skip_marker: None,
        }
    }
}

/// What to search for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub search_term: String,
    #[serde(default)]
    pub location: Option<String>,
}

impl SearchRequest {
    #[must_use]
    pub fn new(search_term: impl Into<String>, location: Option<String>) -> Self {
        Self {
            search_term: search_term.into(),
            location,
        }
    }
}
