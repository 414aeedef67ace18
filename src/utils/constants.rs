//! Shared configuration constants for jobscrape
//!
//! Defaults for `ScrapeConfig` and fixed values used by the engine.

/// Default time to wait for a required element (results container, next control)
pub const DEFAULT_ELEMENT_TIMEOUT_MS: u64 = 10_000;

/// Default time to wait for a card's title sub-element
///
/// Cards are already rendered when extraction starts, so this is much
/// shorter than the container wait.
pub const DEFAULT_FIELD_TIMEOUT_MS: u64 = 2_000;

/// First poll interval; doubles after every miss
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Upper bound for the poll interval
pub const DEFAULT_MAX_POLL_INTERVAL_MS: u64 = 1_000;

/// Pause after each scroll/focus so lazy content can render
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 3_000;

/// Scroll stops applied to the results container before extraction
pub const DEFAULT_SCROLL_FRACTIONS: [f64; 3] = [0.3, 0.6, 1.0];

/// Maximum number of result pages visited in one search run
pub const DEFAULT_MAX_PAGES: usize = 100;

/// Sign-in check uses a short wait; the marker is part of the page chrome
pub const SIGNED_IN_TIMEOUT_MS: u64 = 5_000;

/// Path segment appended to the base URL for keyword searches
pub const SEARCH_PATH: &str = "search";

/// Chrome user agent string
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
