//! Builder methods available for all states
//!
//! Optional settings can be applied before or after the required fields.

use std::path::PathBuf;
use std::time::Duration;

use super::builder::ScrapeConfigBuilder;

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl<State> ScrapeConfigBuilder<State> {
    /// Set the timeout for required elements (container, next control)
    #[must_use]
    pub fn element_timeout(mut self, timeout: Duration) -> Self {
        self.config.element_timeout_ms = millis(timeout);
        self
    }

    /// Set the timeout for a card's title sub-element
    #[must_use]
    pub fn field_timeout(mut self, timeout: Duration) -> Self {
        self.config.field_timeout_ms = millis(timeout);
        self
    }

    #[must_use]
    pub fn signed_in_timeout(mut self, timeout: Duration) -> Self {
        self.config.signed_in_timeout_ms = millis(timeout);
        self
    }

    /// Set the initial and maximum poll interval for element waits
    ///
    /// The interval starts at `initial` and doubles after every miss until it
    /// reaches `max`.
    #[must_use]
    pub fn poll_interval(mut self, initial: Duration, max: Duration) -> Self {
        self.config.poll_interval_ms = millis(initial);
        self.config.max_poll_interval_ms = millis(max);
        self
    }

    /// Set the pause inserted after every scroll and focus action
    ///
    /// # Example
    /// ```rust
    /// # use kodegen_tools_jobscrape::config::ScrapeConfig;
    /// # use kodegen_tools_jobscrape::locators::{Locator, LocatorSet};
    /// # use std::time::Duration;
    /// # fn main() -> anyhow::Result<()> {
    /// # let locators = LocatorSet {
    /// #     container: Locator::class("results"),
    /// #     card: Locator::class("card"),
    /// #     title: Locator::class("title"),
    /// #     company: Locator::class("company"),
    /// #     location: Locator::class("location"),
    /// #     next_button: Locator::class("next"),
    /// #     signed_in_marker: Locator::class("nav"),
    /// #     ..LocatorSet::default()
    /// # };
    /// let config = ScrapeConfig::builder()
    ///     .base_url("https://www.example.com/jobs/")
    ///     .locators(locators)
    ///     .settle_delay(Duration::from_millis(1500))
    ///     .build()?;
    /// assert_eq!(config.settle_delay(), Duration::from_millis(1500));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.config.settle_delay_ms = millis(delay);
        self
    }

    /// Set the scroll stops applied to the results container
    #[must_use]
    pub fn scroll_fractions(mut self, fractions: impl Into<Vec<f64>>) -> Self {
        self.config.scroll_fractions = fractions.into();
        self
    }

    /// Set the maximum number of result pages visited per search
    #[must_use]
    pub fn max_pages(mut self, pages: usize) -> Self {
        self.config.max_pages = pages;
        self
    }

    /// Append error log entries to this file as well as keeping them in memory
    #[must_use]
    pub fn error_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.error_log_path = Some(path.into());
        self
    }

    /// Name the areas of the recommended-jobs page by position
    #[must_use]
    pub fn recommended_areas(mut self, areas: Vec<Option<String>>) -> Self {
        self.config.recommended_areas = areas;
        self
    }

    #[must_use]
    pub fn recommended_skip_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.recommended_skip_marker = Some(marker.into());
        self
    }
}
