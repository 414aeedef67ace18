//! Getter methods for `ScrapeConfig`

use std::path::Path;
use std::time::Duration;

use super::types::ScrapeConfig;
use crate::locators::LocatorSet;

impl ScrapeConfig {
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn locators(&self) -> &LocatorSet {
        &self.locators
    }

    #[must_use]
    pub fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    #[must_use]
    pub fn field_timeout(&self) -> Duration {
        Duration::from_millis(self.field_timeout_ms)
    }

    #[must_use]
    pub fn signed_in_timeout(&self) -> Duration {
        Duration::from_millis(self.signed_in_timeout_ms)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub fn max_poll_interval(&self) -> Duration {
        Duration::from_millis(self.max_poll_interval_ms)
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub fn scroll_fractions(&self) -> &[f64] {
        &self.scroll_fractions
    }

    #[must_use]
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    #[must_use]
    pub fn error_log_path(&self) -> Option<&Path> {
        self.error_log_path.as_deref()
    }

    #[must_use]
    pub fn recommended_areas(&self) -> &[Option<String>] {
        &self.recommended_areas
    }

    #[must_use]
    pub fn recommended_skip_marker(&self) -> Option<&str> {
        self.recommended_skip_marker.as_deref()
    }
}
