//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! `build()` only exists once both the base URL and the locator set have
//! been supplied.

use anyhow::{Result, anyhow, bail};
use std::marker::PhantomData;

use super::types::ScrapeConfig;
use crate::locators::LocatorSet;
use crate::utils::normalize_base_url;

// Type states for the builder
pub struct WithBaseUrl;
pub struct Complete;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) config: ScrapeConfig,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            config: ScrapeConfig::default(),
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfig {
    /// Create a builder for configuring a `ScrapeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }

    /// Check invariants and normalize the base URL
    ///
    /// Used by `build()` and by callers that deserialize a config from disk.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field.
    pub fn validate(&mut self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            bail!("base_url is required");
        }
        self.base_url = normalize_base_url(&self.base_url);
        url::Url::parse(&self.base_url)
            .map_err(|e| anyhow!("Invalid base_url '{}': {e}", self.base_url))?;

        let missing = self.locators.missing();
        if !missing.is_empty() {
            bail!("Missing locators: {}", missing.join(", "));
        }

        if self.scroll_fractions.is_empty() {
            bail!("scroll_fractions must contain at least one stop");
        }
        if let Some(bad) = self
            .scroll_fractions
            .iter()
            .find(|f| !(0.0..=1.0).contains(*f))
        {
            bail!("scroll fraction {bad} is outside [0, 1]");
        }

        if self.max_pages == 0 {
            bail!("max_pages must be at least 1");
        }
        if self.poll_interval_ms == 0 {
            bail!("poll_interval_ms must be positive");
        }
        if self.max_poll_interval_ms < self.poll_interval_ms {
            self.max_poll_interval_ms = self.poll_interval_ms;
        }

        Ok(())
    }
}

impl ScrapeConfigBuilder<()> {
    pub fn base_url(mut self, url: impl Into<String>) -> ScrapeConfigBuilder<WithBaseUrl> {
        self.config.base_url = url.into();
        ScrapeConfigBuilder {
            config: self.config,
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfigBuilder<WithBaseUrl> {
    pub fn locators(mut self, locators: LocatorSet) -> ScrapeConfigBuilder<Complete> {
        self.config.locators = locators;
        ScrapeConfigBuilder {
            config: self.config,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when all required fields are set
impl ScrapeConfigBuilder<Complete> {
    pub fn build(self) -> Result<ScrapeConfig> {
        let mut config = self.config;
        config.validate()?;
        Ok(config)
    }
}
