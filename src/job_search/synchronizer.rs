//! Page synchronization: element waits, scrolling and focus
//!
//! The remote page renders asynchronously, so every lookup the engine relies
//! on goes through a bounded poll. Polls start at the configured interval and
//! double after each miss up to a cap, sleeping between attempts so the
//! runtime is never busy-spun.

use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::config::ScrapeConfig;
use crate::driver::PageDriver;
use crate::errors::{ScrapeError, ScrapeResult};
use crate::locators::Locator;

/// Wait, scroll and focus helpers over a `PageDriver`
///
/// Holds only references, so it is cheap to copy into the extractor and the
/// pagination controller.
pub struct PageSynchronizer<'a, D: PageDriver> {
    driver: &'a D,
    config: &'a ScrapeConfig,
}

impl<D: PageDriver> Clone for PageSynchronizer<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: PageDriver> Copy for PageSynchronizer<'_, D> {}

impl<'a, D: PageDriver> PageSynchronizer<'a, D> {
    #[must_use]
    pub fn new(driver: &'a D, config: &'a ScrapeConfig) -> Self {
        Self { driver, config }
    }

    #[must_use]
    pub fn driver(&self) -> &'a D {
        self.driver
    }

    #[must_use]
    pub fn config(&self) -> &'a ScrapeConfig {
        self.config
    }

    /// Wait for an element using the configured element timeout
    pub async fn wait_for_element(
        &self,
        locator: &Locator,
        scope: Option<&D::Element>,
    ) -> ScrapeResult<D::Element> {
        self.wait_for_element_within(locator, scope, self.config.element_timeout())
            .await
    }

    /// Poll until `locator` matches an element or `timeout` elapses
    ///
    /// # Errors
    ///
    /// `ScrapeError::Timeout` carrying the locator and elapsed time.
    pub async fn wait_for_element_within(
        &self,
        locator: &Locator,
        scope: Option<&D::Element>,
        timeout: Duration,
    ) -> ScrapeResult<D::Element> {
        let start = Instant::now();
        let mut poll_interval = self.config.poll_interval();

        loop {
            match self.driver.find_element(locator, scope).await {
                Ok(element) => {
                    trace!("'{}' present after {:?}", locator, start.elapsed());
                    return Ok(element);
                }
                Err(e) => trace!("'{}' not present yet: {}", locator, e),
            }

            poll_interval = match self.pause(start, timeout, poll_interval).await {
                Some(next) => next,
                None => return Err(timeout_error(locator, start)),
            };
        }
    }

    /// Poll until `locator` matches at least one element
    ///
    /// Elements come back in document order. An empty match is never
    /// returned; it becomes `ScrapeError::Timeout` once the configured element
    /// timeout elapses.
    pub async fn wait_for_all_elements(
        &self,
        locator: &Locator,
        scope: Option<&D::Element>,
    ) -> ScrapeResult<Vec<D::Element>> {
        let timeout = self.config.element_timeout();
        let start = Instant::now();
        let mut poll_interval = self.config.poll_interval();

        loop {
            match self.driver.find_elements(locator, scope).await {
                Ok(elements) if !elements.is_empty() => {
                    trace!(
                        "{} x '{}' present after {:?}",
                        elements.len(),
                        locator,
                        start.elapsed()
                    );
                    return Ok(elements);
                }
                Ok(_) => trace!("'{}' matched nothing yet", locator),
                Err(e) => trace!("'{}' lookup failed: {}", locator, e),
            }

            poll_interval = match self.pause(start, timeout, poll_interval).await {
                Some(next) => next,
                None => return Err(timeout_error(locator, start)),
            };
        }
    }

    /// Sleep before the next poll. Returns the following interval, or `None`
    /// once the deadline has passed.
    async fn pause(
        &self,
        start: Instant,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Option<Duration> {
        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return None;
        }

        let remaining = timeout - elapsed;
        tokio::time::sleep(poll_interval.min(remaining)).await;
        Some((poll_interval * 2).min(self.config.max_poll_interval()))
    }

    /// Scroll the named region to `fraction` of its height
    ///
    /// Fire-and-forget: a missing region is only logged.
    pub async fn scroll_to_percent(&self, target: &Locator, fraction: f64) {
        if let Err(e) = self.driver.scroll(target, fraction).await {
            debug!("Scroll of '{}' to {:.0}% skipped: {}", target, fraction * 100.0, e);
        }
    }

    /// Re-assert window focus. Fire-and-forget.
    pub async fn focus(&self) {
        if let Err(e) = self.driver.focus_window().await {
            debug!("Focus window failed: {}", e);
        }
    }

    /// Wait the configured settle delay
    pub async fn settle(&self) {
        let delay = self.config.settle_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// Scroll through every configured stop, focusing and settling after each
    pub async fn scroll_through(&self, target: &Locator) {
        for &fraction in self.config.scroll_fractions() {
            self.scroll_to_percent(target, fraction).await;
            self.focus().await;
            self.settle().await;
        }
    }

    /// True when the signed-in marker appears within the sign-in timeout
    pub async fn is_signed_in(&self) -> bool {
        self.wait_for_element_within(
            &self.config.locators().signed_in_marker,
            None,
            self.config.signed_in_timeout(),
        )
        .await
        .is_ok()
    }
}

fn timeout_error(locator: &Locator, start: Instant) -> ScrapeError {
    ScrapeError::Timeout {
        locator: locator.to_string(),
        elapsed: start.elapsed(),
    }
}
