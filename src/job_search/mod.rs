//! Job search engine
//!
//! `JobSearch` ties the pieces together for one signed-in browser session:
//! the pagination controller for keyword searches, the recommended-jobs
//! scraper, and the error accumulator shared by both.

pub mod extractor;
pub mod pagination;
pub mod recommended;
pub mod synchronizer;
pub mod types;

pub use extractor::CardExtractor;
pub use pagination::PaginationController;
pub use recommended::scrape_recommended;
pub use synchronizer::PageSynchronizer;
pub use types::{
    AreaJobs, CardOutcome, CardPosition, JobRecord, PageState, RecommendedJobs, RunSummary,
    SearchSession,
};

use tracing::info;

use crate::config::ScrapeConfig;
use crate::driver::PageDriver;
use crate::error_log::{ErrorAccumulator, ErrorSummary};
use crate::errors::{ScrapeError, ScrapeResult};

/// Scraping entry point bound to one browser page
///
/// Construction checks the sign-in precondition, so holding a `JobSearch`
/// means the session was signed in when it was created. Only one search may
/// drive the page at a time; the `&mut self` receivers enforce that.
pub struct JobSearch<'a, D: PageDriver> {
    driver: &'a D,
    config: &'a ScrapeConfig,
    errors: ErrorAccumulator,
}

impl<'a, D: PageDriver> JobSearch<'a, D> {
    /// Open the site root and verify the session is signed in
    ///
    /// # Errors
    ///
    /// `ScrapeError::NotSignedIn` when the signed-in marker does not appear,
    /// or an IO error when the configured error log cannot be opened.
    pub async fn connect(driver: &'a D, config: &'a ScrapeConfig) -> ScrapeResult<Self> {
        let errors = ErrorAccumulator::from_config(config)?;
        Self::connect_with(driver, config, errors).await
    }

    /// Same as `connect`, reporting into an existing accumulator
    pub async fn connect_with(
        driver: &'a D,
        config: &'a ScrapeConfig,
        mut errors: ErrorAccumulator,
    ) -> ScrapeResult<Self> {
        driver.navigate(config.base_url()).await?;

        if !PageSynchronizer::new(driver, config).is_signed_in().await {
            errors.log_error("Not signed in. Sign in to the site in this browser profile first.");
            return Err(ScrapeError::NotSignedIn);
        }
        info!("Signed-in session confirmed at {}", config.base_url());

        Ok(Self {
            driver,
            config,
            errors,
        })
    }

    #[must_use]
    pub fn controller(&self) -> PaginationController<'a, D> {
        PaginationController::new(self.driver, self.config)
    }

    /// Search for `search_term` and follow every results page
    pub async fn search(
        &mut self,
        search_term: &str,
        location: Option<&str>,
    ) -> ScrapeResult<RunSummary> {
        self.controller()
            .search(search_term, location, &mut self.errors)
            .await
    }

    /// Resume `session` on the results page the browser is already showing
    ///
    /// No navigation happens; records are appended to the session.
    pub async fn continue_search(
        &mut self,
        session: &mut SearchSession,
    ) -> ScrapeResult<PageState> {
        self.controller().run(session, true, &mut self.errors).await
    }

    /// Scrape the recommended-jobs page, then dismiss any dialog it left open
    pub async fn scrape_recommended(&mut self) -> ScrapeResult<RecommendedJobs> {
        let jobs = scrape_recommended(self.driver, self.config, &mut self.errors).await?;
        self.accept_alert().await;
        Ok(jobs)
    }

    /// Like [`Self::scrape_recommended`], but a failure is logged to the
    /// accumulator and yields `None` so the caller can go on searching
    pub async fn try_scrape_recommended(&mut self) -> Option<RecommendedJobs> {
        match self.scrape_recommended().await {
            Ok(jobs) => Some(jobs),
            Err(e) => {
                self.errors.log_error(format!("Recommended jobs unavailable: {e}"));
                None
            }
        }
    }

    /// Accept a pending JavaScript dialog
    ///
    /// Returns whether one was open. A missing dialog is logged, never fatal.
    pub async fn accept_alert(&mut self) -> bool {
        match self.driver.accept_dialog().await {
            Ok(true) => {
                info!("Accepted JavaScript dialog");
                true
            }
            Ok(false) => {
                self.errors.log_error("No alert present to accept");
                false
            }
            Err(e) => {
                self.errors.log_error(format!("Failed to accept alert: {e}"));
                false
            }
        }
    }

    #[must_use]
    pub fn errors(&self) -> &ErrorAccumulator {
        &self.errors
    }

    #[must_use]
    pub fn report_summary(&self) -> ErrorSummary {
        self.errors.report_summary()
    }

    #[must_use]
    pub fn into_errors(self) -> ErrorAccumulator {
        self.errors
    }
}
