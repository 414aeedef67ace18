pub mod config;
pub mod content_saver;
pub mod driver;
pub mod error_log;
pub mod errors;
pub mod job_search;
pub mod locators;
pub mod utils;

pub use config::{ScrapeConfig, ScrapeConfigBuilder, SearchRequest};
pub use content_saver::save_jobs_to_csv;
pub use driver::{BrowserSession, ChromeDriver, LaunchOptions, PageDriver, launch_browser};
pub use error_log::{ErrorAccumulator, ErrorLogEntry, ErrorSummary};
pub use errors::{
    AdvanceFailure, CardField, DriverError, DriverResult, ExtractionFailure, ScrapeError,
    ScrapeResult,
};
pub use job_search::{
    AreaJobs, JobRecord, JobSearch, PageState, PaginationController, RecommendedJobs, RunSummary,
    SearchSession,
};
pub use locators::{Locator, LocatorSet};
pub use utils::build_search_url;

/// Search for `search_term` on an already signed-in page and collect every
/// results page
///
/// Convenience wrapper over [`JobSearch`] for callers that only need one run.
/// The accumulator is returned alongside so the caller can report it.
pub async fn search_jobs<D: PageDriver>(
    driver: &D,
    config: &ScrapeConfig,
    request: &SearchRequest,
) -> ScrapeResult<(RunSummary, ErrorAccumulator)> {
    let mut search = JobSearch::connect(driver, config).await?;
    let summary = search
        .search(&request.search_term, request.location.as_deref())
        .await?;
    Ok((summary, search.into_errors()))
}
