//! Pagination controller
//!
//! Drives one search session through
//! `Init -> LoadingContainer -> ExtractingPage -> Advancing` until the next
//! control can no longer be activated (`Done`) or the results container fails
//! to load (`Failed`). Each page's records are appended after the previous
//! page's, so the accumulated sequence is in page-visit order.
//!
//! The only reliable "more pages exist" signal is whether the advance control
//! is clickable, so the page count is never known up front. The loop is bounded
//! by `max_pages` instead of recursing once per page.

use tracing::{debug, info};

use super::extractor::CardExtractor;
use super::synchronizer::PageSynchronizer;
use super::types::{CardPosition, PageState, RunSummary, SearchSession};
use crate::config::ScrapeConfig;
use crate::driver::PageDriver;
use crate::error_log::ErrorAccumulator;
use crate::errors::{AdvanceFailure, ScrapeResult};
use crate::utils::build_search_url;

pub struct PaginationController<'a, D: PageDriver> {
    sync: PageSynchronizer<'a, D>,
}

impl<'a, D: PageDriver> PaginationController<'a, D> {
    #[must_use]
    pub fn new(driver: &'a D, config: &'a ScrapeConfig) -> Self {
        Self {
            sync: PageSynchronizer::new(driver, config),
        }
    }

    /// Run a fresh search and collect every page
    ///
    /// A results container that never loads ends the run at `Failed` with the
    /// records gathered so far; that is still `Ok`.
    ///
    /// # Errors
    ///
    /// Only when the search URL cannot be built or navigation itself fails.
    pub async fn search(
        &self,
        search_term: &str,
        location: Option<&str>,
        errors: &mut ErrorAccumulator,
    ) -> ScrapeResult<RunSummary> {
        let errors_before = errors.count();
        let mut session = SearchSession::new(search_term, location.map(str::to_string));

        self.run(&mut session, false, errors).await?;

        info!(
            "Search '{}' finished at {:?}: {} job(s) over {} page(s), {} card failure(s)",
            session.search_term,
            session.state,
            session.records.len(),
            session.pages_visited,
            session.error_count
        );
        let logged_errors = errors.count() - errors_before;
        Ok(RunSummary::from_session(session, logged_errors))
    }

    /// Drive `session` from `Init` to a terminal state
    ///
    /// With `is_continuation` the browser is assumed to already show the
    /// next results page, so no navigation happens.
    pub async fn run(
        &self,
        session: &mut SearchSession,
        is_continuation: bool,
        errors: &mut ErrorAccumulator,
    ) -> ScrapeResult<PageState> {
        let mut container = None;
        session.state = PageState::Init;

        while !session.state.is_terminal() {
            debug!("Pagination state: {:?}", session.state);
            session.state = match session.state {
                PageState::Init => {
                    if !is_continuation {
                        self.navigate_to_search(session).await?;
                    }
                    PageState::LoadingContainer
                }
                PageState::LoadingContainer => match self.load_container().await {
                    Ok(element) => {
                        session.pages_visited += 1;
                        container = Some(element);
                        PageState::ExtractingPage
                    }
                    Err(e) => {
                        errors.log_error(format!(
                            "Results container not available on page {}: {e}",
                            session.pages_visited + 1
                        ));
                        PageState::Failed
                    }
                },
                PageState::ExtractingPage => {
                    if let Some(element) = container.take() {
                        self.extract_page(&element, session, errors).await;
                    }
                    PageState::Advancing
                }
                PageState::Advancing => self.advance_or_finish(session, errors).await,
                state @ (PageState::Done | PageState::Failed) => state,
            };
        }

        Ok(session.state)
    }

    async fn navigate_to_search(&self, session: &SearchSession) -> ScrapeResult<()> {
        let url = build_search_url(
            self.sync.config().base_url(),
            &session.search_term,
            session.location.as_deref(),
        )?;
        info!("Searching for '{}': {}", session.search_term, url);
        self.sync.driver().navigate(url.as_str()).await?;
        Ok(())
    }

    /// Scroll the results container through its stops to trigger lazy
    /// rendering, then wait for it
    ///
    /// Safe to repeat on an already loaded page; it never navigates.
    pub async fn load_container(&self) -> ScrapeResult<D::Element> {
        let container = &self.sync.config().locators().container;
        self.sync.scroll_through(container).await;
        self.sync.wait_for_element(container, None).await
    }

    /// Cards under `container` in DOM order
    ///
    /// No cards within the element timeout is an empty page, not an error.
    pub async fn load_cards(&self, container: &D::Element) -> ScrapeResult<Vec<D::Element>> {
        let card = &self.sync.config().locators().card;
        match self.sync.wait_for_all_elements(card, Some(container)).await {
            Ok(cards) => Ok(cards),
            Err(e) if e.is_timeout() => {
                debug!("No cards under the results container: {}", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn extract_page(
        &self,
        container: &D::Element,
        session: &mut SearchSession,
        errors: &mut ErrorAccumulator,
    ) {
        let page = session.pages_visited;
        let cards = match self.load_cards(container).await {
            Ok(cards) => cards,
            Err(e) => {
                errors.log_error(format!("Failed to list job cards on page {page}: {e}"));
                Vec::new()
            }
        };

        let extractor = CardExtractor::new(self.sync);
        let before = session.records.len();
        for (index, card) in cards.iter().enumerate() {
            let position = CardPosition::Results { page, index };
            match extractor.extract_card(card, position, errors).await {
                Ok(record) => session.records.push(record),
                Err(_) => session.error_count += 1,
            }
        }

        info!(
            "Found {} job(s) on page {} ({} card(s) visited)",
            session.records.len() - before,
            page,
            cards.len()
        );
    }

    async fn advance_or_finish(
        &self,
        session: &SearchSession,
        errors: &mut ErrorAccumulator,
    ) -> PageState {
        let max_pages = self.sync.config().max_pages();
        if session.pages_visited >= max_pages {
            errors.log_error(format!(
                "Reached the page limit ({max_pages}); stopping pagination"
            ));
            return PageState::Done;
        }

        match self.advance().await {
            Ok(()) => {
                info!("Proceeding to page {}", session.pages_visited + 1);
                PageState::LoadingContainer
            }
            Err(failure) => {
                errors.log_error(format!(
                    "No further results after page {}: {failure}",
                    session.pages_visited
                ));
                PageState::Done
            }
        }
    }

    /// Locate the next control and click it if enabled
    ///
    /// A disabled control is never clicked.
    pub async fn advance(&self) -> Result<(), AdvanceFailure> {
        let driver = self.sync.driver();
        let next_button = &self.sync.config().locators().next_button;

        let next = self
            .sync
            .wait_for_element(next_button, None)
            .await
            .map_err(AdvanceFailure::Missing)?;

        match driver.is_enabled(&next).await {
            Ok(true) => {}
            Ok(false) => return Err(AdvanceFailure::Disabled),
            Err(e) => return Err(AdvanceFailure::Inspect(e)),
        }

        driver.click(&next).await.map_err(AdvanceFailure::Click)
    }
}
