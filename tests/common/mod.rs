//! Test utilities for the jobscrape test suite
//!
//! `FakeDriver` is an in-memory `PageDriver` over a scripted job site: a
//! results page sequence with cards and a next control, plus a recommended
//! landing page. It records navigations, clicks and scrolls so tests can
//! assert on what the engine did to the page.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use kodegen_tools_jobscrape::config::ScrapeConfig;
use kodegen_tools_jobscrape::driver::PageDriver;
use kodegen_tools_jobscrape::errors::{DriverError, DriverResult};
use kodegen_tools_jobscrape::locators::{Locator, LocatorSet};

pub const BASE_URL: &str = "https://jobs.example.com/";

/// Locators understood by `FakeDriver`
pub fn fake_locators() -> LocatorSet {
    LocatorSet {
        container: Locator::class("jobs-search-results-list"),
        card: Locator::class("job-card-container"),
        title: Locator::css("a.job-card-list__title"),
        company: Locator::class("job-card-container__company-name"),
        location: Locator::class("job-card-container__metadata-item"),
        next_button: Locator::css("button[aria-label='View next page']"),
        signed_in_marker: Locator::class("global-nav__me"),
        recommended_container: Some(Locator::class("scaffold-finite-scroll__content")),
        recommended_area: Some(Locator::class("discovery-templates-vertical-list")),
        recommended_item: Some(Locator::class("discovery-templates-entity-item")),
    }
}

/// Fast timings so a missing element costs milliseconds, not seconds
pub fn test_config() -> ScrapeConfig {
    ScrapeConfig::builder()
        .base_url(BASE_URL)
        .locators(fake_locators())
        .element_timeout(Duration::from_millis(150))
        .field_timeout(Duration::from_millis(30))
        .signed_in_timeout(Duration::from_millis(60))
        .poll_interval(Duration::from_millis(5), Duration::from_millis(20))
        .settle_delay(Duration::ZERO)
        .build()
        .unwrap()
}

/// One job card; `None` fields are absent from the DOM
#[derive(Debug, Clone, Default)]
pub struct FakeCard {
    pub title: Option<String>,
    pub href: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
}

impl FakeCard {
    /// Fully populated card
    pub fn complete(title: &str, company: &str, location: &str) -> Self {
        Self {
            title: Some(format!("  {title}\n")),
            href: Some(format!(
                "https://jobs.example.com/view/{}",
                title.to_lowercase().replace(' ', "-")
            )),
            company: Some(company.to_string()),
            location: Some(location.to_string()),
        }
    }

    pub fn without_company(mut self) -> Self {
        self.company = None;
        self
    }

    pub fn without_title(mut self) -> Self {
        self.title = None;
        self
    }

    pub fn without_href(mut self) -> Self {
        self.href = None;
        self
    }

    /// Title element present but rendered with whitespace only
    pub fn with_blank_title(mut self) -> Self {
        self.title = Some("  \n ".to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextControl {
    Absent,
    Disabled,
    Enabled,
    /// Reports enabled but the click command errors
    ClickFails,
    /// Reading the enabled state errors
    InspectFails,
}

#[derive(Debug, Clone)]
pub struct FakePage {
    pub cards: Vec<FakeCard>,
    pub next: NextControl,
    /// When false the results container never renders
    pub has_container: bool,
}

impl FakePage {
    pub fn new(cards: Vec<FakeCard>, next: NextControl) -> Self {
        Self {
            cards,
            next,
            has_container: true,
        }
    }

    pub fn broken() -> Self {
        Self {
            cards: Vec::new(),
            next: NextControl::Absent,
            has_container: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FakeArea {
    pub class: String,
    pub items: Vec<FakeCard>,
}

/// Everything the fake site serves
#[derive(Debug, Clone, Default)]
pub struct FakeSite {
    pub pages: Vec<FakePage>,
    pub areas: Vec<FakeArea>,
    pub signed_in: bool,
    pub dialog_open: bool,
    /// Card lookups that come back empty before cards render on a page
    pub card_render_delay: usize,
}

impl FakeSite {
    /// Signed-in site serving `pages`; every page but the last has an
    /// enabled next control, the last has none
    pub fn with_pages(card_pages: Vec<Vec<FakeCard>>) -> Self {
        let last = card_pages.len().saturating_sub(1);
        let pages = card_pages
            .into_iter()
            .enumerate()
            .map(|(i, cards)| {
                let next = if i < last {
                    NextControl::Enabled
                } else {
                    NextControl::Absent
                };
                FakePage::new(cards, next)
            })
            .collect();
        Self {
            pages,
            signed_in: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Blank,
    Home,
    Results(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardRef {
    Results { page: usize, index: usize },
    Area { area: usize, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Company,
    Location,
}

/// Handle returned by `FakeDriver` lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeElement {
    Container(usize),
    Card(CardRef),
    Field(CardRef, Field),
    NextButton(usize),
    SignedInMarker,
    RecommendedContainer,
    Area(usize),
}

#[derive(Debug)]
struct State {
    view: View,
    navigations: Vec<String>,
    clicks: usize,
    disabled_clicks: usize,
    scrolls: usize,
    focuses: usize,
    card_lookups: usize,
    dialog_open: bool,
}

pub struct FakeDriver {
    site: FakeSite,
    locators: LocatorSet,
    state: Mutex<State>,
}

impl FakeDriver {
    pub fn new(site: FakeSite) -> Self {
        let dialog_open = site.dialog_open;
        Self {
            site,
            locators: fake_locators(),
            state: Mutex::new(State {
                view: View::Blank,
                navigations: Vec::new(),
                clicks: 0,
                disabled_clicks: 0,
                scrolls: 0,
                focuses: 0,
                card_lookups: 0,
                dialog_open,
            }),
        }
    }

    /// Start already showing results page `page`, as after a click elsewhere
    pub fn showing_results(site: FakeSite, page: usize) -> Self {
        let driver = Self::new(site);
        driver.state.lock().unwrap().view = View::Results(page);
        driver
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().unwrap().navigations.clone()
    }

    pub fn clicks(&self) -> usize {
        self.state.lock().unwrap().clicks
    }

    pub fn disabled_clicks(&self) -> usize {
        self.state.lock().unwrap().disabled_clicks
    }

    pub fn scrolls(&self) -> usize {
        self.state.lock().unwrap().scrolls
    }

    pub fn focuses(&self) -> usize {
        self.state.lock().unwrap().focuses
    }

    pub fn current_page(&self) -> Option<usize> {
        match self.state.lock().unwrap().view {
            View::Results(page) => Some(page),
            _ => None,
        }
    }

    fn view(&self) -> View {
        self.state.lock().unwrap().view
    }

    fn card(&self, card: CardRef) -> Option<&FakeCard> {
        match card {
            CardRef::Results { page, index } => self.site.pages.get(page)?.cards.get(index),
            CardRef::Area { area, index } => self.site.areas.get(area)?.items.get(index),
        }
    }

    fn not_found(locator: &Locator) -> DriverError {
        DriverError::NotFound {
            locator: locator.to_string(),
        }
    }

    /// Resolve a lookup against the current view; empty when nothing matches
    fn resolve(&self, locator: &Locator, scope: Option<&FakeElement>) -> Vec<FakeElement> {
        let l = &self.locators;
        let view = self.view();

        if *locator == l.container {
            return match view {
                View::Results(page) if self.site.pages[page].has_container => {
                    vec![FakeElement::Container(page)]
                }
                _ => Vec::new(),
            };
        }

        if *locator == l.card {
            let page = match (scope, view) {
                (Some(FakeElement::Container(page)), _) => *page,
                (None, View::Results(page)) => page,
                _ => return Vec::new(),
            };
            let mut state = self.state.lock().unwrap();
            state.card_lookups += 1;
            if state.card_lookups <= self.site.card_render_delay {
                return Vec::new();
            }
            return (0..self.site.pages[page].cards.len())
                .map(|index| FakeElement::Card(CardRef::Results { page, index }))
                .collect();
        }

        let field = if *locator == l.title {
            Some(Field::Title)
        } else if *locator == l.company {
            Some(Field::Company)
        } else if *locator == l.location {
            Some(Field::Location)
        } else {
            None
        };
        if let Some(field) = field {
            let Some(FakeElement::Card(card_ref)) = scope else {
                return Vec::new();
            };
            let Some(card) = self.card(*card_ref) else {
                return Vec::new();
            };
            let present = match field {
                Field::Title => card.title.is_some(),
                Field::Company => card.company.is_some(),
                Field::Location => card.location.is_some(),
            };
            return if present {
                vec![FakeElement::Field(*card_ref, field)]
            } else {
                Vec::new()
            };
        }

        if *locator == l.next_button {
            return match view {
                View::Results(page) if self.site.pages[page].next != NextControl::Absent => {
                    vec![FakeElement::NextButton(page)]
                }
                _ => Vec::new(),
            };
        }

        if *locator == l.signed_in_marker {
            return if self.site.signed_in && view != View::Blank {
                vec![FakeElement::SignedInMarker]
            } else {
                Vec::new()
            };
        }

        if Some(locator) == l.recommended_container.as_ref() {
            return if view == View::Home && !self.site.areas.is_empty() {
                vec![FakeElement::RecommendedContainer]
            } else {
                Vec::new()
            };
        }

        if Some(locator) == l.recommended_area.as_ref() {
            return match scope {
                Some(FakeElement::RecommendedContainer) => {
                    (0..self.site.areas.len()).map(FakeElement::Area).collect()
                }
                _ => Vec::new(),
            };
        }

        if Some(locator) == l.recommended_item.as_ref() {
            return match scope {
                Some(FakeElement::Area(area)) => (0..self.site.areas[*area].items.len())
                    .map(|index| FakeElement::Card(CardRef::Area { area: *area, index }))
                    .collect(),
                _ => Vec::new(),
            };
        }

        Vec::new()
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    type Element = FakeElement;

    async fn navigate(&self, url: &str) -> DriverResult<()> {
        let mut state = self.state.lock().unwrap();
        state.navigations.push(url.to_string());
        state.card_lookups = 0;
        state.view = if url.contains("/search") {
            View::Results(0)
        } else {
            View::Home
        };
        Ok(())
    }

    async fn find_element(
        &self,
        locator: &Locator,
        scope: Option<&FakeElement>,
    ) -> DriverResult<FakeElement> {
        self.resolve(locator, scope)
            .into_iter()
            .next()
            .ok_or_else(|| Self::not_found(locator))
    }

    async fn find_elements(
        &self,
        locator: &Locator,
        scope: Option<&FakeElement>,
    ) -> DriverResult<Vec<FakeElement>> {
        Ok(self.resolve(locator, scope))
    }

    async fn attribute(&self, element: &FakeElement, name: &str) -> DriverResult<Option<String>> {
        Ok(match (element, name) {
            (FakeElement::Field(card, Field::Title), "href") => {
                self.card(*card).and_then(|c| c.href.clone())
            }
            (FakeElement::Area(area), "class") => Some(self.site.areas[*area].class.clone()),
            _ => None,
        })
    }

    async fn text(&self, element: &FakeElement) -> DriverResult<String> {
        let FakeElement::Field(card_ref, field) = element else {
            return Ok(String::new());
        };
        let card = self
            .card(*card_ref)
            .ok_or_else(|| DriverError::Command("stale element".to_string()))?;
        let text = match field {
            Field::Title => card.title.clone(),
            Field::Company => card.company.clone(),
            Field::Location => card.location.clone(),
        };
        text.ok_or_else(|| DriverError::Command("stale element".to_string()))
    }

    async fn click(&self, element: &FakeElement) -> DriverResult<()> {
        let mut state = self.state.lock().unwrap();
        state.clicks += 1;
        if let FakeElement::NextButton(page) = element {
            match self.site.pages[*page].next {
                NextControl::Enabled => {
                    state.view = View::Results(page + 1);
                    state.card_lookups = 0;
                }
                NextControl::ClickFails => {
                    return Err(DriverError::Command("element click intercepted".to_string()));
                }
                _ => state.disabled_clicks += 1,
            }
        }
        Ok(())
    }

    async fn is_enabled(&self, element: &FakeElement) -> DriverResult<bool> {
        let FakeElement::NextButton(page) = element else {
            return Ok(true);
        };
        match self.site.pages[*page].next {
            NextControl::InspectFails => Err(DriverError::Command("node detached".to_string())),
            NextControl::Enabled | NextControl::ClickFails => Ok(true),
            NextControl::Absent | NextControl::Disabled => Ok(false),
        }
    }

    async fn scroll(&self, target: &Locator, _fraction: f64) -> DriverResult<()> {
        self.state.lock().unwrap().scrolls += 1;
        if self.resolve(target, None).is_empty() {
            return Err(Self::not_found(target));
        }
        Ok(())
    }

    async fn focus_window(&self) -> DriverResult<()> {
        self.state.lock().unwrap().focuses += 1;
        Ok(())
    }

    async fn accept_dialog(&self) -> DriverResult<bool> {
        let mut state = self.state.lock().unwrap();
        Ok(std::mem::replace(&mut state.dialog_open, false))
    }

    async fn page_source(&self) -> DriverResult<String> {
        Ok(format!("<html><!-- {:?} --></html>", self.view()))
    }
}
