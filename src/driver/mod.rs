//! Remote control surface for the browser page
//!
//! The engine talks to the page only through `PageDriver`, so it can run
//! against a live Chrome tab (`ChromeDriver`) or a scripted page in tests.

pub mod chrome;
pub mod launch;

pub use chrome::ChromeDriver;
pub use launch::{BrowserSession, LaunchOptions, find_browser_executable, launch_browser};

use async_trait::async_trait;

use crate::errors::DriverResult;
use crate::locators::Locator;

/// Operations the engine needs from a remote-controlled page
///
/// All calls address the single page owned by the driver. Lookups with a
/// `scope` only search below that element.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Handle to an element on the page
    type Element: Send + Sync;

    async fn navigate(&self, url: &str) -> DriverResult<()>;

    /// First element matching `locator`, or `DriverError::NotFound`
    async fn find_element(
        &self,
        locator: &Locator,
        scope: Option<&Self::Element>,
    ) -> DriverResult<Self::Element>;

    /// All elements matching `locator` in document order; empty when none match
    async fn find_elements(
        &self,
        locator: &Locator,
        scope: Option<&Self::Element>,
    ) -> DriverResult<Vec<Self::Element>>;

    async fn attribute(&self, element: &Self::Element, name: &str)
    -> DriverResult<Option<String>>;

    /// Rendered text of the element
    async fn text(&self, element: &Self::Element) -> DriverResult<String>;

    async fn click(&self, element: &Self::Element) -> DriverResult<()>;

    async fn is_enabled(&self, element: &Self::Element) -> DriverResult<bool>;

    /// Scroll the first element matching `target` to `fraction` of its height
    async fn scroll(&self, target: &Locator, fraction: f64) -> DriverResult<()>;

    async fn focus_window(&self) -> DriverResult<()>;

    /// Accept a pending JavaScript dialog. Returns `false` when none is open.
    async fn accept_dialog(&self) -> DriverResult<bool>;

    /// Current document HTML, for failure snapshots
    async fn page_source(&self) -> DriverResult<String>;
}
