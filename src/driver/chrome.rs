//! `PageDriver` over a chromiumoxide `Page`

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::{BringToFrontParams, HandleJavaScriptDialogParams};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use tracing::{debug, trace};

use super::PageDriver;
use crate::errors::{DriverError, DriverResult};
use crate::locators::Locator;

/// Drives a single Chrome tab
#[derive(Clone)]
pub struct ChromeDriver {
    page: Page,
}

impl ChromeDriver {
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }
}

fn command_error(e: impl std::fmt::Display) -> DriverError {
    DriverError::Command(e.to_string())
}

/// Script that scrolls the first match of `selector` to `fraction` of its
/// scroll height. Evaluates to `false` when nothing matches.
fn scroll_script(selector: &str, fraction: f64) -> String {
    // serde_json produces a correctly escaped JS string literal
    let selector = serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "(() => {{ \
            const el = document.querySelector({selector}); \
            if (!el) {{ return false; }} \
            el.scrollTo(0, el.scrollHeight * {fraction}); \
            return true; \
        }})()"
    )
}

#[async_trait]
impl PageDriver for ChromeDriver {
    type Element = Element;

    async fn navigate(&self, url: &str) -> DriverResult<()> {
        let navigation_error = |e: chromiumoxide::error::CdpError| DriverError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        };

        self.page.goto(url).await.map_err(navigation_error)?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(navigation_error)?;
        debug!("Navigated to {}", url);
        Ok(())
    }

    async fn find_element(
        &self,
        locator: &Locator,
        scope: Option<&Element>,
    ) -> DriverResult<Element> {
        let selector = locator.to_css();
        let found = match scope {
            Some(parent) => parent.find_element(selector.as_str()).await,
            None => self.page.find_element(selector.as_str()).await,
        };

        found.map_err(|e| {
            trace!("find_element('{}') failed: {}", selector, e);
            DriverError::NotFound { locator: selector }
        })
    }

    async fn find_elements(
        &self,
        locator: &Locator,
        scope: Option<&Element>,
    ) -> DriverResult<Vec<Element>> {
        let selector = locator.to_css();
        let found = match scope {
            Some(parent) => parent.find_elements(selector.as_str()).await,
            None => self.page.find_elements(selector.as_str()).await,
        };

        found.map_err(|e| {
            trace!("find_elements('{}') failed: {}", selector, e);
            DriverError::NotFound { locator: selector }
        })
    }

    async fn attribute(&self, element: &Element, name: &str) -> DriverResult<Option<String>> {
        element.attribute(name).await.map_err(command_error)
    }

    async fn text(&self, element: &Element) -> DriverResult<String> {
        Ok(element
            .inner_text()
            .await
            .map_err(command_error)?
            .unwrap_or_default())
    }

    async fn click(&self, element: &Element) -> DriverResult<()> {
        element.click().await.map_err(command_error)?;
        Ok(())
    }

    async fn is_enabled(&self, element: &Element) -> DriverResult<bool> {
        if element
            .attribute("disabled")
            .await
            .map_err(command_error)?
            .is_some()
        {
            return Ok(false);
        }

        let aria_disabled = element
            .attribute("aria-disabled")
            .await
            .map_err(command_error)?;
        Ok(!matches!(aria_disabled.as_deref(), Some("true")))
    }

    async fn scroll(&self, target: &Locator, fraction: f64) -> DriverResult<()> {
        let selector = target.to_css();
        let script = scroll_script(&selector, fraction);
        let scrolled: bool = self
            .page
            .evaluate(script.as_str())
            .await
            .map_err(command_error)?
            .into_value()
            .unwrap_or(false);

        if scrolled {
            Ok(())
        } else {
            Err(DriverError::NotFound { locator: selector })
        }
    }

    async fn focus_window(&self) -> DriverResult<()> {
        self.page
            .execute(BringToFrontParams::default())
            .await
            .map_err(command_error)?;
        self.page
            .evaluate("window.focus()")
            .await
            .map_err(command_error)?;
        Ok(())
    }

    async fn accept_dialog(&self) -> DriverResult<bool> {
        match self.page.execute(HandleJavaScriptDialogParams::new(true)).await {
            Ok(_) => Ok(true),
            Err(e) if e.to_string().to_lowercase().contains("no dialog") => Ok(false),
            Err(e) => Err(command_error(e)),
        }
    }

    async fn page_source(&self) -> DriverResult<String> {
        self.page.content().await.map_err(command_error)
    }
}
