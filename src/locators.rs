//! Locator vocabulary for the remote page
//!
//! Locators are configuration data supplied by the caller. The engine only
//! ever refers to them by role (container, card, title, ...), never by value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How to find an element on the remote page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locator {
    /// One or more CSS class names, e.g. `"job-card-list__title"`
    Class(String),
    /// A raw CSS selector
    Css(String),
}

impl Locator {
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Render as a CSS selector understood by `querySelector`
    ///
    /// A class locator with several whitespace separated names matches
    /// elements carrying all of them.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Class(names) => names
                .split_whitespace()
                .map(|name| format!(".{name}"))
                .collect(),
            Self::Css(selector) => selector.trim().to_string(),
        }
    }

    /// True when the locator cannot match anything
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Class(value) | Self::Css(value) => value.trim().is_empty(),
        }
    }
}

impl Default for Locator {
    fn default() -> Self {
        Self::Css(String::new())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Named locators used by the search engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorSet {
    /// Scrollable region holding the current page's cards
    pub container: Locator,
    /// One job card, searched inside `container`
    pub card: Locator,
    /// Title link inside a card; its `href` is the record's source URL
    pub title: Locator,
    pub company: Locator,
    pub location: Locator,
    /// Control that loads the next page of results
    pub next_button: Locator,
    /// Element only present for a signed-in session
    pub signed_in_marker: Locator,

    /// Recommended-jobs landing page. Optional, only needed by
    /// `scrape_recommended`.
    pub recommended_container: Option<Locator>,
    pub recommended_area: Option<Locator>,
    pub recommended_item: Option<Locator>,
}

impl LocatorSet {
    /// Names of required locators that are empty
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("container", &self.container),
            ("card", &self.card),
            ("title", &self.title),
            ("company", &self.company),
            ("location", &self.location),
            ("next_button", &self.next_button),
            ("signed_in_marker", &self.signed_in_marker),
        ]
        .into_iter()
        .filter(|(_, locator)| locator.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_locator_renders_compound_selector() {
        assert_eq!(Locator::class("jobs-search-results-list").to_css(), ".jobs-search-results-list");
        assert_eq!(Locator::class("artdeco-card  top-picks").to_css(), ".artdeco-card.top-picks");
        assert_eq!(Locator::css(" li > a ").to_css(), "li > a");
    }

    #[test]
    fn locator_deserializes_from_tagged_json() {
        let locator: Locator = serde_json::from_str(r#"{"class":"job-card-list"}"#).unwrap();
        assert_eq!(locator, Locator::class("job-card-list"));

        let locator: Locator = serde_json::from_str(r#"{"css":"h2 > a"}"#).unwrap();
        assert_eq!(locator, Locator::css("h2 > a"));
    }

    #[test]
    fn missing_lists_empty_required_locators() {
        let set = LocatorSet {
            container: Locator::class("results"),
            card: Locator::class("card"),
            ..LocatorSet::default()
        };
        assert_eq!(
            set.missing(),
            vec!["title", "company", "location", "next_button", "signed_in_marker"]
        );
    }
}
