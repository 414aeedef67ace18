//! Per-card extraction
//!
//! Reads title, link, company and location from one result card. Every lookup
//! is scoped to the card handle so fields from neighbouring cards can never
//! leak in. Lookup failures become `ExtractionFailure`; nothing propagates past
//! `extract_card`.

use tracing::trace;

use super::synchronizer::PageSynchronizer;
use super::types::{CardOutcome, CardPosition, JobRecord};
use crate::driver::PageDriver;
use crate::error_log::ErrorAccumulator;
use crate::errors::{CardField, DriverError, ExtractionFailure};
use crate::locators::Locator;

pub struct CardExtractor<'a, D: PageDriver> {
    sync: PageSynchronizer<'a, D>,
}

impl<'a, D: PageDriver> CardExtractor<'a, D> {
    #[must_use]
    pub fn new(sync: PageSynchronizer<'a, D>) -> Self {
        Self { sync }
    }

    /// Extract one card, reporting a failure to `errors` before returning it
    pub async fn extract_card(
        &self,
        card: &D::Element,
        position: CardPosition<'_>,
        errors: &mut ErrorAccumulator,
    ) -> CardOutcome {
        let outcome = self.read_card(card).await;
        match &outcome {
            Ok(record) => trace!("Extracted '{}' at {}", record.title, position),
            Err(failure) => {
                errors.log_error(format!("Error scraping job card ({position}): {failure}"));
            }
        }
        outcome
    }

    async fn read_card(&self, card: &D::Element) -> CardOutcome {
        let driver = self.sync.driver();
        let locators = self.sync.config().locators();

        // The title may render a moment after the card itself
        let field_timeout = self.sync.config().field_timeout();
        let title_el = self
            .sync
            .wait_for_element_within(&locators.title, Some(card), field_timeout)
            .await
            .map_err(|e| ExtractionFailure::MissingElement {
                field: CardField::Title,
                cause: e.to_string(),
            })?;

        let title = driver
            .text(&title_el)
            .await
            .map_err(|e| read_failure(CardField::Title, &e))?;
        let title = non_empty(&title, CardField::Title)?;

        let source_url = driver
            .attribute(&title_el, "href")
            .await
            .map_err(|e| read_failure(CardField::Link, &e))?
            .ok_or(ExtractionFailure::MissingAttribute {
                field: CardField::Link,
                attribute: "href",
            })?;
        let source_url = non_empty(&source_url, CardField::Link)?;

        let company = self
            .scoped_text(card, &locators.company, CardField::Company)
            .await?;
        let location = self
            .scoped_text(card, &locators.location, CardField::Location)
            .await?;

        Ok(JobRecord {
            title,
            company,
            location,
            source_url,
        })
    }

    async fn scoped_text(
        &self,
        card: &D::Element,
        locator: &Locator,
        field: CardField,
    ) -> Result<String, ExtractionFailure> {
        let driver = self.sync.driver();
        let element = driver
            .find_element(locator, Some(card))
            .await
            .map_err(|e| ExtractionFailure::MissingElement {
                field,
                cause: e.to_string(),
            })?;

        let text = driver
            .text(&element)
            .await
            .map_err(|e| read_failure(field, &e))?;
        Ok(text.trim().to_string())
    }
}

/// Trimmed value, or `EmptyField` when only whitespace was rendered
fn non_empty(value: &str, field: CardField) -> Result<String, ExtractionFailure> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ExtractionFailure::EmptyField { field });
    }
    Ok(value.to_string())
}

fn read_failure(field: CardField, error: &DriverError) -> ExtractionFailure {
    ExtractionFailure::Read {
        field,
        cause: error.to_string(),
    }
}
