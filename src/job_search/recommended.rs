//! Recommended-jobs landing page
//!
//! The landing page shows several areas (top picks, still hiring, ...), each a
//! list of cards in the same shape as search results. Areas carry no reliable
//! label in the DOM, so names come from `ScrapeConfig::recommended_areas` by
//! position; a `None` slot skips that area.

use tracing::{debug, info};

use super::extractor::CardExtractor;
use super::synchronizer::PageSynchronizer;
use super::types::{AreaJobs, CardPosition, RecommendedJobs};
use crate::config::ScrapeConfig;
use crate::driver::PageDriver;
use crate::error_log::ErrorAccumulator;
use crate::errors::{ScrapeError, ScrapeResult};
use crate::locators::Locator;

/// Scrape every named area of the recommended-jobs page
///
/// # Errors
///
/// `ScrapeError::Config` when the recommended locators are not configured,
/// `ScrapeError::Timeout` when the landing page container never appears, and
/// driver errors from navigation. Card failures are logged to `errors` only.
pub async fn scrape_recommended<D: PageDriver>(
    driver: &D,
    config: &ScrapeConfig,
    errors: &mut ErrorAccumulator,
) -> ScrapeResult<RecommendedJobs> {
    let locators = config.locators();
    let container_locator = required(
        locators.recommended_container.as_ref(),
        "recommended_container",
    )?;
    let area_locator = required(locators.recommended_area.as_ref(), "recommended_area")?;
    let item_locator = required(locators.recommended_item.as_ref(), "recommended_item")?;

    let sync = PageSynchronizer::new(driver, config);

    info!("Opening recommended jobs: {}", config.base_url());
    driver.navigate(config.base_url()).await?;
    sync.focus().await;
    sync.settle().await;

    let container = sync.wait_for_element(container_locator, None).await?;
    let areas = match sync.wait_for_all_elements(area_locator, Some(&container)).await {
        Ok(areas) => areas,
        Err(e) if e.is_timeout() => {
            debug!("Recommended page has no areas: {}", e);
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    let names = config.recommended_areas();
    let skip_marker = config.recommended_skip_marker();
    let extractor = CardExtractor::new(sync);
    let mut result = RecommendedJobs::default();

    for (position, area) in areas.iter().enumerate() {
        let Some(name) = names.get(position).and_then(Option::as_deref) else {
            debug!("Skipping unnamed recommended area {}", position + 1);
            continue;
        };

        if let Some(marker) = skip_marker
            && has_class(driver, area, marker).await
        {
            debug!("Skipping recommended area '{}' marked '{}'", name, marker);
            continue;
        }

        let items = match driver.find_elements(item_locator, Some(area)).await {
            Ok(items) => items,
            Err(e) => {
                errors.log_error(format!("Failed to list cards in area '{name}': {e}"));
                Vec::new()
            }
        };

        let mut area_jobs = AreaJobs {
            name: name.to_string(),
            records: Vec::with_capacity(items.len()),
            failed_cards: 0,
        };
        for (index, item) in items.iter().enumerate() {
            let position = CardPosition::Recommended { area: name, index };
            match extractor.extract_card(item, position, errors).await {
                Ok(record) => area_jobs.records.push(record),
                Err(_) => area_jobs.failed_cards += 1,
            }
        }

        info!(
            "Found {} recommended job(s) in '{}'",
            area_jobs.records.len(),
            name
        );
        result.areas.push(area_jobs);
    }

    Ok(result)
}

fn required<'a>(locator: Option<&'a Locator>, name: &str) -> ScrapeResult<&'a Locator> {
    locator
        .filter(|l| !l.is_empty())
        .ok_or_else(|| {
            ScrapeError::Config(format!("locator '{name}' is required for recommended jobs"))
        })
}

async fn has_class<D: PageDriver>(driver: &D, element: &D::Element, marker: &str) -> bool {
    match driver.attribute(element, "class").await {
        Ok(Some(classes)) => classes.contains(marker),
        Ok(None) => false,
        Err(e) => {
            debug!("Could not read area class: {}", e);
            false
        }
    }
}
