// Job listing scraper
//
// Reads a JSON run file with the site configuration and the search to run,
// drives a Chrome session through every results page, and exports the
// records to CSV.
//
// Usage: kodegen-jobscrape <run-file.json>
// SEARCH_TERM and LOCATION override the search from the run file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use kodegen_tools_jobscrape::{
    ChromeDriver, JobSearch, LaunchOptions, PageDriver, ScrapeConfig, ScrapeResult, SearchRequest,
    launch_browser, save_jobs_to_csv,
};

const PAGE_SOURCE_SNAPSHOT: &str = "page_source.txt";

#[derive(Debug, Deserialize)]
struct RunFile {
    config: ScrapeConfig,
    search: SearchRequest,
    #[serde(default)]
    browser: LaunchOptions,
    /// Where CSV exports go. Defaults to the working directory.
    #[serde(default)]
    output_dir: Option<PathBuf>,
    /// Also scrape the recommended-jobs page before searching
    #[serde(default)]
    recommended: bool,
}

impl RunFile {
    fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read run file {}", path.display()))?;
        let mut run: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse run file {}", path.display()))?;

        if let Ok(term) = std::env::var("SEARCH_TERM")
            && !term.trim().is_empty()
        {
            run.search.search_term = term;
        }
        if let Ok(location) = std::env::var("LOCATION") {
            run.search.location = Some(location).filter(|l| !l.trim().is_empty());
        }

        if run.search.search_term.trim().is_empty() {
            anyhow::bail!("search_term is empty; set it in the run file or SEARCH_TERM");
        }
        run.config.validate()?;
        Ok(run)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
                .add_directive("chromiumoxide::handler=off".parse()?)
                .add_directive("chromiumoxide::conn=off".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let run_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: kodegen-jobscrape <run-file.json>")?;
    let run_file = RunFile::load(&run_path)?;

    let session = launch_browser(&run_file.browser).await?;
    let driver = ChromeDriver::new(session.new_page().await?);

    let outcome = run(&driver, &run_file).await;
    if let Err(e) = &outcome {
        error!("Scrape failed: {}", e);
        save_page_source(&driver).await;
    }

    session.shutdown().await?;
    outcome.map_err(Into::into)
}

async fn run<D: PageDriver>(driver: &D, run_file: &RunFile) -> ScrapeResult<()> {
    let mut search = JobSearch::connect(driver, &run_file.config).await?;

    if run_file.recommended
        && let Some(recommended) = search.try_scrape_recommended().await
    {
        for area in &recommended.areas {
            println!("{}: {} job(s)", area.name, area.records.len());
        }
    }

    let request = &run_file.search;
    let summary = search
        .search(&request.search_term, request.location.as_deref())
        .await?;

    println!(
        "Found {} job(s) for '{}' over {} page(s) ({} card(s) skipped, ended {:?})",
        summary.records.len(),
        summary.search_term,
        summary.pages_visited,
        summary.error_count,
        summary.terminal
    );

    if summary.records.is_empty() {
        info!("No jobs found; skipping CSV export");
    } else {
        let output_dir = run_file
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let path = save_jobs_to_csv(&output_dir, &summary.search_term, &summary.records).await?;
        println!("Saved results to {}", path.display());
    }

    println!("{}", search.report_summary());
    Ok(())
}

async fn save_page_source<D: PageDriver>(driver: &D) {
    match driver.page_source().await {
        Ok(html) => match tokio::fs::write(PAGE_SOURCE_SNAPSHOT, html).await {
            Ok(()) => info!("Saved page source to {}", PAGE_SOURCE_SNAPSHOT),
            Err(e) => warn!("Failed to write {}: {}", PAGE_SOURCE_SNAPSHOT, e),
        },
        Err(e) => warn!("Could not capture page source: {}", e),
    }
}
