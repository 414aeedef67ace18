//! Browser lifecycle management
//!
//! Finds a Chrome/Chromium executable, launches it with a tracked CDP handler
//! task, and hands out pages for `ChromeDriver`.

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{info, warn};

use crate::utils::constants::CHROME_USER_AGENT;

/// How to launch the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchOptions {
    /// Headful by default so an existing signed-in profile can be reused and
    /// watched.
    pub headless: bool,

    /// Persistent profile directory. When `None` a temporary profile is
    /// created and removed on shutdown.
    pub user_data_dir: Option<PathBuf>,

    /// Explicit executable; otherwise `find_browser_executable` is used
    pub chrome_executable: Option<PathBuf>,

    pub window_width: u32,
    pub window_height: u32,

    /// CDP request timeout
    pub request_timeout_secs: u64,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: false,
            user_data_dir: None,
            chrome_executable: None,
            window_width: 1920,
            window_height: 1080,
            request_timeout_secs: 30,
        }
    }
}

/// Running browser plus its event handler task
///
/// The handler is aborted on drop. A temporary profile directory is removed
/// on `shutdown()`, or on drop as a fallback.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    temp_profile_dir: Option<PathBuf>,
}

impl BrowserSession {
    #[must_use]
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Open a new blank tab
    pub async fn new_page(&self) -> Result<Page> {
        self.browser
            .new_page("about:blank")
            .await
            .context("Failed to create blank page")
    }

    /// Close the browser, wait for the process to exit, remove a temporary profile
    pub async fn shutdown(mut self) -> Result<()> {
        info!("Shutting down browser");

        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        self.cleanup_temp_dir();
        Ok(())
    }

    /// Must run after the browser process has exited; Chrome holds file
    /// handles inside the profile until then.
    fn cleanup_temp_dir(&mut self) {
        if let Some(path) = self.temp_profile_dir.take() {
            info!("Cleaning up temp profile directory: {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to clean up temp directory {}: {}. Manual cleanup may be required.",
                    path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
        if self.temp_profile_dir.is_some() {
            warn!("BrowserSession dropped without shutdown() - removing temp profile in Drop");
            self.cleanup_temp_dir();
        }
    }
}

/// Find Chrome/Chromium executable on the system
///
/// Checks `CHROMIUM_PATH` first, then well-known install locations, then
/// `which` on Unix.
pub async fn find_browser_executable() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!(
                "Using browser from CHROMIUM_PATH environment variable: {}",
                path.display()
            );
            return Ok(path);
        }
        warn!(
            "CHROMIUM_PATH environment variable points to non-existent file: {}",
            path.display()
        );
    }

    let paths: &[&str] = if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files\Chromium\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "~/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
            "/usr/local/bin/chromium",
        ]
    };

    for path_str in paths {
        let path = match path_str.strip_prefix("~/") {
            Some(rest) => match dirs::home_dir() {
                Some(home) => home.join(rest),
                None => continue,
            },
            None => PathBuf::from(path_str),
        };

        if path.exists() {
            info!("Found browser at: {}", path.display());
            return Ok(path);
        }
    }

    if !cfg!(target_os = "windows") {
        for cmd in &["chromium", "chromium-browser", "google-chrome", "chrome"] {
            if let Ok(output) = Command::new("which").arg(cmd).output()
                && output.status.success()
            {
                let path_str = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path_str.is_empty() {
                    let path = PathBuf::from(path_str);
                    info!("Found browser using 'which' command: {}", path.display());
                    return Ok(path);
                }
            }
        }
    }

    Err(anyhow::anyhow!(
        "Chrome/Chromium executable not found. Set CHROMIUM_PATH or chrome_executable."
    ))
}

/// Launch a browser and track its handler task
pub async fn launch_browser(options: &LaunchOptions) -> Result<BrowserSession> {
    let chrome_path = match &options.chrome_executable {
        Some(path) => path.clone(),
        None => find_browser_executable().await?,
    };

    let (user_data_dir, temp_profile_dir) = match &options.user_data_dir {
        Some(dir) => (dir.clone(), None),
        None => {
            let dir =
                std::env::temp_dir().join(format!("kodegen_jobscrape_{}", std::process::id()));
            (dir.clone(), Some(dir))
        }
    };
    std::fs::create_dir_all(&user_data_dir).context("Failed to create user data directory")?;

    let mut config_builder = BrowserConfigBuilder::default()
        .request_timeout(Duration::from_secs(options.request_timeout_secs))
        .window_size(options.window_width, options.window_height)
        .user_data_dir(user_data_dir.clone())
        .chrome_executable(chrome_path);

    config_builder = if options.headless {
        config_builder.headless_mode(HeadlessMode::default())
    } else {
        config_builder.with_head()
    };

    let browser_config = config_builder
        .arg(format!("--user-agent={CHROME_USER_AGENT}"))
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .arg("--disable-notifications")
        .arg("--mute-audio")
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?;

    info!(
        "Launching browser (headless={}, profile={})",
        options.headless,
        user_data_dir.display()
    );

    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .context("Failed to launch browser")?;

    let handler = task::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                tracing::error!("Browser handler error: {:?}", e);
            }
        }
        info!("Browser event handler task completed");
    });

    Ok(BrowserSession {
        browser,
        handler,
        temp_profile_dir,
    })
}
