//! Diagnostic artifact capture.
//!
//! On a failing step the manager writes a full-window PNG plus a DOM dump
//! next to it; on a named step it writes the PNG alone. Capture problems
//! are logged and swallowed so a broken diagnostic can never fail the test
//! it is diagnosing.

use std::path::{Path, PathBuf};

use crate::driver::Driver;

/// Default directory for screenshots and DOM dumps
pub const DEFAULT_REPORT_DIR: &str = "reports/screenshots";

/// Writes screenshot and page-source artifacts for one test.
///
/// The output directory is explicit configuration, created lazily the
/// first time an artifact lands in it.
#[derive(Debug, Clone)]
pub struct ScreenshotManager {
    dir: PathBuf,
    test_name: String,
}

impl ScreenshotManager {
    /// Create a manager writing under [`DEFAULT_REPORT_DIR`]
    #[must_use]
    pub fn new(test_name: impl Into<String>) -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_REPORT_DIR),
            test_name: test_name.into(),
        }
    }

    /// Create a manager writing under a custom directory
    #[must_use]
    pub fn with_dir(dir: impl Into<PathBuf>, test_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            test_name: test_name.into(),
        }
    }

    /// The configured output directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Capture a PNG and DOM dump after a failure.
    ///
    /// Returns the PNG path, or `None` when any part of the capture failed;
    /// this never propagates an error.
    pub async fn capture_failure(&self, driver: &dyn Driver, method_name: &str) -> Option<PathBuf> {
        let filename = format!(
            "FAILURE_{}_{}_{}.png",
            self.test_name,
            method_name,
            Self::timestamp()
        );
        let png_path = match self.write_screenshot(driver, &filename).await {
            Some(path) => path,
            None => return None,
        };

        // DOM dump shares the PNG's name for easy pairing
        let source_name = filename.replace(".png", "_page_source.html");
        match driver.page_source().await {
            Ok(html) => {
                let source_path = self.dir.join(&source_name);
                if let Err(err) = std::fs::write(&source_path, html) {
                    tracing::warn!(path = %source_path.display(), %err, "failed to save page source");
                } else {
                    tracing::info!(path = %source_path.display(), "page source saved");
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to read page source");
            }
        }

        Some(png_path)
    }

    /// Capture a PNG at a named step.
    ///
    /// Returns the PNG path, or `None` when the capture failed; this never
    /// propagates an error.
    pub async fn capture_step(&self, driver: &dyn Driver, step_name: &str) -> Option<PathBuf> {
        let filename = format!("{}_{}_{}.png", self.test_name, step_name, Self::timestamp());
        self.write_screenshot(driver, &filename).await
    }

    async fn write_screenshot(&self, driver: &dyn Driver, filename: &str) -> Option<PathBuf> {
        if let Err(err) = std::fs::create_dir_all(&self.dir) {
            tracing::warn!(dir = %self.dir.display(), %err, "failed to create report directory");
            return None;
        }

        let data = match driver.screenshot().await {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(%err, "failed to capture screenshot");
                return None;
            }
        };

        let path = self.dir.join(filename);
        match std::fs::write(&path, data) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "screenshot saved");
                Some(path)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "failed to save screenshot");
                None
            }
        }
    }

    fn timestamp() -> String {
        chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
    }
}
