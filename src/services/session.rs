//! Render-session acquisition over the Chrome DevTools Protocol.
//!
//! One session owns exactly one browser process and one tab, lives for one
//! request, and is closed on every exit path. The `ChartSession` trait is
//! the seam that lets the orchestration and detector logic run against a
//! fake session in tests.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::browser::default_executable;
use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::RenderError;
use crate::models::{ImageFormat, RenderConfig};
use crate::services::composer::MARKER_ATTRIBUTE;

const JPEG_QUALITY: u32 = 90;

/// One exclusively-owned headless-browser page.
pub trait ChartSession {
    /// Load the render document and wait for the load strategy's own
    /// completion condition (not the chart's).
    fn load(&mut self, document: &str) -> Result<(), RenderError>;

    /// Check whether the completion marker is currently observable.
    fn marker_set(&mut self) -> Result<bool, RenderError>;

    /// Take a viewport screenshot in the requested encoding.
    fn capture(&mut self, format: ImageFormat) -> Result<Vec<u8>, RenderError>;

    /// Release the session. Consumes the handle so a closed session cannot
    /// be reused.
    fn close(self);
}

/// Resolve the browser binary: explicit override first, then the
/// platform-appropriate install found by `headless_chrome`.
pub fn resolve_executable(config: &RenderConfig) -> Result<PathBuf, RenderError> {
    if let Some(path) = &config.executable_path {
        return Ok(path.clone());
    }
    default_executable().map_err(RenderError::BrowserLaunch)
}

/// `ChartSession` backed by a real headless Chrome process.
pub struct CdpSession {
    browser: Browser,
    tab: Arc<Tab>,
    navigation_timeout: Duration,
}

impl CdpSession {
    /// Launch a browser process and open the tab for this request.
    pub fn acquire(config: &RenderConfig, width: u32, height: u32) -> Result<Self, RenderError> {
        let executable = resolve_executable(config)?;

        let mut args: Vec<&OsStr> = Vec::new();
        if config.disable_sandbox {
            // sandbox(false) below adds --no-sandbox; these two cover the
            // setuid helper and /dev/shm, both unavailable on serverless
            // hosts.
            args.push(OsStr::new("--disable-setuid-sandbox"));
            args.push(OsStr::new("--disable-dev-shm-usage"));
        }

        let launch_options = LaunchOptions::default_builder()
            .path(Some(executable))
            .headless(true)
            .sandbox(!config.disable_sandbox)
            .window_size(Some((width, height)))
            .args(args)
            .build()
            .map_err(|e| RenderError::BrowserLaunch(format!("invalid launch options: {e}")))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| RenderError::BrowserLaunch(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| RenderError::BrowserLaunch(format!("failed to open tab: {e}")))?;

        Ok(Self {
            browser,
            tab,
            navigation_timeout: config.navigation_timeout,
        })
    }
}

impl ChartSession for CdpSession {
    fn load(&mut self, document: &str) -> Result<(), RenderError> {
        // Navigating to a data URI and waiting for the navigation alone is
        // faster than set-content plus network-idle; chart completion is
        // detected separately through the marker.
        let uri = format!(
            "data:text/html;charset=utf-8,{}",
            utf8_percent_encode(document, NON_ALPHANUMERIC)
        );

        self.tab.set_default_timeout(self.navigation_timeout);

        self.tab
            .navigate_to(&uri)
            .map_err(|e| RenderError::Navigation(e.to_string()))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| RenderError::Navigation(e.to_string()))?;

        Ok(())
    }

    fn marker_set(&mut self) -> Result<bool, RenderError> {
        let expression = format!(
            "document.body !== null && document.body.getAttribute('{MARKER_ATTRIBUTE}') === '1'"
        );

        let result = self
            .tab
            .evaluate(&expression, false)
            .map_err(|e| RenderError::Evaluation(e.to_string()))?;

        Ok(result.value.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    fn capture(&mut self, format: ImageFormat) -> Result<Vec<u8>, RenderError> {
        let (cdp_format, quality) = match format {
            ImageFormat::Png => (Page::CaptureScreenshotFormatOption::Png, None),
            ImageFormat::Jpeg => (
                Page::CaptureScreenshotFormatOption::Jpeg,
                Some(JPEG_QUALITY),
            ),
        };

        self.tab
            .capture_screenshot(cdp_format, quality, None, true)
            .map_err(|e| RenderError::Capture(e.to_string()))
    }

    fn close(self) {
        // Dropping the Browser terminates the child process promptly.
        drop(self.tab);
        drop(self.browser);
    }
}
