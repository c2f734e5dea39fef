use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that overrides browser-binary resolution. Useful for
/// local development against a system Chrome/Chromium install.
pub const CHROME_PATH_ENV: &str = "CHROME_PATH";

/// Browser and timing configuration for one render session.
///
/// This is an explicit value handed into session acquisition; there is no
/// process-global browser state. The navigation timeout must stay strictly
/// shorter than the marker timeout so a slow navigation fails fast and is
/// distinguishable from a slow chart draw.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Explicit browser binary, bypassing platform resolution.
    pub executable_path: Option<PathBuf>,

    /// Launch without the Chromium sandbox. Required in restricted
    /// serverless environments (no setuid helper, no /dev/shm).
    pub disable_sandbox: bool,

    /// Deadline for the data-URI navigation itself.
    pub navigation_timeout: Duration,

    /// Deadline for the completion marker to appear after navigation.
    pub marker_timeout: Duration,

    /// Interval between completion-marker polls.
    pub poll_interval: Duration,
}

impl RenderConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let executable_path = std::env::var(CHROME_PATH_ENV).ok().map(PathBuf::from);

        Self {
            executable_path,
            ..Self::default()
        }
    }

    /// Whether the binary-path override env var is in effect.
    pub fn has_env_override(&self) -> bool {
        self.executable_path.is_some()
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            executable_path: None,
            disable_sandbox: true,
            navigation_timeout: Duration::from_secs(5),
            marker_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(100),
        }
    }
}
