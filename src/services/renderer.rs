//! Render orchestration: compose, load, await the marker, capture.
//!
//! The session is heavyweight (a browser process); leaking one under load
//! degrades the host, so release is guaranteed on every exit path here.

use std::time::Instant;

use crate::error::RenderError;
use crate::models::{ChartOptions, ImageFormat, RenderConfig, Table};
use crate::services::composer::compose_document;
use crate::services::detector::await_marker;
use crate::services::session::{CdpSession, ChartSession};

/// High-level chart renderer. One instance is shared by all handlers; each
/// render call acquires and releases its own browser session.
pub struct ChartRenderer {
    config: RenderConfig,
}

impl ChartRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render one chart to an encoded image.
    ///
    /// Runs the blocking CDP work on the blocking pool so the async runtime
    /// stays responsive while Chrome draws.
    pub async fn render(
        &self,
        table: &Table,
        options: &ChartOptions,
    ) -> Result<Vec<u8>, RenderError> {
        let document = compose_document(table, options);
        let config = self.config.clone();
        let (width, height, format) = (options.width, options.height, options.format);

        let started = Instant::now();

        let bytes = tokio::task::spawn_blocking(move || {
            let session = CdpSession::acquire(&config, width, height)?;
            drive_session(session, &document, &config, format)
        })
        .await
        .map_err(|e| RenderError::Task(e.to_string()))??;

        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = bytes.len(),
            "chart rendered"
        );

        Ok(bytes)
    }
}

/// Drive one acquired session through load, marker wait and capture.
///
/// Takes the session by value and closes it unconditionally, whatever the
/// inner steps return.
pub fn drive_session<S: ChartSession>(
    mut session: S,
    document: &str,
    config: &RenderConfig,
    format: ImageFormat,
) -> Result<Vec<u8>, RenderError> {
    let result = render_steps(&mut session, document, config, format);
    session.close();
    result
}

fn render_steps<S: ChartSession>(
    session: &mut S,
    document: &str,
    config: &RenderConfig,
    format: ImageFormat,
) -> Result<Vec<u8>, RenderError> {
    session.load(document)?;
    await_marker(session, config.marker_timeout, config.poll_interval)?;

    let bytes = session.capture(format)?;
    if bytes.is_empty() {
        return Err(RenderError::Capture("empty screenshot buffer".to_string()));
    }
    Ok(bytes)
}
