//! Render-completion detection.
//!
//! The chart library does its own asynchronous work (runtime fetch, layout,
//! draw) that the page-load lifecycle cannot observe. The only reliable
//! completion proof is the marker the render document sets from the
//! library's `ready` event, so this module polls for that marker under a
//! bounded deadline: `WaitingForMarker -> Ready` when it appears,
//! `WaitingForMarker -> TimedOut` when the deadline passes.

use std::time::{Duration, Instant};

use crate::error::RenderError;
use crate::services::session::ChartSession;

/// Wait until the session's completion marker is observable.
///
/// The marker is checked before the first sleep so a document that has
/// already finished drawing succeeds immediately. A deadline miss is a
/// distinct `Timeout` failure, never a silent blank capture.
pub fn await_marker<S: ChartSession>(
    session: &mut S,
    timeout: Duration,
    interval: Duration,
) -> Result<(), RenderError> {
    let deadline = Instant::now() + timeout;

    loop {
        if session.marker_set()? {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(RenderError::Timeout {
                waited_ms: timeout.as_millis() as u64,
            });
        }
        std::thread::sleep(interval);
    }
}
