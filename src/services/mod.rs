pub mod composer;
pub mod detector;
pub mod renderer;
pub mod session;

pub use composer::compose_document;
pub use renderer::ChartRenderer;
pub use session::{CdpSession, ChartSession};
