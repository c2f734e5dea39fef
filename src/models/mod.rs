pub mod config;
pub mod options;
pub mod table;

pub use config::RenderConfig;
pub use options::{ChartOptions, ChartType, ImageFormat};
pub use table::{Cell, Table};
