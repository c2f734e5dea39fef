pub mod chart;
pub mod diag;

pub use chart::{
    handle_chart_image, handle_chart_page, __path_handle_chart_image, __path_handle_chart_page,
};
pub use diag::{handle_diag, DiagResponse, __path_handle_diag};
