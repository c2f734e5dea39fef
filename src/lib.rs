//! Chartshot
//!
//! Chart-to-image rendering service driven by headless Chrome.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
