//! Editor internals exposed as a library for integration tests

pub mod app;
pub mod config;
pub mod handlers;
pub mod session;
pub mod surface;
pub mod ui;
pub mod widgets;

// Re-export main types for convenience
pub use app::{App, Dialog};
pub use session::DocumentSession;
pub use surface::Surface;
