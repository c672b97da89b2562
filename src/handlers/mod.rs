/// Event handlers for the application
pub mod keyboard;
