//! Application constants and configuration

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of recommendations shown per table row.
pub const MAX_DISPLAY_RESULTS: usize = 5;
