//! User settings stored as settings.json in the app data directory

use crate::constants::DEFAULT_API_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Recommendation service
    pub api_base_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            api_base_url: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Configured service base URL without a trailing slash, falling back to
    /// the default local service.
    pub fn api_base_url_or_default(&self) -> String {
        self.api_base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            window_x: Some(10.0),
            window_y: Some(20.0),
            window_w: Some(860.0),
            window_h: Some(520.0),
            api_base_url: Some("http://recs.internal:5000".into()),
        };
        settings.save(dir.path());

        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.window_w, Some(860.0));
        assert_eq!(loaded.api_base_url.as_deref(), Some("http://recs.internal:5000"));
    }

    #[test]
    fn missing_or_corrupt_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        assert!(Settings::load(dir.path()).api_base_url.is_none());

        std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
        assert!(Settings::load(dir.path()).api_base_url.is_none());
    }

    #[test]
    fn base_url_fallback_and_trailing_slash() {
        let mut settings = Settings::default();
        assert_eq!(settings.api_base_url_or_default(), DEFAULT_API_BASE_URL);

        settings.api_base_url = Some("http://localhost:8000/".into());
        assert_eq!(settings.api_base_url_or_default(), "http://localhost:8000");

        settings.api_base_url = Some("   ".into());
        assert_eq!(settings.api_base_url_or_default(), DEFAULT_API_BASE_URL);
    }
}
