//! App module - contains the main application state and logic

mod fetch;

use crate::api::RecommendationClient;
use crate::constants::DEFAULT_API_BASE_URL;
use crate::settings::Settings;
use crate::theme;
use crate::types::Recommendation;
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Hand-off queue for background fetch results. Tasks push as they finish,
/// the UI thread drains once per frame; the last arrival wins.
pub(crate) type ResultSlot = Arc<Mutex<Vec<Vec<Recommendation>>>>;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    // Form inputs
    pub(crate) person_id: String,
    pub(crate) article_id: String,
    // Lane results (replaced wholesale on each successful fetch)
    pub(crate) collab_results: Vec<Recommendation>,
    pub(crate) content_results: Vec<Recommendation>,
    pub(crate) collab_slot: ResultSlot,
    pub(crate) content_slot: ResultSlot,
    // Outstanding request count per lane, so the spinner survives until the
    // last overlapping response lands
    pub(crate) collab_in_flight: u32,
    pub(crate) content_in_flight: u32,
    // Service
    pub(crate) client: RecommendationClient,
    pub(crate) base_url: String,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Settings window
    pub(crate) show_settings: bool,
    pub(crate) base_url_edit: String,
    // Window state
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let base_url = settings.api_base_url_or_default();

        Self {
            person_id: String::new(),
            article_id: String::new(),
            collab_results: Vec::new(),
            content_results: Vec::new(),
            collab_slot: Arc::new(Mutex::new(Vec::new())),
            content_slot: Arc::new(Mutex::new(Vec::new())),
            collab_in_flight: 0,
            content_in_flight: 0,
            client: RecommendationClient::new(base_url.clone()),
            base_url,
            runtime: tokio::runtime::Runtime::new().unwrap(),
            show_settings: false,
            base_url_edit: String::new(),
            logo_texture: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            api_base_url: Some(self.base_url.clone()),
        };
        settings.save(&self.data_dir);
    }

    /// Apply the edited base URL and rebuild the client. An empty edit falls
    /// back to the default local service.
    pub fn apply_base_url(&mut self) {
        let trimmed = self.base_url_edit.trim().trim_end_matches('/');
        self.base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        self.client = RecommendationClient::new(self.base_url.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_slot_preserves_arrival_order() {
        let slot: ResultSlot = Arc::new(Mutex::new(Vec::new()));
        slot.lock().unwrap().push(vec![Recommendation::placeholder(1)]);
        slot.lock().unwrap().push(vec![
            Recommendation::placeholder(2),
            Recommendation::placeholder(3),
        ]);

        let landed = std::mem::take(&mut *slot.lock().unwrap());
        assert_eq!(landed.len(), 2);
        // The later arrival is last, so draining keeps it
        assert_eq!(landed.last().unwrap().len(), 2);
        assert!(slot.lock().unwrap().is_empty());
    }
}
