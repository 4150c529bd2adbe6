//! Reusable UI components

use crate::constants::MAX_DISPLAY_RESULTS;
use crate::theme;
use crate::types::Recommendation;
use eframe::egui;

/// Framed single-line text input matching the app's input styling.
/// Returns the inner TextEdit response so callers can detect Enter submits.
pub fn identifier_input(
    ui: &mut egui::Ui,
    id_salt: &str,
    hint: &str,
    value: &mut String,
) -> egui::Response {
    egui::Frame::new()
        .fill(theme::BG_INPUT)
        .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE))
        .corner_radius(theme::RADIUS_DEFAULT)
        .inner_margin(egui::Margin::symmetric(8, 6))
        .show(ui, |ui| {
            let id = ui.make_persistent_id(id_salt);
            ui.add(
                egui::TextEdit::singleline(value)
                    .id(id)
                    .hint_text(hint)
                    .frame(false)
                    .desired_width(220.0),
            )
        })
        .inner
}

/// The slice of a lane's results that fits in the table row.
pub fn visible_results(results: &[Recommendation]) -> &[Recommendation] {
    &results[..results.len().min(MAX_DISPLAY_RESULTS)]
}
