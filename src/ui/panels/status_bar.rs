// LogLens - ui/panels/status_bar.rs
//
// Bottom status bar: status message, pending-edit marker, timezone, commit
// count and match counts. Debug mode adds the committed query string.

use crate::app::state::AppState;
use crate::app::toolbar::ZonePhase;
use crate::core::model::TextField;
use crate::ui::theme;

/// Render the status bar contents.
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(&state.status_message).color(theme::STATUS_TEXT));

        if TextField::all()
            .iter()
            .any(|&f| state.toolbar.is_text_pending(f))
        {
            ui.separator();
            ui.label(egui::RichText::new("\u{22ef} typing").color(theme::MUTED_TEXT));
        }

        if !state.warnings.is_empty() {
            ui.separator();
            ui.label(
                egui::RichText::new(format!("\u{26a0} {} warning(s)", state.warnings.len()))
                    .color(egui::Color32::from_rgb(234, 179, 8)), // Yellow 500
            )
            .on_hover_text(state.warnings.join("\n"));
        }

        if state.debug_mode {
            ui.separator();
            ui.label(
                egui::RichText::new(format!("?{}", state.query_string()))
                    .monospace()
                    .small()
                    .color(theme::MUTED_TEXT),
            );
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let total = state.entries.len();
            let filtered = state.filtered_indices.len();
            if total > 0 {
                ui.label(format!("{filtered}/{total} requests"));
                ui.separator();
            }
            ui.label(format!("{} commits", state.commit_count));
            ui.separator();
            let zone = match state.toolbar.zone_phase() {
                ZonePhase::Ready(tz) => tz.name().to_string(),
                ZonePhase::Pending => "resolving timezone\u{2026}".to_string(),
            };
            ui.label(egui::RichText::new(zone).color(theme::MUTED_TEXT));
        });
    });
}
