// LogLens - ui/panels/requests.rs
//
// Virtual-scrolling request table for the central area.
//
// Uses `ScrollArea::show_rows` so only visible rows are laid out. Timestamps
// are stored in UTC and displayed in the toolbar's zone, matching how the
// date inputs are interpreted.

use crate::app::state::AppState;
use crate::ui::theme;
use crate::util::constants;

/// Render the request table.
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    let total = state.filtered_indices.len().min(constants::MAX_RENDERED_ROWS);

    if total == 0 {
        ui.centered_and_justified(|ui| {
            if state.entries.is_empty() {
                ui.label("No requests loaded.\nPass a request-log export on the command line.");
            } else {
                ui.label("No requests match the current filters.");
            }
        });
        return;
    }

    let tz = state.toolbar.zone();
    let body = ui.visuals().text_color();

    header_row(ui);
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show_rows(ui, theme::ROW_HEIGHT, total, |ui, row_range| {
            for display_idx in row_range {
                let Some(&entry_idx) = state.filtered_indices.get(display_idx) else {
                    continue;
                };
                let Some(entry) = state.entries.get(entry_idx) else {
                    continue;
                };

                let ts = entry
                    .created_at
                    .with_timezone(&tz)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string();

                ui.horizontal(|ui| {
                    cell(ui, theme::COL_TIME_WIDTH, ts, body);
                    cell(
                        ui,
                        theme::COL_METHOD_WIDTH,
                        entry.method.to_ascii_uppercase(),
                        theme::method_colour(&entry.method),
                    );
                    cell(
                        ui,
                        theme::COL_STATUS_WIDTH,
                        entry.status.to_string(),
                        theme::status_colour(entry.status),
                    );
                    cell(ui, theme::COL_IP_WIDTH, entry.ip_address.clone(), body);
                    cell(ui, theme::COL_ENDPOINT_WIDTH, entry.endpoint.clone(), body);
                    ui.label(
                        egui::RichText::new(entry.user_uuid.as_deref().unwrap_or("-"))
                            .monospace()
                            .color(theme::MUTED_TEXT),
                    );
                });
            }
        });

    if state.filtered_indices.len() > total {
        ui.label(
            egui::RichText::new(format!(
                "Showing first {total} of {} matches.",
                state.filtered_indices.len()
            ))
            .small()
            .color(theme::MUTED_TEXT),
        );
    }
}

fn header_row(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        for (title, width) in [
            ("Time", theme::COL_TIME_WIDTH),
            ("Method", theme::COL_METHOD_WIDTH),
            ("Status", theme::COL_STATUS_WIDTH),
            ("IP Address", theme::COL_IP_WIDTH),
            ("Endpoint", theme::COL_ENDPOINT_WIDTH),
        ] {
            ui.add_sized(
                [width, theme::ROW_HEIGHT],
                egui::Label::new(egui::RichText::new(title).strong()),
            );
        }
        ui.label(egui::RichText::new("User").strong());
    });
}

fn cell(ui: &mut egui::Ui, width: f32, text: String, colour: egui::Color32) {
    ui.add_sized(
        [width, theme::ROW_HEIGHT],
        egui::Label::new(egui::RichText::new(text).monospace().color(colour)).truncate(),
    );
}
