// LogLens - ui/panels/filters.rs
//
// Filter toolbar: method and status selectors, debounced free-text inputs,
// the date-range popover with presets, and the clear button.
//
// Every widget reports into `FilterToolbar`; nothing here touches the
// committed filter state directly. The popover's open flag lives in egui
// memory, and a transition from open to closed is forwarded to
// `close_popover` so staged edits follow the apply-on-close rule.

use crate::app::state::AppState;
use crate::core::clock;
use crate::core::model::{DateRange, HttpMethod, LocalSelection, TextField};
use crate::core::preset::Preset;
use crate::ui::theme;
use crate::util::constants;
use chrono::{DateTime, Utc};
use std::time::Instant;

/// Render the filter toolbar.
pub fn render(ui: &mut egui::Ui, state: &mut AppState, now: DateTime<Utc>, instant: Instant) {
    ui.horizontal_wrapped(|ui| {
        method_selector(ui, state);
        status_selector(ui, state);

        for &field in TextField::all() {
            text_filter(ui, state, field, instant);
        }

        date_range_control(ui, state, now);

        if state.toolbar.has_active_filters(now) && ui.button("\u{2715} Clear Filters").clicked() {
            state.toolbar.clear(now);
            ui.memory_mut(|m| m.close_popup());
        }
    });
}

fn method_selector(ui: &mut egui::Ui, state: &mut AppState) {
    let current = state.toolbar.filters().method;
    let mut selected = current;
    egui::ComboBox::from_id_salt("method_filter")
        .width(theme::METHOD_SELECT_WIDTH)
        .selected_text(selected.map(|m| m.as_str()).unwrap_or("All Methods"))
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut selected, None, "All Methods");
            for &method in HttpMethod::all() {
                ui.selectable_value(&mut selected, Some(method), method.as_str());
            }
        });
    if selected != current {
        state.toolbar.set_method(selected);
    }
}

fn status_selector(ui: &mut egui::Ui, state: &mut AppState) {
    let current = state.toolbar.filters().status.clone();
    let mut selected = current.clone();
    let label = selected
        .as_deref()
        .map(status_label)
        .unwrap_or_else(|| "All Statuses".to_string());
    egui::ComboBox::from_id_salt("status_filter")
        .width(theme::STATUS_SELECT_WIDTH)
        .selected_text(label)
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut selected, None, "All Statuses");
            for &(code, _) in constants::STATUS_CODES {
                ui.selectable_value(&mut selected, Some(code.to_string()), status_label(code));
            }
        });
    if selected != current {
        state.toolbar.set_status(selected);
    }
}

/// "404 Not Found" for known codes, the bare code otherwise.
fn status_label(code: &str) -> String {
    constants::STATUS_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| code.to_string())
}

fn text_filter(ui: &mut egui::Ui, state: &mut AppState, field: TextField, instant: Instant) {
    let mut text = state.toolbar.text(field).to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut text)
            .hint_text(field.hint())
            .desired_width(theme::text_filter_width(field)),
    );
    if response.changed() {
        state.toolbar.edit_text(field, text, instant);
    }
    // Enter commits without waiting out the quiet period.
    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        state.toolbar.confirm_text(field);
    }
}

/// Button label summarising the committed date range. Times are shown only
/// when they differ from the whole-day defaults.
pub fn date_range_label(selection: &LocalSelection) -> String {
    let fmt = |d: chrono::NaiveDate| d.format(constants::DATE_LABEL_FORMAT).to_string();
    let dates = match (selection.range.from, selection.range.to) {
        (Some(from), Some(to)) if from == to => fmt(from),
        (Some(from), Some(to)) => format!("{} - {}", fmt(from), fmt(to)),
        (Some(from), None) => format!("From {}", fmt(from)),
        (None, Some(to)) => format!("Until {}", fmt(to)),
        (None, None) => return "Select date range".to_string(),
    };
    if selection.spans_whole_days() {
        dates
    } else {
        format!(
            "{dates} ({} - {})",
            selection.start.format(constants::TIME_OF_DAY_SHORT_FORMAT),
            selection.end.format(constants::TIME_OF_DAY_SHORT_FORMAT)
        )
    }
}

fn date_range_control(ui: &mut egui::Ui, state: &mut AppState, now: DateTime<Utc>) {
    let popup_id = ui.make_persistent_id("date_range_popover");
    let label = date_range_label(state.toolbar.selection());
    let response = ui.button(format!("\u{1f4c5} {label}"));

    if response.clicked() {
        ui.memory_mut(|m| m.toggle_popup(popup_id));
    }

    if ui.memory(|m| m.is_popup_open(popup_id)) && !state.toolbar.is_popover_open() {
        state.open_popover();
    }

    egui::popup_below_widget(
        ui,
        popup_id,
        &response,
        egui::PopupCloseBehavior::CloseOnClickOutside,
        |ui| popover_contents(ui, state, now),
    );

    // Closed by click-outside, Escape, or the toggle button.
    if !ui.memory(|m| m.is_popup_open(popup_id)) && state.toolbar.is_popover_open() {
        state.toolbar.close_popover();
    }
}

fn popover_contents(ui: &mut egui::Ui, state: &mut AppState, now: DateTime<Utc>) {
    ui.set_min_width(theme::POPOVER_MIN_WIDTH);

    ui.horizontal(|ui| {
        let active = state.toolbar.active_preset(now);
        for &preset in Preset::all() {
            if ui.selectable_label(active == Some(preset), preset.label()).clicked() {
                state.toolbar.select_preset(preset, now);
                ui.memory_mut(|m| m.close_popup());
            }
        }
    });

    ui.separator();

    let mut dates_changed = false;
    let mut start_edit: Option<String> = None;
    let mut end_edit: Option<String> = None;
    let (mut start_input, mut end_input) = state
        .toolbar
        .draft()
        .map(|d| (d.start_input.clone(), d.end_input.clone()))
        .unwrap_or_default();

    egui::Grid::new("date_range_grid")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("From");
            dates_changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut state.date_inputs.from)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(theme::DATE_INPUT_WIDTH),
                )
                .changed();
            ui.end_row();

            ui.label("To");
            dates_changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut state.date_inputs.to)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(theme::DATE_INPUT_WIDTH),
                )
                .changed();
            ui.end_row();

            ui.label("Start Time");
            if ui
                .add(
                    egui::TextEdit::singleline(&mut start_input)
                        .hint_text(constants::DEFAULT_START_TIME_OF_DAY)
                        .desired_width(theme::TIME_INPUT_WIDTH),
                )
                .changed()
            {
                start_edit = Some(start_input.clone());
            }
            ui.end_row();

            ui.label("End Time");
            if ui
                .add(
                    egui::TextEdit::singleline(&mut end_input)
                        .hint_text(constants::DEFAULT_END_TIME_OF_DAY)
                        .desired_width(theme::TIME_INPUT_WIDTH),
                )
                .changed()
            {
                end_edit = Some(end_input.clone());
            }
            ui.end_row();
        });

    if dates_changed {
        stage_dates(state);
    }
    if let Some(input) = start_edit {
        state.toolbar.stage_start_time(input);
    }
    if let Some(input) = end_edit {
        state.toolbar.stage_end_time(input);
    }

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!("Times in {}", state.toolbar.zone().name()))
                .small()
                .color(theme::MUTED_TEXT),
        )
        .on_hover_text(
            "Times are entered in your local timezone and sent to the server as UTC.",
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Apply").clicked() {
                state.toolbar.apply();
                ui.memory_mut(|m| m.close_popup());
            }
            if ui.button("Cancel").clicked() {
                state.toolbar.discard_draft();
                ui.memory_mut(|m| m.close_popup());
            }
        });
    });
}

/// Stage the date buffers into the draft. A cleared field unbounds that end;
/// text that does not parse yet keeps the previously staged date.
fn stage_dates(state: &mut AppState) {
    let previous = state
        .toolbar
        .draft()
        .map(|d| d.range)
        .unwrap_or_default();
    let read = |input: &str, prev| {
        if input.trim().is_empty() {
            None
        } else {
            clock::parse_date_input(input).or(prev)
        }
    };
    let range = DateRange {
        from: read(&state.date_inputs.from, previous.from),
        to: read(&state.date_inputs.to, previous.to),
    };
    state.toolbar.stage_range(range);
}
