// LogLens - gui.rs
//
// Top-level eframe::App implementation.
// Wires the filter toolbar, request table, and status bar together and
// drives the toolbar's deferred work (zone resolution, debounced commits).

use crate::app::state::AppState;
use crate::app::toolbar::ZonePhase;
use crate::core::timezone::{self, ZoneResolver};
use crate::ui;
use chrono::Utc;
use std::time::Instant;

/// The LogLens application.
pub struct LogLensApp {
    pub state: AppState,
    resolver: Box<dyn ZoneResolver>,
    first_frame_done: bool,
}

impl LogLensApp {
    /// Create a new application instance with the given state.
    ///
    /// The zone is not resolved here; the first frame renders with UTC and
    /// the real zone is applied on the next one.
    pub fn new(state: AppState, resolver: Box<dyn ZoneResolver>) -> Self {
        Self {
            state,
            resolver,
            first_frame_done: false,
        }
    }
}

impl eframe::App for LogLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Utc::now();

        if self.first_frame_done && self.state.toolbar.zone_phase() == ZonePhase::Pending {
            let tz = timezone::resolve_or_utc(self.resolver.as_ref());
            self.state.timezone_ready(tz, now);
        }

        // Fire any debounced text commits whose quiet period has elapsed.
        self.state.toolbar.tick(Instant::now());
        self.state.poll_commits();

        egui::TopBottomPanel::top("filter_toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui::panels::filters::render(ui, &mut self.state, now, Instant::now());
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(egui::Frame::side_top_panel(&ctx.style()).fill(ui::theme::STATUS_BG))
            .show(ctx, |ui| {
                ui::panels::status_bar::render(ui, &self.state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::requests::render(ui, &self.state);
        });

        // Commits made by widget interaction this frame.
        self.state.poll_commits();

        if let Some(wait) = self.state.toolbar.next_due(Instant::now()) {
            ctx.request_repaint_after(wait);
        }

        if !self.first_frame_done {
            self.first_frame_done = true;
            ctx.request_repaint();
        }
    }

    /// Called by eframe when the application window is about to close.
    ///
    /// Saves the committed filters and cancels pending debounced work.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.save_session();
        self.state.toolbar.teardown();
    }
}
