//! Bottom status bar.

use crate::core::scheduler::PlaybackScheduler;
use crate::entities::atlas::AtlasModel;
use crate::entities::sheet::SheetStatus;
use eframe::egui;

/// Status bar component
pub struct StatusBar {
    pub current_message: String,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            current_message: String::new(),
        }
    }

    /// Render status bar at bottom of screen
    pub fn render(
        &self,
        ctx: &egui::Context,
        model: &AtlasModel,
        sheet: &SheetStatus,
        scheduler: &PlaybackScheduler,
        player_zoom: f32,
    ) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                // Sheet image reference
                ui.monospace(&model.meta().image);

                ui.separator();

                // Resolution
                match sheet {
                    SheetStatus::Loaded(img) => {
                        ui.monospace(format!("{:>4}x{:<4}", img.width, img.height));
                    }
                    SheetStatus::Loading => {
                        ui.monospace("loading…");
                    }
                    SheetStatus::Error(_) => {
                        ui.monospace("error");
                    }
                }

                ui.separator();

                // Pose + cursor
                let count = model.frame_count(scheduler.pose());
                if count > 0 {
                    ui.monospace(format!(
                        "{} {}/{}",
                        scheduler.pose(),
                        scheduler.frame_index() + 1,
                        count
                    ));
                } else {
                    ui.monospace(format!("{} (no frames)", scheduler.pose()));
                }

                ui.separator();

                // Zoom
                ui.monospace(format!("{:>5.0}%", player_zoom * 100.0));

                ui.separator();

                // Rate + transport state
                ui.monospace(format!("{} fps", scheduler.fps()));
                ui.monospace(if scheduler.is_playing() { "▶" } else { "⏸" });

                // Status message (if any)
                if !self.current_message.is_empty() {
                    ui.separator();
                    ui.monospace(&self.current_message);
                }
            });
        });
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}
