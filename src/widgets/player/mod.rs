//! Player panel: pose selection, transport controls, and the animated
//! frame view.

pub mod controls;
pub mod renderer;

pub use renderer::FrameRenderer;

use crate::core::scheduler::PlaybackScheduler;
use crate::core::viewport::ViewportState;
use crate::entities::atlas::AtlasModel;
use crate::entities::sheet::SheetStatus;
use eframe::egui::{self, Color32, RichText};

/// Render the player panel into `ui`.
///
/// The frame area degrades explicitly: a loading or failed sheet and an
/// empty pose each show a message instead of drawing, so no state can
/// index out of the frame list or sample a missing bitmap.
pub fn show(
    ui: &mut egui::Ui,
    model: &AtlasModel,
    sheet: &SheetStatus,
    scheduler: &mut PlaybackScheduler,
    view: &mut ViewportState,
    renderer: &mut FrameRenderer,
) {
    let frame_count = model.frame_count(scheduler.pose());

    ui.horizontal(|ui| {
        ui.label("Pose:");
        controls::pose_selector(ui, model, scheduler);
        ui.separator();
        controls::transport_row(ui, scheduler, frame_count);
        ui.separator();
        ui.monospace(format!("{:>5.0}%", view.zoom() * 100.0));
    });
    ui.horizontal(|ui| {
        controls::scrub_slider(ui, scheduler, frame_count);
        controls::fps_slider(ui, scheduler);
    });
    ui.separator();

    if frame_count == 0 {
        ui.label(
            RichText::new(format!("No frames for pose '{}'", scheduler.pose()))
                .color(Color32::LIGHT_YELLOW),
        );
        return;
    }

    match sheet {
        SheetStatus::Loading => {
            // ImageNotReady: skip the draw, the update loop retries
            // once the decode lands.
            ui.label(RichText::new("Loading sheet image…").color(Color32::GRAY));
        }
        SheetStatus::Error(msg) => {
            ui.label(RichText::new(format!("Sheet failed to load: {}", msg)).color(Color32::RED));
        }
        SheetStatus::Loaded(image) => {
            let frames = model.frames_for_pose(scheduler.pose());
            // Cursor is always in range while the pose is non-empty;
            // modulo guards a pose switch racing the same tick.
            let frame = &frames[scheduler.frame_index() % frames.len()];
            let response =
                renderer.paint_frame(ui, image, frame, &model.meta().cell, view.zoom());
            handle_wheel_zoom(ui, &response, view);
        }
    }
}

/// Wheel zoom, taken only while ctrl/meta is held so plain scrolling
/// keeps moving the page.
pub fn handle_wheel_zoom(ui: &egui::Ui, response: &egui::Response, view: &mut ViewportState) {
    if !response.hovered() {
        return;
    }
    let (scroll_y, modifiers) = ui.input(|i| (i.raw_scroll_delta.y, i.modifiers));
    if modifiers.command && scroll_y != 0.0 {
        view.wheel_step(scroll_y);
    }
}
