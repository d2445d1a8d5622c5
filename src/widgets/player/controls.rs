//! Transport, scrub, and rate controls for the player panel.
//!
//! Every handler mutates exactly the documented scheduler/viewport state
//! and nothing else; repeated events with the same value are no-ops.

use crate::core::scheduler::{PlaybackScheduler, FPS_RANGE};
use crate::entities::atlas::AtlasModel;
use eframe::egui;

/// Pose selector. Switching pose rewinds the cursor; re-selecting the
/// current pose is a no-op.
pub fn pose_selector(ui: &mut egui::Ui, model: &AtlasModel, scheduler: &mut PlaybackScheduler) {
    let current = scheduler.pose().to_string();
    egui::ComboBox::from_id_salt("pose_selector")
        .selected_text(&current)
        .show_ui(ui, |ui| {
            for pose in model.unique_poses() {
                if ui.selectable_label(pose == current, pose).clicked() && pose != current {
                    scheduler.set_pose(pose);
                }
            }
        });
}

/// Play/pause toggle plus single-step buttons. Stepping pauses.
pub fn transport_row(ui: &mut egui::Ui, scheduler: &mut PlaybackScheduler, frame_count: usize) {
    if ui.button("⏮ Start").on_hover_text("Home").clicked() {
        scheduler.set_frame_index(0, frame_count);
    }
    if ui.button("◀ Step").on_hover_text("Left").clicked() {
        scheduler.step_backward(frame_count);
    }

    let play_text = if scheduler.is_playing() {
        "⏸ Pause"
    } else {
        "▶ Play"
    };
    if ui.button(play_text).on_hover_text("Space").clicked() {
        scheduler.toggle();
    }

    if ui.button("Step ▶").on_hover_text("Right").clicked() {
        scheduler.step_forward(frame_count);
    }
}

/// Scrub slider over the pose's frames, displayed 1-based. Dragging it
/// takes manual control of the cursor, which pauses playback.
pub fn scrub_slider(ui: &mut egui::Ui, scheduler: &mut PlaybackScheduler, frame_count: usize) {
    if frame_count == 0 {
        return;
    }
    let mut position = scheduler.frame_index() + 1;
    let response = ui.add(egui::Slider::new(&mut position, 1..=frame_count).text("frame"));
    if response.changed() {
        scheduler.set_frame_index(position - 1, frame_count);
    }
}

/// Integer FPS slider. The scheduler keeps its time accumulator across
/// rate changes so dragging never skips a frame.
pub fn fps_slider(ui: &mut egui::Ui, scheduler: &mut PlaybackScheduler) {
    let mut fps = scheduler.fps();
    let response = ui.add(egui::Slider::new(&mut fps, FPS_RANGE).text("fps"));
    if response.changed() {
        scheduler.set_fps(fps);
    }
}
