//! Keyboard routing for the player.
//!
//! Transport keys are global to the window; they stay inert while a
//! widget owns keyboard focus.

use crate::core::scheduler::PlaybackScheduler;
use eframe::egui::{self, Key};

/// Space toggles playback; arrows single-step (taking manual control,
/// which pauses); Home rewinds to the first frame.
pub fn handle_keyboard(
    ctx: &egui::Context,
    scheduler: &mut PlaybackScheduler,
    frame_count: usize,
) {
    if ctx.wants_keyboard_input() {
        return;
    }

    let (space, right, left, home) = ctx.input(|i| {
        (
            i.key_pressed(Key::Space),
            i.key_pressed(Key::ArrowRight),
            i.key_pressed(Key::ArrowLeft),
            i.key_pressed(Key::Home),
        )
    });

    if space {
        scheduler.toggle();
    }
    if right {
        scheduler.step_forward(frame_count);
    }
    if left {
        scheduler.step_backward(frame_count);
    }
    if home {
        scheduler.set_frame_index(0, frame_count);
    }
}
