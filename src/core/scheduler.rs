//! Fixed-step playback engine, decoupled from display refresh rate.
//!
//! # Timing Model
//!
//! FPS-based: each logical frame has a fixed duration (1000/fps ms). A
//! millisecond accumulator carries fractional time between ticks; the
//! drain loop consumes as many whole steps as have elapsed, so a slow
//! host catches up by skipping frames visually while wall-clock speed
//! stays accurate. A single conditional advance would silently drop
//! time under load.
//!
//! # Tick Loop
//!
//! One tick per host rendering opportunity. The very first tick after
//! construction, resume, or scrub contributes zero elapsed time, so
//! playback never opens with a large jump.
//!
//! # Manual Control
//!
//! Scrubbing or single-stepping takes the cursor away from the engine:
//! both transition to Paused so a queued automatic advance cannot
//! immediately override the user's choice.

use log::trace;
use std::time::Instant;

/// Default playback rate, matching the sheet-producing pipeline.
pub const DEFAULT_FPS: u32 = 8;

/// Inclusive FPS range exposed to the rate slider.
pub const FPS_RANGE: std::ops::RangeInclusive<u32> = 1..=24;

/// Playback state owner. One instance per active player; never shared.
#[derive(Debug, Clone)]
pub struct PlaybackScheduler {
    pose: String,
    /// 0-based cursor into the pose's frame list. Meaningless while the
    /// pose has zero frames; callers must check the count themselves.
    frame_index: usize,
    playing: bool,
    fps: u32,
    /// Fractional step time carried between ticks, in milliseconds.
    accumulated_ms: f64,
    /// Wall-clock anchor of the previous tick. `None` means the next
    /// tick is the first of a session and counts as zero elapsed time.
    last_tick: Option<Instant>,
}

impl PlaybackScheduler {
    pub fn new(pose: impl Into<String>, fps: u32, playing: bool) -> Self {
        Self {
            pose: pose.into(),
            frame_index: 0,
            playing,
            fps: fps.clamp(*FPS_RANGE.start(), *FPS_RANGE.end()),
            accumulated_ms: 0.0,
            last_tick: None,
        }
    }

    pub fn pose(&self) -> &str {
        &self.pose
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Start playback. Idempotent; resuming resets the accumulator and
    /// the tick anchor so no paused wall-time is replayed.
    pub fn play(&mut self) {
        if !self.playing {
            self.playing = true;
            self.accumulated_ms = 0.0;
            self.last_tick = None;
            trace!("Playback started at frame {}", self.frame_index);
        }
    }

    /// Pause playback. Idempotent. The cursor keeps its value so the
    /// renderer can keep showing the current frame.
    pub fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.accumulated_ms = 0.0;
            self.last_tick = None;
            trace!("Playback paused at frame {}", self.frame_index);
        }
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Select a pose. Keeps the play/pause state, rewinds the cursor and
    /// drops accumulated time.
    pub fn set_pose(&mut self, pose: impl Into<String>) {
        self.pose = pose.into();
        self.frame_index = 0;
        self.accumulated_ms = 0.0;
        trace!("Pose set to '{}', cursor reset", self.pose);
    }

    /// Change the playback rate. The accumulator is deliberately left
    /// untouched: dropping it on every slider notch would skip a frame
    /// each time the rate changes mid-drag.
    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps.clamp(*FPS_RANGE.start(), *FPS_RANGE.end());
    }

    /// Manual scrub. Pauses playback and places the cursor exactly.
    pub fn set_frame_index(&mut self, index: usize, frame_count: usize) {
        self.pause();
        if frame_count > 0 {
            self.frame_index = index % frame_count;
        }
    }

    /// Single-step forward, wrapping. Pauses playback.
    pub fn step_forward(&mut self, frame_count: usize) {
        self.pause();
        if frame_count > 0 {
            self.frame_index = (self.frame_index + 1) % frame_count;
        }
    }

    /// Single-step backward, wrapping. Pauses playback.
    pub fn step_backward(&mut self, frame_count: usize) {
        self.pause();
        if frame_count > 0 {
            self.frame_index = (self.frame_index + frame_count - 1) % frame_count;
        }
    }

    /// Wall-clock tick: measures elapsed time since the previous tick
    /// and feeds it to [`advance`](Self::advance). Call once per host
    /// rendering opportunity.
    pub fn tick(&mut self, frame_count: usize) -> usize {
        let now = Instant::now();
        let dt_ms = match self.last_tick {
            Some(prev) => now.duration_since(prev).as_secs_f64() * 1000.0,
            None => 0.0,
        };
        self.last_tick = Some(now);
        self.advance(dt_ms, frame_count)
    }

    /// Deterministic core of the tick: consume `dt_ms` of wall time and
    /// return the (possibly unchanged) current frame index.
    ///
    /// Paused or empty-pose ticks leave all state untouched.
    pub fn advance(&mut self, dt_ms: f64, frame_count: usize) -> usize {
        if !self.playing || frame_count == 0 {
            return self.frame_index;
        }

        let step_ms = 1000.0 / self.fps as f64;
        self.accumulated_ms += dt_ms;
        while self.accumulated_ms >= step_ms {
            self.accumulated_ms -= step_ms;
            self.frame_index = (self.frame_index + 1) % frame_count;
        }
        self.frame_index
    }

    /// Accumulator value, exposed for the rate-change policy tests.
    pub fn accumulated_ms(&self) -> f64 {
        self.accumulated_ms
    }
}

impl Default for PlaybackScheduler {
    fn default() -> Self {
        Self::new(String::new(), DEFAULT_FPS, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_ticks_advance_one_frame_each() {
        let mut s = PlaybackScheduler::new("idle", 8, true);
        // stepMs = 125 at 8 fps
        assert_eq!(s.advance(125.0, 6), 1);
        assert_eq!(s.advance(125.0, 6), 2);
        assert_eq!(s.advance(125.0, 6), 3);
    }

    #[test]
    fn burst_tick_consumes_multiple_steps() {
        let mut s = PlaybackScheduler::new("idle", 8, true);
        // floor(300 / 125) = 2 whole steps, 50 ms carried over
        assert_eq!(s.advance(300.0, 6), 2);
        assert!((s.accumulated_ms() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn short_ticks_accumulate_until_a_step_fits() {
        let mut s = PlaybackScheduler::new("idle", 8, true);
        assert_eq!(s.advance(60.0, 6), 0);
        assert_eq!(s.advance(60.0, 6), 0);
        // 180 ms total - one step consumed, 55 ms remains
        assert_eq!(s.advance(60.0, 6), 1);
        assert!((s.accumulated_ms() - 55.0).abs() < 1e-9);
    }

    #[test]
    fn wraps_modulo_frame_count() {
        let mut s = PlaybackScheduler::new("idle", 8, true);
        s.advance(125.0 * 5.0, 4);
        assert_eq!(s.frame_index(), 1); // 5 mod 4
    }

    #[test]
    fn paused_tick_changes_nothing() {
        let mut s = PlaybackScheduler::new("idle", 8, false);
        assert_eq!(s.advance(1000.0, 6), 0);
        assert_eq!(s.accumulated_ms(), 0.0);
    }

    #[test]
    fn empty_pose_never_advances() {
        let mut s = PlaybackScheduler::new("walk", 8, true);
        assert_eq!(s.advance(10_000.0, 0), 0);
        assert_eq!(s.frame_index(), 0);
    }

    #[test]
    fn play_pause_are_idempotent() {
        let mut s = PlaybackScheduler::new("idle", 8, true);
        s.advance(60.0, 6);
        let before = (s.is_playing(), s.frame_index());
        s.play();
        assert_eq!((s.is_playing(), s.frame_index()), before);
        assert!((s.accumulated_ms() - 60.0).abs() < 1e-9);

        s.pause();
        s.pause();
        assert!(!s.is_playing());
        assert_eq!(s.accumulated_ms(), 0.0);
    }

    #[test]
    fn pose_switch_resets_cursor() {
        let mut s = PlaybackScheduler::new("walk", 8, true);
        s.advance(500.0, 8);
        assert_ne!(s.frame_index(), 0);
        s.set_pose("idle");
        assert_eq!(s.frame_index(), 0);
        assert_eq!(s.accumulated_ms(), 0.0);
        assert!(s.is_playing());
    }

    #[test]
    fn fps_change_preserves_accumulator() {
        let mut s = PlaybackScheduler::new("idle", 8, true);
        s.advance(100.0, 6); // below one step, stays accumulated
        s.set_fps(12);
        assert!((s.accumulated_ms() - 100.0).abs() < 1e-9);
        assert_eq!(s.frame_index(), 0);
        // 100 ms carried + 20 ms covers one 83.3 ms step at 12 fps
        assert_eq!(s.advance(20.0, 6), 1);
    }

    #[test]
    fn manual_scrub_pauses_and_sets_exactly() {
        let mut s = PlaybackScheduler::new("idle", 8, true);
        s.set_frame_index(3, 6);
        assert!(!s.is_playing());
        assert_eq!(s.frame_index(), 3);
    }

    #[test]
    fn steps_wrap_and_pause() {
        let mut s = PlaybackScheduler::new("idle", 8, true);
        s.step_backward(4);
        assert!(!s.is_playing());
        assert_eq!(s.frame_index(), 3);
        s.step_forward(4);
        assert_eq!(s.frame_index(), 0);
    }

    #[test]
    fn resume_starts_a_fresh_session() {
        let mut s = PlaybackScheduler::new("idle", 8, true);
        s.advance(100.0, 6);
        s.pause();
        s.play();
        assert_eq!(s.accumulated_ms(), 0.0);
        // First tick after resume has no anchor: dt counts as 0.
        assert_eq!(s.tick(6), 0);
    }

    #[test]
    fn first_tick_contributes_zero_elapsed_time() {
        let mut s = PlaybackScheduler::new("idle", 1, true);
        // Even at 1 fps (1000 ms step) the opening tick cannot advance.
        assert_eq!(s.tick(6), 0);
        assert_eq!(s.accumulated_ms(), 0.0);
    }

    #[test]
    fn fps_is_clamped_to_slider_range() {
        let mut s = PlaybackScheduler::new("idle", 8, true);
        s.set_fps(0);
        assert_eq!(s.fps(), 1);
        s.set_fps(240);
        assert_eq!(s.fps(), 24);
    }

    #[test]
    fn empty_pose_selection_plays_nothing_and_full_pose_wraps() {
        use crate::entities::atlas::{
            AtlasDescriptor, AtlasMeta, AtlasModel, CellRect, Dims, FrameDef,
        };

        let frames = (1..=4)
            .map(|i| FrameDef {
                pose: "idle".to_string(),
                index: i,
                frame: CellRect {
                    x: (i - 1) * 32,
                    y: 0,
                    w: 32,
                    h: 32,
                },
            })
            .collect();
        let model = AtlasModel::from_descriptor(AtlasDescriptor {
            meta: AtlasMeta {
                image: "hero_sheet.png".to_string(),
                size: Dims { w: 128, h: 32 },
                cell: Dims { w: 32, h: 32 },
                columns: 4,
            },
            frames,
        })
        .unwrap();

        // "walk" exists nowhere in the atlas: a valid no-animation
        // state, the scheduler simply never advances.
        let mut s = PlaybackScheduler::new("walk", 4, true);
        for _ in 0..4 {
            s.advance(250.0, model.frame_count(s.pose()));
        }
        assert_eq!(s.frame_index(), 0);

        // Switching to "idle" at 4 fps and running 1000 ms in 250 ms
        // ticks visits all four frames once and wraps back to 0.
        s.set_pose("idle");
        let mut visited = Vec::new();
        for _ in 0..4 {
            visited.push(s.advance(250.0, model.frame_count(s.pose())));
        }
        assert_eq!(visited, vec![1, 2, 3, 0]);
    }

    #[test]
    fn full_second_at_four_fps_wraps_a_four_frame_pose() {
        // End-to-end scenario: pose "idle" with 4 frames, fps=4 (250 ms
        // step), 1000 ms of ticks in 250 ms slices visits every frame
        // once and comes back to 0.
        let mut s = PlaybackScheduler::new("idle", 4, true);
        let mut visited = vec![s.frame_index()];
        for _ in 0..4 {
            visited.push(s.advance(250.0, 4));
        }
        assert_eq!(visited, vec![0, 1, 2, 3, 0]);
    }
}
