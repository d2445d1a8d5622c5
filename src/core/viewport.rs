//! Atlas-space to screen-space geometry.
//!
//! Conventions:
//! - Atlas space: sheet pixels, +Y down, origin at the sheet's top-left.
//! - Screen space: atlas space scaled by the zoom factor.
//!
//! Each rectangle field is scaled and rounded independently, never as an
//! aggregate. The overlay and the rendered bitmap may therefore disagree
//! by up to 1px at fractional zoom; that matches the pixel-snapping the
//! renderer does and keeps cell outlines crisp.

use crate::entities::atlas::CellRect;

/// Zoom clamp range of the overlay viewer.
pub const ZOOM_MIN: f32 = 0.25;
pub const ZOOM_MAX: f32 = 4.0;

/// Zoom change applied per wheel tick (with ctrl/meta held).
pub const ZOOM_WHEEL_STEP: f32 = 0.1;

/// Rectangle in zoomed screen space, already pixel-snapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Inclusive zoom bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    pub min: f32,
    pub max: f32,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self {
            min: ZOOM_MIN,
            max: ZOOM_MAX,
        }
    }
}

impl ZoomRange {
    pub fn clamp(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min, self.max)
    }
}

/// Map an atlas-space rect to screen space. Every field is rounded on
/// its own after scaling.
pub fn to_screen(rect: &CellRect, zoom: f32) -> ScreenRect {
    ScreenRect {
        x: (rect.x as f32 * zoom).round(),
        y: (rect.y as f32 * zoom).round(),
        w: (rect.w as f32 * zoom).round(),
        h: (rect.h as f32 * zoom).round(),
    }
}

/// Per-view zoom state. Owned by exactly one player or inspector panel;
/// views never share zoom.
#[derive(Debug, Clone)]
pub struct ViewportState {
    zoom: f32,
    range: ZoomRange,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            range: ZoomRange::default(),
        }
    }
}

impl ViewportState {
    pub fn with_zoom(zoom: f32) -> Self {
        let range = ZoomRange::default();
        Self {
            zoom: range.clamp(zoom),
            range,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = self.range.clamp(zoom);
    }

    /// Apply one wheel tick: positive delta zooms in, negative out.
    pub fn wheel_step(&mut self, delta: f32) {
        if delta > 0.0 {
            self.set_zoom(self.zoom + ZOOM_WHEEL_STEP);
        } else if delta < 0.0 {
            self.set_zoom(self.zoom - ZOOM_WHEEL_STEP);
        }
    }
}
