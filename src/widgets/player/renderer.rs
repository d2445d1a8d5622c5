//! Frame drawing from the packed sheet.
//!
//! The sheet is uploaded to the GPU once per distinct image and sampled
//! with nearest-neighbor filtering; smoothing would smear pixel art at
//! any non-integer zoom. The destination size is derived from the
//! nominal cell size, not the individual frame rect, so every frame of
//! a pose lands on one canvas size and the panel never resizes
//! mid-animation.

use crate::entities::atlas::{CellRect, Dims, FrameDef};
use crate::entities::sheet::SheetImage;
use eframe::egui::{self, Color32, ColorImage, TextureHandle, TextureOptions};
use log::{debug, trace};
use std::path::PathBuf;

/// Owns the uploaded sheet texture and the player's destination-size
/// cache. One per app; player and inspector sample the same texture.
pub struct FrameRenderer {
    texture: Option<TextureHandle>,
    /// Source of the uploaded texture; re-upload only on change.
    uploaded_from: Option<PathBuf>,
    /// Cached destination size, updated only when the computed size
    /// differs from the current one.
    dest: egui::Vec2,
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self {
            texture: None,
            uploaded_from: None,
            dest: egui::Vec2::ZERO,
        }
    }

    /// Destination size for a pose's frames: nominal cell size scaled by
    /// zoom, each axis rounded independently.
    pub fn dest_size(cell: &Dims, zoom: f32) -> egui::Vec2 {
        egui::vec2(
            (cell.w as f32 * zoom).round(),
            (cell.h as f32 * zoom).round(),
        )
    }

    /// Normalized UV rect selecting `rect` out of a `sheet_w`x`sheet_h`
    /// texture.
    pub fn uv_rect(rect: &CellRect, sheet_w: u32, sheet_h: u32) -> egui::Rect {
        let w = sheet_w as f32;
        let h = sheet_h as f32;
        egui::Rect::from_min_max(
            egui::pos2(rect.x as f32 / w, rect.y as f32 / h),
            egui::pos2((rect.x + rect.w) as f32 / w, (rect.y + rect.h) as f32 / h),
        )
    }

    /// The sheet texture, uploading on first use or when the source
    /// image changed. NEAREST filtering, no mipmaps.
    pub fn sheet_texture(&mut self, ctx: &egui::Context, sheet: &SheetImage) -> TextureHandle {
        let stale = self.uploaded_from.as_deref() != Some(sheet.source.as_path());
        if self.texture.is_none() || stale {
            let size = [sheet.width as usize, sheet.height as usize];
            let color_image = ColorImage::from_rgba_unmultiplied(size, &sheet.rgba);
            debug!(
                "Uploading sheet texture {}x{} from {}",
                sheet.width,
                sheet.height,
                sheet.source.display()
            );
            self.texture = Some(ctx.load_texture("sheet", color_image, TextureOptions::NEAREST));
            self.uploaded_from = Some(sheet.source.clone());
        }
        self.texture
            .as_ref()
            .expect("sheet texture uploaded above")
            .clone()
    }

    /// Paint one frame at the uniform cell-based size. Returns the
    /// response of the painted area for hover/zoom handling.
    pub fn paint_frame(
        &mut self,
        ui: &mut egui::Ui,
        sheet: &SheetImage,
        frame: &FrameDef,
        cell: &Dims,
        zoom: f32,
    ) -> egui::Response {
        let dest = Self::dest_size(cell, zoom);
        if dest != self.dest {
            trace!("Player surface resized to {}x{}", dest.x, dest.y);
            self.dest = dest;
        }

        let texture = self.sheet_texture(ui.ctx(), sheet);
        let (rect, response) = ui.allocate_exact_size(self.dest, egui::Sense::hover());
        if ui.is_rect_visible(rect) {
            let uv = Self::uv_rect(&frame.frame, sheet.width, sheet.height);
            ui.painter().image(texture.id(), rect, uv, Color32::WHITE);
        }
        response
    }
}
