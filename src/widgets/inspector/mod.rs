//! Inspector panel: the full sheet with keyed cell overlays, hover
//! identification, pose filtering, and descriptor export.

use crate::core::inspector::{
    export_descriptor, export_filename, overlay_rects, InspectorState, PoseFilter,
};
use crate::core::viewport::to_screen;
use crate::entities::atlas::{AtlasModel, CellRect};
use crate::entities::sheet::SheetStatus;
use crate::widgets::player::{handle_wheel_zoom, FrameRenderer};
use eframe::egui::{self, Color32, RichText, StrokeKind};
use log::{info, warn};

/// Cell outline and hover fill colors.
const OUTLINE: Color32 = Color32::from_rgba_premultiplied(90, 160, 255, 160);
const HOVER_FILL: Color32 = Color32::from_rgba_premultiplied(60, 110, 180, 60);

/// Render the inspector panel. Returns a status message when an export
/// happened this frame.
pub fn show(
    ui: &mut egui::Ui,
    state: &mut InspectorState,
    model: &AtlasModel,
    sheet: &SheetStatus,
    renderer: &mut FrameRenderer,
) -> Option<String> {
    let mut status_msg = None;

    ui.horizontal(|ui| {
        ui.label("Filter:");
        filter_selector(ui, state, model);
        ui.separator();
        if ui.button("Export JSON").clicked() {
            status_msg = Some(export_dialog(model));
        }
    });
    ui.horizontal(|ui| {
        ui.monospace(format!(
            "{} cells  cell {}x{}  {} cols  {:>5.0}%",
            state.filtered_frames(model).len(),
            model.meta().cell.w,
            model.meta().cell.h,
            model.meta().columns,
            state.view.zoom() * 100.0
        ));
    });
    ui.separator();

    match sheet {
        SheetStatus::Loading => {
            ui.label(RichText::new("Loading sheet image…").color(Color32::GRAY));
        }
        SheetStatus::Error(msg) => {
            ui.label(RichText::new(format!("Sheet failed to load: {}", msg)).color(Color32::RED));
        }
        SheetStatus::Loaded(image) => {
            egui::ScrollArea::both()
                .id_salt("inspector_scroll")
                .show(ui, |ui| {
                    sheet_view(ui, state, model, image, renderer);
                });
        }
    }

    status_msg
}

fn filter_selector(ui: &mut egui::Ui, state: &mut InspectorState, model: &AtlasModel) {
    egui::ComboBox::from_id_salt("pose_filter")
        .selected_text(state.filter.label().to_string())
        .show_ui(ui, |ui| {
            if ui
                .selectable_label(state.filter == PoseFilter::All, "All poses")
                .clicked()
            {
                state.filter = PoseFilter::All;
            }
            for pose in model.unique_poses() {
                let selected = matches!(&state.filter, PoseFilter::Pose(p) if p == pose);
                if ui.selectable_label(selected, pose).clicked() {
                    state.filter = PoseFilter::Pose(pose.to_string());
                }
            }
        });
}

/// The zoomed sheet with one keyed overlay rect per visible frame.
fn sheet_view(
    ui: &mut egui::Ui,
    state: &mut InspectorState,
    model: &AtlasModel,
    image: &crate::entities::sheet::SheetImage,
    renderer: &mut FrameRenderer,
) {
    let zoom = state.view.zoom();
    let meta = model.meta();

    // Sheet destination goes through the same per-field rounding as the
    // overlays; they may drift apart by 1px at fractional zoom, which
    // is the documented alignment tolerance.
    let sheet_rect = to_screen(
        &CellRect {
            x: 0,
            y: 0,
            w: meta.size.w,
            h: meta.size.h,
        },
        zoom,
    );

    let texture = renderer.sheet_texture(ui.ctx(), image);
    let (area, response) =
        ui.allocate_exact_size(egui::vec2(sheet_rect.w, sheet_rect.h), egui::Sense::hover());
    if !ui.is_rect_visible(area) {
        return;
    }

    let painter = ui.painter();
    painter.image(
        texture.id(),
        area,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        Color32::WHITE,
    );

    let rects = overlay_rects(state.filtered_frames(model), zoom);
    let pointer = response.hover_pos();

    // Last hit wins: matches draw order, so the topmost rect is the
    // hovered one. At most one key is hovered at a time.
    let mut hovered_key = None;
    for overlay in &rects {
        let rect = egui::Rect::from_min_size(
            area.min + egui::vec2(overlay.rect.x, overlay.rect.y),
            egui::vec2(overlay.rect.w, overlay.rect.h),
        );
        if let Some(pos) = pointer
            && rect.contains(pos)
        {
            hovered_key = Some(overlay.key.clone());
        }
    }
    state.set_hovered(hovered_key);

    for overlay in &rects {
        let rect = egui::Rect::from_min_size(
            area.min + egui::vec2(overlay.rect.x, overlay.rect.y),
            egui::vec2(overlay.rect.w, overlay.rect.h),
        );
        let hovered = state.hovered() == Some(overlay.key.as_str());
        if hovered {
            painter.rect_filled(rect, 0.0, HOVER_FILL);
        }
        painter.rect_stroke(
            rect,
            0.0,
            egui::Stroke::new(if hovered { 2.0 } else { 1.0 }, OUTLINE),
            StrokeKind::Inside,
        );
    }

    if let Some(key) = state.hovered()
        && let Some(overlay) = rects.iter().find(|r| r.key == key)
        && let Some(pos) = pointer
    {
        painter.text(
            pos + egui::vec2(12.0, -8.0),
            egui::Align2::LEFT_BOTTOM,
            format!("{} ({}x{})", overlay.key, overlay.rect.w, overlay.rect.h),
            egui::FontId::monospace(12.0),
            Color32::WHITE,
        );
    }

    handle_wheel_zoom(ui, &response, &mut state.view);
}

/// Save the descriptor verbatim through a file dialog.
fn export_dialog(model: &AtlasModel) -> String {
    let suggested = export_filename(model.meta());
    let Some(path) = rfd::FileDialog::new()
        .set_file_name(&suggested)
        .add_filter("JSON", &["json"])
        .save_file()
    else {
        return "Export cancelled".to_string();
    };

    match std::fs::write(&path, export_descriptor(model)) {
        Ok(()) => {
            info!("Descriptor exported to {}", path.display());
            format!("Exported {}", path.display())
        }
        Err(e) => {
            warn!("Descriptor export failed: {}", e);
            format!("Export failed: {}", e)
        }
    }
}
