//! Overlay geometry, hover tracking, and descriptor export.
//!
//! The inspector consumes the full (or pose-filtered) frame list plus a
//! zoom factor and produces one keyed rectangle per visible cell. Hover
//! is a pure presentation state: at most one key at a time, set from
//! pointer containment each repaint.

use crate::core::viewport::{to_screen, ScreenRect, ViewportState};
use crate::entities::atlas::{AtlasMeta, AtlasModel, FrameDef};
use std::path::Path;

/// One keyed overlay rectangle for a visible frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRect {
    /// `"{pose}-{index}"`, unique per visible frame; hover state tracks
    /// rectangles by this key.
    pub key: String,
    pub rect: ScreenRect,
    pub pose: String,
    pub index: u32,
}

/// Pose filter applied to the overlay.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PoseFilter {
    #[default]
    All,
    Pose(String),
}

impl PoseFilter {
    pub fn label(&self) -> &str {
        match self {
            PoseFilter::All => "All poses",
            PoseFilter::Pose(p) => p,
        }
    }
}

/// Build overlay rectangles for a frame list at the given zoom.
pub fn overlay_rects(frames: &[FrameDef], zoom: f32) -> Vec<OverlayRect> {
    frames
        .iter()
        .map(|f| OverlayRect {
            key: format!("{}-{}", f.pose, f.index),
            rect: to_screen(&f.frame, zoom),
            pose: f.pose.clone(),
            index: f.index,
        })
        .collect()
}

/// Serialized export payload: the descriptor bytes exactly as loaded.
pub fn export_descriptor(model: &AtlasModel) -> &[u8] {
    model.raw_json()
}

/// Download filename: `meta.image` basename with its extension stripped,
/// `.json` appended.
pub fn export_filename(meta: &AtlasMeta) -> String {
    let name = Path::new(&meta.image)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("atlas");
    format!("{}.json", name)
}

/// Inspector panel state: pose filter, hovered key, own zoom.
#[derive(Debug, Clone, Default)]
pub struct InspectorState {
    pub filter: PoseFilter,
    hovered: Option<String>,
    pub view: ViewportState,
}

impl InspectorState {
    /// Frames visible under the current filter, in playback order for a
    /// single pose and descriptor order for the unfiltered view.
    pub fn filtered_frames<'a>(&self, model: &'a AtlasModel) -> &'a [FrameDef] {
        match &self.filter {
            PoseFilter::All => model.frames(),
            PoseFilter::Pose(p) => model.frames_for_pose(p),
        }
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Replace the hover state; `None` clears it. Exactly one key can be
    /// hovered at a time.
    pub fn set_hovered(&mut self, key: Option<String>) {
        self.hovered = key;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::atlas::{AtlasDescriptor, CellRect, Dims};
    use std::collections::HashSet;

    fn model() -> AtlasModel {
        let frames = (0..4)
            .map(|i| FrameDef {
                pose: "idle".to_string(),
                index: i + 1,
                frame: CellRect {
                    x: i * 32,
                    y: 0,
                    w: 32,
                    h: 32,
                },
            })
            .chain(std::iter::once(FrameDef {
                pose: "walk".to_string(),
                index: 1,
                frame: CellRect {
                    x: 0,
                    y: 32,
                    w: 32,
                    h: 32,
                },
            }))
            .collect();
        AtlasModel::from_descriptor(AtlasDescriptor {
            meta: AtlasMeta {
                image: "outputs/knightA_sheet.png".to_string(),
                size: Dims { w: 128, h: 64 },
                cell: Dims { w: 32, h: 32 },
                columns: 4,
            },
            frames,
        })
        .unwrap()
    }

    #[test]
    fn overlay_keys_are_unique() {
        let model = model();
        let rects = overlay_rects(model.frames(), 1.0);
        let keys: HashSet<&str> = rects.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys.len(), rects.len());
        assert!(keys.contains("idle-1"));
        assert!(keys.contains("walk-1"));
    }

    #[test]
    fn overlay_rects_use_zoomed_geometry() {
        let model = model();
        let rects = overlay_rects(model.frames_for_pose("idle"), 1.5);
        assert_eq!(rects[1].rect, to_screen(&model.frames_for_pose("idle")[1].frame, 1.5));
        assert_eq!(rects[1].rect.x, 48.0);
        assert_eq!(rects[1].rect.w, 48.0);
    }

    #[test]
    fn filter_narrows_to_one_pose() {
        let model = model();
        let mut state = InspectorState::default();
        assert_eq!(state.filtered_frames(&model).len(), 5);
        state.filter = PoseFilter::Pose("walk".to_string());
        assert_eq!(state.filtered_frames(&model).len(), 1);
        state.filter = PoseFilter::Pose("missing".to_string());
        assert!(state.filtered_frames(&model).is_empty());
    }

    #[test]
    fn hover_holds_at_most_one_key() {
        let mut state = InspectorState::default();
        assert!(state.hovered().is_none());
        state.set_hovered(Some("idle-2".to_string()));
        assert_eq!(state.hovered(), Some("idle-2"));
        state.set_hovered(Some("walk-1".to_string()));
        assert_eq!(state.hovered(), Some("walk-1"));
        state.set_hovered(None);
        assert!(state.hovered().is_none());
    }

    #[test]
    fn export_is_verbatim_and_filename_derives_from_image() {
        let raw = br#"{"meta":{"image":"outputs/knightA_sheet.png","size":{"w":128,"h":64},"cell":{"w":32,"h":32},"columns":4},"frames":[{"pose":"idle","index":1,"frame":{"x":0,"y":0,"w":32,"h":32}}]}"#.to_vec();
        let model = AtlasModel::from_json_bytes(raw.clone()).unwrap();
        assert_eq!(export_descriptor(&model), raw.as_slice());
        assert_eq!(export_filename(model.meta()), "knightA_sheet.json");
    }

    #[test]
    fn export_filename_tolerates_extensionless_refs() {
        let mut meta = model().meta().clone();
        meta.image = "/files/hero".to_string();
        assert_eq!(export_filename(&meta), "hero.json");
    }
}
