//! Atlas descriptor and the validated, immutable model built from it.
//!
//! The descriptor is the JSON contract with the sheet-producing service:
//! a `meta` block describing the packed sheet and a flat `frames` list
//! tagging each cell with a pose name and a 1-based ordinal index.
//!
//! `AtlasModel` is read-only after construction. Changing the underlying
//! descriptor means building a new model; there are no mutation methods.
//! The raw JSON bytes are retained verbatim so export is a byte-identical
//! passthrough of whatever the service delivered.

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pixel dimensions (sheet or nominal cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dims {
    pub w: u32,
    pub h: u32,
}

/// Axis-aligned rectangle in sheet pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Sheet-level metadata block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasMeta {
    /// Sheet image reference: absolute, root-relative, or atlas-relative.
    pub image: String,
    /// Pixel dimensions of the packed sheet.
    pub size: Dims,
    /// Nominal cell size. Advisory for layout; individual frame rects
    /// are authoritative for sampling.
    pub cell: Dims,
    /// Packing column count, display only.
    pub columns: u32,
}

/// One cell of one pose at a given ordinal position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameDef {
    pub pose: String,
    /// 1-based ordering key within the pose.
    pub index: u32,
    pub frame: CellRect,
}

/// Top-level descriptor as delivered by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    pub meta: AtlasMeta,
    pub frames: Vec<FrameDef>,
}

/// Construction failures. A malformed descriptor is rejected outright,
/// never patched up with guessed geometry.
#[derive(Debug)]
pub enum AtlasError {
    Io(String),
    Parse(String),
    Geometry(String),
}

impl std::fmt::Display for AtlasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtlasError::Io(e) => write!(f, "Atlas read error: {}", e),
            AtlasError::Parse(e) => write!(f, "Atlas parse error: {}", e),
            AtlasError::Geometry(e) => write!(f, "Atlas geometry error: {}", e),
        }
    }
}

impl std::error::Error for AtlasError {}

/// Validated, immutable view over an [`AtlasDescriptor`].
///
/// Resolves pose → ordered frame list and keeps pose names in
/// first-appearance order. An unknown pose yields an empty slice, which
/// callers must treat as a valid "no animation" state.
#[derive(Debug, Clone)]
pub struct AtlasModel {
    descriptor: AtlasDescriptor,
    /// Verbatim source bytes, kept for export.
    raw: Vec<u8>,
    /// Pose → frames sorted by `index` ascending (stable, so descriptor
    /// order breaks ties).
    by_pose: IndexMap<String, Vec<FrameDef>>,
}

impl AtlasModel {
    /// Read and build a model from an atlas JSON file.
    pub fn from_file(path: &Path) -> Result<Self, AtlasError> {
        let raw = std::fs::read(path).map_err(|e| AtlasError::Io(e.to_string()))?;
        Self::from_json_bytes(raw)
    }

    /// Build a model from raw descriptor bytes, retaining them verbatim.
    pub fn from_json_bytes(raw: Vec<u8>) -> Result<Self, AtlasError> {
        let descriptor: AtlasDescriptor =
            serde_json::from_slice(&raw).map_err(|e| AtlasError::Parse(e.to_string()))?;
        Self::build(descriptor, raw)
    }

    /// Build from an already-parsed descriptor (re-serializes for export).
    pub fn from_descriptor(descriptor: AtlasDescriptor) -> Result<Self, AtlasError> {
        let raw = serde_json::to_vec(&descriptor).map_err(|e| AtlasError::Parse(e.to_string()))?;
        Self::build(descriptor, raw)
    }

    fn build(descriptor: AtlasDescriptor, raw: Vec<u8>) -> Result<Self, AtlasError> {
        validate(&descriptor)?;

        let mut by_pose: IndexMap<String, Vec<FrameDef>> = IndexMap::new();
        for frame in &descriptor.frames {
            by_pose
                .entry(frame.pose.clone())
                .or_default()
                .push(frame.clone());
        }
        for frames in by_pose.values_mut() {
            // Stable sort: equal indices keep descriptor order.
            frames.sort_by_key(|f| f.index);
        }

        debug!(
            "Atlas model built: {} poses, {} frames, sheet {}x{}",
            by_pose.len(),
            descriptor.frames.len(),
            descriptor.meta.size.w,
            descriptor.meta.size.h
        );

        Ok(Self {
            descriptor,
            raw,
            by_pose,
        })
    }

    pub fn meta(&self) -> &AtlasMeta {
        &self.descriptor.meta
    }

    /// All frames in descriptor order (inspector's unfiltered view).
    pub fn frames(&self) -> &[FrameDef] {
        &self.descriptor.frames
    }

    /// Frames of one pose, sorted by `index` ascending. Empty for an
    /// unknown pose.
    pub fn frames_for_pose(&self, pose: &str) -> &[FrameDef] {
        self.by_pose.get(pose).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn frame_count(&self, pose: &str) -> usize {
        self.frames_for_pose(pose).len()
    }

    /// Pose names in first-appearance order.
    pub fn unique_poses(&self) -> impl Iterator<Item = &str> {
        self.by_pose.keys().map(String::as_str)
    }

    /// First pose of the descriptor, if any. Used as the startup default.
    pub fn first_pose(&self) -> Option<&str> {
        self.by_pose.keys().next().map(String::as_str)
    }

    /// The descriptor bytes exactly as loaded. No re-serialization.
    pub fn raw_json(&self) -> &[u8] {
        &self.raw
    }
}

/// Reject descriptors whose geometry cannot be sampled safely.
fn validate(descriptor: &AtlasDescriptor) -> Result<(), AtlasError> {
    let size = descriptor.meta.size;
    if size.w == 0 || size.h == 0 {
        return Err(AtlasError::Geometry(format!(
            "sheet size {}x{} has a zero dimension",
            size.w, size.h
        )));
    }
    if descriptor.meta.cell.w == 0 || descriptor.meta.cell.h == 0 {
        return Err(AtlasError::Geometry(format!(
            "cell size {}x{} has a zero dimension",
            descriptor.meta.cell.w, descriptor.meta.cell.h
        )));
    }

    for frame in &descriptor.frames {
        let r = frame.frame;
        if r.w == 0 || r.h == 0 {
            return Err(AtlasError::Geometry(format!(
                "frame {}-{} has an empty rect",
                frame.pose, frame.index
            )));
        }
        if r.x as u64 + r.w as u64 > size.w as u64 || r.y as u64 + r.h as u64 > size.h as u64 {
            return Err(AtlasError::Geometry(format!(
                "frame {}-{} rect ({},{} {}x{}) exceeds sheet {}x{}",
                frame.pose, frame.index, r.x, r.y, r.w, r.h, size.w, size.h
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(pose: &str, index: u32, x: u32, y: u32) -> FrameDef {
        FrameDef {
            pose: pose.to_string(),
            index,
            frame: CellRect { x, y, w: 32, h: 32 },
        }
    }

    fn descriptor(frames: Vec<FrameDef>) -> AtlasDescriptor {
        AtlasDescriptor {
            meta: AtlasMeta {
                image: "knight_sheet.png".to_string(),
                size: Dims { w: 256, h: 128 },
                cell: Dims { w: 32, h: 32 },
                columns: 8,
            },
            frames,
        }
    }

    #[test]
    fn frames_sorted_by_index() {
        let model = AtlasModel::from_descriptor(descriptor(vec![
            frame("idle", 3, 64, 0),
            frame("idle", 1, 0, 0),
            frame("idle", 2, 32, 0),
        ]))
        .unwrap();

        let indices: Vec<u32> = model
            .frames_for_pose("idle")
            .iter()
            .map(|f| f.index)
            .collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn equal_indices_keep_descriptor_order() {
        let model = AtlasModel::from_descriptor(descriptor(vec![
            frame("idle", 1, 96, 0),
            frame("idle", 1, 0, 0),
            frame("idle", 1, 32, 0),
        ]))
        .unwrap();

        let xs: Vec<u32> = model
            .frames_for_pose("idle")
            .iter()
            .map(|f| f.frame.x)
            .collect();
        assert_eq!(xs, vec![96, 0, 32]);
    }

    #[test]
    fn unknown_pose_is_empty_not_an_error() {
        let model = AtlasModel::from_descriptor(descriptor(vec![frame("idle", 1, 0, 0)])).unwrap();
        assert!(model.frames_for_pose("walk").is_empty());
        assert_eq!(model.frame_count("walk"), 0);
    }

    #[test]
    fn poses_in_first_appearance_order() {
        let model = AtlasModel::from_descriptor(descriptor(vec![
            frame("walk", 1, 0, 32),
            frame("idle", 1, 0, 0),
            frame("walk", 2, 32, 32),
            frame("attack", 1, 0, 64),
        ]))
        .unwrap();

        let poses: Vec<&str> = model.unique_poses().collect();
        assert_eq!(poses, vec!["walk", "idle", "attack"]);
        assert_eq!(model.first_pose(), Some("walk"));
    }

    #[test]
    fn missing_meta_is_a_parse_error() {
        let raw = br#"{"frames": []}"#.to_vec();
        match AtlasModel::from_json_bytes(raw) {
            Err(AtlasError::Parse(_)) => {}
            other => panic!("expected parse error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn out_of_bounds_rect_is_rejected() {
        // 240 + 32 > 256
        let bad = descriptor(vec![frame("idle", 1, 240, 0)]);
        match AtlasModel::from_descriptor(bad) {
            Err(AtlasError::Geometry(msg)) => assert!(msg.contains("idle-1")),
            other => panic!("expected geometry error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn zero_sized_sheet_is_rejected() {
        let mut bad = descriptor(vec![]);
        bad.meta.size = Dims { w: 0, h: 128 };
        assert!(matches!(
            AtlasModel::from_descriptor(bad),
            Err(AtlasError::Geometry(_))
        ));
    }

    #[test]
    fn raw_json_is_byte_identical() {
        let raw = br#"{
  "meta": { "image": "hero.png", "size": {"w": 64, "h": 64},
            "cell": {"w": 32, "h": 32}, "columns": 2 },
  "frames": [ { "pose": "idle", "index": 1,
                "frame": {"x": 0, "y": 0, "w": 32, "h": 32} } ]
}"#
        .to_vec();
        let model = AtlasModel::from_json_bytes(raw.clone()).unwrap();
        assert_eq!(model.raw_json(), raw.as_slice());
    }
}
