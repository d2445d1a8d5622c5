//! Decoded sheet bitmap and its load lifecycle.
//!
//! The sheet is loaded once per distinct image reference and is read-only
//! afterwards; the player and the inspector both sample it without
//! mutation. Until the decode finishes, consumers see [`SheetStatus::Loading`]
//! and must render nothing rather than fail.

use crate::entities::atlas::AtlasError;
use std::path::{Path, PathBuf};

/// RGBA8 sheet bitmap, immutable after decode.
#[derive(Debug, Clone)]
pub struct SheetImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8, row-major.
    pub rgba: Vec<u8>,
    pub source: PathBuf,
}

impl SheetImage {
    /// Decode a sheet image from disk into RGBA8.
    pub fn load(path: &Path) -> Result<Self, AtlasError> {
        let img = image::open(path)
            .map_err(|e| AtlasError::Io(format!("{}: {}", path.display(), e)))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
            source: path.to_path_buf(),
        })
    }
}

/// Load state of the sheet resource as seen by the update loop.
#[derive(Debug, Clone, Default)]
pub enum SheetStatus {
    /// Decode still in flight; drawing is a no-op.
    #[default]
    Loading,
    Loaded(SheetImage),
    Error(String),
}

impl SheetStatus {
    pub fn image(&self) -> Option<&SheetImage> {
        match self {
            SheetStatus::Loaded(img) => Some(img),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SheetStatus::Loading)
    }
}
