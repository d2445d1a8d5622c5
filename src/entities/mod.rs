//! Data entities - atlas descriptor/model and the sheet bitmap.

pub mod atlas;
pub mod sheet;

pub use atlas::{AtlasDescriptor, AtlasError, AtlasMeta, AtlasModel, CellRect, Dims, FrameDef};
pub use sheet::{SheetImage, SheetStatus};
