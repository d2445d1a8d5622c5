//! Core engine modules - scheduler, viewport geometry, inspector, loader
//!
//! These modules form the playback/inspection engine, independent of UI.

pub mod inspector;
pub mod loader;
pub mod scheduler;
pub mod viewport;

// Re-exports for convenience
pub use inspector::{InspectorState, OverlayRect, PoseFilter};
pub use loader::SheetLoader;
pub use scheduler::PlaybackScheduler;
pub use viewport::{ScreenRect, ViewportState, ZoomRange};
