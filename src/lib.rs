//! SPRITEPLAY - Sprite-atlas pose player and inspector library
//!
//! Re-exports all modules for use by binary targets.

// Core engine (scheduler, viewport geometry, inspector, loader)
pub mod core;

// App modules
pub mod app;
pub mod cli;
pub mod config;
pub mod entities;
pub mod widgets;

// Re-export commonly used types from core
pub use core::inspector::{InspectorState, OverlayRect, PoseFilter};
pub use core::scheduler::PlaybackScheduler;
pub use core::viewport::{ScreenRect, ViewportState, ZoomRange};

// Re-export entities
pub use entities::{AtlasDescriptor, AtlasError, AtlasModel, FrameDef, SheetImage, SheetStatus};
