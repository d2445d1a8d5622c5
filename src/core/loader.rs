//! Background sheet decode with a channel handoff.
//!
//! Decoding a sheet can take long enough to stall an update tick, so it
//! runs on a named worker thread and hands the result back through a
//! bounded channel polled by the update loop. Dropping the loader drops
//! the receiving end; a decode finishing after teardown fails its send
//! and is discarded, never a dangling mutation.

use crate::entities::sheet::SheetImage;
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use log::{debug, warn};
use std::path::PathBuf;
use std::thread;

pub type SheetResult = Result<SheetImage, String>;

/// Handle to one in-flight sheet decode. Owned by the app for exactly
/// the lifetime of the player it feeds.
pub struct SheetLoader {
    rx: Receiver<SheetResult>,
    handle: Option<thread::JoinHandle<()>>,
}

impl SheetLoader {
    /// Start decoding `path` on a worker thread.
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = bounded::<SheetResult>(1);

        let handle = thread::Builder::new()
            .name("spriteplay-sheet-loader".to_string())
            .spawn(move || {
                debug!("Decoding sheet: {}", path.display());
                let result = SheetImage::load(&path).map_err(|e| e.to_string());
                // Receiver gone means the player was torn down; drop the
                // result silently.
                let _ = tx.send(result);
            })
            .expect("Failed to spawn sheet loader thread");

        Self {
            rx,
            handle: Some(handle),
        }
    }

    /// Non-blocking poll from the update loop. Returns the decode result
    /// once, then `None` forever after.
    pub fn poll(&mut self) -> Option<SheetResult> {
        match self.rx.try_recv() {
            Ok(result) => {
                if let Some(handle) = self.handle.take() {
                    let _ = handle.join();
                }
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!("Sheet loader channel disconnected without a result");
                None
            }
        }
    }
}
