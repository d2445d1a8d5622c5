//! Application module - app state and the cooperative update loop.
//!
//! One update per host rendering opportunity: poll the sheet decode,
//! route input, run exactly one scheduler tick, draw. While playing,
//! each update requests the next repaint, forming the
//! request-callback/run-tick/request-next chain; ticks for one player
//! are strictly sequential and never re-entrant. Tearing the app down
//! drops the loader handle, so a decode finishing late has nowhere to
//! deliver and mutates nothing.

mod events;

use crate::core::inspector::InspectorState;
use crate::core::loader::SheetLoader;
use crate::core::scheduler::PlaybackScheduler;
use crate::core::viewport::ViewportState;
use crate::entities::atlas::AtlasModel;
use crate::entities::sheet::SheetStatus;
use crate::widgets::player::FrameRenderer;
use crate::widgets::status::StatusBar;
use crate::widgets::{inspector, player};
use eframe::egui;
use log::{info, warn};
use std::time::Duration;

/// Main application state.
pub struct App {
    model: AtlasModel,
    sheet: SheetStatus,
    loader: Option<SheetLoader>,
    /// Playback cursor owner; one per player, never shared.
    scheduler: PlaybackScheduler,
    player_view: ViewportState,
    inspector: InspectorState,
    /// Shared sheet texture owner; player and inspector both read it.
    renderer: FrameRenderer,
    status_bar: StatusBar,
}

impl App {
    pub fn new(
        model: AtlasModel,
        sheet_path: std::path::PathBuf,
        scheduler: PlaybackScheduler,
        zoom: f32,
    ) -> Self {
        let mut inspector = InspectorState::default();
        inspector.view.set_zoom(zoom);

        Self {
            model,
            sheet: SheetStatus::Loading,
            loader: Some(SheetLoader::spawn(sheet_path)),
            scheduler,
            player_view: ViewportState::with_zoom(zoom),
            inspector,
            renderer: FrameRenderer::new(),
            status_bar: StatusBar::new(),
        }
    }

    fn poll_loader(&mut self, ctx: &egui::Context) {
        let Some(loader) = &mut self.loader else {
            return;
        };
        match loader.poll() {
            Some(Ok(image)) => {
                info!("Sheet ready: {}x{}", image.width, image.height);
                self.sheet = SheetStatus::Loaded(image);
                self.loader = None;
            }
            Some(Err(msg)) => {
                warn!("Sheet decode failed: {}", msg);
                self.sheet = SheetStatus::Error(msg);
                self.loader = None;
            }
            None => {
                // Decode still in flight; poll again shortly.
                ctx.request_repaint_after(Duration::from_millis(50));
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);

        let frame_count = self.model.frame_count(self.scheduler.pose());
        events::handle_keyboard(ctx, &mut self.scheduler, frame_count);

        if self.scheduler.is_playing() && frame_count > 0 {
            self.scheduler.tick(frame_count);
            // Keep the tick chain alive for the next rendering
            // opportunity.
            ctx.request_repaint();
        }

        self.status_bar.render(
            ctx,
            &self.model,
            &self.sheet,
            &self.scheduler,
            self.player_view.zoom(),
        );

        egui::SidePanel::right("inspector_panel")
            .default_width(380.0)
            .resizable(true)
            .show(ctx, |ui| {
                if let Some(msg) = inspector::show(
                    ui,
                    &mut self.inspector,
                    &self.model,
                    &self.sheet,
                    &mut self.renderer,
                ) {
                    self.status_bar.current_message = msg;
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            player::show(
                ui,
                &self.model,
                &self.sheet,
                &mut self.scheduler,
                &mut self.player_view,
                &mut self.renderer,
            );
        });
    }
}
