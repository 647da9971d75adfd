//! App module - contains the main application state and logic

mod sync;

pub use sync::{SyncController, SyncState};

use crate::settings::Settings;
use crate::theme;
use eframe::egui;
use std::path::PathBuf;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) converter: SyncController,
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    // Window geometry tracked for saving on exit
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, data_dir: PathBuf) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        Self {
            converter: SyncController::default(),
            logo_texture: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
        };
        settings.save(&self.data_dir);
    }
}
