//! Reusable UI components
//!
//! This module contains standalone UI components that can be used
//! throughout the application.

use crate::theme;
use eframe::egui;

/// Small square icon button in the app button style
pub fn icon_button(ui: &mut egui::Ui, icon: &str, tooltip: &str) -> egui::Response {
    let size = theme::ICON_BUTTON_SIZE;
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    if ui.is_rect_visible(rect) {
        let (fill, draw_rect) = theme::button_visual(&response, theme::BG_SURFACE, rect);
        ui.painter().rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);
        ui.painter().text(
            draw_rect.center(),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(13.0),
            theme::TEXT_SECONDARY,
        );
    }

    response.on_hover_text(tooltip)
}

/// Dim uppercase section label, used for the pane headers
pub fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .color(theme::TEXT_DIM)
                .size(theme::FONT_SMALL),
        )
        .selectable(false),
    );
}

/// Status-bar label with an icon in front
pub fn status_label(ui: &mut egui::Ui, icon: &str, icon_color: egui::Color32, text: &str, text_color: egui::Color32) {
    ui.add(
        egui::Label::new(egui::RichText::new(icon).size(14.0).color(icon_color)).selectable(false),
    );
    ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .size(theme::FONT_LABEL)
                .color(text_color),
        )
        .selectable(false),
    );
}
