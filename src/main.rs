#![windows_subsystem = "windows"]
//! BitMirror - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod codec;
mod constants;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use eframe::egui;
use std::path::PathBuf;
use tracing::info;
use types::Status;
use ui::components::{icon_button, section_label, status_label};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, EnvFilter, prelude::*};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "bitmirror.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bitmirror=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME);

    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "BitMirror starting");

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1000.0, 600.0)))
        .with_min_inner_size([640.0, 400.0])
        .with_title(APP_NAME);

    // Window/taskbar icon rasterized from the inline SVG
    {
        let (rgba, w, h) = utils::rasterize_logo_square(256);
        let icon = egui::IconData { rgba, width: w, height: h };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Panels must be added before the central area
        self.render_header(ctx);
        self.render_status_bar(ctx);
        self.render_panes(ctx);

        // Both panes have reported for this dispatch cycle; echoes of this
        // frame's pane writes can no longer arrive.
        self.converter.end_cycle();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}

// ============================================================================
// UI RENDERING
// ============================================================================

impl App {
    fn render_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .exact_height(theme::HEADER_HEIGHT)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::symmetric(16, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let texture = self.logo_texture.get_or_insert_with(|| {
                        let (pixels, w, h) = utils::rasterize_logo(128);
                        ctx.load_texture(
                            "logo",
                            egui::ColorImage::from_rgba_unmultiplied(
                                [w as usize, h as usize],
                                &pixels,
                            ),
                            egui::TextureOptions::LINEAR,
                        )
                    });

                    let aspect = texture.size()[0] as f32 / texture.size()[1] as f32;
                    let logo_h = 24.0;
                    ui.image(egui::load::SizedTexture::new(
                        texture.id(),
                        egui::vec2(logo_h * aspect, logo_h),
                    ));

                    ui.add_space(theme::SPACING_MD);
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(APP_NAME)
                                .size(theme::FONT_BODY)
                                .strong()
                                .color(theme::TEXT_PRIMARY),
                        )
                        .selectable(false),
                    );
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("text / binary")
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(format!("v{}", APP_VERSION))
                                    .size(theme::FONT_CAPTION)
                                    .color(theme::TEXT_DIM),
                            )
                            .selectable(false),
                        );
                    });
                });
            });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .inner_margin(egui::Margin::symmetric(16, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| match self.converter.status() {
                    Status::Ready => {
                        status_label(
                            ui,
                            egui_phosphor::regular::CIRCLE,
                            theme::TEXT_DIM,
                            "Ready",
                            theme::TEXT_MUTED,
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new("0 chars | 0 bits")
                                        .size(theme::FONT_LABEL)
                                        .color(theme::TEXT_DIM),
                                )
                                .selectable(false),
                            );
                        });
                    }
                    Status::Converted(stats) => {
                        let stats = *stats;
                        status_label(
                            ui,
                            egui_phosphor::regular::CHECK_CIRCLE,
                            theme::STATUS_SUCCESS,
                            &format!("Converted in {:.2} ms", stats.elapsed_ms),
                            theme::TEXT_MUTED,
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(format!(
                                        "{} chars | {} bits",
                                        stats.text_chars, stats.binary_bits
                                    ))
                                    .size(theme::FONT_LABEL)
                                    .color(theme::TEXT_MUTED),
                                )
                                .selectable(false),
                            );
                        });
                    }
                    Status::Error(msg) => {
                        status_label(
                            ui,
                            egui_phosphor::regular::WARNING,
                            theme::STATUS_ERROR,
                            &format!("{msg} (text pane unchanged)"),
                            theme::STATUS_ERROR,
                        );
                    }
                });
            });
    }

    fn render_panes(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                ui.spacing_mut().item_spacing.x = theme::PANE_GAP;
                ui.columns(2, |columns| {
                    self.render_text_pane(&mut columns[0]);
                    self.render_binary_pane(&mut columns[1]);
                });
            });
    }

    fn render_text_pane(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            section_label(ui, "TEXT");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.spacing_mut().item_spacing.x = theme::SPACING_SM;
                if icon_button(ui, egui_phosphor::regular::TRASH, "Clear").clicked() {
                    self.converter.clear_text();
                }
                if icon_button(ui, egui_phosphor::regular::COPY, "Copy").clicked() {
                    ui.ctx().copy_text(self.converter.text.clone());
                }
            });
        });
        ui.add_space(theme::SPACING_SM);

        let pane_height = ui.available_height();
        theme::pane_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.set_min_height(pane_height - 22.0); // frame margins + stroke
            egui::ScrollArea::vertical()
                .id_salt("text_pane")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let response = ui.add(
                        egui::TextEdit::multiline(&mut self.converter.text)
                            .frame(false)
                            .hint_text("Type text here...")
                            .desired_width(f32::INFINITY)
                            .desired_rows(24),
                    );
                    if response.changed() {
                        self.converter.on_text_edited();
                    }
                });
        });
    }

    fn render_binary_pane(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            section_label(ui, "BINARY");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.spacing_mut().item_spacing.x = theme::SPACING_SM;
                if icon_button(ui, egui_phosphor::regular::TRASH, "Clear").clicked() {
                    self.converter.clear_binary();
                }
                if icon_button(ui, egui_phosphor::regular::COPY, "Copy").clicked() {
                    ui.ctx().copy_text(self.converter.binary.clone());
                }
            });
        });
        ui.add_space(theme::SPACING_SM);

        let pane_height = ui.available_height();
        theme::pane_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.set_min_height(pane_height - 22.0); // frame margins + stroke
            egui::ScrollArea::vertical()
                .id_salt("binary_pane")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let response = ui.add(
                        egui::TextEdit::multiline(&mut self.converter.binary)
                            .frame(false)
                            .hint_text("Paste 8-bit binary groups here...")
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .desired_rows(24),
                    );
                    if response.changed() {
                        self.converter.on_binary_edited();
                    }
                });
        });
    }
}
