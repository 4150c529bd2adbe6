#![windows_subsystem = "windows"]
//! Article Recommender - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod api;
mod app;
mod constants;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use eframe::egui;
use tracing::info;
use ui::components;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "article-recommender.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,article_recommender=debug"));

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
    let data_dir = utils::get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Article Recommender starting");

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
        .with_inner_size(win_size.unwrap_or(egui::vec2(880.0, 480.0)))
        .with_min_inner_size([720.0, 400.0])
        .with_title("Article Recommender");

    // Window/taskbar icon rasterized from the embedded SVG logo
    {
        let (rgba, w, h) = utils::rasterize_logo(64);
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
        "Article Recommender",
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
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

        // Pick up responses from background fetch tasks
        self.poll_results();

        self.render_settings_window(ctx);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(20)),
            )
            .show(ctx, |ui| {
                self.render_header(ui, ctx);
                ui.add_space(16.0);
                self.render_form(ui, ctx);
                self.render_results_table(ui);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Shutting down, saving settings");
        self.save_settings();
    }
}

impl App {
    fn render_header(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            let texture = self.logo_texture.get_or_insert_with(|| {
                let (pixels, w, h) = utils::rasterize_logo(64);
                ctx.load_texture(
                    "logo",
                    egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                    egui::TextureOptions::LINEAR,
                )
            });
            ui.image(egui::load::SizedTexture::new(texture.id(), egui::vec2(28.0, 28.0)));
            ui.add_space(4.0);
            ui.add(
                egui::Label::new(
                    egui::RichText::new("ARTICLE RECOMMENDER")
                        .size(theme::FONT_TITLE)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                )
                .selectable(false),
            );
            ui.add(
                egui::Label::new(
                    egui::RichText::new(format!("v{}", APP_VERSION))
                        .size(theme::FONT_CAPTION)
                        .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add(theme::button(egui_phosphor::regular::GEAR)).clicked() {
                    self.base_url_edit = self.base_url.clone();
                    self.show_settings = true;
                }
            });
        });
    }

    fn render_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        theme::card_frame().show(ui, |ui| {
            egui::Grid::new("lookup_form")
                .num_columns(3)
                .spacing([12.0, 10.0])
                .show(ui, |ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("Person ID")
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_MUTED),
                        )
                        .selectable(false),
                    );
                    let person_resp =
                        components::identifier_input(ui, "person_id_input", "e.g. 768", &mut self.person_id);
                    ui.horizontal(|ui| {
                        let submitted = person_resp.lost_focus()
                            && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        let clicked = ui
                            .add(theme::button_accent(format!(
                                "{}  Get Collaborative",
                                egui_phosphor::regular::USERS_THREE
                            )))
                            .clicked();
                        if clicked || submitted {
                            self.fetch_collaborative(ctx);
                        }
                        if self.collab_in_flight > 0 {
                            ui.add(egui::Spinner::new().size(16.0).color(theme::ACCENT));
                        }
                    });
                    ui.end_row();

                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("Article ID")
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_MUTED),
                        )
                        .selectable(false),
                    );
                    let article_resp =
                        components::identifier_input(ui, "article_id_input", "e.g. 183", &mut self.article_id);
                    ui.horizontal(|ui| {
                        let submitted = article_resp.lost_focus()
                            && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        let clicked = ui
                            .add(theme::button_accent(format!(
                                "{}  Get Content-Based",
                                egui_phosphor::regular::ARTICLE
                            )))
                            .clicked();
                        if clicked || submitted {
                            self.fetch_content(ctx);
                        }
                        if self.content_in_flight > 0 {
                            ui.add(egui::Spinner::new().size(16.0).color(theme::ACCENT));
                        }
                    });
                    ui.end_row();
                });
        });
    }

    fn render_results_table(&mut self, ui: &mut egui::Ui) {
        use egui_extras::{Column, TableBuilder};

        ui.add_space(16.0);
        ui.add(
            egui::Label::new(
                egui::RichText::new("RECOMMENDATIONS")
                    .size(theme::FONT_SECTION)
                    .strong()
                    .color(theme::TEXT_DIM),
            )
            .selectable(false),
        );
        ui.add_space(6.0);

        theme::section_frame().show(ui, |ui| {
            let header_height = 28.0;
            let row_height = 34.0;

            TableBuilder::new(ui)
                .striped(false)
                .resizable(false)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::exact(110.0))
                .columns(Column::remainder().clip(true), MAX_DISPLAY_RESULTS)
                .header(header_height, |mut header| {
                    header.col(|_ui| {});
                    for i in 1..=MAX_DISPLAY_RESULTS {
                        header.col(|ui| {
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(format!("ARTICLE {}", i))
                                        .size(theme::FONT_LABEL)
                                        .strong()
                                        .color(theme::TEXT_MUTED),
                                )
                                .selectable(false),
                            );
                        });
                    }
                })
                .body(|mut body| {
                    for (label, results) in [
                        ("Collaborative", &self.collab_results),
                        ("Content", &self.content_results),
                    ] {
                        body.row(row_height, |mut row| {
                            row.col(|ui| {
                                ui.add(
                                    egui::Label::new(
                                        egui::RichText::new(label)
                                            .size(theme::FONT_BODY)
                                            .color(theme::ACCENT),
                                    )
                                    .selectable(false),
                                );
                            });
                            let visible = components::visible_results(results);
                            for i in 0..MAX_DISPLAY_RESULTS {
                                row.col(|ui| {
                                    if let Some(rec) = visible.get(i) {
                                        ui.add(
                                            egui::Label::new(
                                                egui::RichText::new(&rec.title)
                                                    .size(theme::FONT_BODY)
                                                    .color(theme::TEXT_SECONDARY),
                                            )
                                            .truncate(),
                                        )
                                        .on_hover_text(format!("contentId {}", rec.content_id));
                                    }
                                });
                            }
                        });
                    }
                });
        });
    }

    fn render_settings_window(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }
        let mut open = true;
        egui::Window::new("Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("SERVICE BASE URL")
                            .size(theme::FONT_SECTION)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
                components::identifier_input(
                    ui,
                    "base_url_input",
                    DEFAULT_API_BASE_URL,
                    &mut self.base_url_edit,
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.add(theme::button_accent("Save")).clicked() {
                        self.apply_base_url();
                        self.save_settings();
                        info!(base_url = %self.base_url, "Service base URL updated");
                        self.show_settings = false;
                    }
                    if ui.add(theme::button("Reset")).clicked() {
                        self.base_url_edit = DEFAULT_API_BASE_URL.to_string();
                    }
                });
            });
        self.show_settings = self.show_settings && open;
    }
}
