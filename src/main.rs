#![windows_subsystem = "windows"]
//! Shoe Catalog - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod constants;
mod db;
mod import;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;
mod variant;

use app::{variant_counts, App};
use constants::*;
use db::Database;
use eframe::egui;
use tracing::{error, info};
use types::*;
use ui::components::checkbox_row;
use utils::get_data_dir;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "shoe-catalog.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,shoe_catalog=debug"));

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
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Shoe Catalog starting");

    let db_path = data_dir.join("catalog.db");
    let db = match Database::open(&db_path) {
        Ok(db) => {
            info!(path = %db_path.display(), "Database opened");
            db
        }
        Err(e) => {
            error!(error = %e, path = %db_path.display(), "Failed to open database");
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };

    if let Err(e) = import::seed_if_empty(&db) {
        error!(error = %e, "Failed to import bundled catalog");
    }

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
        .with_inner_size(win_size.unwrap_or(egui::vec2(1280.0, 800.0)))
        .with_min_inner_size([720.0, 520.0])
        .with_title(APP_NAME);

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
            let mut app = App::new(cc, db, settings, data_dir)?;
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

        // Type anywhere to search
        if !ctx.wants_keyboard_input() {
            let (typed, erased) = stray_keystrokes(ctx);
            if !typed.is_empty() || erased > 0 {
                for _ in 0..erased {
                    self.search_query.pop();
                }
                self.search_query.push_str(&typed);
                self.apply_filters();
            }
        }

        // Start image prefetch on first frame (and after each catalog reload)
        if !self.prefetch_started {
            self.prefetch_started = true;
            self.start_image_prefetch(ctx);
        }

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        egui::SidePanel::left("filter_panel")
            .exact_width(theme::SIDEBAR_WIDTH)
            .resizable(false)
            .show_separator_line(false)
            .frame(theme::sidebar_frame())
            .show(ctx, |ui| self.render_sidebar(ui));

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(theme::SPACING_XXL as i8)),
            )
            .show(ctx, |ui| {
                let panel_rect = ui.max_rect();
                self.render_grid_view(ui, ctx);
                self.render_toast(ctx, panel_rect);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}

// ============================================================================
// SIDEBAR
// ============================================================================

impl App {
    fn render_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.add(
            egui::Label::new(
                egui::RichText::new(APP_NAME.to_uppercase())
                    .size(theme::FONT_TITLE)
                    .strong()
                    .color(theme::GRAY_900),
            )
            .selectable(false),
        );
        ui.add(
            egui::Label::new(
                egui::RichText::new(format!("{} shoes", self.shoes.len()))
                    .size(theme::FONT_SMALL)
                    .color(theme::GRAY_500),
            )
            .selectable(false),
        );
        ui.add_space(theme::SPACING_LG);

        // Search box with border style
        egui::Frame::new()
            .fill(theme::BG_BASE)
            .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
            .corner_radius(theme::RADIUS_DEFAULT)
            .inner_margin(egui::Margin::symmetric(8, 6))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = theme::SPACING_SM;
                    ui.label(
                        egui::RichText::new(egui_phosphor::regular::MAGNIFYING_GLASS)
                            .size(14.0)
                            .color(theme::GRAY_500),
                    );
                    let clear_w = if self.search_query.is_empty() { 0.0 } else { 18.0 };
                    let search = ui.add(
                        egui::TextEdit::singleline(&mut self.search_query)
                            .hint_text("Search shoes...")
                            .frame(false)
                            .desired_width(ui.available_width() - clear_w),
                    );
                    if search.changed() {
                        self.apply_filters();
                    }
                    if !self.search_query.is_empty()
                        && ui
                            .add(egui::Button::new(egui_phosphor::regular::X).frame(false))
                            .clicked()
                    {
                        self.search_query.clear();
                        self.apply_filters();
                    }
                });
            });
        ui.add_space(theme::SPACING_XL);

        // Variant filter
        section_label(ui, "SHOW");
        let counts = variant_counts(&self.shoes, chrono::Utc::now(), self.recency_window());
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(theme::SPACING_SM, theme::SPACING_SM);
            for (filter, count) in VariantFilter::ALL.into_iter().zip(counts) {
                let label = format!("{} {}", filter.label(), count);
                if theme::filter_pill(ui, &label, self.variant_filter == filter).clicked()
                    && self.variant_filter != filter
                {
                    self.variant_filter = filter;
                    self.apply_filters();
                }
            }
        });
        ui.add_space(theme::SPACING_XL);

        // Sort
        section_label(ui, "SORT BY");
        ui.horizontal(|ui| {
            let mut changed = false;
            egui::ComboBox::from_id_salt("sort_column")
                .selected_text(self.sort_column.label())
                .width(140.0)
                .show_ui(ui, |ui| {
                    for column in SortColumn::ALL {
                        changed |= ui
                            .selectable_value(&mut self.sort_column, column, column.label())
                            .changed();
                    }
                });
            let icon = if self.sort_descending {
                egui_phosphor::regular::SORT_DESCENDING
            } else {
                egui_phosphor::regular::SORT_ASCENDING
            };
            if ui
                .add(theme::button(icon))
                .on_hover_text(if self.sort_descending { "Descending" } else { "Ascending" })
                .clicked()
            {
                self.sort_descending = !self.sort_descending;
                changed = true;
            }
            if changed {
                self.apply_filters();
            }
        });
        ui.add_space(theme::SPACING_XL);

        // Actions
        let full_w = ui.available_width();
        if ui
            .add_sized(
                [full_w, 28.0],
                theme::button(format!("{}  Import catalog...", egui_phosphor::regular::FILE_ARROW_UP)),
            )
            .clicked()
        {
            self.import_with_dialog();
        }
        ui.add_space(theme::SPACING_SM);
        let settings_label = format!("{}  Settings", egui_phosphor::regular::GEAR);
        if ui.add_sized([full_w, 28.0], theme::button(settings_label)).clicked() {
            self.show_settings = !self.show_settings;
        }

        if self.show_settings {
            ui.add_space(theme::SPACING_MD);
            theme::section_frame().show(ui, |ui| self.render_settings(ui));
        }

        // Footer
        ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
            ui.label(
                egui::RichText::new(self.footer_text())
                    .size(theme::FONT_SMALL)
                    .color(theme::GRAY_500),
            );
        });
    }

    fn render_settings(&mut self, ui: &mut egui::Ui) {
        ui.set_width(ui.available_width());

        if checkbox_row(ui, &mut self.large_cards, "Large cards") {
            self.save_settings();
        }
        ui.add_space(theme::SPACING_SM);

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("New for").size(theme::FONT_LABEL));
            let drag = ui.add(
                egui::DragValue::new(&mut self.recency_window_days)
                    .range(RECENCY_WINDOW_DAYS_MIN..=RECENCY_WINDOW_DAYS_MAX)
                    .suffix(" days"),
            );
            if drag.changed() {
                self.apply_filters();
            }
            if drag.drag_stopped() || drag.lost_focus() {
                self.save_settings();
            }
        });
        ui.add_space(theme::SPACING_SM);

        ui.label(egui::RichText::new("Store URL").size(theme::FONT_LABEL));
        let url = ui.add(
            egui::TextEdit::singleline(&mut self.store_base_url)
                .hint_text("https://shop.example")
                .desired_width(f32::INFINITY),
        );
        if url.lost_focus() {
            self.save_settings();
        }
        ui.add_space(theme::SPACING_MD);

        if ui
            .add(theme::button(format!("{}  Reset catalog", egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE)))
            .on_hover_text("Replace all shoes with the bundled catalog")
            .clicked()
        {
            self.reset_catalog();
        }
    }
}

/// Printable text and backspace presses this frame that no widget consumed
fn stray_keystrokes(ctx: &egui::Context) -> (String, usize) {
    ctx.input(|i| {
        i.events.iter().fold((String::new(), 0), |(mut typed, erased), event| match event {
            egui::Event::Text(text) if text.chars().all(|c| !c.is_control()) => {
                typed.push_str(text);
                (typed, erased)
            }
            egui::Event::Key {
                key: egui::Key::Backspace,
                pressed: true,
                ..
            } => (typed, erased + 1),
            _ => (typed, erased),
        })
    })
}

fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .size(theme::FONT_SMALL)
                .color(theme::GRAY_700),
        )
        .selectable(false),
    );
    ui.add_space(theme::SPACING_XS);
}
