use calendar_reminder::config::Config;
use calendar_reminder::startup;
use eframe::egui::{self, Color32, FontData, FontDefinitions, FontFamily, RichText};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, warn};

/// Shown when no title is passed on the command line
const DEFAULT_TITLE: &str = "予定の時間です";
const FONT_SIZE: f32 = 36.0;
const FONT_NAME: &str = "reminder";

/// Fullscreen black window showing one event title until Escape is pressed
struct ReminderWindow {
    message: String,
}

impl eframe::App for ReminderWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(&self.message)
                            .color(Color32::WHITE)
                            .size(FONT_SIZE),
                    );
                });
            });
    }
}

/// Register the configured font ahead of egui's defaults, which lack CJK glyphs
fn install_font(ctx: &egui::Context, font_path: &str) {
    let path = Path::new(font_path);
    if !path.exists() {
        return;
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read font {}: {}", path.display(), e);
            return;
        }
    };

    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert(FONT_NAME.to_owned(), FontData::from_owned(bytes));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, FONT_NAME.to_owned());
    }
    ctx.set_fonts(fonts);
}

fn main() -> ExitCode {
    if let Err(e) = startup::init_logging() {
        eprintln!("{:?}", e);
    }

    let title = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let font_path = Config::load()
        .map(|config| config.font_path)
        .unwrap_or_else(|_| Config::default().font_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Calendar reminder")
            .with_fullscreen(true)
            .with_always_on_top(),
        ..Default::default()
    };

    let app = ReminderWindow {
        message: format!("{} (ESCキーで終了)", title),
    };

    let result = eframe::run_native(
        "Calendar reminder",
        options,
        Box::new(move |cc| {
            install_font(&cc.egui_ctx, &font_path);
            Ok(Box::new(app))
        }),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to open reminder window: {}", e);
            ExitCode::FAILURE
        }
    }
}
