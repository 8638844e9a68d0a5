#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod views;

use app::CircularFlowApp;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 720.0])
            .with_title("Circular Flow"),
        ..Default::default()
    };

    eframe::run_native(
        "Circular Flow",
        options,
        Box::new(|cc| Ok(Box::new(CircularFlowApp::new(cc)))),
    )
}
