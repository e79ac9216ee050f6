mod analysis;
mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::BellPlotApp;
use config::AppConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        log::error!("Ignoring configuration: {e:#}");
        AppConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bell Plot – Normal Curve Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(BellPlotApp::new(AppState::new(config))))),
    )
}
