mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::BizMapApp;
use eframe::egui;

/// Loaded automatically at startup when present in the working directory,
/// matching the registry export convention.
const DEFAULT_REGISTRY: &str = "data.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "BizMap – Registry Map Viewer",
        options,
        Box::new(|_cc| {
            let mut app = BizMapApp::default();
            let default_path = Path::new(DEFAULT_REGISTRY);
            if default_path.exists() {
                app.state.load_from(default_path);
            } else {
                log::info!("No {DEFAULT_REGISTRY} in the working directory, waiting for File → Open");
            }
            Ok(Box::new(app))
        }),
    )
}
