#![cfg(not(target_arch = "wasm32"))]

use crate::{create_app, init_logging};

/// Entry point used by the native executable.
pub fn run() -> eframe::Result<()> {
    init_logging();
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("BioNexas")
            .with_inner_size([1280.0, 820.0]),
        ..Default::default()
    };

    eframe::run_native(
        "BioNexas",
        native_options,
        Box::new(|cc| Ok(Box::new(create_app(cc)))),
    )
}
