//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() -> eframe::Result {
    env_logger::init();
    log::info!("Starting Easel");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Easel")
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Easel",
        options,
        Box::new(|cc| Ok(Box::new(easel_app::EaselApp::new(cc)?))),
    )
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
