//! WebAssembly entry point.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// ID of the host canvas element the app renders into.
const CANVAS_ID: &str = "easel_canvas";

/// Initialize and run the WASM application.
#[wasm_bindgen(start)]
pub async fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(log::Level::Info).expect("Failed to initialize logger");

    log::info!("Starting Easel (WASM)");

    let canvas = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CANVAS_ID))
        .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok());
    let Some(canvas) = canvas else {
        log::error!("canvas element #{CANVAS_ID} not found");
        return;
    };

    let result = eframe::WebRunner::new()
        .start(
            canvas,
            eframe::WebOptions::default(),
            Box::new(|cc| Ok(Box::new(crate::EaselApp::new(cc)?))),
        )
        .await;
    if let Err(e) = result {
        log::error!("failed to start app: {e:?}");
    }
}
