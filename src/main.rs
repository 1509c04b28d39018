#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use handwriting_board::{BoardApp, BoardOptions};

    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    // Optional first argument: path to a JSON file with board options.
    let options = match std::env::args().nth(1) {
        Some(path) => match BoardOptions::load(&path) {
            Ok(options) => options,
            Err(err) => {
                log::warn!("Ignoring board options from {}: {}", path, err);
                BoardOptions::default()
            }
        },
        None => BoardOptions::default(),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([options.width as f32 + 40.0, options.height as f32 + 80.0])
            .with_min_inner_size([200.0, 150.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Handwriting Board",
        native_options,
        Box::new(|cc| Ok(Box::new(BoardApp::new(cc, options)?))),
    )
}

// The browser build is the `HandwritingBoard` widget exported from the library.
#[cfg(target_arch = "wasm32")]
fn main() {}
