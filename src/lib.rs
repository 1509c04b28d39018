#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod input;
pub mod mount;
pub mod recorder;
pub mod renderer;
pub mod stroke;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::BoardApp;
pub use config::{BoardOptions, LineCap, LineStyle};
pub use error::{BoardError, BoardResult};
pub use export::ExportFormat;
pub use history::StrokeHistory;
pub use input::{DeviceCapability, PointerEvent};
pub use recorder::{DrawingSession, StrokeRecorder, replay};
pub use renderer::{RasterSurface, ShapeSurface, Surface};
pub use stroke::Stroke;
#[cfg(target_arch = "wasm32")]
pub use web::HandwritingBoard;
