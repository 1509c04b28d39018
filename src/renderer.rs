use egui::Pos2;

use crate::config::LineStyle;

pub mod raster;
pub mod shapes;
#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use raster::RasterSurface;
pub use shapes::ShapeSurface;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

/// A 2D drawing backend the recorder paints strokes onto.
///
/// Coordinates are surface-local logical pixels.
pub trait Surface {
    /// Wipe everything drawn so far
    fn clear(&mut self);

    /// Draw one straight segment from `from` to `to`
    fn draw_segment(&mut self, from: Pos2, to: Pos2, style: &LineStyle);
}
