use egui::Pos2;
use web_sys::CanvasRenderingContext2d;

use super::Surface;
use crate::config::LineStyle;

/// `<canvas>` 2D context. Coordinates are logical pixels; the context is
/// expected to already carry the device-pixel-ratio scale.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, width: u32, height: u32) -> Self {
        Self {
            ctx,
            width: f64::from(width),
            height: f64::from(height),
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_segment(&mut self, from: Pos2, to: Pos2, style: &LineStyle) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.begin_path();
        ctx.set_line_cap(style.cap.as_str());
        ctx.move_to(f64::from(from.x), f64::from(from.y));
        ctx.line_to(f64::from(to.x), f64::from(to.y));
        ctx.set_stroke_style_str(&style.css_color());
        ctx.set_line_width(f64::from(style.width));
        ctx.stroke();
        ctx.restore();
    }
}
