use egui::{Painter, Pos2, Rect, Shape, Vec2};

use super::Surface;
use crate::config::{LineCap, LineStyle};

/// Retained list of egui shapes, repainted by the desktop host every frame
#[derive(Debug, Default, Clone)]
pub struct ShapeSurface {
    shapes: Vec<Shape>,
}

impl ShapeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Paint every retained shape, shifted from surface-local to screen space
    pub fn paint(&self, painter: &Painter, origin: Pos2) {
        let offset: Vec2 = origin.to_vec2();
        painter.extend(self.shapes.iter().cloned().map(|mut shape| {
            shape.translate(offset);
            shape
        }));
    }
}

impl Surface for ShapeSurface {
    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn draw_segment(&mut self, from: Pos2, to: Pos2, style: &LineStyle) {
        let half_width = style.width / 2.0;
        let direction = (to - from).normalized();
        let degenerate = direction == Vec2::ZERO;

        // egui line segments have flat ends
        match style.cap {
            LineCap::Square if degenerate => {
                self.shapes.push(Shape::rect_filled(
                    Rect::from_center_size(from, Vec2::splat(style.width)),
                    0.0,
                    style.color,
                ));
            }
            LineCap::Square => {
                let extension = direction * half_width;
                self.shapes.push(Shape::line_segment(
                    [from - extension, to + extension],
                    egui::Stroke::new(style.width, style.color),
                ));
            }
            LineCap::Butt | LineCap::Round => {
                self.shapes.push(Shape::line_segment(
                    [from, to],
                    egui::Stroke::new(style.width, style.color),
                ));
            }
        }
        if style.cap == LineCap::Round {
            self.shapes.push(Shape::circle_filled(from, half_width, style.color));
            self.shapes.push(Shape::circle_filled(to, half_width, style.color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2};

    #[test]
    fn test_round_caps_add_end_discs() {
        let mut surface = ShapeSurface::new();
        let style = LineStyle {
            width: 4.0,
            color: Color32::BLACK,
            cap: LineCap::Round,
        };
        surface.draw_segment(pos2(0.0, 0.0), pos2(5.0, 5.0), &style);
        assert_eq!(surface.shapes().len(), 3);

        surface.draw_segment(
            pos2(0.0, 0.0),
            pos2(5.0, 5.0),
            &LineStyle {
                cap: LineCap::Butt,
                ..style
            },
        );
        assert_eq!(surface.shapes().len(), 4);

        surface.clear();
        assert!(surface.shapes().is_empty());
    }

    fn segment_points(shape: &Shape) -> Option<[Pos2; 2]> {
        match shape {
            Shape::LineSegment { points, .. } => Some(*points),
            _ => None,
        }
    }

    #[test]
    fn test_square_caps_extend_past_end_points() {
        let style = LineStyle {
            width: 10.0,
            color: Color32::BLACK,
            cap: LineCap::Square,
        };
        let mut square = ShapeSurface::new();
        square.draw_segment(pos2(10.0, 10.0), pos2(20.0, 10.0), &style);

        let mut butt = ShapeSurface::new();
        butt.draw_segment(
            pos2(10.0, 10.0),
            pos2(20.0, 10.0),
            &LineStyle {
                cap: LineCap::Butt,
                ..style
            },
        );

        assert_eq!(square.shapes().len(), 1);
        assert_eq!(
            segment_points(&square.shapes()[0]),
            Some([pos2(5.0, 10.0), pos2(25.0, 10.0)])
        );
        assert_eq!(
            segment_points(&butt.shapes()[0]),
            Some([pos2(10.0, 10.0), pos2(20.0, 10.0)])
        );
    }

    #[test]
    fn test_zero_length_square_cap_is_a_square_dot() {
        let mut surface = ShapeSurface::new();
        let style = LineStyle {
            width: 6.0,
            color: Color32::BLACK,
            cap: LineCap::Square,
        };
        surface.draw_segment(pos2(4.0, 4.0), pos2(4.0, 4.0), &style);

        assert_eq!(surface.shapes().len(), 1);
        match &surface.shapes()[0] {
            Shape::Rect(rect) => {
                let expected = Rect::from_center_size(pos2(4.0, 4.0), Vec2::splat(6.0));
                assert_eq!(rect.rect, expected);
            }
            other => panic!("expected a filled rect, got {other:?}"),
        }
    }

    #[test]
    fn test_paint_does_not_consume_shapes() {
        let mut surface = ShapeSurface::new();
        surface.draw_segment(pos2(0.0, 0.0), pos2(5.0, 5.0), &LineStyle::default());

        let ctx = egui::Context::default();
        let rect = egui::Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(100.0, 100.0));
        let painter = Painter::new(ctx, egui::LayerId::background(), rect);
        surface.paint(&painter, pos2(10.0, 10.0));

        assert_eq!(surface.shapes().len(), 3);
    }
}
