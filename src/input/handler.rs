use egui::{Context, InputState, PointerButton, Pos2, Rect};

use super::PointerEvent;

/// Turns raw egui pointer input over the drawing area into `PointerEvent`s
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Screen position to surface-local position
    fn to_local(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process this frame's egui input
    pub fn process_input(&mut self, ctx: &Context) -> Vec<PointerEvent> {
        ctx.input(|input| self.process(input))
    }

    pub fn process(&mut self, input: &InputState) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let hover = input.pointer.hover_pos();
        let inside = hover.filter(|pos| self.canvas_rect.contains(*pos));
        let pressed = input.pointer.button_pressed(PointerButton::Primary);

        if pressed {
            if let Some(pos) = inside {
                events.push(PointerEvent::Down(self.to_local(pos)));
            }
        }

        match inside {
            Some(pos) => {
                if !pressed
                    && Some(pos) != self.last_pointer_pos
                    && input.pointer.button_down(PointerButton::Primary)
                {
                    events.push(PointerEvent::Move(self.to_local(pos)));
                }
            }
            None => {
                // Pointer left the drawing area
                if self.last_pointer_pos.is_some() {
                    events.push(PointerEvent::Leave);
                }
            }
        }
        self.last_pointer_pos = inside;

        if input.pointer.button_released(PointerButton::Primary) {
            events.push(PointerEvent::Up);
        }

        events
    }
}
