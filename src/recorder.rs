use egui::Pos2;

use crate::config::LineStyle;
use crate::history::StrokeHistory;
use crate::renderer::Surface;
use crate::stroke::Stroke;

/// Transient pointer state, only meaningful while a stroke is being drawn
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DrawingSession {
    down: bool,
    last_point: Option<Pos2>,
}

impl DrawingSession {
    pub fn is_down(&self) -> bool {
        self.down
    }

    pub fn last_point(&self) -> Option<Pos2> {
        self.last_point
    }

    fn press(&mut self, point: Pos2) {
        self.down = true;
        self.last_point = Some(point);
    }

    fn release(&mut self) {
        self.down = false;
        self.last_point = None;
    }
}

/// Records pointer gestures as strokes and keeps the surface in sync with
/// the undo history.
///
/// Drawing while the pointer moves is incremental (one segment per move).
/// Any history change instead clears the surface and replays every visible
/// stroke from scratch.
pub struct StrokeRecorder<S> {
    history: StrokeHistory,
    session: DrawingSession,
    style: LineStyle,
    surface: S,
}

impl<S: Surface> StrokeRecorder<S> {
    pub fn new(surface: S, style: LineStyle) -> Self {
        Self {
            history: StrokeHistory::new(),
            session: DrawingSession::default(),
            style,
            surface,
        }
    }

    /// Pointer went down: start a new stroke at `point`
    pub fn begin(&mut self, point: Pos2) {
        self.history.push(Stroke::new(point));
        self.session.press(point);
    }

    /// Pointer moved: extend the current stroke and draw the new segment.
    /// Ignored while the pointer is up.
    pub fn extend(&mut self, point: Pos2) {
        if !self.session.is_down() {
            return;
        }
        let Some(stroke) = self.history.last_mut() else {
            return;
        };
        stroke.add_point(point);
        if let Some(last) = self.session.last_point {
            self.surface.draw_segment(last, point, &self.style);
        }
        self.session.last_point = Some(point);
    }

    /// Pointer went up or left the surface
    pub fn end(&mut self) {
        self.session.release();
    }

    pub fn undo(&mut self) {
        if !self.history.undo() {
            return;
        }
        log::debug!(
            "Undo: {} visible, {} redoable",
            self.history.undo_stack().len(),
            self.history.redo_stack().len()
        );
        self.render();
    }

    pub fn redo(&mut self) {
        if !self.history.redo() {
            return;
        }
        log::debug!(
            "Redo: {} visible, {} redoable",
            self.history.undo_stack().len(),
            self.history.redo_stack().len()
        );
        self.render();
    }

    /// Clear the surface and forget all history
    pub fn reset(&mut self) {
        self.surface.clear();
        self.history.clear();
        log::debug!("Board reset");
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn render(&mut self) {
        self.surface.clear();
        replay(&mut self.surface, self.history.undo_stack(), &self.style);
    }
}

/// Draw `strokes` onto `surface` segment by segment, oldest first
pub fn replay<S: Surface + ?Sized>(surface: &mut S, strokes: &[Stroke], style: &LineStyle) {
    for stroke in strokes {
        for (from, to) in stroke.segments() {
            surface.draw_segment(from, to, style);
        }
    }
}
