use crate::stroke::Stroke;

/// Manages the visible strokes and the strokes that can be brought back with redo
#[derive(Debug, Default, Clone)]
pub struct StrokeHistory {
    /// Strokes currently on the surface, oldest first
    undo_stack: Vec<Stroke>,
    /// Strokes removed by undo, most recently undone last
    redo_stack: Vec<Stroke>,
}

impl StrokeHistory {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a freshly started stroke. The redo stack is left untouched.
    pub fn push(&mut self, stroke: Stroke) {
        self.undo_stack.push(stroke);
    }

    /// The stroke currently being drawn, if any
    pub fn last_mut(&mut self) -> Option<&mut Stroke> {
        self.undo_stack.last_mut()
    }

    /// Move the most recent stroke onto the redo stack.
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(stroke) => {
                self.redo_stack.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Move the most recently undone stroke back onto the undo stack.
    /// Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(stroke) => {
                self.undo_stack.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Returns true if there are strokes that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are strokes that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_stack(&self) -> &[Stroke] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Stroke] {
        &self.redo_stack
    }

    /// Clear both stacks
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
