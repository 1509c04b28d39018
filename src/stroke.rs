use egui::Pos2;
use uuid::Uuid;

/// One continuous pointer-down-to-pointer-up gesture.
///
/// Points are kept in drawing order. A stroke holding a single point is a dot.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: Uuid,
    points: Vec<Pos2>,
}

impl Stroke {
    /// Start a new stroke at `origin`
    pub fn new(origin: Pos2) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![origin],
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_point(&self) -> Option<Pos2> {
        self.points.last().copied()
    }

    // Add a point to the end of the stroke
    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    /// Consecutive point pairs, in drawing order
    pub fn segments(&self) -> impl Iterator<Item = (Pos2, Pos2)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}
