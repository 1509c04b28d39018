use egui::{Pos2, Vec2, vec2};

/// Coordinates a platform event can report
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawPosition {
    /// Position relative to the target element, when the platform reports one
    pub offset: Option<Pos2>,
    /// Page-absolute position of the first changed touch
    pub page: Option<Pos2>,
}

/// An element in the offset-parent chain
pub trait OffsetNode: Sized {
    fn offset_left(&self) -> f32;
    fn offset_top(&self) -> f32;
    fn offset_parent(&self) -> Option<Self>;
    /// The document body ends the walk
    fn is_body(&self) -> bool;
}

/// Cumulative offset of `element` from the document body
pub fn distance_to_body<N: OffsetNode + Clone>(element: &N) -> Vec2 {
    let mut distance = Vec2::ZERO;
    let mut current = element.clone();
    while !current.is_body() {
        distance += vec2(current.offset_left(), current.offset_top());
        match current.offset_parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }
    distance
}

/// Surface-local position of an event over `element`.
///
/// A non-negative element offset wins; otherwise the touch's page position is
/// shifted by the element's distance to the body. Returns `None` if the event
/// carries neither.
pub fn resolve_position<N: OffsetNode + Clone>(raw: &RawPosition, element: &N) -> Option<Pos2> {
    if let Some(offset) = raw.offset {
        if offset.x >= 0.0 && offset.y >= 0.0 {
            return Some(offset);
        }
    }
    raw.page.map(|page| page - distance_to_body(element))
}
