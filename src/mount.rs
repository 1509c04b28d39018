use crate::error::{BoardError, BoardResult};

/// Where the drawing surface should be attached
#[derive(Debug, Clone, PartialEq)]
pub enum MountTarget<E> {
    /// CSS selector, resolved against the host document
    Selector(String),
    /// An element handle the host already holds
    Element(E),
}

/// Resolve a mount target to an element, using `query` for selectors.
///
/// A missing target, or a selector that matches nothing, is a usage error.
pub fn resolve_mount<E>(
    target: Option<MountTarget<E>>,
    query: impl FnOnce(&str) -> Option<E>,
) -> BoardResult<E> {
    match target {
        Some(MountTarget::Element(element)) => Ok(element),
        Some(MountTarget::Selector(selector)) => {
            query(&selector).ok_or(BoardError::MissingMountPoint)
        }
        None => Err(BoardError::MissingMountPoint),
    }
}
