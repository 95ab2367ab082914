use crate::player::Direction;
use thiserror::Error;

/// Load-time failures. Any of these aborts building the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid annotation data at index {index}: {reason}")]
    InvalidAnnotationData { index: usize, reason: String },
    #[error("Duplicate annotation id '{id}'")]
    DuplicateAnnotationId { id: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Unknown annotation id '{id}'")]
    UnknownAnnotationId { id: String },
    #[error("No more bookmarks {direction}")]
    NoMoreBookmarks { direction: Direction },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OverlayError {
    #[error("Anchor for annotation '{id}' not found after {attempts} attempts")]
    AnchorNotFound { id: String, attempts: u32 },
}

impl NavigationError {
    pub fn is_boundary(&self) -> bool {
        matches!(self, NavigationError::NoMoreBookmarks { .. })
    }
}
