//! Error types for validation and document import/export.
//!
//! Mutations on the scene never fail: a stale id or a violated precondition
//! is a silent no-op. Errors only surface where the caller hands us data we
//! did not produce ourselves.

use crate::id::ElementId;
use thiserror::Error;

/// Why an element failed validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("element has an empty id")]
    MissingId,

    #[error("element {id} has a non-finite position ({x}, {y})")]
    InvalidPosition { id: ElementId, x: f64, y: f64 },

    #[error("element {id} has a non-positive size {width}x{height}")]
    InvalidSize {
        id: ElementId,
        width: f64,
        height: f64,
    },

    #[error("image element {id} has an empty src")]
    MissingImageSource { id: ElementId },

    #[error("element {id} is not a group but owns {count} children")]
    ChildrenOnLeaf { id: ElementId, count: usize },
}

/// Failure to read or write a document file.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document root must be an object")]
    NotAnObject,

    #[error("document is missing an `elements` array")]
    MissingElements,

    #[error("document is missing `artboardDimensions` with numeric width and height")]
    MissingArtboardDimensions,

    #[error("element {index} is malformed: {source}")]
    MalformedElement {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("element {index} is invalid: {source}")]
    InvalidElement {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error("unknown element type `{0}`")]
    UnknownElementType(String),

    #[error("element {index} reuses id {id}")]
    DuplicateId { index: usize, id: ElementId },

    #[error("group {parent} and element {child} disagree about their parent link")]
    InconsistentHierarchy { parent: ElementId, child: ElementId },

    #[error("element {0} is its own ancestor")]
    HierarchyCycle(ElementId),
}
