pub mod config;
pub mod document;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod hierarchy;
pub mod hit;
pub mod id;
pub mod isolation;
pub mod model;
pub mod scene;
pub mod selection;

pub use config::{ArtboardDimensions, AspectRatio, EditorConfig};
pub use document::{ExportFile, ProjectDocument, export_json, import_json};
pub use error::{DocumentError, ValidationError};
pub use factory::Placement;
pub use hierarchy::{DropPosition, HierarchyIndex};
pub use id::ElementId;
pub use isolation::{DoubleClickAction, IsolationState};
pub use model::*;
pub use scene::{ResizeMode, ResizeRequest, ZOrder};
pub use selection::Selection;

// Re-export kurbo geometry so downstream crates don't need a direct dependency
pub use kurbo::{Point, Rect, Size};
