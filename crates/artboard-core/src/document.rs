//! Project documents and JSON import/export.
//!
//! Exported files look like
//!
//! ```json
//! { "elements": [...], "artboardDimensions": { "width": 1024, "height": 576 },
//!   "version": "1.0", "timestamp": "2026-01-01T00:00:00Z" }
//! ```
//!
//! Imports are validated element by element, then as a hierarchy, and every
//! id is regenerated, so importing the same file twice never produces
//! colliding ids.

use crate::config::ArtboardDimensions;
use crate::error::DocumentError;
use crate::id::ElementId;
use crate::model::{Element, ElementKind, validate_element};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Format version written into exported files.
pub const FORMAT_VERSION: &str = "1.0";

/// The persisted part of a project: what storage backends save and load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub elements: Vec<Element>,
    pub artboard_dimensions: ArtboardDimensions,
}

/// A standalone export file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub elements: Vec<Element>,
    pub artboard_dimensions: ArtboardDimensions,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl ExportFile {
    pub fn new(elements: Vec<Element>, artboard_dimensions: ArtboardDimensions) -> Self {
        Self {
            elements,
            artboard_dimensions,
            version: FORMAT_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Serialize the scene as a pretty-printed export file.
pub fn export_json(
    elements: &[Element],
    artboard_dimensions: ArtboardDimensions,
) -> Result<String, DocumentError> {
    let file = ExportFile::new(elements.to_vec(), artboard_dimensions);
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Parse and validate an export file, regenerating every element id.
///
/// `version` and `timestamp` are informational and may be absent.
pub fn import_json(json: &str) -> Result<ProjectDocument, DocumentError> {
    let root: Value = serde_json::from_str(json)?;
    let obj = root.as_object().ok_or(DocumentError::NotAnObject)?;

    let raw_elements = obj
        .get("elements")
        .and_then(Value::as_array)
        .ok_or(DocumentError::MissingElements)?;

    let artboard_dimensions = obj
        .get("artboardDimensions")
        .and_then(parse_dimensions)
        .ok_or(DocumentError::MissingArtboardDimensions)?;

    let elements = parse_elements(raw_elements)?;
    check_hierarchy(&elements)?;
    log::debug!("imported {} elements", elements.len());

    Ok(ProjectDocument {
        elements: regenerate_ids(&elements),
        artboard_dimensions,
    })
}

fn parse_dimensions(value: &Value) -> Option<ArtboardDimensions> {
    let width = value.get("width")?.as_f64()?;
    let height = value.get("height")?.as_f64()?;
    let dims = ArtboardDimensions::new(width, height);
    dims.is_valid().then_some(dims)
}

/// Deserialize and validate raw element values. Ids must be unique.
pub fn parse_elements(raw: &[Value]) -> Result<Vec<Element>, DocumentError> {
    let mut seen = HashSet::with_capacity(raw.len());
    raw.iter()
        .enumerate()
        .map(|(index, value)| -> Result<Element, DocumentError> {
            if let Some(kind) = value.get("type").and_then(Value::as_str) {
                kind.parse::<ElementKind>()?;
            }
            let el: Element = serde_json::from_value(value.clone())
                .map_err(|source| DocumentError::MalformedElement { index, source })?;
            validate_element(&el).map_err(|source| DocumentError::InvalidElement { index, source })?;
            if !seen.insert(el.id) {
                return Err(DocumentError::DuplicateId { index, id: el.id });
            }
            Ok(el)
        })
        .collect()
}

/// Check that parent and child links agree in both directions and that
/// every parent chain ends at the top level.
///
/// Links to ids outside the list are tolerated here; [`regenerate_ids`]
/// drops them.
pub fn check_hierarchy(elements: &[Element]) -> Result<(), DocumentError> {
    let by_id: HashMap<ElementId, &Element> = elements.iter().map(|el| (el.id, el)).collect();

    for el in elements {
        if let Some(parent) = el.parent_id.and_then(|p| by_id.get(&p))
            && !(parent.is_group() && parent.children.contains(&el.id))
        {
            return Err(DocumentError::InconsistentHierarchy {
                parent: parent.id,
                child: el.id,
            });
        }
        let mut listed = HashSet::with_capacity(el.children.len());
        for child in &el.children {
            let disagrees = by_id
                .get(child)
                .is_some_and(|c| c.parent_id != Some(el.id));
            if disagrees || !listed.insert(*child) {
                return Err(DocumentError::InconsistentHierarchy {
                    parent: el.id,
                    child: *child,
                });
            }
        }
    }

    for el in elements {
        let mut chain = HashSet::from([el.id]);
        let mut current = el.parent_id;
        while let Some(pid) = current {
            if !chain.insert(pid) {
                return Err(DocumentError::HierarchyCycle(el.id));
            }
            current = by_id.get(&pid).and_then(|p| p.parent_id);
        }
    }
    Ok(())
}

/// Give every element a fresh id, rewriting `parent_id` and `children` to
/// match. References to ids outside the list are dropped: a dangling parent
/// makes the element top-level, dangling children are forgotten.
pub fn regenerate_ids(elements: &[Element]) -> Vec<Element> {
    let id_map: HashMap<ElementId, ElementId> = elements
        .iter()
        .map(|el| (el.id, ElementId::generate()))
        .collect();

    elements
        .iter()
        .filter_map(|el| {
            let mut el = el.clone();
            el.id = *id_map.get(&el.id)?;
            el.parent_id = el.parent_id.and_then(|p| id_map.get(&p).copied());
            el.children = el
                .children
                .iter()
                .filter_map(|c| id_map.get(c).copied())
                .collect();
            el.selected = false;
            Some(el)
        })
        .collect()
}

impl ProjectDocument {
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a stored project, validating elements and regenerating ids.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        import_json(json)
    }
}
