//! I/O seams: image dimension probing and project storage.
//!
//! The store never touches the network or disk itself. Hosts implement
//! these traits (browser fetch, filesystem, a database service) and the
//! store calls them at well-defined points.

use artboard_core::{DocumentError, ElementId, ProjectDocument, Size};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ─── Image probing ───────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImageProbeError {
    #[error("failed to load image `{src}`: {reason}")]
    LoadFailed { src: String, reason: String },

    #[error("image `{0}` reported an empty size")]
    EmptyImage(String),
}

/// Resolves the natural pixel size of an image source.
pub trait ImageProbe {
    fn natural_size(&self, src: &str) -> Result<Size, ImageProbeError>;
}

/// An image waiting for its natural size.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLoadRequest {
    pub id: ElementId,
    pub src: String,
}

/// Probe from a fixed table, for tests and offline hosts.
#[derive(Debug, Clone, Default)]
pub struct StaticImageProbe {
    sizes: HashMap<String, Size>,
}

impl StaticImageProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, src: &str, size: Size) -> Self {
        self.sizes.insert(src.to_string(), size);
        self
    }
}

impl ImageProbe for StaticImageProbe {
    fn natural_size(&self, src: &str) -> Result<Size, ImageProbeError> {
        let size = self
            .sizes
            .get(src)
            .copied()
            .ok_or_else(|| ImageProbeError::LoadFailed {
                src: src.to_string(),
                reason: "not found".into(),
            })?;
        if size.width <= 0.0 || size.height <= 0.0 {
            return Err(ImageProbeError::EmptyImage(src.to_string()));
        }
        Ok(size)
    }
}

// ─── Project storage ─────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("project `{0}` not found")]
    NotFound(String),

    #[error("project `{0}` already exists")]
    AlreadyExists(String),

    #[error("invalid project document: {0}")]
    Document(#[from] DocumentError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Descriptive metadata owned by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectMeta {
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Self {
            name: name.to_string(),
            slug: slugify(name),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A project as stored: metadata plus the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProject {
    pub meta: ProjectMeta,
    pub document: ProjectDocument,
}

/// Persists projects keyed by slug.
pub trait ProjectStorage {
    /// Insert or overwrite the project under `project.meta.slug`.
    fn save(&mut self, project: &StoredProject) -> Result<(), StorageError>;

    fn load(&self, slug: &str) -> Result<StoredProject, StorageError>;

    /// Metadata for every stored project, most recently updated first.
    fn list(&self) -> Result<Vec<ProjectMeta>, StorageError>;

    fn delete(&mut self, slug: &str) -> Result<(), StorageError>;

    fn exists(&self, slug: &str) -> bool {
        self.load(slug).is_ok()
    }
}

/// Keeps serialized projects in memory. Documents go through the same JSON
/// path a real backend would use, so loading regenerates ids.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    projects: HashMap<String, (ProjectMeta, String)>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl ProjectStorage for InMemoryStorage {
    fn save(&mut self, project: &StoredProject) -> Result<(), StorageError> {
        let json = project.document.to_json()?;
        self.projects
            .insert(project.meta.slug.clone(), (project.meta.clone(), json));
        Ok(())
    }

    fn load(&self, slug: &str) -> Result<StoredProject, StorageError> {
        let (meta, json) = self
            .projects
            .get(slug)
            .ok_or_else(|| StorageError::NotFound(slug.to_string()))?;
        Ok(StoredProject {
            meta: meta.clone(),
            document: ProjectDocument::from_json(json)?,
        })
    }

    fn list(&self) -> Result<Vec<ProjectMeta>, StorageError> {
        let mut metas: Vec<ProjectMeta> = self.projects.values().map(|(m, _)| m.clone()).collect();
        metas.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.slug.cmp(&b.slug)));
        Ok(metas)
    }

    fn delete(&mut self, slug: &str) -> Result<(), StorageError> {
        self.projects
            .remove(slug)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(slug.to_string()))
    }

    fn exists(&self, slug: &str) -> bool {
        self.projects.contains_key(slug)
    }
}

/// URL-safe project key: lowercase ASCII alphanumerics separated by single
/// dashes. Names with nothing usable become `untitled`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

/// `base`, or `base-2`, `base-3`, … whichever is free in `storage`.
pub fn unique_slug(storage: &dyn ProjectStorage, base: &str) -> String {
    if !storage.exists(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !storage.exists(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use artboard_core::ArtboardDimensions;
    use pretty_assertions::assert_eq;

    #[test]
    fn slugs() {
        assert_eq!(slugify("My First Poster!"), "my-first-poster");
        assert_eq!(slugify("  --Summer   Sale 2026--"), "summer-sale-2026");
        assert_eq!(slugify("???"), "untitled");
    }

    #[test]
    fn static_probe() {
        let probe = StaticImageProbe::new()
            .with("cat.png", Size::new(800.0, 600.0))
            .with("blank.png", Size::new(0.0, 0.0));
        assert_eq!(probe.natural_size("cat.png"), Ok(Size::new(800.0, 600.0)));
        assert!(matches!(
            probe.natural_size("blank.png"),
            Err(ImageProbeError::EmptyImage(_))
        ));
        assert!(matches!(
            probe.natural_size("dog.png"),
            Err(ImageProbeError::LoadFailed { .. })
        ));
    }

    #[test]
    fn in_memory_storage_roundtrip() {
        let mut storage = InMemoryStorage::new();
        let project = StoredProject {
            meta: ProjectMeta::new("Launch Deck"),
            document: ProjectDocument {
                elements: Vec::new(),
                artboard_dimensions: ArtboardDimensions::new(800.0, 600.0),
            },
        };
        storage.save(&project).unwrap();
        assert!(storage.exists("launch-deck"));
        assert_eq!(unique_slug(&storage, "launch-deck"), "launch-deck-2");

        let loaded = storage.load("launch-deck").unwrap();
        assert_eq!(loaded, project);
        assert_eq!(storage.list().unwrap().len(), 1);

        storage.delete("launch-deck").unwrap();
        assert!(matches!(
            storage.load("launch-deck"),
            Err(StorageError::NotFound(_))
        ));
        assert!(storage.is_empty());
    }
}
