//! Integration tests: JSON import → scene operations → export.
//!
//! Exercises the document boundary of `artboard-core`: envelope checks,
//! per-element validation, id regeneration and re-export.

use artboard_core::document::{export_json, import_json};
use artboard_core::hierarchy::{element_children, get_element_descendants, top_level_elements};
use artboard_core::{DocumentError, ElementKind, HorizontalAlign, ValidationError};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

// ─── Import ──────────────────────────────────────────────────────────────

#[test]
fn import_keeps_order_types_and_payloads() {
    let doc = import_json(include_str!("fixtures/grouped_scene.json")).unwrap();
    assert_eq!(doc.artboard_dimensions.width, 1024.0);

    let kinds: Vec<ElementKind> = doc.elements.iter().map(|el| el.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ElementKind::Group,
            ElementKind::Rectangle,
            ElementKind::Text,
            ElementKind::Image,
            ElementKind::Rectangle,
        ]
    );

    let label = doc.elements[2].text().unwrap();
    assert_eq!(label.content, "Sale");
    assert_eq!(label.font_size, 24.0);
    assert_eq!(label.horizontal_align, HorizontalAlign::Center);
    assert_eq!(doc.elements[1].rectangle().unwrap().corner_radius, 10.0);
    assert_eq!(doc.elements[3].rotation, 45.0);
    assert!(!doc.elements[4].visible);
    assert_eq!(doc.elements[0].name.as_deref(), Some("Promo"));
}

#[test]
fn import_regenerates_ids_and_keeps_hierarchy() {
    let doc = import_json(include_str!("fixtures/grouped_scene.json")).unwrap();
    let group = &doc.elements[0];
    assert_ne!(group.id.as_str(), "promo");

    let children: Vec<_> = element_children(&doc.elements, group.id)
        .into_iter()
        .map(|el| el.id)
        .collect();
    assert_eq!(children, vec![doc.elements[1].id, doc.elements[2].id]);
    for child in &doc.elements[1..3] {
        assert_eq!(child.parent_id, Some(group.id));
    }
    assert_eq!(get_element_descendants(&doc.elements, group.id).len(), 2);
    assert_eq!(top_level_elements(&doc.elements).len(), 3);
}

#[test]
fn importing_twice_never_collides() {
    let json = include_str!("fixtures/grouped_scene.json");
    let first = import_json(json).unwrap();
    let second = import_json(json).unwrap();
    for (a, b) in first.elements.iter().zip(&second.elements) {
        assert_ne!(a.id, b.id);
    }
}

#[test]
fn import_rejects_invalid_element() {
    let err = import_json(include_str!("fixtures/invalid_image.json")).unwrap_err();
    match err {
        DocumentError::InvalidElement { index, source } => {
            assert_eq!(index, 1);
            assert!(matches!(source, ValidationError::MissingImageSource { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn import_rejects_missing_dimensions() {
    let err = import_json(include_str!("fixtures/missing_dimensions.json")).unwrap_err();
    assert!(matches!(err, DocumentError::MissingArtboardDimensions));
}

#[test]
fn import_rejects_duplicate_ids() {
    let err = import_json(include_str!("fixtures/duplicate_ids.json")).unwrap_err();
    match err {
        DocumentError::DuplicateId { index, id } => {
            assert_eq!(index, 2);
            assert_eq!(id.as_str(), "a");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn import_rejects_cyclic_groups() {
    let err = import_json(include_str!("fixtures/cyclic_groups.json")).unwrap_err();
    assert!(matches!(err, DocumentError::HierarchyCycle(_)));
}

#[test]
fn imported_ids_are_unique() {
    let doc = import_json(include_str!("fixtures/grouped_scene.json")).unwrap();
    let ids: HashSet<_> = doc.elements.iter().map(|el| el.id).collect();
    assert_eq!(ids.len(), doc.elements.len());
}

// ─── Export ──────────────────────────────────────────────────────────────

#[test]
fn export_then_import_preserves_geometry() {
    let doc = import_json(include_str!("fixtures/grouped_scene.json")).unwrap();
    let json = export_json(&doc.elements, doc.artboard_dimensions).unwrap();
    let again = import_json(&json).unwrap();

    assert_eq!(again.elements.len(), doc.elements.len());
    for (a, b) in doc.elements.iter().zip(&again.elements) {
        assert_eq!(a.bounds(), b.bounds());
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.data, b.data);
    }
}

#[test]
fn export_never_writes_selection() {
    let mut doc = import_json(include_str!("fixtures/grouped_scene.json")).unwrap();
    doc.elements[0].selected = true;
    let json = export_json(&doc.elements, doc.artboard_dimensions).unwrap();
    assert!(!json.contains("\"selected\""));
}
