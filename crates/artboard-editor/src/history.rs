//! Undo/redo history.
//!
//! Every undoable action pushes a snapshot of the scene as it was *before*
//! the action. Snapshots are `Arc`-shared with the store, so recording an
//! entry never copies elements.
//!
//! Drag gestures use **snapshot batching**: the scene is captured when the
//! gesture begins, live frames are applied without touching the stacks, and
//! ending the gesture pushes a single entry if anything changed.

use artboard_core::{Element, ElementId};
use std::sync::Arc;

/// A shared, immutable version of the scene.
pub type Snapshot = Arc<Vec<Element>>;

/// Whether a store mutation creates an undo entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    #[default]
    Record,
    /// Live gesture frame or programmatic patch: apply without an entry.
    Skip,
}

/// One undo (or redo) step.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub snapshot: Snapshot,
    pub description: String,
}

/// Bounded undo/redo stacks with gesture batching.
#[derive(Debug)]
pub struct History {
    past: Vec<HistoryEntry>,
    future: Vec<HistoryEntry>,
    /// Maximum undo depth.
    max_depth: usize,
    /// Gesture nesting depth (0 = not in a gesture).
    gesture_depth: usize,
    /// Scene captured at the start of the outermost gesture.
    gesture_snapshot: Option<Snapshot>,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            past: Vec::with_capacity(max_depth.min(64)),
            future: Vec::new(),
            max_depth: max_depth.max(1),
            gesture_depth: 0,
            gesture_snapshot: None,
        }
    }

    /// Push the pre-action scene and clear the redo stack.
    ///
    /// Inside a gesture this is a no-op: the gesture's start snapshot
    /// already covers the change.
    pub fn record(&mut self, before: &Snapshot, description: &str) {
        if self.gesture_depth > 0 {
            return;
        }
        self.push_past(HistoryEntry {
            snapshot: Arc::clone(before),
            description: description.to_string(),
        });
        self.future.clear();
    }

    fn push_past(&mut self, entry: HistoryEntry) {
        self.past.push(entry);
        if self.past.len() > self.max_depth {
            self.past.remove(0);
        }
    }

    /// Step back. `current` moves to the redo stack and the entry holding
    /// the scene to restore is returned.
    pub fn undo(&mut self, current: &Snapshot) -> Option<HistoryEntry> {
        let entry = self.past.pop()?;
        self.future.push(HistoryEntry {
            snapshot: Arc::clone(current),
            description: entry.description.clone(),
        });
        Some(entry)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: &Snapshot) -> Option<HistoryEntry> {
        let entry = self.future.pop()?;
        self.push_past(HistoryEntry {
            snapshot: Arc::clone(current),
            description: entry.description.clone(),
        });
        Some(entry)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.past.len()
    }

    pub fn redo_len(&self) -> usize {
        self.future.len()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.past.last().map(|e| e.description.as_str())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.future.last().map(|e| e.description.as_str())
    }

    // ─── Gestures ────────────────────────────────────────────────────────

    /// Start a gesture. Nested calls only bump the depth.
    pub fn begin_gesture(&mut self, current: &Snapshot) {
        if self.gesture_depth == 0 {
            self.gesture_snapshot = Some(Arc::clone(current));
        }
        self.gesture_depth += 1;
    }

    /// Close a gesture. When the outermost gesture ends and the scene
    /// differs from its start, exactly one entry is pushed. Returns whether
    /// an entry was pushed.
    pub fn end_gesture(&mut self, current: &Snapshot, description: &str) -> bool {
        if self.gesture_depth == 0 {
            return false;
        }
        self.gesture_depth -= 1;
        if self.gesture_depth > 0 {
            return false;
        }
        let Some(before) = self.gesture_snapshot.take() else {
            return false;
        };
        if Arc::ptr_eq(&before, current) || *before == **current {
            return false;
        }
        self.record(&before, description);
        true
    }

    pub fn in_gesture(&self) -> bool {
        self.gesture_depth > 0
    }

    /// Patch element `id` inside every stored snapshot that contains it.
    ///
    /// Used when an async result (an image's real size) arrives after the
    /// entries were recorded, so undo never resurrects the stale version.
    pub fn patch_element(&mut self, id: ElementId, patch: impl Fn(&mut Element)) {
        let snapshots = self
            .past
            .iter_mut()
            .chain(self.future.iter_mut())
            .map(|entry| &mut entry.snapshot)
            .chain(self.gesture_snapshot.as_mut());
        for snapshot in snapshots {
            if snapshot.iter().any(|el| el.id == id) {
                let elements = Arc::make_mut(snapshot);
                if let Some(el) = elements.iter_mut().find(|el| el.id == id) {
                    patch(el);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.gesture_depth = 0;
        self.gesture_snapshot = None;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artboard_core::{ElementData, Rect, RectangleProps};
    use pretty_assertions::assert_eq;

    fn scene(x: f64) -> Snapshot {
        Arc::new(vec![Element::new(
            ElementId::intern("hist_box"),
            ElementData::Rectangle(RectangleProps::default()),
            Rect::new(x, 0.0, x + 10.0, 10.0),
        )])
    }

    #[test]
    fn undo_redo_walks_snapshots() {
        let mut history = History::new(100);
        let s0 = scene(0.0);
        let s1 = scene(10.0);

        history.record(&s0, "move");
        assert!(history.can_undo());

        let restored = history.undo(&s1).unwrap();
        assert!(Arc::ptr_eq(&restored.snapshot, &s0));
        assert_eq!(restored.description, "move");
        assert!(history.can_redo());

        let again = history.redo(&s0).unwrap();
        assert!(Arc::ptr_eq(&again.snapshot, &s1));
        assert!(!history.can_redo());
    }

    #[test]
    fn new_action_clears_redo() {
        let mut history = History::new(100);
        history.record(&scene(0.0), "a");
        history.undo(&scene(1.0));
        assert!(history.can_redo());
        history.record(&scene(0.0), "b");
        assert!(!history.can_redo());
    }

    #[test]
    fn max_depth_trims_oldest() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.record(&scene(i as f64), "move");
        }
        assert_eq!(history.undo_len(), 3);
        let oldest_kept = (0..3)
            .filter_map(|_| history.undo(&scene(99.0)))
            .last()
            .unwrap();
        assert_eq!(oldest_kept.snapshot[0].x, 2.0);
    }

    #[test]
    fn gesture_pushes_one_entry() {
        let mut history = History::new(100);
        let start = scene(0.0);
        history.begin_gesture(&start);
        // Live frames are not recorded.
        history.record(&scene(1.0), "frame");
        history.begin_gesture(&scene(1.0));
        assert!(!history.end_gesture(&scene(2.0), "inner"));
        assert!(history.in_gesture());
        assert!(history.end_gesture(&scene(3.0), "drag"));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.undo_description(), Some("drag"));
        let entry = history.undo(&scene(3.0)).unwrap();
        assert!(Arc::ptr_eq(&entry.snapshot, &start));
    }

    #[test]
    fn patch_rewrites_every_snapshot() {
        let mut history = History::new(100);
        let s0 = scene(0.0);
        history.record(&s0, "a");
        history.record(&scene(5.0), "b");
        history.patch_element(ElementId::intern("hist_box"), |el| el.width = 77.0);
        history.patch_element(ElementId::intern("missing"), |el| el.width = 1.0);
        assert_eq!(s0[0].width, 10.0, "shared snapshot is copied, not mutated");
        while let Some(entry) = history.undo(&scene(9.0)) {
            assert_eq!(entry.snapshot[0].width, 77.0);
        }
    }

    #[test]
    fn unchanged_gesture_pushes_nothing() {
        let mut history = History::new(100);
        let start = scene(0.0);
        history.begin_gesture(&start);
        assert!(!history.end_gesture(&scene(0.0), "drag"));
        assert!(!history.can_undo());
        assert!(!history.end_gesture(&start, "stray"));
    }
}
