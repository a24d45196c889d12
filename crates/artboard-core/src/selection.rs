//! Selection state.
//!
//! The selection is an ordered set of ids. It is the source of truth; the
//! `selected` flag on elements is a mirror kept for renderers and is
//! refreshed with [`Selection::sync_flags`].

use crate::geometry::union_bounds;
use crate::hierarchy::find;
use crate::hit::hit_test_rect;
use crate::id::ElementId;
use crate::model::Element;
use kurbo::Rect;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = ElementId>) -> Self {
        let mut sel = Self::new();
        sel.select_many(ids);
        sel
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// Click selection. Without `add`, the selection becomes just `id`.
    /// With `add`, `id` is toggled in or out.
    pub fn select(&mut self, id: ElementId, add: bool) {
        if !add {
            self.ids.clear();
            self.ids.push(id);
        } else if let Some(pos) = self.ids.iter().position(|s| *s == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    /// Replace the selection wholesale. Duplicates are dropped.
    pub fn select_many(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.ids.clear();
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Select every element for which `selectable` holds, in scene order.
    pub fn select_all(&mut self, elements: &[Element], selectable: impl Fn(&Element) -> bool) {
        self.select_many(elements.iter().filter(|el| selectable(el)).map(|el| el.id));
    }

    /// Swap selected and unselected among the selectable elements.
    pub fn invert(&mut self, elements: &[Element], selectable: impl Fn(&Element) -> bool) {
        let current: HashSet<ElementId> = self.ids.iter().copied().collect();
        self.select_many(
            elements
                .iter()
                .filter(|el| selectable(el) && !current.contains(&el.id))
                .map(|el| el.id),
        );
    }

    /// Marquee selection: every visible element whose bounds overlap `rect`
    /// (edges touching count). `rect` is in canvas space.
    pub fn select_in_rect(
        &mut self,
        elements: &[Element],
        rect: Rect,
        add: bool,
        selectable: impl Fn(&Element) -> bool,
    ) {
        let hits = hit_test_rect(elements, rect, selectable);
        if add {
            let merged: Vec<ElementId> = self.ids.iter().copied().chain(hits).collect();
            self.select_many(merged);
        } else {
            self.select_many(hits);
        }
    }

    /// Shift-click in the layer list: everything between `anchor` and
    /// `target` in scene order, inclusive. Unknown ids select just the
    /// target when it exists.
    pub fn select_range(&mut self, elements: &[Element], anchor: ElementId, target: ElementId) {
        let a = elements.iter().position(|el| el.id == anchor);
        let b = elements.iter().position(|el| el.id == target);
        match (a, b) {
            (Some(a), Some(b)) => {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                self.select_many(elements[lo..=hi].iter().map(|el| el.id));
            }
            (None, Some(_)) => self.select(target, false),
            _ => {}
        }
    }

    /// Drop ids that no longer exist in `elements`.
    pub fn retain_existing(&mut self, elements: &[Element]) {
        let live: HashSet<ElementId> = elements.iter().map(|el| el.id).collect();
        self.ids.retain(|id| live.contains(id));
    }

    /// Mirror the selection onto each element's `selected` flag.
    pub fn sync_flags(&self, elements: &mut [Element]) {
        let set: HashSet<ElementId> = self.ids.iter().copied().collect();
        for el in elements {
            el.selected = set.contains(&el.id);
        }
    }

    /// Rebuild a selection from the `selected` flags, in scene order.
    pub fn from_flags(elements: &[Element]) -> Self {
        Self::from_ids(elements.iter().filter(|el| el.selected).map(|el| el.id))
    }
}

// ─── Derived queries ─────────────────────────────────────────────────────

/// The selected element when exactly one is selected.
pub fn selected_element_data<'a>(elements: &'a [Element], sel: &Selection) -> Option<&'a Element> {
    match sel.ids() {
        [only] => find(elements, *only),
        _ => None,
    }
}

/// All selected elements, in selection order.
pub fn selected_elements_data<'a>(elements: &'a [Element], sel: &Selection) -> Vec<&'a Element> {
    sel.ids().iter().filter_map(|id| find(elements, *id)).collect()
}

pub fn has_multiple_selection(sel: &Selection) -> bool {
    sel.len() > 1
}

/// Union of the selected elements' bounds.
pub fn selection_bounds(elements: &[Element], sel: &Selection) -> Option<Rect> {
    union_bounds(selected_elements_data(elements, sel).into_iter().map(Element::bounds))
}
