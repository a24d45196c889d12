//! Pure scene operations.
//!
//! Every function takes the current element list and returns a new one; the
//! input is never modified. Unknown ids are not errors: the operation
//! returns an unchanged copy, since async callbacks can legitimately race
//! with deletes.

use crate::geometry::union_bounds;
use crate::hierarchy::{HierarchyIndex, find, subtree_ids, subtree_roots};
use crate::id::ElementId;
use crate::model::*;
use std::collections::{HashMap, HashSet};

// ─── Move ────────────────────────────────────────────────────────────────

/// Translate one element. Groups move rigidly with their whole subtree.
pub fn move_element(elements: &[Element], id: ElementId, dx: f64, dy: f64) -> Vec<Element> {
    if find(elements, id).is_none() {
        return elements.to_vec();
    }
    translate_ids(elements, &subtree_ids(elements, id), dx, dy)
}

/// Translate every selected element, plus the subtrees of selected groups.
/// An element reached twice still moves once.
pub fn move_selected_elements(
    elements: &[Element],
    selected: &[ElementId],
    dx: f64,
    dy: f64,
) -> Vec<Element> {
    let index = HierarchyIndex::build(elements);
    let mut ids = HashSet::new();
    for id in selected.iter().filter(|id| index.contains(**id)) {
        ids.insert(*id);
        ids.extend(index.descendants(*id));
    }
    translate_ids(elements, &ids, dx, dy)
}

fn translate_ids(elements: &[Element], ids: &HashSet<ElementId>, dx: f64, dy: f64) -> Vec<Element> {
    elements
        .iter()
        .map(|el| {
            let mut el = el.clone();
            if ids.contains(&el.id) {
                el.x = (el.x + dx).round();
                el.y = (el.y + dy).round();
            }
            el
        })
        .collect()
}

// ─── Resize ──────────────────────────────────────────────────────────────

/// Whether a resize is a committed step or a live gesture frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMode {
    #[default]
    Commit,
    Live,
}

impl ResizeMode {
    pub fn min_size(self) -> f64 {
        match self {
            ResizeMode::Commit => MIN_ELEMENT_SIZE,
            ResizeMode::Live => MIN_LIVE_ELEMENT_SIZE,
        }
    }
}

/// Requested new size for an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeRequest {
    pub width: f64,
    pub height: f64,
    /// Derive the height from the width using the element's current ratio.
    pub preserve_aspect_ratio: bool,
}

impl ResizeRequest {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            preserve_aspect_ratio: false,
        }
    }

    pub fn preserving(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            preserve_aspect_ratio: true,
        }
    }

    /// Target size for an element currently `w`×`h`.
    fn target_for(&self, w: f64, h: f64) -> (f64, f64) {
        if self.preserve_aspect_ratio && w > 0.0 && h > 0.0 {
            (self.width, self.width * h / w)
        } else {
            (self.width, self.height)
        }
    }
}

/// Resize one element.
///
/// Leaves are clamped to the mode's minimum size and get their corner
/// radius re-clamped. Groups scale every descendant's offset from the group
/// origin and its size by the same factors; text inside a group also scales
/// its font size and line height by the smaller factor.
pub fn resize_element(
    elements: &[Element],
    id: ElementId,
    request: ResizeRequest,
    mode: ResizeMode,
) -> Vec<Element> {
    let Some(target) = find(elements, id) else {
        return elements.to_vec();
    };
    let (w, h) = request.target_for(target.width, target.height);
    if !(w.is_finite() && h.is_finite()) {
        return elements.to_vec();
    }
    let min = mode.min_size();
    let new_w = w.max(min).round();
    let new_h = h.max(min).round();

    if !target.is_group() {
        return elements
            .iter()
            .map(|el| {
                let mut el = el.clone();
                if el.id == id {
                    el.width = new_w;
                    el.height = new_h;
                    el.clamp_corner_radius();
                }
                el
            })
            .collect();
    }

    let sx = new_w / target.width;
    let sy = new_h / target.height;
    let origin = (target.x, target.y);
    let descendants: HashSet<ElementId> = HierarchyIndex::build(elements)
        .descendants(id)
        .into_iter()
        .collect();

    elements
        .iter()
        .map(|el| {
            let mut el = el.clone();
            if el.id == id {
                el.width = new_w;
                el.height = new_h;
            } else if descendants.contains(&el.id) {
                scale_descendant(&mut el, origin, sx, sy, min);
            }
            el
        })
        .collect()
}

fn scale_descendant(el: &mut Element, origin: (f64, f64), sx: f64, sy: f64, min: f64) {
    el.x = origin.0 + ((el.x - origin.0) * sx).round();
    el.y = origin.1 + ((el.y - origin.1) * sy).round();
    el.width = (el.width * sx).round().max(min);
    el.height = (el.height * sy).round().max(min);
    let font_scale = sx.min(sy);
    if let ElementData::Text(t) = &mut el.data {
        t.font_size = (t.font_size * font_scale).max(MIN_FONT_SIZE);
        t.line_height = (t.line_height * font_scale).max(MIN_LINE_HEIGHT);
    }
    el.clamp_corner_radius();
}

/// Resize the whole selection proportionally, driven by `base_id`.
///
/// The scale is taken from the base element's old → new size. Every
/// selected element's offset from the selection's top-left corner and its
/// size are scaled by it; selected groups carry their subtrees along.
pub fn resize_selected_elements(
    elements: &[Element],
    selected: &[ElementId],
    base_id: ElementId,
    request: ResizeRequest,
    mode: ResizeMode,
) -> Vec<Element> {
    let Some(base) = find(elements, base_id) else {
        return elements.to_vec();
    };
    if selected.len() <= 1 {
        return resize_element(elements, base_id, request, mode);
    }
    let (w, h) = request.target_for(base.width, base.height);
    let min = mode.min_size();
    let sx = w.max(min) / base.width;
    let sy = h.max(min) / base.height;
    if !(sx.is_finite() && sy.is_finite()) {
        return elements.to_vec();
    }

    // Children of selected groups follow their group instead of scaling twice.
    let members: Vec<&Element> = subtree_roots(elements, selected)
        .into_iter()
        .filter_map(|id| find(elements, id))
        .collect();
    let Some(bounds) = union_bounds(members.iter().map(|el| el.bounds())) else {
        return elements.to_vec();
    };

    let mut out = elements.to_vec();
    for member in members {
        let new_x = bounds.x0 + ((member.x - bounds.x0) * sx).round();
        let new_y = bounds.y0 + ((member.y - bounds.y0) * sy).round();
        let (dx, dy) = (new_x - member.x, new_y - member.y);
        let req = ResizeRequest::new(member.width * sx, member.height * sy);
        out = resize_element(&out, member.id, req, mode);
        out = move_element(&out, member.id, dx, dy);
    }
    out
}

// ─── Delete ──────────────────────────────────────────────────────────────

/// Remove an element and its subtree. The parent forgets the child, and a
/// parent group left without children is removed as well (repeating up the
/// chain).
pub fn delete_element(elements: &[Element], id: ElementId) -> Vec<Element> {
    delete_elements(elements, &[id])
}

/// Remove several elements (and their subtrees) in one pass.
pub fn delete_elements(elements: &[Element], ids: &[ElementId]) -> Vec<Element> {
    let index = HierarchyIndex::build(elements);
    let mut doomed: HashSet<ElementId> = HashSet::new();
    for id in ids.iter().filter(|id| index.contains(**id)) {
        doomed.insert(*id);
        doomed.extend(index.descendants(*id));
    }
    if doomed.is_empty() {
        return elements.to_vec();
    }

    let mut out: Vec<Element> = elements
        .iter()
        .filter(|el| !doomed.contains(&el.id))
        .cloned()
        .collect();

    // Prune dangling child references, then collect groups that went empty
    // because of this delete. Groups that were already empty stay.
    loop {
        let mut emptied = Vec::new();
        for el in out.iter_mut() {
            let before = el.children.len();
            el.children.retain(|c| !doomed.contains(c));
            if before > 0 && el.children.is_empty() && el.is_group() {
                emptied.push(el.id);
            }
        }
        if emptied.is_empty() {
            break;
        }
        log::trace!("collecting emptied groups {emptied:?}");
        doomed.extend(emptied.iter().copied());
        out.retain(|el| !emptied.contains(&el.id));
    }
    out
}

// ─── Z-order ─────────────────────────────────────────────────────────────

/// Move the element at `old_index` to `new_index` (splice semantics).
/// Out-of-range indices leave the scene unchanged.
pub fn reorder_elements(elements: &[Element], old_index: usize, new_index: usize) -> Vec<Element> {
    let mut out = elements.to_vec();
    if old_index >= out.len() || new_index >= out.len() {
        return out;
    }
    let el = out.remove(old_index);
    out.insert(new_index, el);
    out
}

/// Direction for the single-step and jump z-order commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    Forward,
    Backward,
    ToFront,
    ToBack,
}

/// Restack `id` among its siblings: the parent's `children` for grouped
/// elements, the top-level elements otherwise. The flat list is reordered to
/// match so paint order stays consistent.
pub fn restack_element(elements: &[Element], id: ElementId, order: ZOrder) -> Vec<Element> {
    let Some(el) = find(elements, id) else {
        return elements.to_vec();
    };
    let siblings: Vec<ElementId> = match el.parent_id.and_then(|p| find(elements, p)) {
        Some(parent) => parent.children.iter().copied().collect(),
        None => elements
            .iter()
            .filter(|e| e.parent_id.is_none())
            .map(|e| e.id)
            .collect(),
    };
    let Some(pos) = siblings.iter().position(|s| *s == id) else {
        return elements.to_vec();
    };
    let last = siblings.len() - 1;
    let to = match order {
        ZOrder::Forward => (pos + 1).min(last),
        ZOrder::Backward => pos.saturating_sub(1),
        ZOrder::ToFront => last,
        ZOrder::ToBack => 0,
    };
    if to == pos {
        return elements.to_vec();
    }

    let mut new_order = siblings.clone();
    let moved = new_order.remove(pos);
    new_order.insert(to, moved);

    let mut out = elements.to_vec();
    if let Some(pid) = el.parent_id
        && let Some(parent) = out.iter_mut().find(|e| e.id == pid)
    {
        parent.children = new_order.iter().copied().collect();
    }

    // Each sibling moves together with its subtree: the flat-list slots held
    // by all sibling subtrees are refilled block by block in the new order.
    let index = HierarchyIndex::build(&out);
    let mut rank_of: HashMap<ElementId, usize> = HashMap::new();
    for (rank, sid) in new_order.iter().enumerate() {
        rank_of.insert(*sid, rank);
        for d in index.descendants(*sid) {
            rank_of.insert(d, rank);
        }
    }
    let slots: Vec<usize> = out
        .iter()
        .enumerate()
        .filter(|(_, e)| rank_of.contains_key(&e.id))
        .map(|(i, _)| i)
        .collect();
    let mut blocks: Vec<Element> = slots.iter().map(|&i| out[i].clone()).collect();
    blocks.sort_by_key(|e| rank_of.get(&e.id).copied().unwrap_or(usize::MAX));
    for (slot, el) in slots.into_iter().zip(blocks) {
        out[slot] = el;
    }
    out
}

// ─── Clipboard ───────────────────────────────────────────────────────────

/// Snapshot the selection plus the subtrees of selected groups, in scene
/// order, without duplicates.
pub fn copy_to_clipboard(elements: &[Element], selected: &[ElementId]) -> Vec<Element> {
    let index = HierarchyIndex::build(elements);
    let mut ids = HashSet::new();
    for id in selected.iter().filter(|id| index.contains(**id)) {
        ids.insert(*id);
        ids.extend(index.descendants(*id));
    }
    elements
        .iter()
        .filter(|el| ids.contains(&el.id))
        .cloned()
        .collect()
}

/// Result of [`paste_from_clipboard`].
#[derive(Debug, Clone)]
pub struct PasteOutcome {
    pub elements: Vec<Element>,
    /// Fresh ids of everything pasted, in clipboard order.
    pub pasted: Vec<ElementId>,
}

/// Paste clipboard contents with brand-new ids, offset by `offset` on both
/// axes.
///
/// Parent links and group children are remapped to the new ids. A pasted
/// element whose parent was not copied becomes top-level. Pasted elements end
/// up selected, everything else deselected.
pub fn paste_from_clipboard(
    elements: &[Element],
    clipboard: &[Element],
    offset: f64,
) -> PasteOutcome {
    let id_map: HashMap<ElementId, ElementId> = clipboard
        .iter()
        .map(|el| (el.id, ElementId::generate()))
        .collect();

    let mut out: Vec<Element> = elements
        .iter()
        .map(|el| {
            let mut el = el.clone();
            el.selected = false;
            el
        })
        .collect();

    let mut pasted = Vec::with_capacity(clipboard.len());
    for original in clipboard {
        let mut el = original.clone();
        el.id = id_map[&original.id];
        el.x = (el.x + offset).round();
        el.y = (el.y + offset).round();
        el.parent_id = original.parent_id.and_then(|p| id_map.get(&p).copied());
        el.children = original
            .children
            .iter()
            .filter_map(|c| id_map.get(c).copied())
            .collect();
        el.selected = true;
        pasted.push(el.id);
        out.push(el);
    }

    PasteOutcome {
        elements: out,
        pasted,
    }
}

// ─── Per-element edits ───────────────────────────────────────────────────

/// Flip `visible` on one element. Descendants keep their own flag.
pub fn toggle_element_visibility(elements: &[Element], id: ElementId) -> Vec<Element> {
    patch_element(elements, id, |el| el.visible = !el.visible)
}

/// Apply a property update to one element. Size updates are committed
/// resizes.
pub fn update_element(elements: &[Element], id: ElementId, update: &PropertyUpdate) -> Vec<Element> {
    if let PropertyUpdate::Size { width, height } = *update {
        return resize_element(elements, id, ResizeRequest::new(width, height), ResizeMode::Commit);
    }
    patch_element(elements, id, |el| {
        el.apply(update);
    })
}

/// Apply a property update to each listed element that supports it.
pub fn update_elements(
    elements: &[Element],
    ids: &[ElementId],
    update: &PropertyUpdate,
) -> Vec<Element> {
    if let PropertyUpdate::Size { width, height } = *update {
        let request = ResizeRequest::new(width, height);
        return subtree_roots(elements, ids)
            .into_iter()
            .fold(elements.to_vec(), |acc, id| {
                resize_element(&acc, id, request, ResizeMode::Commit)
            });
    }
    let ids: HashSet<ElementId> = ids.iter().copied().collect();
    elements
        .iter()
        .map(|el| {
            let mut el = el.clone();
            if ids.contains(&el.id) {
                el.apply(update);
            }
            el
        })
        .collect()
}

/// Replace a single element by id with a patched copy.
pub fn patch_element(
    elements: &[Element],
    id: ElementId,
    patch: impl FnOnce(&mut Element),
) -> Vec<Element> {
    let mut out = elements.to_vec();
    if let Some(el) = out.iter_mut().find(|el| el.id == id) {
        patch(el);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::get_element_descendants;
    use kurbo::Rect;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> ElementId {
        ElementId::intern(s)
    }

    fn rect(name: &str, x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::new(
            id(name),
            ElementData::Rectangle(RectangleProps::default()),
            Rect::new(x, y, x + w, y + h),
        )
    }

    fn text(name: &str, x: f64, y: f64) -> Element {
        Element::new(
            id(name),
            ElementData::Text(TextProps {
                content: "Hello".into(),
                ..TextProps::default()
            }),
            Rect::new(x, y, x + 100.0, y + 20.0),
        )
    }

    fn group(name: &str, bounds: Rect, children: &[&str]) -> Element {
        let mut g = Element::new(id(name), ElementData::Group(GroupProps::default()), bounds);
        g.children = children.iter().map(|c| id(c)).collect();
        g
    }

    fn under(mut el: Element, parent: &str) -> Element {
        el.parent_id = Some(id(parent));
        el
    }

    fn pair_group() -> Vec<Element> {
        vec![
            group("s_g", Rect::new(0.0, 0.0, 150.0, 50.0), &["s_a", "s_b"]),
            under(rect("s_a", 0.0, 0.0, 50.0, 50.0), "s_g"),
            under(rect("s_b", 100.0, 0.0, 50.0, 50.0), "s_g"),
            rect("s_out", 400.0, 400.0, 30.0, 30.0),
        ]
    }

    #[test]
    fn move_leaf_rounds() {
        let scene = vec![rect("m1", 10.0, 10.0, 20.0, 20.0)];
        let out = move_element(&scene, id("m1"), 5.4, -2.6);
        assert_eq!((out[0].x, out[0].y), (15.0, 7.0));
        assert_eq!(scene[0].x, 10.0, "input untouched");
    }

    #[test]
    fn move_group_moves_subtree_only() {
        let scene = pair_group();
        let out = move_element(&scene, id("s_g"), 10.0, 20.0);
        for (before, after) in scene.iter().zip(&out) {
            if before.id == id("s_out") {
                assert_eq!(before, after);
            } else {
                assert_eq!(after.x - before.x, 10.0);
                assert_eq!(after.y - before.y, 20.0);
            }
        }
    }

    #[test]
    fn move_selected_dedupes_group_and_child() {
        let scene = pair_group();
        let out = move_selected_elements(&scene, &[id("s_g"), id("s_a")], 5.0, 0.0);
        let a = find(&out, id("s_a")).unwrap();
        assert_eq!(a.x, 5.0, "child moved exactly once");
    }

    #[test]
    fn move_unknown_is_noop() {
        let scene = pair_group();
        assert_eq!(move_element(&scene, id("ghost"), 1.0, 1.0), scene);
    }

    #[test]
    fn resize_leaf_clamps_and_fixes_radius() {
        let mut r = rect("rz", 0.0, 0.0, 100.0, 100.0);
        if let ElementData::Rectangle(p) = &mut r.data {
            p.corner_radius = 40.0;
        }
        let out = resize_element(&[r], id("rz"), ResizeRequest::new(5.0, 60.0), ResizeMode::Commit);
        assert_eq!((out[0].width, out[0].height), (20.0, 60.0));
        assert_eq!(out[0].rectangle().unwrap().corner_radius, 10.0);
    }

    #[test]
    fn live_resize_has_lower_floor() {
        let scene = vec![rect("rl", 0.0, 0.0, 100.0, 100.0)];
        let out = resize_element(&scene, id("rl"), ResizeRequest::new(5.0, 12.0), ResizeMode::Live);
        assert_eq!((out[0].width, out[0].height), (10.0, 12.0));
    }

    #[test]
    fn resize_preserving_aspect() {
        let scene = vec![rect("ra", 100.0, 100.0, 150.0, 75.0)];
        let out = resize_element(
            &scene,
            id("ra"),
            ResizeRequest::preserving(300.0, 999.0),
            ResizeMode::Commit,
        );
        assert_eq!((out[0].width, out[0].height), (300.0, 150.0));
    }

    #[test]
    fn resize_group_scales_children() {
        let scene = pair_group();
        let out = resize_element(&scene, id("s_g"), ResizeRequest::new(300.0, 100.0), ResizeMode::Commit);
        let a = find(&out, id("s_a")).unwrap();
        let b = find(&out, id("s_b")).unwrap();
        assert_eq!((a.x, a.y, a.width, a.height), (0.0, 0.0, 100.0, 100.0));
        assert_eq!((b.x, b.y, b.width, b.height), (200.0, 0.0, 100.0, 100.0));
        let g = find(&out, id("s_g")).unwrap();
        assert_eq!((g.width, g.height), (300.0, 100.0));
    }

    #[test]
    fn resize_group_scales_text_with_floors() {
        let scene = vec![
            group("t_g", Rect::new(0.0, 0.0, 200.0, 40.0), &["t_t"]),
            under(text("t_t", 100.0, 20.0), "t_g"),
        ];
        let out = resize_element(&scene, id("t_g"), ResizeRequest::new(400.0, 60.0), ResizeMode::Commit);
        let t = find(&out, id("t_t")).unwrap();
        let props = t.text().unwrap();
        assert_eq!(props.font_size, 24.0);
        assert_eq!(props.line_height, 30.0);
        assert_eq!((t.x, t.y), (200.0, 30.0));

        let out = resize_element(&scene, id("t_g"), ResizeRequest::new(20.0, 20.0), ResizeMode::Commit);
        let props = find(&out, id("t_t")).unwrap().text().unwrap().clone();
        assert_eq!(props.font_size, MIN_FONT_SIZE);
        assert_eq!(props.line_height, MIN_LINE_HEIGHT);
    }

    #[test]
    fn resize_selected_scales_around_selection_origin() {
        let scene = vec![
            rect("ms_a", 0.0, 0.0, 50.0, 50.0),
            rect("ms_b", 100.0, 50.0, 50.0, 50.0),
        ];
        let out = resize_selected_elements(
            &scene,
            &[id("ms_a"), id("ms_b")],
            id("ms_a"),
            ResizeRequest::new(100.0, 100.0),
            ResizeMode::Commit,
        );
        let b = find(&out, id("ms_b")).unwrap();
        assert_eq!((b.x, b.y, b.width, b.height), (200.0, 100.0, 100.0, 100.0));
    }

    #[test]
    fn delete_group_cascades() {
        let scene = pair_group();
        let doomed = get_element_descendants(&scene, id("s_g"));
        let out = delete_element(&scene, id("s_g"));
        assert!(find(&out, id("s_g")).is_none());
        for d in doomed {
            assert!(find(&out, d).is_none());
        }
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn delete_last_child_collects_parents() {
        let scene = vec![
            group("d_outer", Rect::new(0.0, 0.0, 10.0, 10.0), &["d_inner"]),
            under(group("d_inner", Rect::new(0.0, 0.0, 10.0, 10.0), &["d_leaf"]), "d_outer"),
            under(rect("d_leaf", 0.0, 0.0, 10.0, 10.0), "d_inner"),
            rect("d_keep", 0.0, 0.0, 10.0, 10.0),
        ];
        let out = delete_element(&scene, id("d_leaf"));
        let ids: Vec<_> = out.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![id("d_keep")]);
    }

    #[test]
    fn delete_child_keeps_non_empty_parent() {
        let scene = pair_group();
        let out = delete_element(&scene, id("s_a"));
        let g = find(&out, id("s_g")).unwrap();
        assert_eq!(g.children.as_slice(), &[id("s_b")]);
    }

    #[test]
    fn reorder_splices() {
        let scene = vec![
            rect("o_a", 0.0, 0.0, 1.0, 1.0),
            rect("o_b", 0.0, 0.0, 1.0, 1.0),
            rect("o_c", 0.0, 0.0, 1.0, 1.0),
        ];
        let out = reorder_elements(&scene, 0, 2);
        let ids: Vec<_> = out.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![id("o_b"), id("o_c"), id("o_a")]);
        assert_eq!(reorder_elements(&scene, 0, 9), scene);
    }

    #[test]
    fn restack_top_level_and_in_group() {
        let scene = vec![
            rect("z_a", 0.0, 0.0, 1.0, 1.0),
            rect("z_b", 0.0, 0.0, 1.0, 1.0),
            rect("z_c", 0.0, 0.0, 1.0, 1.0),
        ];
        let out = restack_element(&scene, id("z_a"), ZOrder::ToFront);
        let ids: Vec<_> = out.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![id("z_b"), id("z_c"), id("z_a")]);

        let out = restack_element(&scene, id("z_c"), ZOrder::Backward);
        let ids: Vec<_> = out.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![id("z_a"), id("z_c"), id("z_b")]);

        let scene = pair_group();
        let out = restack_element(&scene, id("s_b"), ZOrder::ToBack);
        let g = find(&out, id("s_g")).unwrap();
        assert_eq!(g.children.as_slice(), &[id("s_b"), id("s_a")]);
        assert_eq!(out[1].id, id("s_b"));
    }

    #[test]
    fn restack_moves_group_with_its_subtree() {
        let scene = pair_group();
        let out = restack_element(&scene, id("s_out"), ZOrder::ToBack);
        let ids: Vec<_> = out.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![id("s_out"), id("s_g"), id("s_a"), id("s_b")]);
    }

    #[test]
    fn copy_includes_group_subtree() {
        let scene = pair_group();
        let clip = copy_to_clipboard(&scene, &[id("s_g"), id("s_a")]);
        let ids: Vec<_> = clip.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![id("s_g"), id("s_a"), id("s_b")]);
    }

    #[test]
    fn paste_remaps_ids_and_parents() {
        let scene = pair_group();
        let clip = copy_to_clipboard(&scene, &[id("s_g")]);
        let out = paste_from_clipboard(&scene, &clip, 20.0);
        assert_eq!(out.pasted.len(), 3);
        let old_ids: HashSet<_> = scene.iter().map(|e| e.id).collect();
        let new_group = find(&out.elements, out.pasted[0]).unwrap();
        assert!(new_group.is_group());
        assert_eq!((new_group.x, new_group.y), (20.0, 20.0));
        for child in &new_group.children {
            assert!(!old_ids.contains(child));
            assert_eq!(find(&out.elements, *child).unwrap().parent_id, Some(new_group.id));
        }
        for el in &out.elements {
            assert_eq!(el.selected, out.pasted.contains(&el.id));
        }
    }

    #[test]
    fn paste_orphan_becomes_top_level() {
        let scene = pair_group();
        let clip = copy_to_clipboard(&scene, &[id("s_a")]);
        let out = paste_from_clipboard(&scene, &clip, 20.0);
        let pasted = find(&out.elements, out.pasted[0]).unwrap();
        assert_eq!(pasted.parent_id, None);
    }

    #[test]
    fn visibility_does_not_cascade() {
        let scene = pair_group();
        let out = toggle_element_visibility(&scene, id("s_g"));
        assert!(!find(&out, id("s_g")).unwrap().visible);
        assert!(find(&out, id("s_a")).unwrap().visible);
        let out = toggle_element_visibility(&out, id("s_g"));
        assert!(find(&out, id("s_g")).unwrap().visible);
    }

    #[test]
    fn size_update_scales_group_subtree() {
        let scene = pair_group();
        let out = update_element(
            &scene,
            id("s_g"),
            &PropertyUpdate::Size { width: 300.0, height: 100.0 },
        );
        let b = find(&out, id("s_b")).unwrap();
        assert_eq!((b.x, b.y, b.width, b.height), (200.0, 0.0, 100.0, 100.0));
        let leaf = update_element(&scene, id("s_out"), &PropertyUpdate::Size { width: 5.0, height: 60.0 });
        let el = find(&leaf, id("s_out")).unwrap();
        assert_eq!((el.width, el.height), (MIN_ELEMENT_SIZE, 60.0));
    }

    #[test]
    fn size_update_on_group_and_member_scales_once() {
        let scene = pair_group();
        let out = update_elements(
            &scene,
            &[id("s_g"), id("s_a")],
            &PropertyUpdate::Size { width: 300.0, height: 100.0 },
        );
        let a = find(&out, id("s_a")).unwrap();
        assert_eq!((a.width, a.height), (100.0, 100.0));
    }

    #[test]
    fn update_many_skips_unsupported() {
        let scene = vec![rect("up_r", 0.0, 0.0, 10.0, 10.0), text("up_t", 0.0, 0.0)];
        let out = update_elements(&scene, &[id("up_r"), id("up_t")], &PropertyUpdate::FontSize(32.0));
        assert_eq!(out[0], scene[0]);
        assert_eq!(out[1].text().unwrap().font_size, 32.0);
    }
}
