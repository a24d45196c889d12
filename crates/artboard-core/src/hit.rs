//! Hit testing: point → element lookup.
//!
//! Walks elements front-to-back (last painted = topmost). Hidden elements
//! never hit. Bounds are axis-aligned; rotation is ignored.

use crate::geometry::{rect_contains, rects_overlap};
use crate::hierarchy::{element_children, find};
use crate::id::ElementId;
use crate::model::Element;
use kurbo::{Point, Rect};

/// Topmost visible element containing `point`, among those accepted by
/// `filter`. Returns `None` for the background.
pub fn hit_test(
    elements: &[Element],
    point: Point,
    filter: impl Fn(&Element) -> bool,
) -> Option<ElementId> {
    elements
        .iter()
        .rev()
        .filter(|el| el.visible && filter(el))
        .find(|el| rect_contains(el.bounds(), point))
        .map(|el| el.id)
}

/// Topmost direct child of `group_id` under `point`.
///
/// A nested group counts as hit when the point lands on its own bounds or on
/// any of its descendants, so clicking a deeply nested leaf resolves to the
/// child that owns it.
pub fn hit_test_children(elements: &[Element], group_id: ElementId, point: Point) -> Option<ElementId> {
    find(elements, group_id)?;
    element_children(elements, group_id)
        .into_iter()
        .rev()
        .find(|child| hits_subtree(elements, child, point, 0))
        .map(|child| child.id)
}

fn hits_subtree(elements: &[Element], el: &Element, point: Point, depth: usize) -> bool {
    // Depth guard against malformed (cyclic) child lists.
    if !el.visible || depth > elements.len() {
        return false;
    }
    if rect_contains(el.bounds(), point) {
        return true;
    }
    el.is_group()
        && element_children(elements, el.id)
            .into_iter()
            .any(|child| hits_subtree(elements, child, point, depth + 1))
}

/// Every visible element accepted by `filter` whose bounds overlap `rect`
/// (edges touching count), in scene order. Used for marquee selection.
pub fn hit_test_rect(
    elements: &[Element],
    rect: Rect,
    filter: impl Fn(&Element) -> bool,
) -> Vec<ElementId> {
    elements
        .iter()
        .filter(|el| el.visible && filter(el))
        .filter(|el| rects_overlap(el.bounds(), rect))
        .map(|el| el.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementData, GroupProps, RectangleProps};
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> ElementId {
        ElementId::intern(s)
    }

    fn rect(name: &str, bounds: Rect, parent: Option<&str>) -> Element {
        let mut el = Element::new(id(name), ElementData::Rectangle(RectangleProps::default()), bounds);
        el.parent_id = parent.map(id);
        el
    }

    fn group(name: &str, bounds: Rect, children: &[&str], parent: Option<&str>) -> Element {
        let mut el = Element::new(id(name), ElementData::Group(GroupProps::default()), bounds);
        el.children = children.iter().map(|c| id(c)).collect();
        el.parent_id = parent.map(id);
        el
    }

    #[test]
    fn topmost_wins() {
        let elements = vec![
            rect("hit_back", Rect::new(0.0, 0.0, 100.0, 100.0), None),
            rect("hit_front", Rect::new(50.0, 50.0, 150.0, 150.0), None),
        ];
        assert_eq!(hit_test(&elements, Point::new(60.0, 60.0), |_| true), Some(id("hit_front")));
        assert_eq!(hit_test(&elements, Point::new(10.0, 10.0), |_| true), Some(id("hit_back")));
        assert_eq!(hit_test(&elements, Point::new(500.0, 500.0), |_| true), None);
    }

    #[test]
    fn hidden_elements_are_skipped() {
        let mut elements = vec![
            rect("hid_back", Rect::new(0.0, 0.0, 100.0, 100.0), None),
            rect("hid_front", Rect::new(0.0, 0.0, 100.0, 100.0), None),
        ];
        elements[1].visible = false;
        assert_eq!(hit_test(&elements, Point::new(5.0, 5.0), |_| true), Some(id("hid_back")));
    }

    #[test]
    fn children_hit_recurses_into_nested_groups() {
        // The nested group's own bounds are stale and do not cover its leaf.
        let elements = vec![
            group("hc_g", Rect::new(0.0, 0.0, 300.0, 300.0), &["hc_a", "hc_inner"], None),
            rect("hc_a", Rect::new(0.0, 0.0, 50.0, 50.0), Some("hc_g")),
            group("hc_inner", Rect::new(100.0, 100.0, 120.0, 120.0), &["hc_leaf"], Some("hc_g")),
            rect("hc_leaf", Rect::new(200.0, 200.0, 250.0, 250.0), Some("hc_inner")),
        ];
        assert_eq!(
            hit_test_children(&elements, id("hc_g"), Point::new(210.0, 210.0)),
            Some(id("hc_inner"))
        );
        assert_eq!(
            hit_test_children(&elements, id("hc_g"), Point::new(10.0, 10.0)),
            Some(id("hc_a"))
        );
        assert_eq!(hit_test_children(&elements, id("hc_g"), Point::new(290.0, 10.0)), None);
    }

    #[test]
    fn rect_hits_in_scene_order() {
        let elements = vec![
            rect("hr_a", Rect::new(0.0, 0.0, 10.0, 10.0), None),
            rect("hr_b", Rect::new(20.0, 0.0, 30.0, 10.0), None),
            rect("hr_c", Rect::new(100.0, 0.0, 110.0, 10.0), None),
        ];
        assert_eq!(
            hit_test_rect(&elements, Rect::new(5.0, 5.0, 25.0, 6.0), |_| true),
            vec![id("hr_a"), id("hr_b")]
        );
        assert_eq!(
            hit_test_rect(&elements, Rect::new(5.0, 5.0, 25.0, 6.0), |el| el.id != id("hr_a")),
            vec![id("hr_b")]
        );
    }
}
