//! Group isolation ("drill-in") editing.
//!
//! While a group is isolated only the group itself and its direct children
//! are selectable; everything else is rendered dimmed and ignores input.

use crate::hierarchy::{ancestors, find};
use crate::hit::hit_test_children;
use crate::id::ElementId;
use crate::model::Element;
use kurbo::Point;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsolationState {
    isolated_group: Option<ElementId>,
    /// Group path from the outermost ancestor down to the isolated group.
    breadcrumb: Vec<ElementId>,
}

impl IsolationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn isolated_group(&self) -> Option<ElementId> {
        self.isolated_group
    }

    pub fn is_isolated(&self) -> bool {
        self.isolated_group.is_some()
    }

    pub fn breadcrumb(&self) -> &[ElementId] {
        &self.breadcrumb
    }

    /// Isolate `group_id`. Fails (returning `false`) unless it names an
    /// existing group.
    pub fn enter(&mut self, group_id: ElementId, elements: &[Element]) -> bool {
        if !find(elements, group_id).is_some_and(Element::is_group) {
            return false;
        }
        let mut path = ancestors(elements, group_id);
        path.reverse();
        path.push(group_id);
        self.isolated_group = Some(group_id);
        self.breadcrumb = path;
        true
    }

    pub fn exit(&mut self) {
        self.isolated_group = None;
        self.breadcrumb.clear();
    }

    /// Drop the isolation if its group no longer exists (after a delete or
    /// undo).
    pub fn revalidate(&mut self, elements: &[Element]) {
        if let Some(g) = self.isolated_group
            && !find(elements, g).is_some_and(Element::is_group)
        {
            self.exit();
        }
    }

    /// Whether `el` can be selected or hit in the current mode.
    pub fn is_selectable(&self, el: &Element) -> bool {
        match self.isolated_group {
            None => true,
            Some(g) => el.id == g || el.parent_id == Some(g),
        }
    }

    /// Split elements into (selectable, inert).
    pub fn partition<'a>(&self, elements: &'a [Element]) -> (Vec<&'a Element>, Vec<&'a Element>) {
        elements.iter().partition(|el| self.is_selectable(el))
    }

    /// Clicking empty artboard clears the selection only outside isolation.
    pub fn background_click_clears_selection(&self) -> bool {
        !self.is_isolated()
    }

    /// The element a single click on `id` selects.
    ///
    /// Outside isolation that is the outermost ancestor, so clicking a
    /// grouped shape picks the group. While isolated it is the isolated
    /// group's direct child owning `id` (or the group itself); elements
    /// outside the group yield `None`.
    pub fn click_target(&self, elements: &[Element], id: ElementId) -> Option<ElementId> {
        find(elements, id)?;
        let mut chain = vec![id];
        chain.extend(ancestors(elements, id));
        match self.isolated_group {
            None => chain.last().copied(),
            Some(g) => {
                let at = chain.iter().position(|a| *a == g)?;
                Some(if at == 0 { g } else { chain[at - 1] })
            }
        }
    }
}

/// What a double-click on an element should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoubleClickAction {
    ExitIsolation,
    EnterIsolation {
        group: ElementId,
        select: Option<ElementId>,
    },
    None,
}

/// Decide the double-click outcome on element `id` at canvas `point`.
///
/// Inside isolation any double-click exits. Otherwise a group is entered
/// with its topmost child under the point preselected, and a grouped leaf
/// isolates its parent and selects itself.
pub fn resolve_double_click(
    state: &IsolationState,
    elements: &[Element],
    id: ElementId,
    point: Point,
) -> DoubleClickAction {
    if state.is_isolated() {
        return DoubleClickAction::ExitIsolation;
    }
    let Some(el) = find(elements, id) else {
        return DoubleClickAction::None;
    };
    if el.is_group() {
        return DoubleClickAction::EnterIsolation {
            group: id,
            select: hit_test_children(elements, id, point),
        };
    }
    match el.parent_id {
        Some(parent) if find(elements, parent).is_some_and(Element::is_group) => {
            DoubleClickAction::EnterIsolation {
                group: parent,
                select: Some(id),
            }
        }
        _ => DoubleClickAction::None,
    }
}
