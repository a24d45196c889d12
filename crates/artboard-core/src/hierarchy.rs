//! Parent/child structure: descendant queries, grouping, and drag-and-drop
//! reparenting from the layer list.
//!
//! Descendant lookups go through a [`HierarchyIndex`], a petgraph adjacency
//! graph derived from the `children` lists. It is rebuilt per query; scenes
//! are small enough that this stays cheap.

use crate::geometry::union_bounds;
use crate::id::ElementId;
use crate::model::{Element, ElementData, GroupProps};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use std::collections::{HashMap, HashSet};

/// Derived parent → child adjacency for one version of the scene.
#[derive(Debug, Clone)]
pub struct HierarchyIndex {
    graph: DiGraph<ElementId, ()>,
    index: HashMap<ElementId, NodeIndex>,
}

impl HierarchyIndex {
    pub fn build(elements: &[Element]) -> Self {
        let mut graph = DiGraph::with_capacity(elements.len(), elements.len());
        let mut index = HashMap::with_capacity(elements.len());
        for el in elements {
            index.insert(el.id, graph.add_node(el.id));
        }
        for el in elements {
            let parent = index[&el.id];
            for child in &el.children {
                // Dangling child ids are ignored rather than trusted.
                if let Some(&c) = index.get(child) {
                    graph.add_edge(parent, c, ());
                }
            }
        }
        Self { graph, index }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index.contains_key(&id)
    }

    /// All transitive descendants of `id`, excluding `id` itself.
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let Some(&start) = self.index.get(&id) else {
            return Vec::new();
        };
        let mut dfs = Dfs::new(&self.graph, start);
        let mut out = Vec::new();
        while let Some(nx) = dfs.next(&self.graph) {
            if nx != start {
                out.push(self.graph[nx]);
            }
        }
        out
    }

    /// True when `candidate` sits somewhere below `ancestor`.
    pub fn is_descendant(&self, ancestor: ElementId, candidate: ElementId) -> bool {
        ancestor != candidate && self.descendants(ancestor).contains(&candidate)
    }
}

// ─── Queries ─────────────────────────────────────────────────────────────

pub fn find(elements: &[Element], id: ElementId) -> Option<&Element> {
    elements.iter().find(|el| el.id == id)
}

pub fn position_of(elements: &[Element], id: ElementId) -> Option<usize> {
    elements.iter().position(|el| el.id == id)
}

/// Every transitive descendant of `id` (DFS over `children`).
pub fn get_element_descendants(elements: &[Element], id: ElementId) -> Vec<ElementId> {
    HierarchyIndex::build(elements).descendants(id)
}

/// `id` plus all of its descendants.
pub fn subtree_ids(elements: &[Element], id: ElementId) -> HashSet<ElementId> {
    let mut set: HashSet<ElementId> = get_element_descendants(elements, id).into_iter().collect();
    set.insert(id);
    set
}

/// Direct children of `id`, in the group's child order.
pub fn element_children(elements: &[Element], id: ElementId) -> Vec<&Element> {
    let Some(parent) = find(elements, id) else {
        return Vec::new();
    };
    parent
        .children
        .iter()
        .filter_map(|child| find(elements, *child))
        .collect()
}

pub fn top_level_elements(elements: &[Element]) -> Vec<&Element> {
    elements.iter().filter(|el| el.parent_id.is_none()).collect()
}

/// Parent chain of `id`, nearest first. Stops on broken links or cycles.
pub fn ancestors(elements: &[Element], id: ElementId) -> Vec<ElementId> {
    let mut out = Vec::new();
    let mut current = find(elements, id).and_then(|el| el.parent_id);
    while let Some(pid) = current {
        if pid == id || out.contains(&pid) {
            break;
        }
        out.push(pid);
        current = find(elements, pid).and_then(|el| el.parent_id);
    }
    out
}

/// Drop ids whose ancestor is also in the list, keeping only subtree roots.
pub fn subtree_roots(elements: &[Element], ids: &[ElementId]) -> Vec<ElementId> {
    let set: HashSet<ElementId> = ids.iter().copied().collect();
    let mut seen = HashSet::new();
    ids.iter()
        .copied()
        .filter(|id| find(elements, *id).is_some())
        .filter(|id| !ancestors(elements, *id).iter().any(|a| set.contains(a)))
        .filter(|id| seen.insert(*id))
        .collect()
}

// ─── Grouping ────────────────────────────────────────────────────────────

/// Result of [`group_elements`].
#[derive(Debug, Clone)]
pub struct GroupOutcome {
    pub elements: Vec<Element>,
    pub group_id: ElementId,
}

/// Wrap the selected elements in a new group sized to their union bounds.
///
/// The group adopts the members' common parent when they share one, so
/// grouping inside an isolated group stays inside it; otherwise it is
/// top-level. Only the new group ends up flagged as selected. Returns
/// `None` when fewer than two elements qualify.
pub fn group_elements(selected: &[ElementId], elements: &[Element]) -> Option<GroupOutcome> {
    let members = subtree_roots(elements, selected);
    if members.len() < 2 {
        return None;
    }

    let bounds = union_bounds(
        members
            .iter()
            .filter_map(|id| find(elements, *id))
            .map(Element::bounds),
    )?;

    let parents: HashSet<Option<ElementId>> = members
        .iter()
        .filter_map(|id| find(elements, *id))
        .map(|el| el.parent_id)
        .collect();
    let common_parent = if parents.len() == 1 {
        parents.into_iter().next().flatten()
    } else {
        None
    };

    // Children keep their relative paint order.
    let mut ordered = members.clone();
    ordered.sort_by_key(|id| position_of(elements, *id).unwrap_or(usize::MAX));
    let frontmost = ordered.last().copied()?;
    let member_set: HashSet<ElementId> = ordered.iter().copied().collect();

    let mut group = Element::new(
        ElementId::generate(),
        ElementData::Group(GroupProps::default()),
        bounds,
    );
    group.parent_id = common_parent;
    group.children = ordered.iter().copied().collect();
    group.selected = true;
    let group_id = group.id;

    // The group and the members' subtrees form one block in paint order,
    // taking the frontmost member's slot.
    let block_ids: HashSet<ElementId> = ordered
        .iter()
        .flat_map(|id| subtree_ids(elements, *id))
        .collect();
    let front_pos = position_of(elements, frontmost)?;
    let slot = elements[..front_pos]
        .iter()
        .filter(|el| !block_ids.contains(&el.id))
        .count();

    let mut block = vec![group];
    let mut rest = Vec::with_capacity(elements.len());
    for el in elements {
        let mut el = el.clone();
        el.selected = false;
        if member_set.contains(&el.id) {
            el.parent_id = Some(group_id);
        } else if !el.children.is_empty() {
            // Old parents give up the members; a common parent gets the
            // group in place of its frontmost member.
            if Some(el.id) == common_parent
                && let Some(pos) = el.children.iter().position(|c| *c == frontmost)
            {
                el.children.insert(pos + 1, group_id);
            }
            el.children.retain(|c| !member_set.contains(c));
        }
        if block_ids.contains(&el.id) {
            block.push(el);
        } else {
            rest.push(el);
        }
    }
    let mut out = rest;
    out.splice(slot..slot, block);

    log::debug!("grouped {} elements into {}", ordered.len(), group_id);
    Some(GroupOutcome {
        elements: out,
        group_id,
    })
}

/// Result of [`ungroup_elements`].
#[derive(Debug, Clone)]
pub struct UngroupOutcome {
    pub elements: Vec<Element>,
    /// Former children, now flagged as selected.
    pub children: Vec<ElementId>,
}

/// Dissolve the single selected group, handing its children to the group's
/// own parent (or the top level). Returns `None` unless exactly one group is
/// selected.
pub fn ungroup_elements(selected: &[ElementId], elements: &[Element]) -> Option<UngroupOutcome> {
    let [group_id] = selected else {
        return None;
    };
    let group = find(elements, *group_id).filter(|el| el.is_group())?;
    let group_id = group.id;
    let new_parent = group.parent_id;
    let children: Vec<ElementId> = group.children.iter().copied().collect();
    let child_set: HashSet<ElementId> = children.iter().copied().collect();

    let out = elements
        .iter()
        .filter(|el| el.id != group_id)
        .map(|el| {
            let mut el = el.clone();
            el.selected = child_set.contains(&el.id);
            if el.selected {
                el.parent_id = new_parent;
            }
            if Some(el.id) == new_parent {
                if let Some(pos) = el.children.iter().position(|c| *c == group_id) {
                    el.children.remove(pos);
                    for (i, child) in children.iter().enumerate() {
                        el.children.insert(pos + i, *child);
                    }
                }
            }
            el
        })
        .collect();

    log::debug!("ungrouped {} ({} children)", group_id, children.len());
    Some(UngroupOutcome {
        elements: out,
        children,
    })
}

// ─── Hierarchical reorder ────────────────────────────────────────────────

/// Drop position relative to the target row in the layer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    Before,
    After,
    Inside,
}

/// Reparent `dragged` relative to `target`.
///
/// `Inside` appends to a group target's children. `Before`/`After` adopt
/// the target's parent and insert next to the target. The dragged element
/// carries its subtree along in the flat list, so a group still paints
/// right before its children. Returns `None` when
/// the move is rejected: unknown ids, dropping onto itself, dropping inside a
/// non-group, dropping into its own subtree, or appending an element that is
/// already the group's last child.
pub fn reorder_elements_hierarchical(
    elements: &[Element],
    dragged: ElementId,
    target: ElementId,
    position: DropPosition,
) -> Option<Vec<Element>> {
    if dragged == target {
        return None;
    }
    let dragged_el = find(elements, dragged)?;
    let target_el = find(elements, target)?;

    if HierarchyIndex::build(elements).is_descendant(dragged, target) {
        log::debug!("rejected reparent of {dragged} into its own subtree at {target}");
        return None;
    }

    let old_parent = dragged_el.parent_id;
    let new_parent = match position {
        DropPosition::Inside => {
            if !target_el.is_group() || target_el.children.last() == Some(&dragged) {
                return None;
            }
            Some(target)
        }
        DropPosition::Before | DropPosition::After => target_el.parent_id,
    };

    let mut out: Vec<Element> = elements.to_vec();

    if let Some(op) = old_parent
        && let Some(parent) = out.iter_mut().find(|el| el.id == op)
    {
        parent.children.retain(|c| *c != dragged);
    }

    if let Some(np) = new_parent
        && let Some(parent) = out.iter_mut().find(|el| el.id == np)
    {
        match position {
            DropPosition::Inside => parent.children.push(dragged),
            DropPosition::Before | DropPosition::After => {
                let at = parent
                    .children
                    .iter()
                    .position(|c| *c == target)
                    .map(|i| if position == DropPosition::After { i + 1 } else { i })
                    .unwrap_or(parent.children.len());
                parent.children.insert(at, dragged);
            }
        }
    }

    // The dragged subtree moves as one block in paint order: before the
    // target, or after the target's whole subtree.
    let block_ids = subtree_ids(elements, dragged);
    let target_ids = subtree_ids(elements, target);
    let (mut block, mut rest): (Vec<Element>, Vec<Element>) =
        out.into_iter().partition(|el| block_ids.contains(&el.id));
    if let Some(moved) = block.iter_mut().find(|el| el.id == dragged) {
        moved.parent_id = new_parent;
    }
    let at = match position {
        DropPosition::Before => position_of(&rest, target)?,
        DropPosition::After | DropPosition::Inside => {
            rest.iter().rposition(|el| target_ids.contains(&el.id))? + 1
        }
    };
    rest.splice(at..at, block);

    Some(rest)
}
