//! The editor store: single owner of the document state.
//!
//! Every public action follows the same path:
//!
//! 1. run the relevant pure operation(s) from `artboard-core`,
//! 2. record the pre-action scene in [`History`] (unless the caller passed
//!    [`HistoryMode::Skip`], e.g. for live drag frames),
//! 3. commit the new scene atomically,
//! 4. prune the selection, re-sync `selected` flags and bump the revision.
//!
//! The store is the only place that talks to I/O, and it does so through
//! the [`ImageProbe`] and [`ProjectStorage`] traits. Async results are
//! applied by patching the target element by id, so edits made while a
//! request was in flight survive.

use crate::history::{History, HistoryMode, Snapshot};
use crate::io::{
    ImageLoadRequest, ImageProbe, ImageProbeError, ProjectMeta, ProjectStorage, StorageError,
    StoredProject, slugify, unique_slug,
};
use artboard_core::document::{self, ProjectDocument};
use artboard_core::factory::{
    Placement, apply_image_size, create_element, create_image_element_immediate,
    resolve_image_size,
};
use artboard_core::hierarchy::{self, DropPosition};
use artboard_core::hit::hit_test;
use artboard_core::isolation::{DoubleClickAction, IsolationState, resolve_double_click};
use artboard_core::scene::{self, ResizeMode, ResizeRequest, ZOrder};
use artboard_core::selection::{self, Selection};
use artboard_core::{
    ArtboardDimensions, AspectRatio, Color, DocumentError, EditorConfig, Element, ElementId,
    ElementKind, Point, PropertyUpdate, Rect, Size,
};
use std::sync::Arc;

pub struct Store {
    config: EditorConfig,
    elements: Snapshot,
    selection: Selection,
    clipboard: Vec<Element>,
    history: History,
    isolation: IsolationState,
    artboard: ArtboardDimensions,
    aspect_ratio: Option<AspectRatio>,
    project: Option<ProjectMeta>,
    pending_images: Vec<ImageLoadRequest>,
    /// Bumped on every observable state change.
    revision: u64,
}

impl Store {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            history: History::new(config.history_limit),
            artboard: config.artboard,
            config,
            elements: Arc::new(Vec::new()),
            selection: Selection::new(),
            clipboard: Vec::new(),
            isolation: IsolationState::new(),
            aspect_ratio: None,
            project: None,
            pending_images: Vec::new(),
            revision: 0,
        }
    }

    /// A store seeded with an existing scene. The selection is taken from
    /// the elements' `selected` flags.
    pub fn with_elements(config: EditorConfig, elements: Vec<Element>) -> Self {
        let mut store = Self::new(config);
        store.selection = Selection::from_flags(&elements);
        store.elements = Arc::new(elements);
        store.sync_selection_flags();
        store
    }

    // ─── Commit plumbing ─────────────────────────────────────────────────

    fn commit(&mut self, next: Vec<Element>, mode: HistoryMode, description: &str) {
        match mode {
            HistoryMode::Record => {
                self.history.record(&self.elements, description);
                log::debug!("{description}");
            }
            HistoryMode::Skip => log::trace!("{description} (live)"),
        }
        self.elements = Arc::new(next);
        self.reconcile();
    }

    /// Commit only when the operation actually changed something.
    fn commit_if_changed(&mut self, next: Vec<Element>, mode: HistoryMode, description: &str) -> bool {
        if next == *self.elements {
            return false;
        }
        self.commit(next, mode, description);
        true
    }

    fn reconcile(&mut self) {
        self.selection.retain_existing(&self.elements);
        self.isolation.revalidate(&self.elements);
        self.sync_selection_flags();
        self.revision += 1;
    }

    fn sync_selection_flags(&mut self) {
        let in_sync = self
            .elements
            .iter()
            .all(|el| el.selected == self.selection.contains(el.id));
        if !in_sync {
            self.selection.sync_flags(Arc::make_mut(&mut self.elements).as_mut_slice());
        }
    }

    fn selection_changed(&mut self) {
        self.sync_selection_flags();
        self.revision += 1;
    }

    fn resize_mode(mode: HistoryMode) -> ResizeMode {
        match mode {
            HistoryMode::Record => ResizeMode::Commit,
            HistoryMode::Skip => ResizeMode::Live,
        }
    }

    fn placement(&self, position: Option<Point>) -> Placement {
        match position {
            Some(p) => Placement::at(self.artboard, p),
            None => Placement::centered(self.artboard),
        }
    }

    // ─── Creation ────────────────────────────────────────────────────────

    /// Add a new element of `kind` centered on the artboard and select it.
    pub fn add_element(&mut self, kind: ElementKind) -> ElementId {
        self.insert_new(create_element(kind, &self.placement(None), &self.config))
    }

    /// Add a new element of `kind` centered on canvas point (`x`, `y`).
    pub fn add_element_at_position(&mut self, kind: ElementKind, x: f64, y: f64) -> ElementId {
        let placement = self.placement(Some(Point::new(x, y)));
        self.insert_new(create_element(kind, &placement, &self.config))
    }

    /// Add an image right away at placeholder size. Its real size is
    /// resolved later through [`Store::complete_image_load`]; the request is
    /// queued for the host in [`Store::take_pending_image_loads`].
    pub fn add_image_element(&mut self, src: &str, position: Option<Point>) -> ElementId {
        let el = create_image_element_immediate(src, &self.placement(position), &self.config);
        self.pending_images.push(ImageLoadRequest {
            id: el.id,
            src: src.to_string(),
        });
        self.insert_new(el)
    }

    fn insert_new(&mut self, el: Element) -> ElementId {
        let id = el.id;
        let kind = el.kind();
        let mut next = self.elements.to_vec();
        next.push(el);
        self.selection.select(id, false);
        self.commit(next, HistoryMode::Record, &format!("add {kind}"));
        id
    }

    // ─── Images ──────────────────────────────────────────────────────────

    /// Drain the queue of images waiting for their natural size.
    pub fn take_pending_image_loads(&mut self) -> Vec<ImageLoadRequest> {
        std::mem::take(&mut self.pending_images)
    }

    /// Apply a finished image probe. A failure falls back to the
    /// placeholder size. If the element was deleted meanwhile, nothing
    /// happens.
    pub fn complete_image_load(&mut self, id: ElementId, result: Result<Size, ImageProbeError>) {
        let natural = match result {
            Ok(size) => Some(size),
            Err(err) => {
                log::warn!("image probe for {id} failed: {err}");
                None
            }
        };
        let size = resolve_image_size(natural, &self.config);
        // Undo or redo can bring the element back, so history is patched
        // even when the live scene no longer has it.
        self.history.patch_element(id, |el| apply_image_size(el, size));
        if hierarchy::find(&self.elements, id).is_none() {
            log::debug!("image {id} finished loading while not in the scene");
            return;
        }
        let next = scene::patch_element(&self.elements, id, |el| apply_image_size(el, size));
        self.commit(next, HistoryMode::Skip, "image loaded");
    }

    /// Probe every pending image synchronously with `probe`.
    pub fn load_pending_images(&mut self, probe: &dyn ImageProbe) {
        for request in self.take_pending_image_loads() {
            let result = probe.natural_size(&request.src);
            self.complete_image_load(request.id, result);
        }
    }

    // ─── Delete ──────────────────────────────────────────────────────────

    pub fn delete_element(&mut self, id: ElementId) -> bool {
        let next = scene::delete_element(&self.elements, id);
        self.commit_if_changed(next, HistoryMode::Record, "delete element")
    }

    pub fn delete_selected(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let next = scene::delete_elements(&self.elements, self.selection.ids());
        self.commit_if_changed(next, HistoryMode::Record, "delete selection")
    }

    // ─── Move / resize ───────────────────────────────────────────────────

    pub fn move_element(&mut self, id: ElementId, dx: f64, dy: f64, mode: HistoryMode) -> bool {
        let next = scene::move_element(&self.elements, id, dx, dy);
        self.commit_if_changed(next, mode, "move element")
    }

    pub fn move_selected_elements(&mut self, dx: f64, dy: f64, mode: HistoryMode) -> bool {
        let next = scene::move_selected_elements(&self.elements, self.selection.ids(), dx, dy);
        self.commit_if_changed(next, mode, "move selection")
    }

    pub fn resize_element(
        &mut self,
        id: ElementId,
        width: f64,
        height: f64,
        preserve_aspect_ratio: bool,
        mode: HistoryMode,
    ) -> bool {
        let request = ResizeRequest {
            width,
            height,
            preserve_aspect_ratio,
        };
        let next = scene::resize_element(&self.elements, id, request, Self::resize_mode(mode));
        self.commit_if_changed(next, mode, "resize element")
    }

    /// Resize the whole selection, scaled by how `base_id` changes.
    pub fn resize_selected_elements(
        &mut self,
        base_id: ElementId,
        width: f64,
        height: f64,
        preserve_aspect_ratio: bool,
        mode: HistoryMode,
    ) -> bool {
        let request = ResizeRequest {
            width,
            height,
            preserve_aspect_ratio,
        };
        let next = scene::resize_selected_elements(
            &self.elements,
            self.selection.ids(),
            base_id,
            request,
            Self::resize_mode(mode),
        );
        self.commit_if_changed(next, mode, "resize selection")
    }

    // ─── Properties ──────────────────────────────────────────────────────

    /// Apply a property update to one element. Returns `false` when the
    /// element is missing or the property does not apply to its type.
    pub fn update_element(&mut self, id: ElementId, update: PropertyUpdate, mode: HistoryMode) -> bool {
        let Some(el) = hierarchy::find(&self.elements, id) else {
            return false;
        };
        // Groups reposition through a move so their subtree follows.
        if let PropertyUpdate::Position { x, y } = update
            && el.is_group()
        {
            let (dx, dy) = (x.round() - el.x, y.round() - el.y);
            return self.move_element(id, dx, dy, mode);
        }
        if let PropertyUpdate::Size { width, height } = update {
            return self.resize_element(id, width, height, false, mode);
        }
        let next = scene::update_element(&self.elements, id, &update);
        self.commit_if_changed(next, mode, "update property")
    }

    /// Apply a property update to every selected element that supports it.
    pub fn update_selected(&mut self, update: PropertyUpdate, mode: HistoryMode) -> bool {
        let next = scene::update_elements(&self.elements, self.selection.ids(), &update);
        self.commit_if_changed(next, mode, "update selection")
    }

    pub fn update_fill_color(&mut self, id: ElementId, color: Color, mode: HistoryMode) -> bool {
        self.update_element(id, PropertyUpdate::FillColor(color), mode)
    }

    pub fn update_corner_radius(&mut self, id: ElementId, radius: f64, mode: HistoryMode) -> bool {
        self.update_element(id, PropertyUpdate::CornerRadius(radius), mode)
    }

    pub fn update_font_size(&mut self, id: ElementId, size: f64, mode: HistoryMode) -> bool {
        self.update_element(id, PropertyUpdate::FontSize(size), mode)
    }

    pub fn update_rotation(&mut self, id: ElementId, degrees: f64, mode: HistoryMode) -> bool {
        self.update_element(id, PropertyUpdate::Rotation(degrees), mode)
    }

    pub fn update_text_content(&mut self, id: ElementId, content: &str, mode: HistoryMode) -> bool {
        self.update_element(id, PropertyUpdate::Content(content.to_string()), mode)
    }

    pub fn rename_element(&mut self, id: ElementId, name: Option<String>) -> bool {
        self.update_element(id, PropertyUpdate::Name(name), HistoryMode::Record)
    }

    pub fn toggle_visibility(&mut self, id: ElementId) -> bool {
        let next = scene::toggle_element_visibility(&self.elements, id);
        self.commit_if_changed(next, HistoryMode::Record, "toggle visibility")
    }

    // ─── Z-order / layers ────────────────────────────────────────────────

    pub fn reorder_elements(&mut self, old_index: usize, new_index: usize) -> bool {
        let next = scene::reorder_elements(&self.elements, old_index, new_index);
        self.commit_if_changed(next, HistoryMode::Record, "reorder layers")
    }

    /// Drag-and-drop in the layer tree. Rejected moves return `false`.
    pub fn reorder_hierarchical(
        &mut self,
        dragged: ElementId,
        target: ElementId,
        position: DropPosition,
    ) -> bool {
        match hierarchy::reorder_elements_hierarchical(&self.elements, dragged, target, position) {
            Some(next) => self.commit_if_changed(next, HistoryMode::Record, "move layer"),
            None => {
                log::debug!("rejected layer move of {dragged} {position:?} {target}");
                false
            }
        }
    }

    fn restack(&mut self, id: ElementId, order: ZOrder) -> bool {
        let next = scene::restack_element(&self.elements, id, order);
        self.commit_if_changed(next, HistoryMode::Record, "restack")
    }

    pub fn bring_forward(&mut self, id: ElementId) -> bool {
        self.restack(id, ZOrder::Forward)
    }

    pub fn send_backward(&mut self, id: ElementId) -> bool {
        self.restack(id, ZOrder::Backward)
    }

    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        self.restack(id, ZOrder::ToFront)
    }

    pub fn send_to_back(&mut self, id: ElementId) -> bool {
        self.restack(id, ZOrder::ToBack)
    }

    // ─── Grouping / isolation ────────────────────────────────────────────

    /// Group the current selection. Needs at least two elements.
    pub fn group_elements(&mut self) -> Option<ElementId> {
        let outcome = hierarchy::group_elements(self.selection.ids(), &self.elements)?;
        self.selection.select_many([outcome.group_id]);
        self.commit(outcome.elements, HistoryMode::Record, "group");
        Some(outcome.group_id)
    }

    /// Dissolve the single selected group, selecting its former children.
    pub fn ungroup_elements(&mut self) -> bool {
        let Some(outcome) = hierarchy::ungroup_elements(self.selection.ids(), &self.elements) else {
            return false;
        };
        self.selection.select_many(outcome.children);
        self.commit(outcome.elements, HistoryMode::Record, "ungroup");
        true
    }

    /// Drill into `group_id`, optionally preselecting one of its children.
    pub fn enter_isolation_mode(&mut self, group_id: ElementId, select: Option<ElementId>) -> bool {
        if !self.isolation.enter(group_id, &self.elements) {
            return false;
        }
        let preselect = select.filter(|id| {
            hierarchy::find(&self.elements, *id).is_some_and(|el| self.isolation.is_selectable(el))
        });
        self.selection.select_many(preselect);
        log::debug!("isolated {group_id}");
        self.selection_changed();
        true
    }

    pub fn exit_isolation_mode(&mut self) {
        if !self.isolation.is_isolated() {
            return;
        }
        self.isolation.exit();
        self.selection.clear();
        log::debug!("left isolation");
        self.selection_changed();
    }

    pub fn handle_double_click(&mut self, id: ElementId, point: Point) {
        match resolve_double_click(&self.isolation, &self.elements, id, point) {
            DoubleClickAction::ExitIsolation => self.exit_isolation_mode(),
            DoubleClickAction::EnterIsolation { group, select } => {
                self.enter_isolation_mode(group, select);
            }
            DoubleClickAction::None => {}
        }
    }

    /// Click on empty artboard. Clears the selection, except in isolation.
    pub fn handle_background_click(&mut self) {
        if self.isolation.background_click_clears_selection() {
            self.clear_selection();
        }
    }

    /// What a click at canvas `point` would select: the topmost visible
    /// element there, resolved to its outermost group (or, while isolated,
    /// to the isolated group's child that owns it).
    pub fn element_at(&self, point: Point) -> Option<ElementId> {
        let target = |id| self.isolation.click_target(&self.elements, id);
        hit_test(&self.elements, point, |el| target(el.id).is_some()).and_then(target)
    }

    /// Single click on the canvas: select [`Store::element_at`] (toggling
    /// it with `add`), or fall through to a background click.
    pub fn click_at(&mut self, point: Point, add: bool) -> Option<ElementId> {
        match self.element_at(point) {
            Some(id) => {
                self.select_element(id, add);
                Some(id)
            }
            None => {
                self.handle_background_click();
                None
            }
        }
    }

    // ─── Selection ───────────────────────────────────────────────────────

    fn is_selectable(&self, id: ElementId) -> bool {
        hierarchy::find(&self.elements, id).is_some_and(|el| self.isolation.is_selectable(el))
    }

    /// Click selection; with `add`, toggles `id`. Inert elements are ignored.
    pub fn select_element(&mut self, id: ElementId, add: bool) -> bool {
        if !self.is_selectable(id) {
            return false;
        }
        self.selection.select(id, add);
        self.selection_changed();
        true
    }

    pub fn select_elements(&mut self, ids: &[ElementId]) {
        let ids: Vec<ElementId> = ids.iter().copied().filter(|id| self.is_selectable(*id)).collect();
        self.selection.select_many(ids);
        self.selection_changed();
    }

    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.selection_changed();
    }

    pub fn select_all(&mut self) {
        let isolation = &self.isolation;
        self.selection.select_all(&self.elements, |el| isolation.is_selectable(el));
        self.selection_changed();
    }

    pub fn invert_selection(&mut self) {
        let isolation = &self.isolation;
        self.selection.invert(&self.elements, |el| isolation.is_selectable(el));
        self.selection_changed();
    }

    /// Marquee selection with a canvas-space rectangle.
    pub fn select_in_rect(&mut self, rect: Rect, add: bool) {
        let isolation = &self.isolation;
        self.selection
            .select_in_rect(&self.elements, rect, add, |el| isolation.is_selectable(el));
        self.selection_changed();
    }

    pub fn select_range(&mut self, anchor: ElementId, target: ElementId) {
        self.selection.select_range(&self.elements, anchor, target);
        let kept: Vec<ElementId> = self
            .selection
            .ids()
            .iter()
            .copied()
            .filter(|id| self.is_selectable(*id))
            .collect();
        self.selection.select_many(kept);
        self.selection_changed();
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.undo(&self.elements) else {
            return false;
        };
        log::debug!("undo {}", entry.description);
        self.elements = entry.snapshot;
        self.reconcile();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.redo(&self.elements) else {
            return false;
        };
        log::debug!("redo {}", entry.description);
        self.elements = entry.snapshot;
        self.reconcile();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Start a drag gesture. Mutations with [`HistoryMode::Skip`] until
    /// [`Store::end_gesture`] collapse into one undo step.
    pub fn begin_gesture(&mut self) {
        self.history.begin_gesture(&self.elements);
    }

    pub fn end_gesture(&mut self, description: &str) -> bool {
        let pushed = self.history.end_gesture(&self.elements, description);
        if pushed {
            log::debug!("{description}");
        }
        pushed
    }

    // ─── Clipboard ───────────────────────────────────────────────────────

    pub fn copy_selection(&mut self) -> usize {
        self.clipboard = scene::copy_to_clipboard(&self.elements, self.selection.ids());
        log::debug!("copied {} elements", self.clipboard.len());
        self.clipboard.len()
    }

    pub fn cut_selection(&mut self) -> usize {
        let copied = self.copy_selection();
        if copied > 0 {
            let next = scene::delete_elements(&self.elements, self.selection.ids());
            self.commit_if_changed(next, HistoryMode::Record, "cut");
        }
        copied
    }

    /// Paste the clipboard with fresh ids, offset from the originals. The
    /// pasted elements become the selection.
    pub fn paste_clipboard(&mut self) -> Vec<ElementId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }
        let clipboard = std::mem::take(&mut self.clipboard);
        let pasted = self.paste_elements(&clipboard, "paste");
        self.clipboard = clipboard;
        pasted
    }

    /// Copy and paste the selection in one step, leaving the clipboard alone.
    pub fn duplicate_selection(&mut self) -> Vec<ElementId> {
        let copies = scene::copy_to_clipboard(&self.elements, self.selection.ids());
        if copies.is_empty() {
            return Vec::new();
        }
        self.paste_elements(&copies, "duplicate")
    }

    /// Paste with fresh ids. Only copies selectable in the current mode are
    /// selected; while a group is isolated, top-level copies stay unselected.
    fn paste_elements(&mut self, source: &[Element], description: &str) -> Vec<ElementId> {
        let outcome = scene::paste_from_clipboard(&self.elements, source, self.config.paste_offset);
        let isolation = &self.isolation;
        let selectable: Vec<ElementId> = outcome
            .elements
            .iter()
            .filter(|el| outcome.pasted.contains(&el.id) && isolation.is_selectable(el))
            .map(|el| el.id)
            .collect();
        self.selection.select_many(selectable);
        self.commit(outcome.elements, HistoryMode::Record, description);
        outcome.pasted
    }

    // ─── Artboard ────────────────────────────────────────────────────────

    /// Change the artboard size. Non-positive sizes are ignored.
    pub fn set_artboard_dimensions(&mut self, dimensions: ArtboardDimensions) -> bool {
        if !dimensions.is_valid() {
            log::warn!("ignoring artboard size {}x{}", dimensions.width, dimensions.height);
            return false;
        }
        self.artboard = dimensions;
        self.aspect_ratio = None;
        self.revision += 1;
        true
    }

    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) {
        self.artboard = ratio.dimensions();
        self.aspect_ratio = Some(ratio);
        self.revision += 1;
    }

    // ─── Documents / projects ────────────────────────────────────────────

    pub fn export_json(&self) -> Result<String, DocumentError> {
        document::export_json(&self.elements, self.artboard)
    }

    /// Replace the scene with an imported file. The previous scene stays
    /// reachable through undo.
    pub fn import_json(&mut self, json: &str) -> Result<(), DocumentError> {
        let doc = document::import_json(json).inspect_err(|err| {
            log::warn!("import rejected: {err}");
        })?;
        self.replace_document(doc, HistoryMode::Record);
        Ok(())
    }

    fn replace_document(&mut self, doc: ProjectDocument, mode: HistoryMode) {
        self.isolation.exit();
        self.selection.clear();
        self.artboard = doc.artboard_dimensions;
        self.aspect_ratio = None;
        self.commit(doc.elements, mode, "load document");
    }

    /// Start an empty project called `name`.
    pub fn new_project(&mut self, name: &str) {
        self.project = Some(ProjectMeta::new(name));
        self.clipboard.clear();
        self.pending_images.clear();
        self.replace_document(
            ProjectDocument {
                elements: Vec::new(),
                artboard_dimensions: self.config.artboard,
            },
            HistoryMode::Skip,
        );
        self.history.clear();
    }

    /// Save under the current project's slug, creating the project (with a
    /// unique slug derived from `fallback_name`) if there is none yet.
    pub fn save_project(
        &mut self,
        storage: &mut dyn ProjectStorage,
        fallback_name: &str,
    ) -> Result<ProjectMeta, StorageError> {
        let mut meta = match self.project.clone() {
            Some(meta) => meta,
            None => {
                let mut meta = ProjectMeta::new(fallback_name);
                meta.slug = unique_slug(storage, &slugify(fallback_name));
                meta
            }
        };
        meta.touch();
        let project = StoredProject {
            meta: meta.clone(),
            document: ProjectDocument {
                elements: self.elements.to_vec(),
                artboard_dimensions: self.artboard,
            },
        };
        storage.save(&project).inspect_err(|err| {
            log::warn!("saving {} failed: {err}", meta.slug);
        })?;
        log::debug!("saved {}", meta.slug);
        self.project = Some(meta.clone());
        Ok(meta)
    }

    /// Load a stored project. The scene is untouched unless loading
    /// succeeds; history starts fresh.
    pub fn load_project(&mut self, storage: &dyn ProjectStorage, slug: &str) -> Result<(), StorageError> {
        let project = storage.load(slug).inspect_err(|err| {
            log::warn!("loading {slug} failed: {err}");
        })?;
        self.project = Some(project.meta);
        self.clipboard.clear();
        self.pending_images.clear();
        self.replace_document(project.document, HistoryMode::Skip);
        self.history.clear();
        Ok(())
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Cheap shared handle to the current scene.
    pub fn elements(&self) -> Snapshot {
        Arc::clone(&self.elements)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        hierarchy::find(&self.elements, id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_ids(&self) -> &[ElementId] {
        self.selection.ids()
    }

    pub fn selected_element_data(&self) -> Option<&Element> {
        selection::selected_element_data(&self.elements, &self.selection)
    }

    pub fn selected_elements_data(&self) -> Vec<&Element> {
        selection::selected_elements_data(&self.elements, &self.selection)
    }

    pub fn has_multiple_selection(&self) -> bool {
        selection::has_multiple_selection(&self.selection)
    }

    pub fn selection_bounds(&self) -> Option<Rect> {
        selection::selection_bounds(&self.elements, &self.selection)
    }

    pub fn get_element_descendants(&self, id: ElementId) -> Vec<ElementId> {
        hierarchy::get_element_descendants(&self.elements, id)
    }

    pub fn top_level_elements(&self) -> Vec<&Element> {
        hierarchy::top_level_elements(&self.elements)
    }

    pub fn element_children(&self, id: ElementId) -> Vec<&Element> {
        hierarchy::element_children(&self.elements, id)
    }

    pub fn isolated_group(&self) -> Option<ElementId> {
        self.isolation.isolated_group()
    }

    pub fn isolation(&self) -> &IsolationState {
        &self.isolation
    }

    /// Elements split into (selectable, inert) for the current mode.
    pub fn partition_elements(&self) -> (Vec<&Element>, Vec<&Element>) {
        self.isolation.partition(&self.elements)
    }

    pub fn clipboard(&self) -> &[Element] {
        &self.clipboard
    }

    pub fn artboard_dimensions(&self) -> ArtboardDimensions {
        self.artboard
    }

    pub fn aspect_ratio(&self) -> Option<AspectRatio> {
        self.aspect_ratio
    }

    pub fn project(&self) -> Option<&ProjectMeta> {
        self.project.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
