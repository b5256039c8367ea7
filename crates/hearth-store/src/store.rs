//! The layout store: single owner of the widget collection.

use glam::DVec2;
use hearth_core::{
    Footprint, GridDensity, GridPosition, HearthError, Widget, WidgetId, WidgetProps, WidgetSize,
};
use hearth_grid::{
    allocate, resolve_move, CellMetrics, OccupiedSet, PageLayout, ResizeHandle, ResizeMachine,
    ResizePreview, ResizeStart,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::codec;
use crate::options::StoreOptions;
use crate::storage::LayoutStorage;

/// A widget with the geometry it resolved to on its page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedWidget {
    /// The stored widget record
    pub widget: Widget,
    /// Resolved top-left cell
    pub position: GridPosition,
    /// Footprint after clamping to the density
    pub footprint: Footprint,
}

/// Owns widgets, density, current page and edit mode.
///
/// Pages are never stored: every read recomputes them from the widget list
/// and the density. Mutations are applied synchronously and persisted
/// through the injected storage before returning.
pub struct LayoutStore<S: LayoutStorage> {
    widgets: Vec<Widget>,
    density: GridDensity,
    current_page: usize,
    edit_mode: bool,
    resize: ResizeMachine,
    storage: S,
    default_widgets: Vec<Widget>,
    next_id: u64,
}

impl<S: LayoutStorage> LayoutStore<S> {
    /// Create a store, loading the widget list once from `storage`.
    ///
    /// Falls back to the default widget set when nothing is stored or the
    /// stored payload cannot be read.
    pub fn new(mut storage: S, options: StoreOptions) -> Self {
        let widgets = load_widgets(&mut storage, &options.default_widgets);
        Self {
            next_id: widgets.len() as u64,
            widgets,
            density: options.density,
            current_page: 0,
            edit_mode: false,
            resize: ResizeMachine::new(),
            storage,
            default_widgets: options.default_widgets,
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// All widgets in stored order.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Look up a widget by id.
    pub fn widget(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|widget| &widget.id == id)
    }

    pub fn density(&self) -> GridDensity {
        self.density
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Index of the page being shown.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Compute the paged layout for the current widgets and density.
    pub fn layout(&self) -> PageLayout {
        allocate(&self.widgets, self.density)
    }

    pub fn page_count(&self) -> usize {
        self.layout().page_count()
    }

    /// Widgets on a page with their resolved geometry. Empty for a page that
    /// does not exist.
    pub fn page_widgets(&self, page: usize) -> Vec<PlacedWidget> {
        let layout = self.layout();
        let Some(page) = layout.page(page) else {
            return Vec::new();
        };
        page.placements()
            .iter()
            .map(|placement| PlacedWidget {
                widget: self.widgets[placement.widget_index].clone(),
                position: placement.position,
                footprint: placement.footprint,
            })
            .collect()
    }

    /// Cells taken on a page, for drop-target highlighting.
    pub fn occupied_cells(&self, page: usize) -> OccupiedSet {
        self.layout()
            .page(page)
            .map(|page| page.occupied().clone())
            .unwrap_or_default()
    }

    /// Widget being resized, if any.
    pub fn resizing_widget(&self) -> Option<&WidgetId> {
        self.resize.active_widget()
    }

    /// Live preview of the resize in progress.
    pub fn resize_preview(&self) -> Option<ResizePreview> {
        self.resize.preview()
    }

    /// Borrow the storage port.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ------------------------------------------------------------------
    // Widget collection
    // ------------------------------------------------------------------

    /// Append a 1x1 widget with no position. It is auto-placed on the next read.
    pub fn add_widget(&mut self, kind: impl Into<String>, props: WidgetProps) -> WidgetId {
        let id = self.next_widget_id();
        let widget = Widget::new(id.clone(), kind).with_props(props);
        self.resize.cancel();
        debug!(widget = %id, kind = %widget.kind, "widget added");
        self.widgets.push(widget);
        self.commit();
        id
    }

    /// Remove a widget. Unknown ids are ignored.
    pub fn delete_widget(&mut self, id: &WidgetId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        self.resize.cancel();
        self.widgets.remove(index);
        debug!(widget = %id, "widget deleted");
        self.commit();
    }

    /// Replace the widget list with the default set.
    pub fn reset_layout(&mut self) {
        self.resize.cancel();
        self.widgets = self.default_widgets.clone();
        self.next_id = self.widgets.len() as u64;
        self.current_page = 0;
        debug!(count = self.widgets.len(), "layout reset to defaults");
        self.commit();
    }

    /// Switch a widget to a size preset, dropping any custom footprint.
    pub fn set_widget_size(&mut self, id: &WidgetId, size: WidgetSize) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        self.resize.cancel();
        let widget = &mut self.widgets[index];
        widget.size = size;
        widget.clear_custom_footprint();
        self.commit();
    }

    /// Replace a widget's opaque props.
    pub fn update_widget_props(&mut self, id: &WidgetId, props: WidgetProps) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        self.widgets[index].props = props;
        self.commit();
    }

    // ------------------------------------------------------------------
    // Move
    // ------------------------------------------------------------------

    /// Move a widget to a target top-left cell on its page.
    ///
    /// The target is clamped into the grid; if it is blocked the nearest free
    /// slot found by ring search is used, and if there is none nothing changes.
    pub fn move_widget(&mut self, id: &WidgetId, col: i64, row: i64) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        let layout = self.layout();
        let Some((page_index, placement)) = layout.locate(index) else {
            return;
        };
        let Some(page) = layout.page(page_index) else {
            return;
        };
        let occupied = page.occupied_excluding(index);

        let Some(position) = resolve_move(col, row, placement.footprint, &occupied, self.density)
        else {
            debug!(widget = %id, col, row, "move rejected");
            return;
        };

        debug!(widget = %id, ?position, "widget moved");
        self.resize.cancel();
        self.widgets[index].position = Some(position);
        self.commit();
    }

    // ------------------------------------------------------------------
    // Resize
    // ------------------------------------------------------------------

    /// Start resizing a widget from a handle. Only allowed in edit mode and
    /// while no other resize is in progress.
    ///
    /// The page's other widgets are captured here, so every mutation that
    /// can change page geometry cancels the gesture. Props updates do not.
    pub fn begin_resize(&mut self, id: &WidgetId, handle: ResizeHandle, pointer: DVec2) -> bool {
        if !self.edit_mode || self.resize.is_resizing() {
            return false;
        }
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let layout = self.layout();
        let Some((page_index, placement)) = layout.locate(index) else {
            return false;
        };
        let occupied = layout
            .page(page_index)
            .map(|page| page.occupied_excluding(index))
            .unwrap_or_default();

        self.resize.begin(ResizeStart {
            widget_id: id.clone(),
            handle,
            pointer,
            position: placement.position,
            footprint: placement.footprint,
            occupied,
        })
    }

    /// Feed a pointer sample to the resize in progress.
    pub fn update_resize(
        &mut self,
        pointer: DVec2,
        metrics: &dyn CellMetrics,
    ) -> Option<ResizePreview> {
        self.resize.update(pointer, metrics, self.density)
    }

    /// Release the pointer, committing the last valid preview. A preview
    /// equal to the widget's resolved geometry leaves it untouched.
    pub fn end_resize(&mut self) {
        let Some(commit) = self.resize.finish() else {
            return;
        };
        let Some(index) = self.index_of(&commit.widget_id) else {
            return;
        };
        let layout = self.layout();
        if let Some((_, placement)) = layout.locate(index) {
            if placement.position == commit.position && placement.footprint == commit.footprint {
                return;
            }
        }
        let widget = &mut self.widgets[index];
        widget.position = Some(commit.position);
        widget.set_custom_footprint(commit.footprint);
        self.commit();
    }

    /// Abort the resize in progress without changing anything.
    pub fn cancel_resize(&mut self) {
        self.resize.cancel();
    }

    /// Run a whole resize gesture from `from` to `to` in one call.
    pub fn resize_widget(
        &mut self,
        id: &WidgetId,
        handle: ResizeHandle,
        from: DVec2,
        to: DVec2,
        metrics: &dyn CellMetrics,
    ) {
        if self.begin_resize(id, handle, from) {
            self.update_resize(to, metrics);
            self.end_resize();
        }
    }

    // ------------------------------------------------------------------
    // Density, edit mode, navigation
    // ------------------------------------------------------------------

    /// Change the density. Positions are not touched; widgets that no longer
    /// fit are re-placed on the next read.
    pub fn set_density(&mut self, density: GridDensity) {
        if density == self.density {
            return;
        }
        self.resize.cancel();
        debug!(from = %self.density, to = %density, "density changed");
        self.density = density;
        self.clamp_current_page();
    }

    /// Flip edit mode. Leaving edit mode aborts any resize.
    pub fn toggle_edit_mode(&mut self) {
        self.edit_mode = !self.edit_mode;
        if !self.edit_mode {
            self.resize.cancel();
        }
    }

    /// Show a page, clamped to the last existing one.
    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = self.layout().clamp_page(page);
    }

    pub fn next_page(&mut self) {
        self.set_current_page(self.current_page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.set_current_page(self.current_page.saturating_sub(1));
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Save the widget list now, reporting failures to the caller.
    pub fn save(&mut self) -> Result<(), HearthError> {
        let payload = codec::encode(&self.widgets)?;
        self.storage.save(&payload)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn index_of(&self, id: &WidgetId) -> Option<usize> {
        self.widgets.iter().position(|widget| &widget.id == id)
    }

    fn next_widget_id(&mut self) -> WidgetId {
        loop {
            self.next_id += 1;
            let id = WidgetId(format!("widget-{}", self.next_id));
            if self.index_of(&id).is_none() {
                return id;
            }
        }
    }

    fn clamp_current_page(&mut self) {
        let clamped = self.layout().clamp_page(self.current_page);
        if clamped != self.current_page {
            debug!(from = self.current_page, to = clamped, "current page clamped");
            self.current_page = clamped;
        }
    }

    /// Finish a widget-list mutation: re-validate the page index and persist.
    fn commit(&mut self) {
        self.clamp_current_page();
        if let Err(err) = self.save() {
            warn!(%err, "failed to persist layout");
        }
    }
}

fn load_widgets<S: LayoutStorage>(storage: &mut S, defaults: &[Widget]) -> Vec<Widget> {
    match storage.load() {
        Ok(Some(payload)) => match codec::decode(&payload) {
            Ok(widgets) => widgets,
            Err(err) => {
                warn!(%err, "persisted layout is malformed, using defaults");
                defaults.to_vec()
            }
        },
        Ok(None) => {
            debug!("no persisted layout, using defaults");
            defaults.to_vec()
        }
        Err(err) => {
            warn!(%err, "failed to load layout, using defaults");
            defaults.to_vec()
        }
    }
}
