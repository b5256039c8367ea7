//! WebAssembly bindings for the Hearth dashboard layout engine.
//!
//! This crate exposes the layout store to JavaScript. The widget list is
//! persisted in `localStorage` under a key chosen by the caller.
//!
//! ## Example
//!
//! ```js
//! import { DashboardEngine } from 'hearth-engine';
//!
//! const engine = new DashboardEngine('hearth-layout');
//! engine.setDensityPreset('standard');
//!
//! const id = engine.addWidget('light', { entityId: 'light.porch', name: 'Porch' });
//! engine.moveWidget(id, 2, 1);
//!
//! // Resize with pixel coordinates; cell size comes from the rendered grid.
//! engine.toggleEditMode();
//! engine.setCellMetrics(120, 120, 8);
//! engine.beginResize(id, 'bottom-right', 0, 0);
//! engine.updateResize(130, 0);
//! engine.endResize();
//!
//! const widgets = engine.pageWidgets(engine.currentPage());
//! ```

use glam::DVec2;
use hearth_core::{GridDensity, WidgetId, WidgetProps};
use hearth_grid::MeasuredCells;
use hearth_store::{LayoutStorage, LayoutStore, StoreOptions};
use wasm_bindgen::prelude::*;

mod local_storage;
mod types;

pub use local_storage::LocalStorage;
pub use types::*;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

/// The dashboard layout interface for JavaScript.
#[wasm_bindgen]
pub struct DashboardEngine {
    store: LayoutStore<Box<dyn LayoutStorage>>,
    metrics: MeasuredCells,
}

#[wasm_bindgen]
impl DashboardEngine {
    /// Create an engine backed by `localStorage[storage_key]`.
    #[wasm_bindgen(constructor)]
    pub fn new(storage_key: &str) -> Self {
        Self::with_storage(
            Box::new(LocalStorage::new(storage_key)),
            StoreOptions::default(),
        )
    }

    /// Get the version of the engine.
    #[wasm_bindgen(js_name = version)]
    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    // --- widgets ---

    /// Add a 1x1 widget. Returns its generated id.
    #[wasm_bindgen(js_name = addWidget)]
    pub fn add_widget(&mut self, kind: &str, props: JsValue) -> Result<String, JsError> {
        let props = props_from_js(props)?;
        Ok(self.store.add_widget(kind, props).0)
    }

    #[wasm_bindgen(js_name = deleteWidget)]
    pub fn delete_widget(&mut self, id: &str) {
        self.store.delete_widget(&WidgetId::from(id));
    }

    /// Move a widget's top-left corner to a cell on its page.
    #[wasm_bindgen(js_name = moveWidget)]
    pub fn move_widget(&mut self, id: &str, col: i32, row: i32) {
        self.store
            .move_widget(&WidgetId::from(id), i64::from(col), i64::from(row));
    }

    /// Switch a widget to a size preset ("1x1", "2x1", "1x2", "2x2").
    #[wasm_bindgen(js_name = setWidgetSize)]
    pub fn set_widget_size(&mut self, id: &str, size: &str) -> Result<(), JsError> {
        let size = parse_size(size)?;
        self.store.set_widget_size(&WidgetId::from(id), size);
        Ok(())
    }

    #[wasm_bindgen(js_name = updateWidgetProps)]
    pub fn update_widget_props(&mut self, id: &str, props: JsValue) -> Result<(), JsError> {
        let props = props_from_js(props)?;
        self.store.update_widget_props(&WidgetId::from(id), props);
        Ok(())
    }

    /// Replace every widget with the default set.
    #[wasm_bindgen(js_name = resetLayout)]
    pub fn reset_layout(&mut self) {
        self.store.reset_layout();
    }

    /// All widgets in stored order.
    #[wasm_bindgen(js_name = getWidgets)]
    pub fn get_widgets(&self) -> Result<JsValue, JsError> {
        to_js(self.store.widgets())
    }

    // --- pages ---

    /// Widgets on a page with their resolved positions and footprints.
    #[wasm_bindgen(js_name = pageWidgets)]
    pub fn page_widgets(&self, page: usize) -> Result<JsValue, JsError> {
        to_js(&self.store.page_widgets(page))
    }

    /// Occupied cell keys ("col,row") on a page.
    #[wasm_bindgen(js_name = occupiedCells)]
    pub fn occupied_cells(&self, page: usize) -> Vec<String> {
        self.store.occupied_cells(page).keys()
    }

    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.store.page_count()
    }

    #[wasm_bindgen(js_name = currentPage)]
    pub fn current_page(&self) -> usize {
        self.store.current_page()
    }

    #[wasm_bindgen(js_name = setCurrentPage)]
    pub fn set_current_page(&mut self, page: usize) {
        self.store.set_current_page(page);
    }

    #[wasm_bindgen(js_name = nextPage)]
    pub fn next_page(&mut self) {
        self.store.next_page();
    }

    #[wasm_bindgen(js_name = previousPage)]
    pub fn previous_page(&mut self) {
        self.store.previous_page();
    }

    // --- density & edit mode ---

    #[wasm_bindgen(js_name = getDensity)]
    pub fn get_density(&self) -> Result<JsValue, JsError> {
        to_js(&DensityJs::from(self.store.density()))
    }

    #[wasm_bindgen(js_name = setDensity)]
    pub fn set_density(&mut self, columns: u32, rows: u32) {
        self.store.set_density(GridDensity::new(columns, rows));
    }

    /// Switch to "compact", "standard" or "spacious".
    #[wasm_bindgen(js_name = setDensityPreset)]
    pub fn set_density_preset(&mut self, name: &str) -> Result<(), JsError> {
        let density = density_preset(name)?;
        self.store.set_density(density);
        Ok(())
    }

    #[wasm_bindgen(js_name = toggleEditMode)]
    pub fn toggle_edit_mode(&mut self) {
        self.store.toggle_edit_mode();
    }

    #[wasm_bindgen(js_name = isEditMode)]
    pub fn is_edit_mode(&self) -> bool {
        self.store.is_edit_mode()
    }

    // --- resize ---

    /// Set the rendered cell size and gap in pixels, used to convert pointer
    /// deltas into cell deltas.
    #[wasm_bindgen(js_name = setCellMetrics)]
    pub fn set_cell_metrics(&mut self, cell_width: f64, cell_height: f64, gap: f64) {
        self.metrics = MeasuredCells::new(cell_width, cell_height).with_gap(gap);
    }

    /// Start a resize from a handle ("top-left", "right", ...). Returns
    /// `false` outside edit mode or while another resize is active.
    #[wasm_bindgen(js_name = beginResize)]
    pub fn begin_resize(
        &mut self,
        id: &str,
        handle: &str,
        x: f64,
        y: f64,
    ) -> Result<bool, JsError> {
        let handle = parse_handle(handle)?;
        Ok(self
            .store
            .begin_resize(&WidgetId::from(id), handle, DVec2::new(x, y)))
    }

    /// Feed a pointer sample. Returns the live preview or `null`.
    #[wasm_bindgen(js_name = updateResize)]
    pub fn update_resize(&mut self, x: f64, y: f64) -> Result<JsValue, JsError> {
        match self.store.update_resize(DVec2::new(x, y), &self.metrics) {
            Some(preview) => to_js(&ResizePreviewJs::from(preview)),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = endResize)]
    pub fn end_resize(&mut self) {
        self.store.end_resize();
    }

    /// Abort the resize, e.g. on lost pointer capture.
    #[wasm_bindgen(js_name = cancelResize)]
    pub fn cancel_resize(&mut self) {
        self.store.cancel_resize();
    }

    #[wasm_bindgen(js_name = resizingWidget)]
    pub fn resizing_widget(&self) -> Option<String> {
        self.store.resizing_widget().map(|id| id.0.clone())
    }

    #[wasm_bindgen(js_name = resizePreview)]
    pub fn resize_preview(&self) -> Result<JsValue, JsError> {
        match self.store.resize_preview() {
            Some(preview) => to_js(&ResizePreviewJs::from(preview)),
            None => Ok(JsValue::NULL),
        }
    }
}

impl DashboardEngine {
    /// Create an engine over any storage port.
    pub fn with_storage(storage: Box<dyn LayoutStorage>, options: StoreOptions) -> Self {
        Self {
            store: LayoutStore::new(storage, options),
            metrics: MeasuredCells::new(1.0, 1.0),
        }
    }

    /// The underlying layout store.
    pub fn store(&self) -> &LayoutStore<Box<dyn LayoutStorage>> {
        &self.store
    }
}

fn props_from_js(value: JsValue) -> Result<WidgetProps, EngineError> {
    if value.is_undefined() || value.is_null() {
        return Ok(WidgetProps::new());
    }
    Ok(serde_wasm_bindgen::from_value(value)?)
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Get the engine version.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
