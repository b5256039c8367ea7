//! Layout store for Hearth dashboards.
//!
//! The store owns the widget collection, the grid density, the current page
//! and the edit-mode flag. It dispatches moves and resizes to `hearth-grid`
//! and writes the widget list through an injected [`LayoutStorage`] after
//! every change.
//!
//! # Example
//!
//! ```
//! use hearth_core::{GridDensity, WidgetProps};
//! use hearth_store::{LayoutStore, MemoryStorage, StoreOptions};
//!
//! let options = StoreOptions::default().with_default_widgets(Vec::new());
//! let mut store = LayoutStore::new(MemoryStorage::new(), options);
//!
//! let id = store.add_widget("light", WidgetProps::new().with("entityId", "light.porch"));
//! assert_eq!(store.page_widgets(0)[0].widget.id, id);
//!
//! store.set_density(GridDensity::SPACIOUS);
//! assert_eq!(store.page_count(), 1);
//! ```

pub mod codec;
mod defaults;
mod options;
mod storage;
mod store;

pub use defaults::default_widgets;
pub use options::StoreOptions;
pub use storage::{FileStorage, LayoutStorage, MemoryStorage};
pub use store::{LayoutStore, PlacedWidget};
