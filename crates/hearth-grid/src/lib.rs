//! Grid placement engine for Hearth dashboards.
//!
//! This crate computes legal widget geometries on a paged grid and applies
//! interactive mutations to them.
//!
//! # Architecture
//!
//! 1. **Geometry**: footprint lookup, occupied cells, bounds and overlap checks
//! 2. **Placement**: first-fit auto-placement with overflow onto new pages
//! 3. **Moves**: clamp a drop target and fall back to a ring search
//! 4. **Resize**: pointer-delta driven edge and corner resizing
//!
//! # Example
//!
//! ```
//! use hearth_core::{GridDensity, Widget};
//! use hearth_grid::allocate;
//!
//! let widgets: Vec<Widget> = (0..13)
//!     .map(|i| Widget::new(format!("w{i}"), "light"))
//!     .collect();
//! let layout = allocate(&widgets, GridDensity::new(4, 3));
//!
//! assert_eq!(layout.page_count(), 2);
//! assert_eq!(layout.page(1).map(|page| page.len()), Some(1));
//! ```

mod geometry;
mod moves;
mod placement;
mod resize;

pub use geometry::{
    can_place, cells, dimensions_of, occupied_cells, placement_footprint, OccupiedSet,
};
pub use moves::{clamp_target, resolve_move, ring_search};
pub use placement::{allocate, Page, PageLayout, Placement};
pub use resize::{
    AxisEdge, CellMetrics, MeasuredCells, ResizeCommit, ResizeHandle, ResizeMachine,
    ResizePreview, ResizeStart,
};
