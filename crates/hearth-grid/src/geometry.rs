//! Footprint geometry and collision checks.

use hearth_core::{CellKey, Footprint, GridDensity, GridPosition, Widget};
use indexmap::IndexSet;

/// Set of cells covered by the widgets on one page.
///
/// Iteration follows insertion order so renderers see a stable sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupiedSet {
    cells: IndexSet<CellKey>,
}

impl OccupiedSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            cells: IndexSet::new(),
        }
    }

    /// Check whether a single cell is taken.
    pub fn contains(&self, key: CellKey) -> bool {
        self.cells.contains(&key)
    }

    /// Check whether any cell of the footprint is taken.
    pub fn intersects(&self, position: GridPosition, footprint: Footprint) -> bool {
        cells(position, footprint).any(|key| self.cells.contains(&key))
    }

    /// Mark every cell of the footprint as taken.
    pub fn insert_footprint(&mut self, position: GridPosition, footprint: Footprint) {
        self.cells.extend(cells(position, footprint));
    }

    /// Release every cell of the footprint.
    pub fn remove_footprint(&mut self, position: GridPosition, footprint: Footprint) {
        for key in cells(position, footprint) {
            self.cells.shift_remove(&key);
        }
    }

    /// Number of taken cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over taken cells in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = CellKey> + '_ {
        self.cells.iter().copied()
    }

    /// Cell keys rendered as `"col,row"` strings.
    pub fn keys(&self) -> Vec<String> {
        self.cells.iter().map(|key| key.to_string()).collect()
    }
}

impl FromIterator<CellKey> for OccupiedSet {
    fn from_iter<I: IntoIterator<Item = CellKey>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Effective footprint of a widget: custom dimensions if both are set, else
/// the size preset.
pub fn dimensions_of(widget: &Widget) -> Footprint {
    widget.footprint()
}

/// Footprint used for placement, clamped so it fits on an empty page.
pub fn placement_footprint(widget: &Widget, density: GridDensity) -> Footprint {
    dimensions_of(widget).clamp_to(density)
}

/// Iterate over every cell covered by a footprint, row-major.
pub fn cells(position: GridPosition, footprint: Footprint) -> impl Iterator<Item = CellKey> {
    (0..footprint.rows).flat_map(move |dy| {
        (0..footprint.cols).map(move |dx| {
            CellKey::new(
                position.col.saturating_add(dx),
                position.row.saturating_add(dy),
            )
        })
    })
}

/// Collect the cells covered by a footprint anchored at `position`.
pub fn occupied_cells(position: GridPosition, footprint: Footprint) -> OccupiedSet {
    cells(position, footprint).collect()
}

/// True iff the footprint is inside the grid and touches no occupied cell.
pub fn can_place(
    position: GridPosition,
    footprint: Footprint,
    occupied: &OccupiedSet,
    density: GridDensity,
) -> bool {
    density.contains(position, footprint) && !occupied.intersects(position, footprint)
}
