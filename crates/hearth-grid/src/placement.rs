//! Multi-page first-fit placement.
//!
//! Widgets with a valid stored position keep it unless an earlier widget (in
//! row-major order) already covers one of its cells. Everything else is
//! placed at the first free cell of a row-major scan; when the current page
//! is full a new page is opened and the widget lands at its origin.

use hearth_core::{Footprint, GridDensity, GridPosition, Widget};
use tracing::debug;

use crate::geometry::{can_place, placement_footprint, OccupiedSet};

/// Resolved geometry of one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index into the widget list the layout was computed from
    pub widget_index: usize,
    /// Resolved top-left cell on its page
    pub position: GridPosition,
    /// Footprint after clamping to the density
    pub footprint: Footprint,
}

/// One grid instance and the widgets placed on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    placements: Vec<Placement>,
    occupied: OccupiedSet,
}

impl Page {
    fn new() -> Self {
        Self::default()
    }

    fn place(&mut self, widget_index: usize, position: GridPosition, footprint: Footprint) {
        self.occupied.insert_footprint(position, footprint);
        self.placements.push(Placement {
            widget_index,
            position,
            footprint,
        });
    }

    /// First free anchor in row-major order, if any.
    pub fn first_fit(&self, footprint: Footprint, density: GridDensity) -> Option<GridPosition> {
        (0..density.rows)
            .flat_map(|row| (0..density.columns).map(move |col| GridPosition::new(col, row)))
            .find(|&position| can_place(position, footprint, &self.occupied, density))
    }

    /// Placements in the order they were made.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Cells covered by all widgets on this page.
    pub fn occupied(&self) -> &OccupiedSet {
        &self.occupied
    }

    /// Cells covered by every widget except `widget_index`.
    pub fn occupied_excluding(&self, widget_index: usize) -> OccupiedSet {
        let mut occupied = OccupiedSet::new();
        for placement in self
            .placements
            .iter()
            .filter(|placement| placement.widget_index != widget_index)
        {
            occupied.insert_footprint(placement.position, placement.footprint);
        }
        occupied
    }

    /// Look up the placement of a widget on this page.
    pub fn placement_of(&self, widget_index: usize) -> Option<&Placement> {
        self.placements
            .iter()
            .find(|placement| placement.widget_index == widget_index)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Ordered pages derived from a widget list and a density.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    density: GridDensity,
    pages: Vec<Page>,
}

impl PageLayout {
    /// Density the layout was computed for.
    pub fn density(&self) -> GridDensity {
        self.density
    }

    /// Number of pages; never zero.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by index.
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// All pages in order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Find the page index and placement of a widget.
    pub fn locate(&self, widget_index: usize) -> Option<(usize, &Placement)> {
        self.pages.iter().enumerate().find_map(|(page_index, page)| {
            page.placement_of(widget_index)
                .map(|placement| (page_index, placement))
        })
    }

    /// Clamp a page index to the last existing page.
    pub fn clamp_page(&self, index: usize) -> usize {
        index.min(self.pages.len().saturating_sub(1))
    }
}

/// Partition widgets into pages, placing every widget exactly once.
pub fn allocate(widgets: &[Widget], density: GridDensity) -> PageLayout {
    let footprints: Vec<Footprint> = widgets
        .iter()
        .map(|widget| placement_footprint(widget, density))
        .collect();

    let mut positioned = Vec::new();
    let mut pending = Vec::new();
    for (index, widget) in widgets.iter().enumerate() {
        match widget.position {
            Some(position) if density.contains(position, footprints[index]) => {
                positioned.push((index, position));
            }
            _ => pending.push(index),
        }
    }

    positioned.sort_by_key(|&(_, position)| position.row_major_index(density.columns));

    let mut pages = Vec::new();
    let mut current = Page::new();

    for (index, position) in positioned {
        let footprint = footprints[index];
        if current.occupied.intersects(position, footprint) {
            debug!(widget = %widgets[index].id, %footprint, "stored position collides, demoting");
            pending.push(index);
        } else {
            current.place(index, position, footprint);
        }
    }

    for index in pending {
        let footprint = footprints[index];
        match current.first_fit(footprint, density) {
            Some(position) => current.place(index, position, footprint),
            None => {
                debug!(
                    widget = %widgets[index].id,
                    page = pages.len() + 1,
                    "page full, opening a new page"
                );
                pages.push(std::mem::take(&mut current));
                current.place(index, GridPosition::ORIGIN, footprint);
            }
        }
    }

    pages.push(current);

    PageLayout { density, pages }
}
