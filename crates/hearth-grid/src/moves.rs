//! Drop-target resolution for drag-to-move.

use hearth_core::{Footprint, GridDensity, GridPosition};
use tracing::debug;

use crate::geometry::{can_place, OccupiedSet};

/// Shift a raw target so the footprint fits inside the grid.
///
/// Negative coordinates (pointer dragged past the top or left edge) clamp to 0.
pub fn clamp_target(
    col: i64,
    row: i64,
    footprint: Footprint,
    density: GridDensity,
) -> GridPosition {
    let max_col = density.columns.saturating_sub(footprint.cols) as i64;
    let max_row = density.rows.saturating_sub(footprint.rows) as i64;
    GridPosition::new(col.clamp(0, max_col) as u32, row.clamp(0, max_row) as u32)
}

/// Find the first free anchor on expanding Chebyshev rings around `center`.
///
/// Ring `r` is scanned `dy` outer and `dx` inner, both from `-r` to `r`, and
/// only cells on the ring perimeter are tested. The first valid cell of the
/// first ring that has one wins.
pub fn ring_search(
    center: GridPosition,
    footprint: Footprint,
    occupied: &OccupiedSet,
    density: GridDensity,
) -> Option<GridPosition> {
    let max_radius = density.max_extent() as i64;
    for radius in 1..=max_radius {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx.abs().max(dy.abs()) != radius {
                    continue;
                }
                let col = center.col as i64 + dx;
                let row = center.row as i64 + dy;
                if col < 0 || row < 0 {
                    continue;
                }
                let candidate = GridPosition::new(col as u32, row as u32);
                if can_place(candidate, footprint, occupied, density) {
                    return Some(candidate);
                }
            }
        }
    }
    None
}

/// Resolve where a moved widget should land.
///
/// `occupied` must not contain the moving widget's own cells. Returns `None`
/// when no legal anchor exists, in which case the move is a no-op.
pub fn resolve_move(
    target_col: i64,
    target_row: i64,
    footprint: Footprint,
    occupied: &OccupiedSet,
    density: GridDensity,
) -> Option<GridPosition> {
    let footprint = footprint.clamp_to(density);
    let target = clamp_target(target_col, target_row, footprint, density);

    if can_place(target, footprint, occupied, density) {
        return Some(target);
    }

    let resolved = ring_search(target, footprint, occupied, density);
    match resolved {
        Some(position) => {
            debug!(?target, ?position, "drop target blocked, using nearest free slot");
        }
        None => debug!(?target, "no free slot for move"),
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::occupied_cells;

    #[test]
    fn test_clamp_target() {
        let density = GridDensity::new(4, 3);
        let footprint = Footprint::new(2, 2);
        assert_eq!(clamp_target(3, 2, footprint, density), GridPosition::new(2, 1));
        assert_eq!(clamp_target(-5, -1, footprint, density), GridPosition::ORIGIN);
        assert_eq!(clamp_target(1, 0, footprint, density), GridPosition::new(1, 0));
    }

    #[test]
    fn test_free_target_is_taken_directly() {
        let density = GridDensity::new(4, 3);
        let occupied = occupied_cells(GridPosition::ORIGIN, Footprint::UNIT);
        let resolved = resolve_move(2, 1, Footprint::UNIT, &occupied, density);
        assert_eq!(resolved, Some(GridPosition::new(2, 1)));
    }

    #[test]
    fn test_blocked_target_falls_back_to_ring() {
        // (1,1) is taken, so a 2x2 at the origin is rejected. Every ring 1
        // anchor also covers (1,1); ring 2 reaches (2,0).
        let density = GridDensity::new(4, 3);
        let occupied = occupied_cells(GridPosition::new(1, 1), Footprint::UNIT);
        let resolved = resolve_move(0, 0, Footprint::new(2, 2), &occupied, density);
        assert_eq!(resolved, Some(GridPosition::new(2, 0)));
    }

    #[test]
    fn test_ring_scan_order_is_dy_then_dx() {
        // Centre (1,1) is blocked; both (0,0) and (2,2) are free but the
        // scan starts at dy = -1, dx = -1.
        let density = GridDensity::new(3, 3);
        let occupied = occupied_cells(GridPosition::new(1, 1), Footprint::UNIT);
        let resolved = resolve_move(1, 1, Footprint::UNIT, &occupied, density);
        assert_eq!(resolved, Some(GridPosition::ORIGIN));
    }

    #[test]
    fn test_full_grid_is_noop() {
        let density = GridDensity::new(2, 2);
        let occupied = occupied_cells(GridPosition::ORIGIN, Footprint::new(2, 2));
        assert_eq!(resolve_move(0, 0, Footprint::UNIT, &occupied, density), None);
    }

    #[test]
    fn test_no_room_for_footprint_is_noop() {
        // Every 2x2 window on a 4x3 grid touches one of the blockers.
        let density = GridDensity::new(4, 3);
        let mut occupied = occupied_cells(GridPosition::new(1, 1), Footprint::UNIT);
        occupied.insert_footprint(GridPosition::new(3, 1), Footprint::UNIT);
        assert_eq!(resolve_move(0, 0, Footprint::new(2, 2), &occupied, density), None);
    }
}
