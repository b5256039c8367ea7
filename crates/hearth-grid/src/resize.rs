//! Pointer-driven resize state machine.
//!
//! A resize starts from a handle on one edge or corner of a widget. Every
//! pointer sample is converted to a whole-cell delta relative to the pointer
//! position at the start of the gesture, turned into a candidate footprint
//! and checked against the other widgets on the page. Valid candidates become
//! the live preview; invalid ones leave the previous preview in place.

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use hearth_core::{Footprint, GridDensity, GridPosition, ResizeHandleError, WidgetId};
use tracing::debug;

use crate::geometry::{can_place, OccupiedSet};

/// Which end of an axis a handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisEdge {
    /// Left or top: moves the anchor
    Leading,
    /// Right or bottom: moves the far edge
    Trailing,
}

/// Resize handle on a widget's border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    /// Edge dragged on the horizontal axis, if any.
    pub fn horizontal(&self) -> Option<AxisEdge> {
        match self {
            ResizeHandle::Left | ResizeHandle::TopLeft | ResizeHandle::BottomLeft => {
                Some(AxisEdge::Leading)
            }
            ResizeHandle::Right | ResizeHandle::TopRight | ResizeHandle::BottomRight => {
                Some(AxisEdge::Trailing)
            }
            ResizeHandle::Top | ResizeHandle::Bottom => None,
        }
    }

    /// Edge dragged on the vertical axis, if any.
    pub fn vertical(&self) -> Option<AxisEdge> {
        match self {
            ResizeHandle::Top | ResizeHandle::TopLeft | ResizeHandle::TopRight => {
                Some(AxisEdge::Leading)
            }
            ResizeHandle::Bottom | ResizeHandle::BottomLeft | ResizeHandle::BottomRight => {
                Some(AxisEdge::Trailing)
            }
            ResizeHandle::Left | ResizeHandle::Right => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeHandle::Top => "top",
            ResizeHandle::Bottom => "bottom",
            ResizeHandle::Left => "left",
            ResizeHandle::Right => "right",
            ResizeHandle::TopLeft => "top-left",
            ResizeHandle::TopRight => "top-right",
            ResizeHandle::BottomLeft => "bottom-left",
            ResizeHandle::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeHandle {
    type Err = ResizeHandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(ResizeHandle::Top),
            "bottom" => Ok(ResizeHandle::Bottom),
            "left" => Ok(ResizeHandle::Left),
            "right" => Ok(ResizeHandle::Right),
            "top-left" => Ok(ResizeHandle::TopLeft),
            "top-right" => Ok(ResizeHandle::TopRight),
            "bottom-left" => Ok(ResizeHandle::BottomLeft),
            "bottom-right" => Ok(ResizeHandle::BottomRight),
            other => Err(ResizeHandleError::Unknown {
                name: other.to_string(),
            }),
        }
    }
}

/// Converts a pointer delta in pixels into a whole-cell delta.
///
/// Implemented by the host from its measured cell size, or by a closure in tests.
pub trait CellMetrics {
    fn cell_delta(&self, delta_px: DVec2) -> (i32, i32);
}

impl<F> CellMetrics for F
where
    F: Fn(DVec2) -> (i32, i32),
{
    fn cell_delta(&self, delta_px: DVec2) -> (i32, i32) {
        self(delta_px)
    }
}

/// Cell pitch measured from the rendered grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredCells {
    /// Width of one cell in pixels
    pub cell_width: f64,
    /// Height of one cell in pixels
    pub cell_height: f64,
    /// Gap between adjacent cells in pixels
    pub gap: f64,
}

impl MeasuredCells {
    /// Create metrics for gapless cells.
    pub fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            cell_width,
            cell_height,
            gap: 0.0,
        }
    }

    /// Set the gap between cells.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }
}

fn cells_for(delta_px: f64, pitch: f64) -> i32 {
    if pitch <= 0.0 || !pitch.is_finite() || !delta_px.is_finite() {
        return 0;
    }
    (delta_px / pitch).round() as i32
}

impl CellMetrics for MeasuredCells {
    fn cell_delta(&self, delta_px: DVec2) -> (i32, i32) {
        (
            cells_for(delta_px.x, self.cell_width + self.gap),
            cells_for(delta_px.y, self.cell_height + self.gap),
        )
    }
}

/// Apply a cell delta to one axis. Returns `(anchor, size)`.
fn resize_axis(
    edge: Option<AxisEdge>,
    anchor: u32,
    size: u32,
    delta: i32,
    limit: u32,
) -> (u32, u32) {
    match edge {
        None => (anchor, size),
        Some(AxisEdge::Trailing) => {
            let max_size = limit.saturating_sub(anchor).max(1) as i64;
            let size = (size as i64 + delta as i64).clamp(1, max_size);
            (anchor, size as u32)
        }
        Some(AxisEdge::Leading) => {
            let far = anchor as i64 + size as i64;
            let new_anchor = (anchor as i64 + delta as i64).clamp(0, far - 1);
            (new_anchor as u32, (far - new_anchor) as u32)
        }
    }
}

/// Candidate geometry shown while a resize is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePreview {
    pub position: GridPosition,
    pub footprint: Footprint,
}

/// Geometry to write back when a resize is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeCommit {
    pub widget_id: WidgetId,
    pub position: GridPosition,
    pub footprint: Footprint,
}

/// Everything captured when a resize gesture starts.
#[derive(Debug, Clone)]
pub struct ResizeStart {
    pub widget_id: WidgetId,
    pub handle: ResizeHandle,
    /// Pointer position in pixels at pointer-down
    pub pointer: DVec2,
    pub position: GridPosition,
    pub footprint: Footprint,
    /// Cells of the other widgets on the page
    pub occupied: OccupiedSet,
}

#[derive(Debug, Clone)]
struct ResizeSession {
    start: ResizeStart,
    preview: Option<ResizePreview>,
}

impl ResizeSession {
    fn candidate(
        &self,
        pointer: DVec2,
        metrics: &dyn CellMetrics,
        density: GridDensity,
    ) -> ResizePreview {
        let start = &self.start;
        let (dx, dy) = metrics.cell_delta(pointer - start.pointer);
        let (col, cols) = resize_axis(
            start.handle.horizontal(),
            start.position.col,
            start.footprint.cols,
            dx,
            density.columns,
        );
        let (row, rows) = resize_axis(
            start.handle.vertical(),
            start.position.row,
            start.footprint.rows,
            dy,
            density.rows,
        );
        ResizePreview {
            position: GridPosition::new(col, row),
            footprint: Footprint::new(cols, rows),
        }
    }
}

#[derive(Debug, Clone, Default)]
enum ResizeState {
    #[default]
    Idle,
    Resizing(ResizeSession),
}

/// `Idle -> Resizing -> Idle`; at most one widget resizes at a time.
#[derive(Debug, Clone, Default)]
pub struct ResizeMachine {
    state: ResizeState,
}

impl ResizeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is in progress.
    pub fn is_resizing(&self) -> bool {
        matches!(self.state, ResizeState::Resizing(_))
    }

    /// Widget currently being resized.
    pub fn active_widget(&self) -> Option<&WidgetId> {
        match &self.state {
            ResizeState::Resizing(session) => Some(&session.start.widget_id),
            ResizeState::Idle => None,
        }
    }

    /// Handle of the gesture in progress.
    pub fn active_handle(&self) -> Option<ResizeHandle> {
        match &self.state {
            ResizeState::Resizing(session) => Some(session.start.handle),
            ResizeState::Idle => None,
        }
    }

    /// Last valid preview, if any sample has produced one.
    pub fn preview(&self) -> Option<ResizePreview> {
        match &self.state {
            ResizeState::Resizing(session) => session.preview,
            ResizeState::Idle => None,
        }
    }

    /// Enter `Resizing`. Returns `false` and changes nothing if a gesture is
    /// already in progress.
    pub fn begin(&mut self, start: ResizeStart) -> bool {
        if self.is_resizing() {
            return false;
        }
        debug!(widget = %start.widget_id, handle = %start.handle, "resize started");
        self.state = ResizeState::Resizing(ResizeSession {
            start,
            preview: None,
        });
        true
    }

    /// Feed a pointer sample. Returns the live preview after the sample.
    pub fn update(
        &mut self,
        pointer: DVec2,
        metrics: &dyn CellMetrics,
        density: GridDensity,
    ) -> Option<ResizePreview> {
        let ResizeState::Resizing(session) = &mut self.state else {
            return None;
        };

        let candidate = session.candidate(pointer, metrics, density);
        if can_place(
            candidate.position,
            candidate.footprint,
            &session.start.occupied,
            density,
        ) {
            session.preview = Some(candidate);
        }
        session.preview
    }

    /// Release the pointer: return to `Idle`, yielding the last valid preview.
    pub fn finish(&mut self) -> Option<ResizeCommit> {
        match std::mem::take(&mut self.state) {
            ResizeState::Resizing(session) => {
                let preview = session.preview?;
                debug!(
                    widget = %session.start.widget_id,
                    position = ?preview.position,
                    footprint = %preview.footprint,
                    "resize committed"
                );
                Some(ResizeCommit {
                    widget_id: session.start.widget_id,
                    position: preview.position,
                    footprint: preview.footprint,
                })
            }
            ResizeState::Idle => None,
        }
    }

    /// Abort the gesture, discarding any preview. Returns the widget that was
    /// being resized.
    pub fn cancel(&mut self) -> Option<WidgetId> {
        match std::mem::take(&mut self.state) {
            ResizeState::Resizing(session) => {
                debug!(widget = %session.start.widget_id, "resize cancelled");
                Some(session.start.widget_id)
            }
            ResizeState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::occupied_cells;

    const CELL: f64 = 100.0;

    fn metrics() -> MeasuredCells {
        MeasuredCells::new(CELL, CELL)
    }

    fn start(handle: ResizeHandle, col: u32, row: u32, footprint: Footprint) -> ResizeStart {
        ResizeStart {
            widget_id: WidgetId::from("w"),
            handle,
            pointer: DVec2::new(500.0, 500.0),
            position: GridPosition::new(col, row),
            footprint,
            occupied: OccupiedSet::new(),
        }
    }

    fn drag(
        machine: &mut ResizeMachine,
        dx_cells: f64,
        dy_cells: f64,
        density: GridDensity,
    ) -> Option<ResizePreview> {
        let pointer = DVec2::new(500.0 + dx_cells * CELL, 500.0 + dy_cells * CELL);
        machine.update(pointer, &metrics(), density)
    }

    #[test]
    fn test_measured_cells_round() {
        let metrics = MeasuredCells::new(100.0, 50.0).with_gap(10.0);
        assert_eq!(metrics.cell_delta(DVec2::new(264.0, -95.0)), (2, -2));
        assert_eq!(MeasuredCells::new(0.0, 0.0).cell_delta(DVec2::new(50.0, 50.0)), (0, 0));
    }

    #[test]
    fn test_right_handle_rounds_delta() {
        let density = GridDensity::new(6, 3);
        let mut machine = ResizeMachine::new();
        assert!(machine.begin(start(ResizeHandle::Right, 0, 0, Footprint::UNIT)));

        let preview = drag(&mut machine, 2.4, 0.0, density).unwrap();
        assert_eq!(preview.footprint, Footprint::new(3, 1));
        assert_eq!(preview.position, GridPosition::ORIGIN);
    }

    #[test]
    fn test_right_handle_stops_at_boundary() {
        let density = GridDensity::new(4, 3);

        let mut machine = ResizeMachine::new();
        machine.begin(start(ResizeHandle::Right, 2, 0, Footprint::UNIT));
        let preview = drag(&mut machine, 2.4, 0.0, density).unwrap();
        assert_eq!(preview.footprint, Footprint::new(2, 1));

        let mut machine = ResizeMachine::new();
        machine.begin(start(ResizeHandle::Right, 3, 0, Footprint::UNIT));
        let preview = drag(&mut machine, 2.4, 0.0, density).unwrap();
        assert_eq!(preview.footprint, Footprint::UNIT);
    }

    #[test]
    fn test_shrink_never_below_one() {
        let density = GridDensity::new(4, 3);
        let mut machine = ResizeMachine::new();
        machine.begin(start(ResizeHandle::Bottom, 0, 0, Footprint::new(1, 3)));
        let preview = drag(&mut machine, 0.0, -5.0, density).unwrap();
        assert_eq!(preview.footprint, Footprint::UNIT);
    }

    #[test]
    fn test_left_handle_moves_anchor() {
        let density = GridDensity::new(4, 3);
        let mut machine = ResizeMachine::new();
        machine.begin(start(ResizeHandle::Left, 2, 0, Footprint::new(1, 1)));

        let grown = drag(&mut machine, -1.0, 0.0, density).unwrap();
        assert_eq!(grown.position, GridPosition::new(1, 0));
        assert_eq!(grown.footprint, Footprint::new(2, 1));

        // Past the edge: anchor stops at 0.
        let clamped = drag(&mut machine, -7.0, 0.0, density).unwrap();
        assert_eq!(clamped.position, GridPosition::new(0, 0));
        assert_eq!(clamped.footprint, Footprint::new(3, 1));
    }

    #[test]
    fn test_top_handle_shrink_keeps_bottom_edge() {
        let density = GridDensity::new(4, 3);
        let mut machine = ResizeMachine::new();
        machine.begin(start(ResizeHandle::Top, 0, 0, Footprint::new(1, 3)));

        let shrunk = drag(&mut machine, 0.0, 5.0, density).unwrap();
        assert_eq!(shrunk.position, GridPosition::new(0, 2));
        assert_eq!(shrunk.footprint, Footprint::UNIT);
    }

    #[test]
    fn test_corner_combines_axes() {
        let density = GridDensity::new(4, 3);
        let mut machine = ResizeMachine::new();
        machine.begin(start(ResizeHandle::TopLeft, 2, 1, Footprint::UNIT));

        let preview = drag(&mut machine, -1.0, -1.0, density).unwrap();
        assert_eq!(preview.position, GridPosition::new(1, 0));
        assert_eq!(preview.footprint, Footprint::new(2, 2));

        let mut machine = ResizeMachine::new();
        machine.begin(start(ResizeHandle::BottomRight, 0, 0, Footprint::UNIT));
        let preview = drag(&mut machine, 1.0, 1.0, density).unwrap();
        assert_eq!(preview.position, GridPosition::ORIGIN);
        assert_eq!(preview.footprint, Footprint::new(2, 2));
    }

    #[test]
    fn test_collision_keeps_last_good_preview() {
        let density = GridDensity::new(4, 3);
        let mut resize = start(ResizeHandle::Right, 0, 0, Footprint::UNIT);
        resize.occupied = occupied_cells(GridPosition::new(2, 0), Footprint::UNIT);

        let mut machine = ResizeMachine::new();
        machine.begin(resize);

        let first = drag(&mut machine, 1.0, 0.0, density).unwrap();
        assert_eq!(first.footprint, Footprint::new(2, 1));

        // Three columns would cover (2,0).
        let blocked = drag(&mut machine, 2.0, 0.0, density).unwrap();
        assert_eq!(blocked, first);

        let commit = machine.finish().unwrap();
        assert_eq!(commit.footprint, Footprint::new(2, 1));
        assert!(!machine.is_resizing());
    }

    #[test]
    fn test_no_valid_sample_commits_nothing() {
        let density = GridDensity::new(4, 3);
        let mut machine = ResizeMachine::new();
        machine.begin(start(ResizeHandle::Right, 0, 0, Footprint::UNIT));
        assert!(machine.finish().is_none());
        assert!(!machine.is_resizing());

        assert!(machine.update(DVec2::ZERO, &metrics(), density).is_none());
    }

    #[test]
    fn test_single_gesture_at_a_time() {
        let mut machine = ResizeMachine::new();
        assert!(machine.begin(start(ResizeHandle::Right, 0, 0, Footprint::UNIT)));
        assert!(!machine.begin(start(ResizeHandle::Left, 1, 1, Footprint::UNIT)));
        assert_eq!(machine.active_handle(), Some(ResizeHandle::Right));
    }

    #[test]
    fn test_cancel_discards_preview() {
        let density = GridDensity::new(4, 3);
        let mut machine = ResizeMachine::new();
        machine.begin(start(ResizeHandle::Right, 0, 0, Footprint::UNIT));
        drag(&mut machine, 1.0, 0.0, density);
        assert_eq!(machine.cancel(), Some(WidgetId::from("w")));
        assert!(machine.finish().is_none());
    }

    #[test]
    fn test_closure_metrics() {
        let density = GridDensity::new(4, 3);
        let mut machine = ResizeMachine::new();
        machine.begin(start(ResizeHandle::Bottom, 0, 0, Footprint::UNIT));
        let fixed = |_: DVec2| (0, 2);
        let preview = machine.update(DVec2::ZERO, &fixed, density).unwrap();
        assert_eq!(preview.footprint, Footprint::new(1, 3));
    }

    #[test]
    fn test_handle_parse() {
        assert_eq!("bottom-left".parse::<ResizeHandle>(), Ok(ResizeHandle::BottomLeft));
        assert_eq!(
            "middle".parse::<ResizeHandle>(),
            Err(ResizeHandleError::Unknown {
                name: "middle".into()
            })
        );
        assert_eq!(ResizeHandle::TopRight.to_string(), "top-right");
    }
}
