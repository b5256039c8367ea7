//! JavaScript-facing DTOs and argument parsing.

use hearth_core::{GridDensity, ResizeHandleError, WidgetSize, WidgetSizeError};
use hearth_grid::{ResizeHandle, ResizePreview};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by engine methods before they reach the store.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    UnknownHandle(#[from] ResizeHandleError),

    #[error("unknown density preset: {0}")]
    UnknownDensity(String),

    #[error(transparent)]
    Size(#[from] WidgetSizeError),

    #[error("invalid widget props: {0}")]
    Props(#[from] serde_wasm_bindgen::Error),
}

/// Grid density as seen from JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityJs {
    pub columns: u32,
    pub rows: u32,
}

impl From<GridDensity> for DensityJs {
    fn from(density: GridDensity) -> Self {
        Self {
            columns: density.columns,
            rows: density.rows,
        }
    }
}

/// Resize preview flattened for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResizePreviewJs {
    pub col: u32,
    pub row: u32,
    pub cols: u32,
    pub rows: u32,
}

impl From<ResizePreview> for ResizePreviewJs {
    fn from(preview: ResizePreview) -> Self {
        Self {
            col: preview.position.col,
            row: preview.position.row,
            cols: preview.footprint.cols,
            rows: preview.footprint.rows,
        }
    }
}

/// Resolve a named density preset.
pub fn density_preset(name: &str) -> Result<GridDensity, EngineError> {
    match name {
        "compact" => Ok(GridDensity::COMPACT),
        "standard" => Ok(GridDensity::STANDARD),
        "spacious" => Ok(GridDensity::SPACIOUS),
        other => Err(EngineError::UnknownDensity(other.to_string())),
    }
}

pub fn parse_handle(name: &str) -> Result<ResizeHandle, EngineError> {
    Ok(name.parse()?)
}

pub fn parse_size(name: &str) -> Result<WidgetSize, EngineError> {
    Ok(name.parse()?)
}
