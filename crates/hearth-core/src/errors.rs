//! Error types for the Hearth engine.
//!
//! Layout operations themselves never fail: invalid targets clamp or become
//! no-ops. Errors only arise at the storage and serialization boundary.

use thiserror::Error;

/// Top-level error type for the Hearth engine.
#[derive(Debug, Error)]
pub enum HearthError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Errors raised by a layout storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Errors while encoding or decoding the persisted widget list.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate widget id: {id}")]
    DuplicateId { id: String },

    #[error("Empty widget id at index {index}")]
    EmptyId { index: usize },
}

/// A cell key string that is not of the form `"col,row"`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CellKeyError {
    #[error("Malformed cell key: {key:?}")]
    Malformed { key: String },
}

/// A widget size string that is not one of the known presets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WidgetSizeError {
    #[error("Unknown widget size: {value:?}")]
    Unknown { value: String },
}

/// A resize handle name that is not one of the eight edges or corners.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResizeHandleError {
    #[error("Unknown resize handle: {name:?}")]
    Unknown { name: String },
}
