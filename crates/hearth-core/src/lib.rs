//! Core types and utilities for the Hearth dashboard layout engine.
//!
//! This crate provides the foundational types used across all other hearth crates:
//! - Grid density and cell coordinates
//! - Widget records with their legacy and custom footprints
//! - Opaque widget props
//! - Error types

pub mod errors;
pub mod types;
pub mod widget;

pub use errors::*;
pub use types::*;
pub use widget::*;
