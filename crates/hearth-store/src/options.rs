//! Store configuration.

use hearth_core::{GridDensity, Widget};

use crate::defaults::default_widgets;

/// Options for constructing a [`LayoutStore`](crate::LayoutStore).
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Initial grid density
    pub density: GridDensity,
    /// Widget set used when nothing is persisted and on reset
    pub default_widgets: Vec<Widget>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            density: GridDensity::default(),
            default_widgets: default_widgets(),
        }
    }
}

impl StoreOptions {
    /// Set the initial density.
    pub fn with_density(mut self, density: GridDensity) -> Self {
        self.density = density;
        self
    }

    /// Replace the default widget set.
    pub fn with_default_widgets(mut self, widgets: Vec<Widget>) -> Self {
        self.default_widgets = widgets;
        self
    }
}
