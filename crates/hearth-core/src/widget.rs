//! Widget records.

use std::fmt;

use serde_json::{Map, Value};

use crate::types::{Footprint, GridPosition, WidgetSize};

/// Identifier of a widget, unique across the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WidgetId(pub String);

impl WidgetId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WidgetId {
    fn from(s: &str) -> Self {
        WidgetId(s.to_string())
    }
}

impl From<String> for WidgetId {
    fn from(s: String) -> Self {
        WidgetId(s)
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque key/value payload carried by a widget.
///
/// The layout engine stores and forwards props but never reads them; things
/// like the referenced device entity live here and belong to the renderer.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WidgetProps(Map<String, Value>);

impl WidgetProps {
    /// Create an empty props bag.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Add an entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Borrow the underlying map for forwarding.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for WidgetProps {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A dashboard widget as stored and persisted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Widget {
    /// Unique, immutable identifier
    pub id: WidgetId,
    /// Widget kind, e.g. `"light"` or `"thermostat"`; interpreted by the renderer
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// Opaque renderer payload
    #[cfg_attr(feature = "serde", serde(default))]
    pub props: WidgetProps,
    /// Legacy footprint preset
    #[cfg_attr(feature = "serde", serde(default))]
    pub size: WidgetSize,
    /// Stored anchor; `None` means auto-place on next read
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub position: Option<GridPosition>,
    /// Custom width in cells, effective only together with `custom_rows`
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub custom_cols: Option<u32>,
    /// Custom height in cells, effective only together with `custom_cols`
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub custom_rows: Option<u32>,
}

impl Widget {
    /// Create an unpositioned 1x1 widget.
    pub fn new(id: impl Into<WidgetId>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            props: WidgetProps::new(),
            size: WidgetSize::default(),
            position: None,
            custom_cols: None,
            custom_rows: None,
        }
    }

    /// Set the props.
    pub fn with_props(mut self, props: WidgetProps) -> Self {
        self.props = props;
        self
    }

    /// Set the legacy size.
    pub fn with_size(mut self, size: WidgetSize) -> Self {
        self.size = size;
        self
    }

    /// Set the stored position.
    pub fn with_position(mut self, col: u32, row: u32) -> Self {
        self.position = Some(GridPosition::new(col, row));
        self
    }

    /// Set both custom dimensions.
    pub fn with_custom_footprint(mut self, cols: u32, rows: u32) -> Self {
        self.custom_cols = Some(cols);
        self.custom_rows = Some(rows);
        self
    }

    /// Custom footprint, if both dimensions are present.
    pub fn custom_footprint(&self) -> Option<Footprint> {
        match (self.custom_cols, self.custom_rows) {
            (Some(cols), Some(rows)) => Some(Footprint::new(cols, rows)),
            _ => None,
        }
    }

    /// Effective footprint: custom dimensions if both are set, else the size preset.
    pub fn footprint(&self) -> Footprint {
        self.custom_footprint()
            .unwrap_or_else(|| self.size.footprint())
    }

    /// Replace the footprint with custom dimensions.
    pub fn set_custom_footprint(&mut self, footprint: Footprint) {
        self.custom_cols = Some(footprint.cols);
        self.custom_rows = Some(footprint.rows);
    }

    /// Drop custom dimensions so the size preset applies again.
    pub fn clear_custom_footprint(&mut self) {
        self.custom_cols = None;
        self.custom_rows = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_defaults() {
        let widget = Widget::new("w1", "light");
        assert_eq!(widget.id.as_str(), "w1");
        assert_eq!(widget.size, WidgetSize::Small);
        assert!(widget.position.is_none());
        assert_eq!(widget.footprint(), Footprint::UNIT);
    }

    #[test]
    fn test_custom_footprint_needs_both_axes() {
        let mut widget = Widget::new("w1", "camera").with_size(WidgetSize::Wide);
        widget.custom_cols = Some(3);
        assert_eq!(widget.footprint(), Footprint::new(2, 1));

        widget.custom_rows = Some(2);
        assert_eq!(widget.footprint(), Footprint::new(3, 2));

        widget.clear_custom_footprint();
        assert_eq!(widget.footprint(), Footprint::new(2, 1));
    }

    #[test]
    fn test_zero_custom_dimension_is_raised() {
        let widget = Widget::new("w1", "sensor").with_custom_footprint(0, 2);
        assert_eq!(widget.footprint(), Footprint::new(1, 2));
    }

    #[test]
    fn test_props_are_opaque() {
        let props = WidgetProps::new()
            .with("entityId", "light.kitchen")
            .with("brightness", 80);
        let widget = Widget::new("w1", "light").with_props(props.clone());
        assert_eq!(widget.props, props);
        assert_eq!(widget.props.len(), 2);
    }
}
