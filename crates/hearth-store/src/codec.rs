//! JSON encoding of the persisted widget list.
//!
//! The payload is a flat, ordered array of widget objects:
//!
//! ```json
//! [{"id":"w1","type":"light","props":{"entityId":"light.hall"},"size":"1x1","position":{"col":0,"row":0}}]
//! ```
//!
//! Optional fields (`position`, `customCols`, `customRows`) are omitted when
//! unset. There is no schema version field.

use std::collections::HashSet;

use hearth_core::{CodecError, Widget};

/// Serialize the widget list.
pub fn encode(widgets: &[Widget]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(widgets)?)
}

/// Parse a widget list, rejecting empty or duplicate ids.
pub fn decode(payload: &str) -> Result<Vec<Widget>, CodecError> {
    let widgets: Vec<Widget> = serde_json::from_str(payload)?;

    let mut seen = HashSet::with_capacity(widgets.len());
    for (index, widget) in widgets.iter().enumerate() {
        if widget.id.as_str().is_empty() {
            return Err(CodecError::EmptyId { index });
        }
        if !seen.insert(widget.id.as_str()) {
            return Err(CodecError::DuplicateId {
                id: widget.id.to_string(),
            });
        }
    }

    Ok(widgets)
}
