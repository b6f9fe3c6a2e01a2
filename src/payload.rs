//! Drag-source protocol.
//!
//! A palette template crosses the drag boundary as JSON text, tagged with
//! [`PAYLOAD_MIME`]. The drop site parses it back into a [`Template`].
//!
//! ```
//! use policy_canvas::{encode_template, parse_payload, Palette};
//!
//! let palette = Palette::default();
//! let template = &palette.templates()[0];
//! let text = encode_template(template).unwrap();
//! assert_eq!(&parse_payload(&text).unwrap(), template);
//! ```

use crate::error::CanvasError;
use crate::palette::Template;

/// MIME type the payload is registered under on the host's data transfer.
pub const PAYLOAD_MIME: &str = "application/json";

/// Serialized template ready to hand to the host's drag machinery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragPayload {
    pub mime: &'static str,
    pub data: String,
}

impl DragPayload {
    /// Build the payload for a drag that starts on `template`.
    pub fn from_template(template: &Template) -> Result<Self, CanvasError> {
        Ok(Self {
            mime: PAYLOAD_MIME,
            data: encode_template(template)?,
        })
    }

    /// Parse the payload back into a template.
    pub fn parse(&self) -> Result<Template, CanvasError> {
        parse_payload(&self.data)
    }
}

/// Serialize a template to payload text.
pub fn encode_template(template: &Template) -> Result<String, CanvasError> {
    Ok(serde_json::to_string(template)?)
}

/// Parse payload text into a template.
pub fn parse_payload(text: &str) -> Result<Template, CanvasError> {
    if text.trim().is_empty() {
        return Err(CanvasError::EmptyPayload);
    }
    Ok(serde_json::from_str(text)?)
}
