//! Room content — the text/drawing payload one holder leaves for the next.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// What the most recent departing holder left in the room.
///
/// Persists independently of occupancy: a timed-out session leaves the
/// previous content untouched, an admin clear wipes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RoomContent {
    /// Free-form text, bounded by the configured maximum length.
    #[serde(default)]
    pub text: String,
    /// Optional encoded drawing blob, opaque to the server.
    #[serde(default)]
    pub drawing: Option<String>,
}

impl RoomContent {
    /// Apply a release payload field-by-field.
    ///
    /// An absent field means "leave unchanged", not "clear". Text is
    /// re-clamped here regardless of what the boundary did.
    pub fn apply(&mut self, update: ContentUpdate, max_text_length: usize) {
        if let Some(text) = update.text {
            self.text = clamp_text(text, max_text_length);
        }
        if let Some(drawing) = update.drawing {
            self.drawing = Some(drawing);
        }
    }

    /// Enforce the text bound on content that arrived from storage.
    pub fn clamp(&mut self, max_text_length: usize) {
        if self.text.chars().count() > max_text_length {
            self.text = clamp_text(std::mem::take(&mut self.text), max_text_length);
        }
    }
}

/// Partial content payload supplied on release.
///
/// Each field independently overwrites the stored field only when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentUpdate {
    /// Replacement text, if any.
    pub text: Option<String>,
    /// Replacement drawing blob, if any.
    pub drawing: Option<String>,
}

impl ContentUpdate {
    /// Whether the payload carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.drawing.is_none()
    }
}

/// Truncate text to at most `max_chars` characters on a char boundary.
pub fn clamp_text(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text,
    }
}

/// Validate an encoded drawing blob at the boundary.
///
/// Accepts either a bare base64 payload or a `data:image/...;base64,` URL.
/// The decoded bytes stay opaque — only the encoding and the size bound
/// are checked.
pub fn validate_drawing(drawing: &str, max_bytes: usize) -> Result<(), AppError> {
    let payload = match drawing.split_once(";base64,") {
        Some((prefix, payload)) => {
            if !prefix.starts_with("data:image/") {
                return Err(AppError::validation("Drawing must be an image data URL"));
            }
            payload
        }
        None => drawing,
    };

    let decoded = BASE64
        .decode(payload)
        .map_err(|e| AppError::validation(format!("Drawing is not valid base64: {e}")))?;

    if decoded.is_empty() {
        return Err(AppError::validation("Drawing payload is empty"));
    }
    if decoded.len() > max_bytes {
        return Err(AppError::validation(format!(
            "Drawing exceeds maximum size of {max_bytes} bytes"
        )));
    }

    Ok(())
}
