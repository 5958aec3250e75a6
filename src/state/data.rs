/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// file ingestion, the edit service, and the UI layer.

use base64::Engine;

/// Fixed filename used when saving the AI-edited result
pub const EDITED_FILENAME: &str = "edited-image.png";

/// The currently selected source image
///
/// Replaced wholesale whenever the user picks a new file.
/// Exactly one may be current at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Filename only (e.g., "IMG_0001.jpg")
    pub filename: String,
    /// Sniffed MIME type (e.g., "image/jpeg")
    pub mime_type: String,
    /// The file's raw bytes, used for both preview and transmission
    pub bytes: Vec<u8>,
}

impl SourceImage {
    /// Filename the original downloads under
    pub fn download_name(&self) -> String {
        format!("original-{}", self.filename)
    }

    /// Base64 data URI embedding the image, previewable as-is
    pub fn to_data_uri(&self) -> String {
        encode_data_uri(&self.mime_type, &self.bytes)
    }
}

/// An AI-edited image returned by the service
///
/// Cleared when a new source image is selected or a new request begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedImage {
    /// MIME type declared by the service (e.g., "image/png")
    pub mime_type: String,
    /// Decoded image bytes
    pub bytes: Vec<u8>,
}

impl EditedImage {
    /// Base64 data URI embedding the image, previewable as-is
    pub fn to_data_uri(&self) -> String {
        encode_data_uri(&self.mime_type, &self.bytes)
    }
}

/// Build a `data:<mime>;base64,<payload>` URI from raw bytes
fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}
