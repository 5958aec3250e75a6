/// File ingestion
///
/// Loads a user-picked file into memory and validates that it actually is
/// an image before it becomes the current source. Validation sniffs the
/// bytes rather than trusting the extension, so a renamed text file is
/// still rejected.

use std::path::{Path, PathBuf};

use crate::error::{EditError, Result};
use crate::state::data::SourceImage;

/// Extensions offered by the file picker
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

/// Load and validate the picked file as the new source image
///
/// On success the caller replaces the current source wholesale. On failure
/// nothing is mutated; the error is surfaced inline.
pub async fn load_source_image(path: PathBuf) -> Result<SourceImage> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| EditError::FileRead(e.to_string()))?;

    let format = image::guess_format(&bytes).map_err(|_| EditError::InvalidFileType)?;
    let mime_type = format.to_mime_type().to_string();

    let filename = derive_filename(&path);

    log::info!("loaded {} ({}, {} bytes)", filename, mime_type, bytes.len());

    Ok(SourceImage {
        filename,
        mime_type,
        bytes,
    })
}

/// Filename component of the picked path, for display and download naming
fn derive_filename(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// PNG signature followed by a little padding
    const PNG_BYTES: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let result = load_source_image(PathBuf::from("/nonexistent/picture.png")).await;
        assert!(matches!(result, Err(EditError::FileRead(_))));
    }

    #[tokio::test]
    async fn test_non_image_bytes_are_rejected() {
        let path = temp_file("prompt-editor-test-not-an-image.png", b"just some text");
        let result = load_source_image(path).await;
        assert_eq!(result, Err(EditError::InvalidFileType));
    }

    #[tokio::test]
    async fn test_valid_png_is_loaded_verbatim() {
        let path = temp_file("prompt-editor-test-valid.png", &PNG_BYTES);
        let source = load_source_image(path).await.unwrap();
        assert_eq!(source.filename, "prompt-editor-test-valid.png");
        assert_eq!(source.mime_type, "image/png");
        assert_eq!(source.bytes, PNG_BYTES);
    }
}
