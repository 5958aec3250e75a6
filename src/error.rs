/// Error types for the edit workflow
///
/// Every failure a user can hit funnels into `EditError`. The variants are
/// plain data (`Clone + PartialEq`) so they can travel inside iced messages
/// from background tasks back to the update loop.

use thiserror::Error;

/// Errors that can occur while ingesting a file or requesting an edit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The picked file is not a recognized image format
    #[error("Please select a valid image file.")]
    InvalidFileType,

    /// The picked file could not be read from disk
    #[error("Failed to read file: {0}")]
    FileRead(String),

    /// Submit was attempted without an image or a prompt
    #[error("Please upload an image and provide an editing prompt.")]
    MissingInput,

    /// The edit service call failed (transport or API error)
    #[error("Failed to edit image: {0}")]
    Service(String),

    /// The service responded, but no part carried image data
    #[error("No image was generated in the response.")]
    EmptyResult,
}

/// Result type alias for edit workflow operations
pub type Result<T> = std::result::Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_carries_underlying_message() {
        let err = EditError::Service("quota exceeded".into());
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn test_empty_result_message() {
        assert_eq!(
            EditError::EmptyResult.to_string(),
            "No image was generated in the response."
        );
    }
}
