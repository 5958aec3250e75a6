/// Gemini image editing client
///
/// One POST to the `generateContent` endpoint per submission: the source
/// image goes up as an inline base64 part alongside the prompt text, with
/// the response modality restricted to images. The first response part
/// carrying inline image data becomes the edit result.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{EditError, Result};
use crate::state::data::{EditedImage, SourceImage};

/// Default Gemini API host
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default image editing model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Client for the Gemini image editing endpoint
///
/// Cheap to clone (reqwest's client is a handle), so the update loop can
/// hand copies to background tasks.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client with an explicit credential and model id
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Request an AI edit of `source` described by `prompt`
    ///
    /// The source bytes are re-encoded as base64 for transmission,
    /// independent of any preview representation the UI holds.
    pub async fn edit_image(&self, prompt: &str, source: &SourceImage) -> Result<EditedImage> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model,
        );

        let body = GeminiRequest::for_edit(prompt, source);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EditError::Service(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = if text.trim().is_empty() {
                format!("service returned HTTP {}", status.as_u16())
            } else {
                text
            };
            return Err(EditError::Service(message));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| EditError::Service(e.to_string()))?;

        let inline = gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .find_map(|part| part.inline_data)
            .ok_or(EditError::EmptyResult)?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&inline.data)
            .map_err(|e| EditError::Service(format!("could not decode image data: {}", e)))?;

        log::info!(
            "edit complete: {} bytes of {}",
            bytes.len(),
            inline.mime_type
        );

        Ok(EditedImage {
            mime_type: inline.mime_type,
            bytes,
        })
    }
}

// Wire format (camelCase JSON)

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

/// A request part carries either inline image data or prompt text
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    InlineData { inline_data: InlineData },
    Text { text: String },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

impl GeminiRequest {
    /// Image part first, then the prompt, image-only response
    fn for_edit(prompt: &str, source: &SourceImage) -> Self {
        let parts = vec![
            RequestPart::InlineData {
                inline_data: InlineData {
                    mime_type: source.mime_type.clone(),
                    data: base64::engine::general_purpose::STANDARD.encode(&source.bytes),
                },
            },
            RequestPart::Text {
                text: prompt.to_string(),
            },
        ];

        Self {
            contents: vec![RequestContent { parts }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_source() -> SourceImage {
        SourceImage {
            filename: "photo.png".into(),
            mime_type: "image/png".into(),
            bytes: vec![0x89, 0x50, 0x4E, 0x47],
        }
    }

    fn test_client(server: &MockServer) -> GeminiClient {
        GeminiClient::new("test-key", DEFAULT_MODEL).with_base_url(server.uri())
    }

    #[test]
    fn test_request_serializes_camel_case_with_image_first() {
        let body = GeminiRequest::for_edit("add a hat", &sample_source());
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(
            json["generationConfig"]["responseModalities"],
            serde_json::json!(["IMAGE"])
        );

        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["inline_data"]["mimeType"], "image/png");
        assert_eq!(parts[1]["text"], "add a hat");
    }

    #[test]
    fn test_response_deserialization_skips_imageless_parts() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "here you go" },
                        { "inlineData": { "mimeType": "image/png", "data": "AAAA" } }
                    ]
                }
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        let inline = response.candidates[0]
            .content
            .as_ref()
            .unwrap()
            .parts
            .iter()
            .find_map(|p| p.inline_data.as_ref())
            .unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "AAAA");
    }

    #[tokio::test]
    async fn test_edit_resolves_to_data_uri() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!(
                "/v1beta/models/{}:generateContent",
                DEFAULT_MODEL
            )))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{
                            "inlineData": { "mimeType": "image/png", "data": "AAAA" }
                        }]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let edited = test_client(&server)
            .edit_image("add a hat", &sample_source())
            .await
            .unwrap();
        assert_eq!(edited.to_data_uri(), "data:image/png;base64,AAAA");
    }

    #[tokio::test]
    async fn test_response_without_image_is_empty_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "cannot comply" }] }
                }]
            })))
            .mount(&server)
            .await;

        let result = test_client(&server)
            .edit_image("add a hat", &sample_source())
            .await;
        assert_eq!(result, Err(EditError::EmptyResult));
    }

    #[tokio::test]
    async fn test_service_failure_carries_underlying_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let result = test_client(&server)
            .edit_image("add a hat", &sample_source())
            .await;
        match result {
            Err(EditError::Service(message)) => assert!(message.contains("quota exceeded")),
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_candidates_is_empty_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let result = test_client(&server)
            .edit_image("add a hat", &sample_source())
            .await;
        assert_eq!(result, Err(EditError::EmptyResult));
    }
}
