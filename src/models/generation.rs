use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use super::common::lenient_f64;
use crate::error::{ClientError, Result};

/// Base64 text form of the image bytes, as carried in request and response bodies.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(BASE64.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(self.0.trim())
            .map_err(|e| ClientError::Transport(format!("Invalid image encoding: {}", e)))
    }

    /// `data:` URL for inline display.
    pub fn data_url(&self, mime_type: &str) -> String {
        format!("data:{};base64,{}", mime_type, self.0)
    }
}

impl std::fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EncodedImage({} chars)", self.0.len())
    }
}

/// A request that passed validation: trimmed prompt, dimensions within range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
}

/// Output of the generate call, consumed by the persist call.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub image_data: EncodedImage,
    pub duration_seconds: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default, rename = "image_b64", alias = "imageData")]
    pub image_data: Option<EncodedImage>,
    #[serde(
        default,
        rename = "generation_time",
        alias = "durationSeconds",
        deserialize_with = "lenient_f64"
    )]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PersistPayload<'a> {
    #[serde(rename = "image_b64")]
    pub image_data: &'a EncodedImage,
    pub prompt: &'a str,
    pub width: u32,
    pub height: u32,
}

/// Body of an error response, whatever the endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn message(self) -> Option<String> {
        self.error.or(self.detail).filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_image_bytes_survive_encoding() {
        let bytes = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff];
        let encoded = EncodedImage::from_bytes(&bytes);
        assert_eq!(encoded.decode().unwrap(), bytes);
    }

    #[test]
    fn test_invalid_encoding_is_reported() {
        let err = EncodedImage::new("not base64!!").decode().unwrap_err();
        assert_eq!(err.kind(), "transport");
    }

    #[test]
    fn test_generate_response_accepts_both_field_names() {
        let r: GenerateResponse = serde_json::from_str(r#"{"image_b64": "AAEC"}"#).unwrap();
        assert_eq!(r.image_data.unwrap().as_str(), "AAEC");
        assert!(r.duration_seconds.is_none());

        let r: GenerateResponse =
            serde_json::from_str(r#"{"imageData": "AAEC", "durationSeconds": 3.5}"#).unwrap();
        assert!(r.image_data.is_some());
        assert_eq!(r.duration_seconds, Some(3.5));
    }

    #[test]
    fn test_persist_payload_shape() {
        let image = EncodedImage::new("AAEC");
        let payload = PersistPayload {
            image_data: &image,
            prompt: "a tiny cabin",
            width: 512,
            height: 768,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"image_b64": "AAEC", "prompt": "a tiny cabin", "width": 512, "height": 768})
        );
    }

    #[test]
    fn test_error_body_prefers_error_field() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "Prompt missing", "detail": "x"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("Prompt missing"));

        let body: ErrorBody = serde_json::from_str(r#"{"detail": "Image not found"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("Image not found"));

        let body: ErrorBody = serde_json::from_str(r#"{"error": "  "}"#).unwrap();
        assert!(body.message().is_none());
    }

    #[test]
    fn test_debug_does_not_dump_payload() {
        let image = EncodedImage::new("A".repeat(4096));
        assert_eq!(format!("{:?}", image), "EncodedImage(4096 chars)");
    }
}
