use crate::error::{ClientError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Request/response seam between the client and the service.
///
/// Paths are relative to the service origin. A returned `HttpResponse` means
/// the exchange completed, whatever its status; `Err` means it did not.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<HttpResponse>;
    async fn post_json(&self, path: &str, body: serde_json::Value) -> Result<HttpResponse>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn json_body(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            content_disposition: None,
            body: body.to_string().into_bytes(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_content_disposition(mut self, disposition: impl Into<String>) -> Self {
        self.content_disposition = Some(disposition.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            ClientError::Transport(format!(
                "Malformed response (HTTP {}): {}",
                self.status, e
            ))
        })
    }

    /// `filename` parameter of an attachment disposition, if any.
    pub fn attachment_filename(&self) -> Option<String> {
        let disposition = self.content_disposition.as_deref()?;
        disposition.split(';').find_map(|part| {
            let (key, value) = part.trim().split_once('=')?;
            if key.trim().eq_ignore_ascii_case("filename") {
                let name = value.trim().trim_matches('"');
                (!name.is_empty()).then(|| name.to_string())
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_classes() {
        assert!(HttpResponse::new(200, Vec::new()).is_success());
        assert!(HttpResponse::new(204, Vec::new()).is_success());
        assert!(!HttpResponse::new(404, Vec::new()).is_success());
        assert!(!HttpResponse::new(500, Vec::new()).is_success());
    }

    #[test]
    fn test_malformed_json_is_transport_error() {
        let response = HttpResponse::new(200, "<html>oops</html>");
        let err = response.json::<serde_json::Value>().unwrap_err();
        assert_eq!(err.kind(), "transport");
        assert!(err.to_string().contains("HTTP 200"));
    }

    #[test]
    fn test_json_body_round_trip() {
        let response = HttpResponse::json_body(200, &json!({"images": []}));
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value, json!({"images": []}));
    }

    #[test]
    fn test_attachment_filename() {
        let response = HttpResponse::new(200, vec![1, 2, 3])
            .with_content_disposition(r#"attachment; filename="image_1.png""#);
        assert_eq!(response.attachment_filename().as_deref(), Some("image_1.png"));

        let response = HttpResponse::new(200, Vec::new()).with_content_disposition("inline");
        assert!(response.attachment_filename().is_none());
    }
}
