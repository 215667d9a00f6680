use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::common::{lenient_f64, lenient_string, lenient_u32, lenient_u64};

/// Server-persisted record of a generated image.
///
/// Only `filename` is guaranteed; the listing endpoint reports `"Unknown"` for
/// metadata it lost, which deserializes as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredImage {
    pub filename: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub height: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub model: Option<String>,
    #[serde(
        default,
        rename = "generation_time",
        alias = "durationSeconds",
        deserialize_with = "lenient_f64"
    )]
    pub duration_seconds: Option<f64>,
    #[serde(
        default,
        rename = "file_size",
        alias = "size",
        alias = "fileSizeBytes",
        deserialize_with = "lenient_u64"
    )]
    pub file_size_bytes: Option<u64>,
    #[serde(
        default,
        rename = "created",
        alias = "createdAt",
        deserialize_with = "lenient_string"
    )]
    pub created_at: Option<String>,
}

impl StoredImage {
    /// Creation time as wall-clock time; accepts RFC 3339 and offset-less ISO 8601.
    pub fn created(&self) -> Option<NaiveDateTime> {
        let raw = self.created_at.as_deref()?.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.naive_local())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
    }

    pub fn dimensions_label(&self) -> String {
        match (self.width, self.height) {
            (Some(w), Some(h)) => format!("{} x {}", w, h),
            _ => "unknown".to_string(),
        }
    }

    pub fn model_label(&self) -> &str {
        self.model.as_deref().unwrap_or("unknown")
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageListResponse {
    #[serde(default)]
    pub images: Vec<StoredImage>,
}

/// Bytes of a stored image fetched through the attachment route.
#[derive(Debug, Clone)]
pub struct DownloadedImage {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_save_response_fields() {
        let image: StoredImage = serde_json::from_str(
            r#"{
                "success": true,
                "filename": "image_1a2b3c4d_1700000000.png",
                "width": 512,
                "height": 512,
                "model": "Gemini 2.5 Flash",
                "generation_time": 0,
                "file_size": 20480,
                "prompt": "a tiny cabin in the woods",
                "created": "2025-09-01T10:20:30.123456"
            }"#,
        )
        .unwrap();

        assert_eq!(image.filename, "image_1a2b3c4d_1700000000.png");
        assert_eq!(image.width, Some(512));
        assert_eq!(image.file_size_bytes, Some(20480));
        assert_eq!(image.duration_seconds, Some(0.0));
        assert_eq!(image.model_label(), "Gemini 2.5 Flash");

        let created = image.created().unwrap();
        assert_eq!((created.year(), created.month(), created.day()), (2025, 9, 1));
        assert_eq!(created.hour(), 10);
    }

    #[test]
    fn test_listing_entry_with_unknown_metadata() {
        let image: StoredImage = serde_json::from_str(
            r#"{
                "filename": "orphan.png",
                "size": 1536,
                "width": "Unknown",
                "height": "Unknown",
                "prompt": "Unknown",
                "model": "Unknown",
                "generation_time": 0,
                "created": "Unknown"
            }"#,
        )
        .unwrap();

        assert_eq!(image.file_size_bytes, Some(1536));
        assert_eq!(image.dimensions_label(), "unknown");
        assert_eq!(image.model_label(), "unknown");
        assert!(image.created().is_none());
    }

    #[test]
    fn test_rfc3339_created() {
        let image = StoredImage {
            filename: "a.png".into(),
            prompt: String::new(),
            width: None,
            height: None,
            model: None,
            duration_seconds: None,
            file_size_bytes: None,
            created_at: Some("2025-01-02T03:04:05+02:00".into()),
        };
        assert_eq!(image.created().unwrap().hour(), 3);
    }

    #[test]
    fn test_list_response_defaults_to_empty() {
        let listing: ImageListResponse = serde_json::from_str("{}").unwrap();
        assert!(listing.images.is_empty());
    }
}
