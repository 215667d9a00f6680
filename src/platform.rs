use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::PlatformError;

pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

/// Binary image handed to the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ClipboardImage {
    pub fn png(bytes: Vec<u8>) -> Self {
        Self {
            mime_type: "image/png".to_string(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    /// Plain-text form copied when no native share capability exists.
    pub fn fallback_text(&self) -> String {
        format!("{}\n{}", self.text, self.url)
    }
}

/// Clipboard and share capabilities of whatever surface hosts the client.
#[async_trait]
pub trait Platform: Send + Sync {
    async fn write_image(&self, image: ClipboardImage) -> PlatformResult<()>;

    async fn write_text(&self, text: &str) -> PlatformResult<()>;

    fn supports_native_share(&self) -> bool {
        false
    }

    async fn native_share(&self, _payload: &SharePayload) -> PlatformResult<()> {
        Err(PlatformError::Unsupported)
    }
}

/// No clipboard, no share. Every capability reports `Unsupported`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessPlatform;

#[async_trait]
impl Platform for HeadlessPlatform {
    async fn write_image(&self, _image: ClipboardImage) -> PlatformResult<()> {
        Err(PlatformError::Unsupported)
    }

    async fn write_text(&self, _text: &str) -> PlatformResult<()> {
        Err(PlatformError::Unsupported)
    }
}

/// Terminal surface: images go to a file sink, text goes to stdout.
#[derive(Debug, Clone, Default)]
pub struct ConsolePlatform {
    image_sink: Option<PathBuf>,
}

impl ConsolePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image_sink(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_sink = Some(path.into());
        self
    }
}

#[async_trait]
impl Platform for ConsolePlatform {
    async fn write_image(&self, image: ClipboardImage) -> PlatformResult<()> {
        let path = self.image_sink.as_ref().ok_or(PlatformError::Unsupported)?;
        tokio::fs::write(path, &image.bytes)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    PlatformError::PermissionDenied(path.display().to_string())
                }
                _ => PlatformError::Failed(format!("{}: {}", path.display(), e)),
            })?;
        log::debug!(
            "Wrote {} ({} bytes) to {}",
            image.mime_type,
            image.bytes.len(),
            path.display()
        );
        Ok(())
    }

    async fn write_text(&self, text: &str) -> PlatformResult<()> {
        println!("{}", text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_headless_reports_unsupported() {
        let platform = HeadlessPlatform;
        assert_eq!(
            platform.write_image(ClipboardImage::png(vec![1])).await,
            Err(PlatformError::Unsupported)
        );
        assert_eq!(platform.write_text("x").await, Err(PlatformError::Unsupported));
        assert!(!platform.supports_native_share());
    }

    #[tokio::test]
    async fn test_console_writes_image_to_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("copied.png");
        let platform = ConsolePlatform::new().with_image_sink(&path);

        platform
            .write_image(ClipboardImage::png(vec![0x89, b'P', b'N', b'G']))
            .await
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_console_without_sink_is_unsupported() {
        let platform = ConsolePlatform::new();
        assert_eq!(
            platform.write_image(ClipboardImage::png(vec![1])).await,
            Err(PlatformError::Unsupported)
        );
    }

    #[test]
    fn test_fallback_text() {
        let payload = SharePayload {
            title: "t".into(),
            text: "look".into(),
            url: "http://host/".into(),
        };
        assert_eq!(payload.fallback_text(), "look\nhttp://host/");
    }
}
