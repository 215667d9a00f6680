pub mod session;
pub mod status;
pub mod validation;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use uuid::Uuid;

use crate::{
    config::ClientConfig,
    error::{ClientError, Result},
    format::format_duration,
    logger,
    models::{
        DownloadedImage, ErrorBody, GenerateResponse, GenerationRequest, GenerationResult,
        ImageListResponse, PersistPayload, StoredImage,
    },
    platform::{ClipboardImage, HeadlessPlatform, Platform, SharePayload},
    transport::{HttpResponse, HttpTransport, Transport},
};

pub use session::{ClientSession, CurrentImage};
pub use status::{StatusBoard, StatusKind, StatusMessage};

const SHARE_TITLE: &str = "AI-generated image";

/// Everything a finished generation produced.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub image: StoredImage,
    /// Duration reported by the generate endpoint, if any.
    pub duration_seconds: Option<f64>,
    /// Wall-clock time of the generate call as seen by the client.
    pub elapsed: Duration,
    /// Result of the gallery refresh that follows a successful generation.
    /// Its failure does not fail the generation.
    pub gallery: Result<Vec<StoredImage>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    /// The native share sheet was rejected or cancelled.
    NotCompleted(String),
    /// No native share: the share text was copied instead.
    LinkCopied,
}

/// Drives the validate → generate → persist pipeline against the service.
///
/// Mutating operations take `&mut self`, so one client can never run two
/// generations at once.
pub struct GenerationClient {
    transport: Arc<dyn Transport>,
    platform: Arc<dyn Platform>,
    config: ClientConfig,
    session: ClientSession,
    status: StatusBoard,
}

impl GenerationClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.clone())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            platform: Arc::new(HeadlessPlatform),
            config,
            session: ClientSession::new(),
            status: StatusBoard::new(),
        }
    }

    pub fn with_platform(mut self, platform: Arc<dyn Platform>) -> Self {
        self.platform = platform;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &ClientSession {
        &self.session
    }

    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusBoard {
        &mut self.status
    }

    pub fn image_url(&self, filename: &str) -> String {
        self.config.image_url(filename)
    }

    pub fn download_url(&self, filename: &str) -> String {
        self.config.download_url(filename)
    }

    /// Validates, generates, persists, then refreshes the gallery.
    ///
    /// The session's current image changes only when both remote calls succeed.
    pub async fn submit(
        &mut self,
        prompt: &str,
        width: Option<i64>,
        height: Option<i64>,
    ) -> Result<GenerationOutcome> {
        let result = self.run_pipeline(prompt, width, height).await;

        match &result {
            Ok(outcome) => {
                let seconds = outcome.duration_seconds.or(outcome.image.duration_seconds);
                self.status.success(format!(
                    "Image generated in {} seconds",
                    format_duration(seconds)
                ));
            }
            Err(ClientError::Validation(e)) => self.status.error(e.to_string()),
            Err(e) => self
                .status
                .error(format!("Generation failed: {}", e.user_message())),
        }

        result
    }

    /// Submits a stored record's prompt and dimensions again.
    pub async fn regenerate(&mut self, image: &StoredImage) -> Result<GenerationOutcome> {
        let width = image.width.map(i64::from);
        let height = image.height.map(i64::from);
        let prompt = image.prompt.clone();
        self.submit(&prompt, width, height).await
    }

    async fn run_pipeline(
        &mut self,
        prompt: &str,
        width: Option<i64>,
        height: Option<i64>,
    ) -> Result<GenerationOutcome> {
        let request = validation::validate_request(prompt, width, height)?;

        let pipeline_id = Uuid::new_v4().simple().to_string()[..8].to_string();
        log::info!(
            "[gen:{}] Generating {}x{} image",
            pipeline_id,
            request.width,
            request.height
        );
        log::debug!("[gen:{}] Prompt: {}", pipeline_id, request.prompt);

        let mut timer = logger::timer("generate");
        let generation = self.generate(&request).await?;
        let elapsed = timer.stop();

        let image = self.persist(&request, &generation).await?;
        log::info!("[gen:{}] Saved as {}", pipeline_id, image.filename);

        self.session
            .replace(generation.image_data.clone(), image.clone());

        let gallery = self.list().await;
        if let Err(e) = &gallery {
            log::warn!("[gen:{}] Gallery refresh failed: {}", pipeline_id, e);
        }

        Ok(GenerationOutcome {
            image,
            duration_seconds: generation.duration_seconds,
            elapsed,
            gallery,
        })
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let body = serde_json::to_value(request)
            .map_err(|e| ClientError::Transport(format!("Cannot encode request: {}", e)))?;
        let response = self
            .transport
            .post_json(&self.config.paths.generate, body)
            .await?;

        if !response.is_success() {
            return Err(service_error(&response));
        }

        let parsed: GenerateResponse = response.json()?;
        match parsed.image_data.filter(|data| !data.is_empty()) {
            Some(image_data) => Ok(GenerationResult {
                image_data,
                duration_seconds: parsed.duration_seconds,
            }),
            None => Err(ClientError::Service(
                parsed
                    .error
                    .unwrap_or_else(|| "The service did not return an image".to_string()),
            )),
        }
    }

    async fn persist(
        &self,
        request: &GenerationRequest,
        generation: &GenerationResult,
    ) -> Result<StoredImage> {
        let payload = PersistPayload {
            image_data: &generation.image_data,
            prompt: &request.prompt,
            width: request.width,
            height: request.height,
        };
        let body = serde_json::to_value(&payload)
            .map_err(|e| ClientError::Transport(format!("Cannot encode request: {}", e)))?;
        let response = self
            .transport
            .post_json(&self.config.paths.persist, body)
            .await?;

        let value: Value = match response.json() {
            Ok(value) => value,
            Err(_) if !response.is_success() => return Err(service_error(&response)),
            Err(e) => return Err(e),
        };

        let success = value.get("success").and_then(Value::as_bool).unwrap_or(false);
        if !success {
            let message = serde_json::from_value::<ErrorBody>(value)
                .ok()
                .and_then(ErrorBody::message)
                .unwrap_or_else(|| "Failed to save the image".to_string());
            return Err(ClientError::Service(message));
        }

        serde_json::from_value(value)
            .map_err(|e| ClientError::Transport(format!("Malformed save response: {}", e)))
    }

    /// All stored images, in the order the service returns them (newest first).
    pub async fn list(&self) -> Result<Vec<StoredImage>> {
        let response = self.transport.get(&self.config.paths.list).await?;
        if !response.is_success() {
            return Err(service_error(&response));
        }
        let listing: ImageListResponse = response.json()?;
        log::debug!("Gallery holds {} images", listing.images.len());
        Ok(listing.images)
    }

    pub async fn fetch_image(&self, filename: &str) -> Result<Vec<u8>> {
        let filename = validation::validate_filename(filename)?;
        let path = format!(
            "{}/{}",
            self.config.paths.image.trim_end_matches('/'),
            filename
        );
        let response = self.transport.get(&path).await?;
        if response.status == 404 {
            return Err(ClientError::Service(format!("Image not found: {}", filename)));
        }
        if !response.is_success() {
            return Err(service_error(&response));
        }
        Ok(response.body)
    }

    pub async fn download_image(&self, filename: &str) -> Result<DownloadedImage> {
        let filename = validation::validate_filename(filename)?;
        let path = format!(
            "{}/{}",
            self.config.paths.download.trim_end_matches('/'),
            filename
        );
        let response = self.transport.get(&path).await?;
        if response.status == 404 {
            return Err(ClientError::Service(format!("File not found: {}", filename)));
        }
        if !response.is_success() {
            return Err(service_error(&response));
        }

        let attachment = response
            .attachment_filename()
            .and_then(|name| validation::validate_filename(&name).ok().map(String::from));
        Ok(DownloadedImage {
            filename: attachment.unwrap_or_else(|| filename.to_string()),
            content_type: response.content_type,
            bytes: response.body,
        })
    }

    pub async fn copy_current_to_clipboard(&mut self) -> Result<()> {
        let result = self.copy_current().await;
        match &result {
            Ok(()) => self.status.success("Image copied to clipboard!"),
            Err(e) => self.status.error(e.user_message()),
        }
        result
    }

    async fn copy_current(&self) -> Result<()> {
        let current = self.session.current().ok_or_else(|| {
            ClientError::Clipboard("No image to copy".to_string())
        })?;
        let bytes = current
            .image_data
            .decode()
            .map_err(|e| ClientError::Clipboard(e.user_message()))?;

        self.platform
            .write_image(ClipboardImage::png(bytes))
            .await
            .map_err(|e| ClientError::Clipboard(format!("Failed to copy image: {}", e)))
    }

    pub async fn share_current(&mut self) -> Result<ShareOutcome> {
        let result = self.share().await;
        match &result {
            Ok(ShareOutcome::LinkCopied) => self.status.success("Link copied to clipboard!"),
            Ok(_) => {}
            Err(e) => self.status.error(e.user_message()),
        }
        result
    }

    async fn share(&self) -> Result<ShareOutcome> {
        let current = self
            .session
            .current()
            .ok_or_else(|| ClientError::Share("No image to share".to_string()))?;

        let prompt = current.metadata.prompt.trim();
        let prompt = if prompt.is_empty() { "Unknown prompt" } else { prompt };
        let payload = SharePayload {
            title: SHARE_TITLE.to_string(),
            text: format!("Check out this image created with AI: \"{}\"", prompt),
            url: self.config.page_url(),
        };

        if self.platform.supports_native_share() {
            return match self.platform.native_share(&payload).await {
                Ok(()) => Ok(ShareOutcome::Shared),
                Err(e) => {
                    log::warn!("Native share did not complete: {}", e);
                    Ok(ShareOutcome::NotCompleted(e.to_string()))
                }
            };
        }

        self.platform
            .write_text(&payload.fallback_text())
            .await
            .map_err(|e| ClientError::Share(format!("Failed to share image: {}", e)))?;
        Ok(ShareOutcome::LinkCopied)
    }
}

/// Server-supplied error message if the body has one, the HTTP status otherwise.
fn service_error(response: &HttpResponse) -> ClientError {
    let message = response
        .json::<ErrorBody>()
        .ok()
        .and_then(ErrorBody::message)
        .unwrap_or_else(|| format!("HTTP {}", response.status));
    ClientError::Service(message)
}
