//! Client for a self-hosted image generation service.
//!
//! [`GenerationClient`] validates a prompt and canvas size, asks the service to
//! generate an image, has it persisted, and keeps the result as the session's
//! current image for clipboard and share actions. The transport and the
//! clipboard/share surface are traits so any front end can drive it.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod logger;
pub mod models;
pub mod platform;
pub mod transport;

pub use client::{
    ClientSession, CurrentImage, GenerationClient, GenerationOutcome, ShareOutcome, StatusBoard,
    StatusKind, StatusMessage,
};
pub use config::{ClientConfig, EndpointPaths};
pub use error::{ClientError, PlatformError, Result, ValidationError};
pub use format::{format_byte_size, round_to_multiple, truncate, SizeInfo};
pub use models::{DownloadedImage, EncodedImage, GenerationRequest, GenerationResult, StoredImage};
pub use platform::{ClipboardImage, ConsolePlatform, HeadlessPlatform, Platform, SharePayload};
pub use transport::{HttpResponse, HttpTransport, Transport};
