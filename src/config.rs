use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8083";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Routes exposed by the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPaths {
    pub generate: String,
    pub persist: String,
    pub list: String,
    /// Prefix of the stored-image route; the filename is appended as one path segment.
    pub image: String,
    /// Prefix of the attachment download route.
    pub download: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        EndpointPaths {
            generate: "/generate".to_string(),
            persist: "/save_image".to_string(),
            list: "/images".to_string(),
            image: "/generated_images".to_string(),
            download: "/download".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub paths: EndpointPaths,
    pub timeout: Option<Duration>,
    pub page_url: Option<String>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            paths: EndpointPaths::default(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            page_url: None,
            user_agent: format!("genstudio/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let mut config = ClientConfig::default();

        if let Ok(base_url) = env::var("GENSTUDIO_BASE_URL") {
            if !base_url.trim().is_empty() {
                config.base_url = base_url.trim().to_string();
            }
        }
        if let Some(secs) = env::var("GENSTUDIO_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            // 0 disables the timeout
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        config.page_url = env::var("GENSTUDIO_PAGE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn with_page_url(mut self, page_url: impl Into<String>) -> Self {
        self.page_url = Some(page_url.into());
        self
    }

    pub fn with_generate_path(mut self, path: impl Into<String>) -> Self {
        self.paths.generate = path.into();
        self
    }

    pub fn with_persist_path(mut self, path: impl Into<String>) -> Self {
        self.paths.persist = path.into();
        self
    }

    pub fn with_list_path(mut self, path: impl Into<String>) -> Self {
        self.paths.list = path.into();
        self
    }

    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.paths.image = path.into();
        self
    }

    pub fn with_download_path(mut self, path: impl Into<String>) -> Self {
        self.paths.download = path.into();
        self
    }

    /// Address shared alongside an image; falls back to the service root.
    pub fn page_url(&self) -> String {
        match &self.page_url {
            Some(url) => url.clone(),
            None => format!("{}/", self.base_url.trim_end_matches('/')),
        }
    }

    /// Joins `path` onto the base URL without doubling slashes.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn image_url(&self, filename: &str) -> String {
        self.url(&format!(
            "{}/{}",
            self.paths.image.trim_end_matches('/'),
            filename
        ))
    }

    pub fn download_url(&self, filename: &str) -> String {
        self.url(&format!(
            "{}/{}",
            self.paths.download.trim_end_matches('/'),
            filename
        ))
    }
}
