use crate::{
    config::ClientConfig,
    error::{ClientError, Result},
    transport::traits::{HttpResponse, Transport},
};
use async_trait::async_trait;
use reqwest::{header, Client, Url};

/// `Transport` over a real HTTP connection.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            ClientError::Config(format!("Invalid base URL {:?}: {}", config.base_url, e))
        })?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let header_value = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };
        let content_type = header_value(header::CONTENT_TYPE);
        let content_disposition = header_value(header::CONTENT_DISPOSITION);

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(format!("Failed to read response body: {}", e)))?;

        Ok(HttpResponse {
            status,
            content_type,
            content_disposition,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<HttpResponse> {
        let url = self.config.url(path);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("GET {} failed: {}", url, e)))?;

        Self::read(response).await
    }

    async fn post_json(&self, path: &str, body: serde_json::Value) -> Result<HttpResponse> {
        let url = self.config.url(path);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("POST {} failed: {}", url, e)))?;

        Self::read(response).await
    }
}
