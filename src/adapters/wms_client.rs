use crate::domain::model::WmsImage;
use crate::domain::ports::WmsClient;
use crate::utils::error::{OerebError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

pub struct HttpWmsClient {
    client: Client,
}

impl HttpWmsClient {
    pub fn new(timeout_seconds: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl WmsClient for HttpWmsClient {
    async fn fetch(&self, url: &str) -> Result<WmsImage> {
        tracing::debug!("Making WMS request to: {}", url);
        let response = self.client.get(url).send().await?;
        tracing::debug!("WMS response status: {}", response.status());

        if !response.status().is_success() {
            return Err(OerebError::WmsDownloadError {
                url: url.to_string(),
                message: format!("status {}", response.status()),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("image/") {
            return Err(OerebError::WmsDownloadError {
                url: url.to_string(),
                message: format!("expected an image, got content type '{}'", content_type),
            });
        }

        let content = response.bytes().await?.to_vec();
        Ok(WmsImage {
            content_type,
            content,
        })
    }
}
