use crate::domain::payload::{SubmissionReceipt, SubmissionRequest, TokenRequest, TokenResponse};
use crate::domain::ports::{SubmissionClient, TokenClient};
use crate::error::ClientError;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Response, StatusCode};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Token endpoint, relative to the base URL path.
pub const GENERATE_WEBHOOK_PATH: &str = "hiring/generateWebhook";

/// reqwest-backed implementation of both network ports.
#[derive(Clone, Debug)]
pub struct HttpWebhookClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpWebhookClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Appends `path` under the base URL, keeping any path prefix the base carries.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let prefixed = format!("{}/", base.path());
            base.set_path(&prefixed);
        }
        Ok(base.join(path.trim_start_matches('/'))?)
    }

    /// Absolute webhook URLs are used as-is; relative ones hang off the base URL.
    pub fn resolve(&self, target: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(target)?)
    }
}

/// Maps a non-2xx response onto the tagged error, keeping 429 distinct.
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::TOO_MANY_REQUESTS {
        Err(ClientError::RateLimited { body })
    } else {
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl TokenClient for HttpWebhookClient {
    async fn generate_webhook(
        &self,
        request: &TokenRequest,
    ) -> Result<TokenResponse, ClientError> {
        let url = self.endpoint(GENERATE_WEBHOOK_PATH)?;
        debug!(%url, "requesting webhook token");

        let response = self.client.post(url).json(request).send().await?;
        let response = check_status(response).await?;

        let bytes = response.bytes().await?;
        let token = serde_json::from_slice::<TokenResponse>(&bytes)
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        info!("webhook token generated");
        Ok(token)
    }
}

#[async_trait]
impl SubmissionClient for HttpWebhookClient {
    async fn submit(
        &self,
        webhook: &str,
        access_token: &str,
        request: &SubmissionRequest,
    ) -> Result<SubmissionReceipt, ClientError> {
        let url = self.resolve(webhook)?;
        debug!(%url, "submitting solution");

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, access_token)
            .json(request)
            .send()
            .await?;
        let response = check_status(response).await?;

        Ok(SubmissionReceipt {
            status: response.status().as_u16(),
        })
    }
}
