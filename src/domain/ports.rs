use super::payload::{SubmissionReceipt, SubmissionRequest, TokenRequest, TokenResponse};
use crate::error::ClientError;
use async_trait::async_trait;

/// Obtains the access token and problem payload.
#[async_trait]
pub trait TokenClient: Send + Sync {
    async fn generate_webhook(
        &self,
        request: &TokenRequest,
    ) -> Result<TokenResponse, ClientError>;
}

/// Delivers the computed outcome to the webhook named by the token response.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    async fn submit(
        &self,
        webhook: &str,
        access_token: &str,
        request: &SubmissionRequest,
    ) -> Result<SubmissionReceipt, ClientError>;
}

pub type TokenClientBox = Box<dyn TokenClient>;
pub type SubmissionClientBox = Box<dyn SubmissionClient>;
