use crate::domain::payload::{SubmissionReceipt, SubmissionRequest, TokenRequest, TokenResponse};
use crate::domain::ports::{SubmissionClient, TokenClient};
use crate::error::ClientError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A token client that replays scripted results in order.
///
/// Once the script runs out every further call fails with a transport error.
/// Clones share the same script and call log.
#[derive(Default, Clone)]
pub struct ScriptedTokenClient {
    script: Arc<Mutex<VecDeque<Result<TokenResponse, ClientError>>>>,
    requests: Arc<Mutex<Vec<TokenRequest>>>,
}

impl ScriptedTokenClient {
    pub fn new(script: Vec<Result<TokenResponse, ClientError>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            requests: Arc::default(),
        }
    }

    /// Every request received so far.
    pub async fn requests(&self) -> Vec<TokenRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl TokenClient for ScriptedTokenClient {
    async fn generate_webhook(
        &self,
        request: &TokenRequest,
    ) -> Result<TokenResponse, ClientError> {
        self.requests.lock().await.push(request.clone());
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("token script exhausted".into())))
    }
}

/// One recorded call to [`ScriptedSubmissionClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionCall {
    pub webhook: String,
    pub access_token: String,
    pub request: SubmissionRequest,
}

/// A submission client that answers with scripted status codes or errors.
#[derive(Default, Clone)]
pub struct ScriptedSubmissionClient {
    script: Arc<Mutex<VecDeque<Result<u16, ClientError>>>>,
    calls: Arc<Mutex<Vec<SubmissionCall>>>,
}

impl ScriptedSubmissionClient {
    pub fn new(script: Vec<Result<u16, ClientError>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            calls: Arc::default(),
        }
    }

    pub async fn calls(&self) -> Vec<SubmissionCall> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl SubmissionClient for ScriptedSubmissionClient {
    async fn submit(
        &self,
        webhook: &str,
        access_token: &str,
        request: &SubmissionRequest,
    ) -> Result<SubmissionReceipt, ClientError> {
        self.calls.lock().await.push(SubmissionCall {
            webhook: webhook.to_string(),
            access_token: access_token.to_string(),
            request: request.clone(),
        });
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("submission script exhausted".into())))
            .map(|status| SubmissionReceipt { status })
    }
}
