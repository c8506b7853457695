use super::retry::RetryPolicy;
use crate::domain::graph::Outcome;
use crate::domain::payload::Registrant;
use crate::domain::ports::{SubmissionClientBox, TokenClientBox};
use crate::domain::solver;
use crate::error::{Result, WorkflowError};
use std::fmt;
use tracing::{error, info};

/// Position of a run in `Idle -> AcquiringToken -> Solving -> Submitting -> Submitted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    Idle,
    AcquiringToken,
    TokenFailed,
    Solving,
    Submitting,
    SubmitFailed,
    Submitted,
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::AcquiringToken => "acquiring_token",
            Self::TokenFailed => "token_failed",
            Self::Solving => "solving",
            Self::Submitting => "submitting",
            Self::SubmitFailed => "submit_failed",
            Self::Submitted => "submitted",
        };
        f.write_str(name)
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    pub stage: WorkflowStage,
    pub outcome: Outcome,
    pub token_attempts: u32,
    pub submission_attempts: u32,
    pub status: u16,
}

/// One linear pass: fetch the token and graph, solve, submit.
///
/// Both network collaborators are injected so the run can be driven against fakes.
/// Each call to [`WebhookWorkflow::run`] is independent; nothing carries over between runs.
pub struct WebhookWorkflow {
    token_client: TokenClientBox,
    submission_client: SubmissionClientBox,
    registrant: Registrant,
    token_retry: RetryPolicy,
    submission_retry: RetryPolicy,
}

impl WebhookWorkflow {
    pub fn new(
        token_client: TokenClientBox,
        submission_client: SubmissionClientBox,
        registrant: Registrant,
    ) -> Self {
        Self {
            token_client,
            submission_client,
            registrant,
            token_retry: RetryPolicy::token_default(),
            submission_retry: RetryPolicy::submission_default(),
        }
    }

    pub fn with_token_retry(mut self, policy: RetryPolicy) -> Self {
        self.token_retry = policy;
        self
    }

    pub fn with_submission_retry(mut self, policy: RetryPolicy) -> Self {
        self.submission_retry = policy;
        self
    }

    pub async fn run(&self) -> Result<WorkflowReport> {
        let mut stage = WorkflowStage::Idle;
        transition(&mut stage, WorkflowStage::AcquiringToken);

        let token_request = self.registrant.token_request();
        let (response, token_attempts) = match self
            .token_retry
            .run("generate_webhook", || {
                self.token_client.generate_webhook(&token_request)
            })
            .await
        {
            Ok(done) => done,
            Err(failure) => {
                transition(&mut stage, WorkflowStage::TokenFailed);
                error!(
                    attempts = failure.attempts,
                    error = %failure.error,
                    "could not obtain access token"
                );
                return Err(WorkflowError::TokenAcquisition {
                    attempts: failure.attempts,
                    source: failure.error,
                });
            }
        };
        info!(
            token = %mask(&response.access_token),
            webhook = %response.webhook,
            attempts = token_attempts,
            "access token acquired"
        );

        transition(&mut stage, WorkflowStage::Solving);
        let outcome = solver::solve(&response.data);
        info!(
            find_id = response.data.find_id,
            n = response.data.n,
            users = response.data.users.len(),
            %outcome,
            "solution computed"
        );

        transition(&mut stage, WorkflowStage::Submitting);
        let submission = self.registrant.submission_request(outcome.clone());
        let (receipt, submission_attempts) = match self
            .submission_retry
            .run("submit_solution", || {
                self.submission_client
                    .submit(&response.webhook, &response.access_token, &submission)
            })
            .await
        {
            Ok(done) => done,
            Err(failure) => {
                transition(&mut stage, WorkflowStage::SubmitFailed);
                error!(
                    attempts = failure.attempts,
                    error = %failure.error,
                    "could not submit solution"
                );
                return Err(WorkflowError::Submission {
                    attempts: failure.attempts,
                    source: failure.error,
                });
            }
        };

        transition(&mut stage, WorkflowStage::Submitted);
        info!(
            status = receipt.status,
            attempts = submission_attempts,
            "solution submitted"
        );

        Ok(WorkflowReport {
            stage,
            outcome,
            token_attempts,
            submission_attempts,
            status: receipt.status,
        })
    }
}

impl WorkflowError {
    /// The terminal stage a failed run stopped in.
    pub fn stage(&self) -> WorkflowStage {
        match self {
            Self::TokenAcquisition { .. } => WorkflowStage::TokenFailed,
            Self::Submission { .. } => WorkflowStage::SubmitFailed,
            Self::Config(_) => WorkflowStage::Idle,
        }
    }
}

fn transition(stage: &mut WorkflowStage, next: WorkflowStage) {
    tracing::debug!(from = %stage, to = %next, "workflow transition");
    *stage = next;
}

/// Keeps the first few characters of a secret for log correlation.
fn mask(secret: &str) -> String {
    let prefix: String = secret.chars().take(6).collect();
    format!("{prefix}***")
}
