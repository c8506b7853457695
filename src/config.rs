use crate::application::retry::RetryPolicy;
use crate::domain::payload::Registrant;
use crate::error::{Result, WorkflowError};
use clap::Parser;
use std::time::Duration;
use url::Url;

/// Runs the webhook workflow once: fetch token and graph, solve, submit.
///
/// Every option can also be supplied through its environment variable, so a bare
/// invocation with the environment set starts the run immediately.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the token service
    #[arg(long, env = "WEBHOOK_BASE_URL")]
    pub base_url: String,

    /// Name sent in the token request
    #[arg(long, env = "WEBHOOK_NAME")]
    pub name: String,

    /// Registration number sent with both requests
    #[arg(long, env = "WEBHOOK_REG_NO")]
    pub reg_no: String,

    /// Email sent in the token request
    #[arg(long, env = "WEBHOOK_EMAIL")]
    pub email: String,

    /// Per-request transport timeout in seconds
    #[arg(long, env = "WEBHOOK_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Attempts for the token request
    #[arg(long, default_value_t = 3)]
    pub token_attempts: u32,

    /// Delay before the first token retry, doubled on each further retry
    #[arg(long, default_value_t = 1000)]
    pub token_delay_ms: u64,

    /// Attempts for the submission when rate limited
    #[arg(long, default_value_t = 5)]
    pub submit_attempts: u32,

    /// Base backoff for rate-limited submissions
    #[arg(long, default_value_t = 1000)]
    pub submit_base_delay_ms: u64,

    /// Upper bound for the submission backoff
    #[arg(long, default_value_t = 10_000)]
    pub submit_max_delay_ms: u64,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "WEBHOOK_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Validated settings derived from [`Cli`].
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub base_url: Url,
    pub registrant: Registrant,
    pub timeout: Duration,
    pub token_retry: RetryPolicy,
    pub submission_retry: RetryPolicy,
}

impl TryFrom<Cli> for WorkflowConfig {
    type Error = WorkflowError;

    fn try_from(cli: Cli) -> Result<Self> {
        let base_url = Url::parse(&cli.base_url).map_err(|e| {
            WorkflowError::Config(format!("invalid base url {:?}: {e}", cli.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(WorkflowError::Config(format!(
                "base url {:?} cannot be used as a base",
                cli.base_url
            )));
        }
        if cli.reg_no.trim().is_empty() {
            return Err(WorkflowError::Config(
                "registration number must not be empty".into(),
            ));
        }

        let token_retry = RetryPolicy::token_default()
            .with_max_attempts(cli.token_attempts)
            .with_initial_delay(Duration::from_millis(cli.token_delay_ms));
        let submission_retry = RetryPolicy::submission_default()
            .with_max_attempts(cli.submit_attempts)
            .with_initial_delay(Duration::from_millis(cli.submit_base_delay_ms))
            .with_max_delay(Some(Duration::from_millis(cli.submit_max_delay_ms)));

        Ok(Self {
            base_url,
            registrant: Registrant::new(cli.name, cli.reg_no, cli.email),
            timeout: Duration::from_secs(cli.timeout_secs),
            token_retry,
            submission_retry,
        })
    }
}
