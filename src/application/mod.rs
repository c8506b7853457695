//! Application layer orchestrating one webhook run.
//!
//! `WebhookWorkflow` chains token acquisition, solving and submission strictly in sequence.
//! The two network stages are wrapped by separate `RetryPolicy` values: any failure is
//! retried for the token call, only rate limiting for the submission.

pub mod retry;
pub mod workflow;
