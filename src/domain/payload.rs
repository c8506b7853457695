use super::graph::{GraphSnapshot, Outcome};
use serde::{Deserialize, Serialize};

/// Identity sent with both remote calls. Values come from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registrant {
    pub name: String,
    pub reg_no: String,
    pub email: String,
}

impl Registrant {
    pub fn new(
        name: impl Into<String>,
        reg_no: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            reg_no: reg_no.into(),
            email: email.into(),
        }
    }

    pub fn token_request(&self) -> TokenRequest {
        TokenRequest {
            name: self.name.clone(),
            reg_no: self.reg_no.clone(),
            email: self.email.clone(),
        }
    }

    pub fn submission_request(&self, outcome: Outcome) -> SubmissionRequest {
        SubmissionRequest {
            reg_no: self.reg_no.clone(),
            outcome,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    pub name: String,
    pub reg_no: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub data: GraphSnapshot,
    pub webhook: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub reg_no: String,
    pub outcome: Outcome,
}

/// What the workflow keeps from a successful submission. The body is not read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub status: u16,
}
