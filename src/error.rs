use thiserror::Error;

/// Failure of a single remote call, tagged by the class of failure.
///
/// The submission retry filter branches on [`ClientError::RateLimited`]; every other
/// variant is treated as a plain failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("rate limited (429 Too Many Requests): {body}")]
    RateLimited { body: String },
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("token acquisition failed after {attempts} attempt(s): {source}")]
    TokenAcquisition {
        attempts: u32,
        #[source]
        source: ClientError,
    },
    #[error("submission failed after {attempts} attempt(s): {source}")]
    Submission {
        attempts: u32,
        #[source]
        source: ClientError,
    },
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
