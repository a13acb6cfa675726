use care_common::error::CareError;
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AiClientError {
    #[error("HTTP {status}: {body}")]
    HttpError { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<AiClientError> for CareError {
    fn from(err: AiClientError) -> Self {
        CareError::AnalysisFailed(err.to_string())
    }
}
