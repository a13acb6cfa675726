use thiserror::Error;

#[derive(Debug, Error)]
pub enum CareError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An external AI collaborator failed (timeout, HTTP error, quota, bad body).
    #[error("analysis failed: {0}")]
    AnalysisFailed(String),

    /// A collaborator needed by the request is not configured.
    #[error("unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type CareResult<T> = Result<T, CareError>;
