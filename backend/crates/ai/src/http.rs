use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};

use crate::error::AiClientError;

const MAX_BACKOFF: Duration = Duration::from_secs(30);
const MAX_RETRY_AFTER_SECS: u64 = 60;

#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base: Duration,
}

impl RetryPolicy {
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        std::cmp::min(self.backoff_base.saturating_mul(factor), MAX_BACKOFF)
    }
}

/// Send a request, retrying timeouts, connection errors, 429 and 5xx.
///
/// `build` is called once per attempt since request bodies are consumed on send.
pub(crate) async fn send_with_retry<F>(
    policy: RetryPolicy,
    mut build: F,
) -> Result<Response, AiClientError>
where
    F: FnMut() -> RequestBuilder,
{
    let mut last_error = String::new();

    for attempt in 0..=policy.max_retries {
        if attempt > 0 {
            let backoff = policy.backoff(attempt);
            tracing::warn!(attempt, backoff_ms = backoff.as_millis() as u64, "retrying after backoff");
            tokio::time::sleep(backoff).await;
        }

        let response = match build().send().await {
            Ok(resp) => resp,
            Err(e) => {
                last_error = e.to_string();
                if e.is_timeout() || e.is_connect() {
                    continue;
                }
                return Err(AiClientError::RequestError(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Honor Retry-After header for 429
        if status == StatusCode::TOO_MANY_REQUESTS {
            if let Some(retry_after) = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
            {
                let wait = std::cmp::min(retry_after, MAX_RETRY_AFTER_SECS);
                tracing::warn!(wait, "rate-limited, waiting Retry-After");
                tokio::time::sleep(Duration::from_secs(wait)).await;
            }
            last_error = "429 Too Many Requests".to_string();
            continue;
        }

        if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            last_error = format!("{status}: {body}");
            continue;
        }

        // Fail fast on remaining 4xx
        let body = response.text().await.unwrap_or_default();
        return Err(AiClientError::HttpError { status, body });
    }

    Err(AiClientError::MaxRetriesExceeded {
        attempts: policy.max_retries + 1,
        last_error,
    })
}
