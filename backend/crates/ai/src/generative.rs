use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AiClientError;
use crate::http::{send_with_retry, RetryPolicy};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-pro";

#[derive(Debug, Clone)]
pub struct GenerativeClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_retries: u32,
    pub timeout_secs: u64,
    pub retry_backoff_ms: u64,
}

impl GenerativeClientConfig {
    /// Returns `None` when `GOOGLE_AI_API_KEY` is unset or blank.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GOOGLE_AI_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())?;
        let base_url = std::env::var("GOOGLE_AI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model =
            std::env::var("GOOGLE_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let temperature = std::env::var("GOOGLE_AI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0.7);
        let max_retries = std::env::var("AI_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);
        let timeout_secs = std::env::var("AI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Some(Self {
            base_url,
            api_key,
            model,
            temperature,
            max_retries,
            timeout_secs,
            retry_backoff_ms: 1000,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Text-generation client for the Gemini `generateContent` API.
#[derive(Clone)]
pub struct GenerativeClient {
    client: Client,
    config: GenerativeClientConfig,
}

impl GenerativeClient {
    pub fn new(config: GenerativeClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Generate a free-text answer, optionally grounded in a context block.
    pub async fn generate(
        &self,
        message: &str,
        context: Option<&str>,
    ) -> Result<String, AiClientError> {
        let prompt = match context {
            Some(ctx) if !ctx.trim().is_empty() => {
                format!("Context: {ctx}\n\nUser question: {message}")
            }
            _ => message.to_string(),
        };
        self.complete(&prompt).await
    }

    /// Ask for an analysis of a JSON data payload.
    pub async fn analyze_data(&self, data: &Value, query: &str) -> Result<String, AiClientError> {
        let pretty = serde_json::to_string_pretty(data)
            .map_err(|e| AiClientError::InvalidResponse(e.to_string()))?;
        let prompt = format!(
            "Analyze the following data and answer the question.\n\n\
             Data:\n{pretty}\n\n\
             Question: {query}\n\n\
             Provide a detailed analysis with actionable insights."
        );
        self.complete(&prompt).await
    }

    async fn complete(&self, prompt: &str) -> Result<String, AiClientError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
            },
        };

        tracing::debug!(model = %self.config.model, prompt_len = prompt.len(), "generateContent");

        let response = send_with_retry(self.policy(), || {
            self.client
                .post(&url)
                .header("x-goog-api-key", &self.config.api_key)
                .json(&body)
        })
        .await?;

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AiClientError::InvalidResponse(e.to_string()))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AiClientError::InvalidResponse(
                "response contained no text".to_string(),
            ));
        }
        Ok(text)
    }

    fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.config.max_retries,
            backoff_base: Duration::from_millis(self.config.retry_backoff_ms),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_config(base_url: &str) -> GenerativeClientConfig {
    GenerativeClientConfig {
        base_url: base_url.to_string(),
        api_key: "test-key".to_string(),
        model: DEFAULT_MODEL.to_string(),
        temperature: 0.7,
        max_retries: 2,
        timeout_secs: 5,
        retry_backoff_ms: 1,
    }
}
