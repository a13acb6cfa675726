use std::fmt;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::AiClientError;
use crate::http::{send_with_retry, RetryPolicy};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Voices offered by the speech synthesis endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    Alloy,
    Echo,
    Fable,
    Onyx,
    #[default]
    Nova,
    Shimmer,
}

impl Voice {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alloy => "alloy",
            Self::Echo => "echo",
            Self::Fable => "fable",
            Self::Onyx => "onyx",
            Self::Nova => "nova",
            Self::Shimmer => "shimmer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alloy" => Some(Self::Alloy),
            "echo" => Some(Self::Echo),
            "fable" => Some(Self::Fable),
            "onyx" => Some(Self::Onyx),
            "nova" => Some(Self::Nova),
            "shimmer" => Some(Self::Shimmer),
            _ => None,
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SpeechClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub tts_model: String,
    pub default_voice: Voice,
    pub stt_model: String,
    pub stt_language: String,
    pub max_retries: u32,
    pub timeout_secs: u64,
    pub retry_backoff_ms: u64,
}

impl SpeechClientConfig {
    /// Returns `None` when `OPENAI_API_KEY` is unset or blank.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())?;
        let var_or = |key: &str, default: &str| {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };
        let default_voice = std::env::var("OPENAI_TTS_VOICE")
            .ok()
            .and_then(|v| Voice::parse(&v))
            .unwrap_or_default();
        let max_retries = std::env::var("AI_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);
        let timeout_secs = std::env::var("AI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Some(Self {
            base_url: var_or("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            api_key,
            tts_model: var_or("OPENAI_TTS_MODEL", "tts-1"),
            default_voice,
            stt_model: var_or("OPENAI_STT_MODEL", "whisper-1"),
            stt_language: var_or("OPENAI_STT_LANGUAGE", "pt"),
            max_retries,
            timeout_secs,
            retry_backoff_ms: 1000,
        })
    }
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: Voice,
    response_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Speech synthesis and transcription client.
#[derive(Clone)]
pub struct SpeechClient {
    client: Client,
    config: SpeechClientConfig,
}

impl SpeechClient {
    pub fn new(config: SpeechClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn default_voice(&self) -> Voice {
        self.config.default_voice
    }

    /// Synthesize `text` into MP3 bytes.
    pub async fn text_to_speech(&self, text: &str, voice: Voice) -> Result<Vec<u8>, AiClientError> {
        let url = self.url("/v1/audio/speech");
        let body = SpeechRequest {
            model: &self.config.tts_model,
            input: text,
            voice,
            response_format: "mp3",
        };

        let response = send_with_retry(self.policy(), || {
            self.client
                .post(&url)
                .bearer_auth(&self.config.api_key)
                .json(&body)
        })
        .await?;

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(AiClientError::InvalidResponse("empty audio body".to_string()));
        }
        tracing::debug!(voice = %voice, bytes = bytes.len(), "speech synthesized");
        Ok(bytes.to_vec())
    }

    /// Transcribe a WAV recording.
    pub async fn speech_to_text(&self, audio: &[u8]) -> Result<String, AiClientError> {
        let url = self.url("/v1/audio/transcriptions");

        let response = send_with_retry(self.policy(), || {
            let file = Part::bytes(audio.to_vec())
                .file_name("audio.wav")
                .mime_str("audio/wav")
                .unwrap_or_else(|_| Part::bytes(audio.to_vec()).file_name("audio.wav"));
            let form = Form::new()
                .part("file", file)
                .text("model", self.config.stt_model.clone())
                .text("language", self.config.stt_language.clone());
            self.client
                .post(&url)
                .bearer_auth(&self.config.api_key)
                .multipart(form)
        })
        .await?;

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| AiClientError::InvalidResponse(e.to_string()))?;
        Ok(parsed.text)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.config.max_retries,
            backoff_base: Duration::from_millis(self.config.retry_backoff_ms),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_config(base_url: &str) -> SpeechClientConfig {
    SpeechClientConfig {
        base_url: base_url.to_string(),
        api_key: "sk-test".to_string(),
        tts_model: "tts-1".to_string(),
        default_voice: Voice::Nova,
        stt_model: "whisper-1".to_string(),
        stt_language: "pt".to_string(),
        max_retries: 2,
        timeout_secs: 5,
        retry_backoff_ms: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> SpeechClient {
        SpeechClient::new(test_config(&server.uri())).unwrap()
    }

    #[test]
    fn voice_parse_is_case_insensitive() {
        assert_eq!(Voice::parse("NOVA"), Some(Voice::Nova));
        assert_eq!(Voice::parse(" shimmer "), Some(Voice::Shimmer));
        assert_eq!(Voice::parse("robot"), None);
        assert_eq!(Voice::default(), Voice::Nova);
    }

    #[tokio::test]
    async fn text_to_speech_returns_audio_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/audio/speech"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_json(json!({
                "model": "tts-1",
                "input": "Critical alert",
                "voice": "nova",
                "response_format": "mp3"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(vec![0x49, 0x44, 0x33, 0x04]),
            )
            .expect(1)
            .mount(&server)
            .await;

        let audio = client(&server)
            .text_to_speech("Critical alert", Voice::Nova)
            .await
            .unwrap();
        assert_eq!(audio, vec![0x49, 0x44, 0x33, 0x04]);
    }

    #[tokio::test]
    async fn text_to_speech_rejects_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/audio/speech"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let err = client(&server)
            .text_to_speech("hello", Voice::Echo)
            .await
            .unwrap_err();
        assert!(matches!(err, AiClientError::InvalidResponse(_)), "{err}");
    }

    #[tokio::test]
    async fn speech_to_text_posts_multipart_and_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/audio/transcriptions"))
            .and(body_string_contains("whisper-1"))
            .and(body_string_contains("audio.wav"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "olá" })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server)
            .speech_to_text(b"RIFF0000WAVE")
            .await
            .unwrap();
        assert_eq!(text, "olá");
    }
}
