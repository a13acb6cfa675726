use std::sync::Arc;

use care_ai::SpeechClient;
use care_common::error::{CareError, CareResult};
use care_config::ScoringSettings;
use care_db::analysis::repositories::AnalysisRepository;
use care_scoring::{analyze_conversation, ConversationAnalysis, RandomJitter, ScoringConfig};

/// Validates analysis requests, scores them and records the result in the
/// agent's history.
#[derive(Clone)]
pub struct AnalysisService {
    repo: Arc<dyn AnalysisRepository>,
    config: Arc<ScoringConfig>,
    settings: ScoringSettings,
    speech: Option<SpeechClient>,
}

impl AnalysisService {
    pub fn new(
        repo: Arc<dyn AnalysisRepository>,
        config: ScoringConfig,
        settings: ScoringSettings,
    ) -> Self {
        Self {
            repo,
            config: Arc::new(config),
            settings,
            speech: None,
        }
    }

    /// Enable recorded-call analysis through a speech-to-text collaborator.
    pub fn with_speech(mut self, speech: Option<SpeechClient>) -> Self {
        self.speech = speech;
        self
    }

    pub fn transcribes_audio(&self) -> bool {
        self.speech.is_some()
    }

    /// Transcribe a WAV recording, then analyze it like a typed transcript.
    pub async fn analyze_recording(
        &self,
        audio: &[u8],
        agent_id: &str,
        lead_name: Option<&str>,
    ) -> CareResult<ConversationAnalysis> {
        if audio.is_empty() {
            return Err(CareError::InvalidInput(
                "audio body must not be empty".to_string(),
            ));
        }
        let speech = self.speech.as_ref().ok_or_else(|| {
            CareError::Unavailable("speech-to-text is not configured".to_string())
        })?;

        let transcript = speech.speech_to_text(audio).await?;
        tracing::debug!(agent_id, chars = transcript.len(), "recording transcribed");

        self.analyze(&transcript, agent_id, lead_name).await
    }

    pub async fn analyze(
        &self,
        transcript: &str,
        agent_id: &str,
        lead_name: Option<&str>,
    ) -> CareResult<ConversationAnalysis> {
        if transcript.trim().is_empty() {
            return Err(CareError::InvalidInput(
                "transcript must not be empty".to_string(),
            ));
        }

        let delay = self.settings.analysis_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let analysis = self.score(transcript, agent_id, lead_name);

        tracing::info!(
            agent_id,
            analysis_id = %analysis.id,
            total = analysis.care_score.total,
            "conversation analyzed"
        );

        self.repo.append(analysis).await
    }

    fn score(
        &self,
        transcript: &str,
        agent_id: &str,
        lead_name: Option<&str>,
    ) -> ConversationAnalysis {
        match self.settings.seed {
            Some(seed) => analyze_conversation(
                &self.config,
                transcript,
                agent_id,
                lead_name,
                &mut RandomJitter::seeded(seed),
            ),
            None => analyze_conversation(
                &self.config,
                transcript,
                agent_id,
                lead_name,
                &mut RandomJitter::from_entropy(),
            ),
        }
    }
}
