use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ScoringConfig;
use crate::engine::score_with_trace;
use crate::insights::{derive_insights, Insights};
use crate::jitter::Jitter;
use crate::pillar::CareScore;

pub const ANONYMOUS_LEAD: &str = "Anonymous Lead";

/// One scored conversation. Created once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationAnalysis {
    pub id: Uuid,
    pub agent_id: String,
    pub lead_name: String,
    pub transcription: String,
    pub care_score: CareScore,
    pub insights: Insights,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Score a transcript and wrap the result in a fresh [`ConversationAnalysis`].
///
/// Performs no validation; callers reject blank transcripts beforehand.
pub fn analyze_conversation(
    config: &ScoringConfig,
    transcript: &str,
    agent_id: &str,
    lead_name: Option<&str>,
    jitter: &mut dyn Jitter,
) -> ConversationAnalysis {
    let trace = score_with_trace(config, transcript, jitter);
    let insights = derive_insights(transcript, &trace.score, &config.thresholds);

    tracing::debug!(
        agent_id,
        total = trace.score.total,
        pillars = ?trace.pillars,
        "conversation scored"
    );

    let lead_name = lead_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(ANONYMOUS_LEAD);

    let now = Utc::now();
    ConversationAnalysis {
        id: Uuid::new_v4(),
        agent_id: agent_id.to_string(),
        lead_name: lead_name.to_string(),
        transcription: transcript.to_string(),
        care_score: trace.score,
        insights,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::{FixedJitter, RandomJitter};
    use std::collections::HashSet;

    #[test]
    fn timestamps_are_equal_at_creation() {
        let cfg = ScoringConfig::default();
        let analysis =
            analyze_conversation(&cfg, "olá, bom dia", "agent-1", None, &mut FixedJitter(1.0));
        assert_eq!(analysis.created_at, analysis.updated_at);
    }

    #[test]
    fn ids_are_unique_across_calls() {
        let cfg = ScoringConfig::default();
        let mut jitter = RandomJitter::seeded(1);
        let ids: HashSet<Uuid> = (0..100)
            .map(|_| analyze_conversation(&cfg, "olá", "agent-1", None, &mut jitter).id)
            .collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn missing_or_blank_lead_name_uses_sentinel() {
        let cfg = ScoringConfig::default();
        let mut jitter = FixedJitter(1.0);
        let a = analyze_conversation(&cfg, "olá", "agent-1", None, &mut jitter);
        let b = analyze_conversation(&cfg, "olá", "agent-1", Some("   "), &mut jitter);
        let c = analyze_conversation(&cfg, "olá", "agent-1", Some(" Maria "), &mut jitter);
        assert_eq!(a.lead_name, ANONYMOUS_LEAD);
        assert_eq!(b.lead_name, ANONYMOUS_LEAD);
        assert_eq!(c.lead_name, "Maria");
    }

    #[test]
    fn analysis_carries_transcript_score_and_insights() {
        let cfg = ScoringConfig::default();
        let transcript = "Olá! Qual seu objetivo? Vamos agendar amanhã?";
        let analysis =
            analyze_conversation(&cfg, transcript, "agent-7", Some("João"), &mut FixedJitter(1.0));
        assert_eq!(analysis.agent_id, "agent-7");
        assert_eq!(analysis.transcription, transcript);
        assert_eq!(
            analysis.insights,
            derive_insights(transcript, &analysis.care_score, &cfg.thresholds)
        );
        assert!(analysis.care_score.total > 0.0);
    }
}
