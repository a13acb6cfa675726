use crate::config::ScoringConfig;
use crate::jitter::Jitter;
use crate::pillar::{CareScore, Pillar};
use crate::scorers::keyword::KeywordScorer;
use crate::scorers::PillarScorer;
use crate::trace::{PillarTrace, ScoreTrace};

fn normalize(transcript: &str) -> String {
    transcript.to_lowercase()
}

/// Score a transcript and keep the per-pillar details.
///
/// Never fails: an empty transcript simply matches no keywords.
pub fn score_with_trace(
    config: &ScoringConfig,
    transcript: &str,
    jitter: &mut dyn Jitter,
) -> ScoreTrace {
    let normalized = normalize(transcript);

    let scorers: Vec<KeywordScorer<'_>> = Pillar::ALL
        .iter()
        .map(|&pillar| KeywordScorer {
            pillar,
            keywords: config.keywords.for_pillar(pillar),
        })
        .collect();

    let pillars: Vec<PillarTrace> = scorers
        .iter()
        .map(|s| s.score(&normalized, jitter, &config.jitter))
        .collect();

    let value = |pillar: Pillar| {
        pillars
            .iter()
            .find(|t| t.pillar == pillar)
            .map_or(0.0, |t| t.score)
    };

    let score = CareScore::from_pillars(
        value(Pillar::Connection),
        value(Pillar::Analysis),
        value(Pillar::Resolution),
        value(Pillar::Engagement),
    );

    ScoreTrace { pillars, score }
}

pub fn score(config: &ScoringConfig, transcript: &str, jitter: &mut dyn Jitter) -> CareScore {
    score_with_trace(config, transcript, jitter).score
}
