use crate::config::JitterRange;
use crate::jitter::Jitter;
use crate::pillar::{clamp_score, Pillar, MAX_PILLAR_SCORE};
use crate::trace::PillarTrace;

use super::PillarScorer;

/// Scores a pillar by the fraction of its keywords present in the transcript.
pub struct KeywordScorer<'a> {
    pub pillar: Pillar,
    pub keywords: &'a [String],
}

impl PillarScorer for KeywordScorer<'_> {
    fn score(
        &self,
        normalized: &str,
        jitter: &mut dyn Jitter,
        range: &JitterRange,
    ) -> PillarTrace {
        let matched: Vec<String> = self
            .keywords
            .iter()
            .filter(|k| normalized.contains(k.to_lowercase().as_str()))
            .cloned()
            .collect();

        let match_fraction = if self.keywords.is_empty() {
            0.0
        } else {
            (matched.len() as f64 / self.keywords.len() as f64).min(1.0)
        };

        let factor = jitter.sample(range.min, range.max);
        let score = clamp_score(match_fraction * MAX_PILLAR_SCORE * factor);

        PillarTrace {
            pillar: self.pillar,
            matched,
            keyword_count: self.keywords.len(),
            match_fraction,
            jitter: factor,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::FixedJitter;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn counts_each_keyword_once() {
        let keywords = words(&["hoje", "agendar"]);
        let scorer = KeywordScorer {
            pillar: Pillar::Engagement,
            keywords: &keywords,
        };
        let trace = scorer.score(
            "hoje, hoje e hoje",
            &mut FixedJitter(1.0),
            &JitterRange::default(),
        );
        assert_eq!(trace.matched, vec!["hoje".to_string()]);
        assert!((trace.match_fraction - 0.5).abs() < f64::EPSILON);
        assert!((trace.score - 2.5).abs() < 1e-9);
    }

    #[test]
    fn all_keywords_with_max_jitter_is_capped_at_five() {
        let keywords = words(&["olá", "prazer"]);
        let scorer = KeywordScorer {
            pillar: Pillar::Connection,
            keywords: &keywords,
        };
        let trace = scorer.score(
            "olá, prazer!",
            &mut FixedJitter(1.2),
            &JitterRange::default(),
        );
        assert!((trace.score - 5.0).abs() < 1e-9);
        assert!((trace.jitter - 1.2).abs() < 1e-9);
    }

    #[test]
    fn mixed_case_keywords_still_match() {
        let keywords = words(&["Nossa Academia"]);
        let scorer = KeywordScorer {
            pillar: Pillar::Resolution,
            keywords: &keywords,
        };
        let trace = scorer.score(
            "conheça nossa academia",
            &mut FixedJitter(1.0),
            &JitterRange::default(),
        );
        assert_eq!(trace.matched.len(), 1);
    }

    #[test]
    fn trace_is_tagged_with_the_scored_pillar() {
        let keywords = words(&["objetivo"]);
        for pillar in Pillar::ALL {
            let scorer = KeywordScorer {
                pillar,
                keywords: &keywords,
            };
            let trace = scorer.score("qual seu objetivo?", &mut FixedJitter(1.0), &JitterRange::default());
            assert_eq!(trace.pillar, pillar);
        }
    }

    #[test]
    fn empty_keyword_set_scores_zero() {
        let keywords: Vec<String> = Vec::new();
        let scorer = KeywordScorer {
            pillar: Pillar::Analysis,
            keywords: &keywords,
        };
        let trace = scorer.score("qualquer coisa", &mut FixedJitter(1.0), &JitterRange::default());
        assert_eq!(trace.score, 0.0);
        assert_eq!(trace.keyword_count, 0);
    }
}
