use serde::{Deserialize, Serialize};

use crate::pillar::{CareScore, Pillar};

/// How a single pillar score was reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillarTrace {
    pub pillar: Pillar,
    pub matched: Vec<String>,
    pub keyword_count: usize,
    pub match_fraction: f64,
    pub jitter: f64,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreTrace {
    pub pillars: Vec<PillarTrace>,
    pub score: CareScore,
}

impl ScoreTrace {
    pub fn pillar(&self, pillar: Pillar) -> Option<&PillarTrace> {
        self.pillars.iter().find(|p| p.pillar == pillar)
    }
}
