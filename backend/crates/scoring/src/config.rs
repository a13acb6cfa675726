use serde::{Deserialize, Serialize};

use crate::pillar::Pillar;

/// Reference keyword sets, one per pillar. Matching is case-insensitive
/// substring search, each keyword counted at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillarKeywords {
    pub connection: Vec<String>,
    pub analysis: Vec<String>,
    pub resolution: Vec<String>,
    pub engagement: Vec<String>,
}

impl PillarKeywords {
    pub fn for_pillar(&self, pillar: Pillar) -> &[String] {
        match pillar {
            Pillar::Connection => &self.connection,
            Pillar::Analysis => &self.analysis,
            Pillar::Resolution => &self.resolution,
            Pillar::Engagement => &self.engagement,
        }
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_owned()).collect()
}

impl Default for PillarKeywords {
    fn default() -> Self {
        Self {
            connection: owned(&[
                "olá",
                "bom dia",
                "boa tarde",
                "prazer",
                "como está",
                "tudo bem",
                "nome",
                "conhecer",
                "conte",
                "fale sobre",
            ]),
            analysis: owned(&[
                "objetivo",
                "meta",
                "problema",
                "dificuldade",
                "porque",
                "motivação",
                "experiência",
                "já praticou",
                "prefere",
                "gosta",
                "tempo",
            ]),
            resolution: owned(&[
                "nossa academia",
                "gobatti",
                "oferecemos",
                "temos",
                "solução",
                "benefício",
                "resultado",
                "diferencial",
                "qualidade",
            ]),
            engagement: owned(&[
                "aula experimental",
                "visita",
                "quando",
                "agendar",
                "próximo passo",
                "começar",
                "iniciar",
                "hoje",
                "amanhã",
                "semana",
            ]),
        }
    }
}

/// Uniform multiplicative noise applied to every pillar score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JitterRange {
    pub min: f64,
    pub max: f64,
}

impl Default for JitterRange {
    fn default() -> Self {
        Self { min: 0.8, max: 1.2 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightThresholds {
    /// Pillar score at or above which a positive insight is emitted.
    pub positive_min: f64,
    /// Pillar score strictly below which an improvement and a recommendation are emitted.
    pub improvement_below: f64,
    /// Analysis / engagement score strictly below which a missed opportunity is noted.
    pub missed_opportunity_below: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            positive_min: 4.0,
            improvement_below: 3.0,
            missed_opportunity_below: 4.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub keywords: PillarKeywords,
    pub jitter: JitterRange,
    pub thresholds: InsightThresholds,
}
