use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four CARE dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Connection,
    Analysis,
    Resolution,
    Engagement,
}

impl Pillar {
    /// Rubric order. Ties between pillars are always resolved in this order.
    pub const ALL: [Pillar; 4] = [
        Pillar::Connection,
        Pillar::Analysis,
        Pillar::Resolution,
        Pillar::Engagement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pillar::Connection => "connection",
            Pillar::Analysis => "analysis",
            Pillar::Resolution => "resolution",
            Pillar::Engagement => "engagement",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const MAX_PILLAR_SCORE: f64 = 5.0;

/// Four pillar scores in `[0, 5]` plus their mean, all at one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CareScore {
    pub connection: f64,
    pub analysis: f64,
    pub resolution: f64,
    pub engagement: f64,
    pub total: f64,
}

impl CareScore {
    /// Build a score from pillar values; `total` is always derived here.
    pub fn from_pillars(connection: f64, analysis: f64, resolution: f64, engagement: f64) -> Self {
        let total = round1((connection + analysis + resolution + engagement) / 4.0);
        Self {
            connection,
            analysis,
            resolution,
            engagement,
            total,
        }
    }

    pub fn pillar(&self, pillar: Pillar) -> f64 {
        match pillar {
            Pillar::Connection => self.connection,
            Pillar::Analysis => self.analysis,
            Pillar::Resolution => self.resolution,
            Pillar::Engagement => self.engagement,
        }
    }
}

/// Round half away from zero to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Clamp to the pillar range, then round.
pub fn clamp_score(value: f64) -> f64 {
    round1(value.clamp(0.0, MAX_PILLAR_SCORE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_rounded_mean() {
        let score = CareScore::from_pillars(4.2, 3.1, 2.0, 0.4);
        // (4.2 + 3.1 + 2.0 + 0.4) / 4 = 2.425
        assert!((score.total - 2.4).abs() < 1e-9, "total={}", score.total);
    }

    #[test]
    fn pillar_accessor_matches_fields() {
        let score = CareScore::from_pillars(1.0, 2.0, 3.0, 4.0);
        let values: Vec<f64> = Pillar::ALL.iter().map(|p| score.pillar(*p)).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn round1_is_half_away_from_zero() {
        assert!((round1(0.25) - 0.3).abs() < 1e-9);
        assert!((round1(2.44) - 2.4).abs() < 1e-9);
        assert!((round1(4.96) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn clamp_score_bounds() {
        assert_eq!(clamp_score(-0.3), 0.0);
        assert_eq!(clamp_score(6.0), 5.0);
        assert!((clamp_score(4.46) - 4.5).abs() < 1e-9);
    }

    #[test]
    fn pillar_serializes_snake_case() {
        let json = serde_json::to_string(&Pillar::Engagement).unwrap();
        assert_eq!(json, "\"engagement\"");
        assert_eq!(Pillar::Analysis.to_string(), "analysis");
    }
}
