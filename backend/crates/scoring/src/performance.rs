use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::ConversationAnalysis;
use crate::pillar::{round1, CareScore, Pillar};

/// Minimum change of the mean total between halves to count as a trend.
pub const TREND_EPSILON: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionPoint {
    pub date: NaiveDate,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPerformance {
    pub agent_id: String,
    pub total_analyses: usize,
    pub average_care_score: CareScore,
    pub evolution: Vec<EvolutionPoint>,
    pub strongest_pillar: Pillar,
    pub weakest_pillar: Pillar,
    pub trend: Trend,
    pub rank: Option<usize>,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

fn trend(totals: &[f64]) -> Trend {
    if totals.len() < 2 {
        return Trend::Stable;
    }
    let mid = totals.len() / 2;
    let older = mean(totals[..mid].iter().copied());
    let newer = mean(totals[mid..].iter().copied());
    let delta = newer - older;
    if delta.abs() < TREND_EPSILON {
        Trend::Stable
    } else if delta > 0.0 {
        Trend::Up
    } else {
        Trend::Down
    }
}

/// Summarise an agent's history. Returns `None` when there is nothing to summarise.
pub fn aggregate(agent_id: &str, analyses: &[ConversationAnalysis]) -> Option<AgentPerformance> {
    if analyses.is_empty() {
        return None;
    }

    let mut ordered: Vec<&ConversationAnalysis> = analyses.iter().collect();
    ordered.sort_by_key(|a| a.created_at);

    let pillar_mean = |pillar: Pillar| {
        round1(mean(ordered.iter().map(|a| a.care_score.pillar(pillar))))
    };
    let average_care_score = CareScore::from_pillars(
        pillar_mean(Pillar::Connection),
        pillar_mean(Pillar::Analysis),
        pillar_mean(Pillar::Resolution),
        pillar_mean(Pillar::Engagement),
    );

    let mut strongest = Pillar::Connection;
    let mut weakest = Pillar::Connection;
    for pillar in Pillar::ALL {
        let value = average_care_score.pillar(pillar);
        if value > average_care_score.pillar(strongest) {
            strongest = pillar;
        }
        if value < average_care_score.pillar(weakest) {
            weakest = pillar;
        }
    }

    let totals: Vec<f64> = ordered.iter().map(|a| a.care_score.total).collect();
    let evolution = ordered
        .iter()
        .map(|a| EvolutionPoint {
            date: a.created_at.date_naive(),
            score: a.care_score.total,
        })
        .collect();

    Some(AgentPerformance {
        agent_id: agent_id.to_string(),
        total_analyses: ordered.len(),
        average_care_score,
        evolution,
        strongest_pillar: strongest,
        weakest_pillar: weakest,
        trend: trend(&totals),
        rank: None,
    })
}

/// Rank agents by average total, best first. Ties are broken by agent id.
pub fn rank_agents(mut performances: Vec<AgentPerformance>) -> Vec<AgentPerformance> {
    performances.sort_by(|a, b| {
        b.average_care_score
            .total
            .partial_cmp(&a.average_care_score.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.agent_id.cmp(&b.agent_id))
    });
    for (idx, perf) in performances.iter_mut().enumerate() {
        perf.rank = Some(idx + 1);
    }
    performances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::Insights;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn make_analysis(agent: &str, day: i64, pillars: [f64; 4]) -> ConversationAnalysis {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap() + Duration::days(day);
        ConversationAnalysis {
            id: Uuid::new_v4(),
            agent_id: agent.to_string(),
            lead_name: "Lead".to_string(),
            transcription: "olá".to_string(),
            care_score: CareScore::from_pillars(pillars[0], pillars[1], pillars[2], pillars[3]),
            insights: Insights::default(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn empty_history_has_no_performance() {
        assert!(aggregate("agent-1", &[]).is_none());
    }

    #[test]
    fn averages_and_pillar_extremes() {
        let history = vec![
            make_analysis("a", 0, [4.0, 2.0, 3.0, 1.0]),
            make_analysis("a", 1, [5.0, 2.0, 3.0, 2.0]),
        ];
        let perf = aggregate("a", &history).unwrap();
        assert_eq!(perf.total_analyses, 2);
        assert!((perf.average_care_score.connection - 4.5).abs() < 1e-9);
        assert!((perf.average_care_score.engagement - 1.5).abs() < 1e-9);
        // (4.5 + 2.0 + 3.0 + 1.5) / 4 = 2.75
        assert!((perf.average_care_score.total - 2.8).abs() < 1e-9);
        assert_eq!(perf.strongest_pillar, Pillar::Connection);
        assert_eq!(perf.weakest_pillar, Pillar::Engagement);
    }

    #[test]
    fn pillar_ties_resolve_in_rubric_order() {
        let history = vec![make_analysis("a", 0, [3.0, 3.0, 3.0, 3.0])];
        let perf = aggregate("a", &history).unwrap();
        assert_eq!(perf.strongest_pillar, Pillar::Connection);
        assert_eq!(perf.weakest_pillar, Pillar::Connection);
    }

    #[test]
    fn evolution_is_chronological_regardless_of_input_order() {
        let history = vec![
            make_analysis("a", 5, [4.0, 4.0, 4.0, 4.0]),
            make_analysis("a", 0, [1.0, 1.0, 1.0, 1.0]),
            make_analysis("a", 2, [2.0, 2.0, 2.0, 2.0]),
        ];
        let perf = aggregate("a", &history).unwrap();
        let scores: Vec<f64> = perf.evolution.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![1.0, 2.0, 4.0]);
        assert_eq!(
            perf.evolution[0].date,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }

    #[test]
    fn trend_up_down_stable() {
        let up = vec![
            make_analysis("a", 0, [1.0, 1.0, 1.0, 1.0]),
            make_analysis("a", 1, [3.0, 3.0, 3.0, 3.0]),
        ];
        assert_eq!(aggregate("a", &up).unwrap().trend, Trend::Up);

        let down = vec![
            make_analysis("a", 0, [4.0, 4.0, 4.0, 4.0]),
            make_analysis("a", 1, [2.0, 2.0, 2.0, 2.0]),
        ];
        assert_eq!(aggregate("a", &down).unwrap().trend, Trend::Down);

        let flat = vec![
            make_analysis("a", 0, [3.0, 3.0, 3.0, 3.0]),
            make_analysis("a", 1, [3.0, 3.0, 3.0, 3.0]),
        ];
        assert_eq!(aggregate("a", &flat).unwrap().trend, Trend::Stable);

        let single = vec![make_analysis("a", 0, [5.0, 5.0, 5.0, 5.0])];
        assert_eq!(aggregate("a", &single).unwrap().trend, Trend::Stable);
    }

    #[test]
    fn ranking_orders_by_total_then_agent_id() {
        let perf = |agent: &str, v: f64| {
            aggregate(agent, &[make_analysis(agent, 0, [v, v, v, v])]).unwrap()
        };
        let ranked = rank_agents(vec![perf("carol", 2.0), perf("bob", 4.0), perf("alice", 2.0)]);
        let order: Vec<(&str, Option<usize>)> = ranked
            .iter()
            .map(|p| (p.agent_id.as_str(), p.rank))
            .collect();
        assert_eq!(
            order,
            vec![("bob", Some(1)), ("alice", Some(2)), ("carol", Some(3))]
        );
    }
}
