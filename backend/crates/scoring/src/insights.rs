use serde::{Deserialize, Serialize};

use crate::config::InsightThresholds;
use crate::pillar::{CareScore, Pillar};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamplePair {
    pub said: String,
    pub could_have_said: String,
}

/// Qualitative feedback derived from a [`CareScore`], in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    pub positives: Vec<String>,
    pub improvements: Vec<String>,
    pub recommendations: Vec<String>,
    pub missed_opportunities: Vec<String>,
    pub examples: Vec<ExamplePair>,
}

struct PillarTemplates {
    positive: &'static str,
    improvement: &'static str,
    recommendation: &'static str,
}

fn templates(pillar: Pillar) -> PillarTemplates {
    match pillar {
        Pillar::Connection => PillarTemplates {
            positive: "Excellent initial rapport and connection with the lead",
            improvement: "Build more rapport at the start of the conversation",
            recommendation: "Spend more time on the greeting and on personal questions",
        },
        Pillar::Analysis => PillarTemplates {
            positive: "Good investigation of the lead's needs",
            improvement: "Dig deeper into the lead's pain points and goals",
            recommendation: "Use open questions to explore deeper motivations",
        },
        Pillar::Resolution => PillarTemplates {
            positive: "Effective presentation of the gym as the solution",
            improvement: "Tie the benefits more closely to the lead's needs",
            recommendation: "Tailor the pitch to the pain points you identified",
        },
        Pillar::Engagement => PillarTemplates {
            positive: "Excellent handling of next steps",
            improvement: "Improve the close and the scheduling of next actions",
            recommendation: "Always finish by proposing one concrete, specific action",
        },
    }
}

pub const MISSED_ACTIVITY_HISTORY: &str =
    "Could have explored the lead's physical-activity history further";
pub const MISSED_TRIAL_CLASS: &str = "Missed the chance to book a trial class";

fn example_pair() -> ExamplePair {
    ExamplePair {
        said: "Our gym has good equipment".to_string(),
        could_have_said: "Our state-of-the-art equipment will help you reach \
                          [specific goal the lead mentioned]"
            .to_string(),
    }
}

/// Turn a score into templated feedback.
///
/// Deterministic for a given score. The transcript is accepted for
/// transcript-aware feedback but the current rules only read the score.
pub fn derive_insights(
    _transcript: &str,
    score: &CareScore,
    thresholds: &InsightThresholds,
) -> Insights {
    let mut insights = Insights::default();

    for pillar in Pillar::ALL {
        let value = score.pillar(pillar);
        let text = templates(pillar);
        if value >= thresholds.positive_min {
            insights.positives.push(text.positive.to_string());
        } else if value < thresholds.improvement_below {
            insights.improvements.push(text.improvement.to_string());
            insights.recommendations.push(text.recommendation.to_string());
        }
    }

    if score.analysis < thresholds.missed_opportunity_below {
        insights
            .missed_opportunities
            .push(MISSED_ACTIVITY_HISTORY.to_string());
    }
    if score.engagement < thresholds.missed_opportunity_below {
        insights
            .missed_opportunities
            .push(MISSED_TRIAL_CLASS.to_string());
    }

    insights.examples.push(example_pair());
    insights
}
