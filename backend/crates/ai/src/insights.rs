//! Dashboard insights generated by the text-generation collaborator.
//!
//! The model's reply is parsed into a strict schema. Anything that does
//! not fit, or a failed call, yields the fixed fallback bundle instead.

use serde::{Deserialize, Serialize};

use crate::error::AiClientError;
use crate::generative::GenerativeClient;

pub const INSIGHT_COUNT: usize = 3;
pub const MAX_TITLE_CHARS: usize = 50;
pub const MAX_DESCRIPTION_CHARS: usize = 120;
pub const MIN_CONFIDENCE: f64 = 70.0;
pub const MAX_CONFIDENCE: f64 = 95.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub response_time_secs: f64,
    pub resolution_rate: f64,
    pub messages_processed: u64,
    pub system_uptime: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnSnapshot {
    pub high_risk_users: u64,
    pub total_users: u64,
    pub churn_rate: f64,
    pub avg_messages_per_user: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementSnapshot {
    pub daily_active_users: u64,
    pub avg_session_minutes: f64,
    pub messages_sent_today: u64,
    pub user_satisfaction: f64,
}

/// Dashboard figures the insights are generated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub performance: PerformanceSnapshot,
    pub churn: ChurnSnapshot,
    pub engagement: EngagementSnapshot,
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self {
            performance: PerformanceSnapshot {
                response_time_secs: 2.3,
                resolution_rate: 87.0,
                messages_processed: 15678,
                system_uptime: 99.9,
            },
            churn: ChurnSnapshot {
                high_risk_users: 4,
                total_users: 1247,
                churn_rate: 12.5,
                avg_messages_per_user: 18.4,
            },
            engagement: EngagementSnapshot {
                daily_active_users: 856,
                avg_session_minutes: 4.2,
                messages_sent_today: 2341,
                user_satisfaction: 4.2,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Opportunity,
    Risk,
    Trend,
    Recommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Performance,
    Churn,
    Engagement,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardInsight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub confidence: f64,
    pub category: InsightCategory,
    pub actionable: bool,
}

impl DashboardInsight {
    fn validate(&self) -> Result<(), String> {
        let title_len = self.title.trim().chars().count();
        if title_len == 0 || title_len > MAX_TITLE_CHARS {
            return Err(format!("title length {title_len} out of range"));
        }
        let desc_len = self.description.trim().chars().count();
        if desc_len == 0 || desc_len > MAX_DESCRIPTION_CHARS {
            return Err(format!("description length {desc_len} out of range"));
        }
        if !(MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&self.confidence) {
            return Err(format!("confidence {} out of range", self.confidence));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSource {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightBundle {
    pub source: InsightSource,
    pub insights: Vec<DashboardInsight>,
}

pub fn dashboard_prompt(snapshot: &DashboardSnapshot) -> String {
    let p = &snapshot.performance;
    let c = &snapshot.churn;
    let e = &snapshot.engagement;
    format!(
        "Analyze the following dashboard data and generate automatic insights:\n\n\
         Performance:\n\
         - Response time: {}s\n\
         - Resolution rate: {}%\n\
         - Messages processed: {}\n\
         - Uptime: {}%\n\n\
         Churn:\n\
         - High-risk users: {}\n\
         - Total users: {}\n\
         - Churn rate: {}%\n\
         - Avg messages per user: {}\n\n\
         Engagement:\n\
         - Daily active users: {}\n\
         - Avg session duration: {}min\n\
         - Messages today: {}\n\
         - Satisfaction: {}/5\n\n\
         Generate exactly {INSIGHT_COUNT} insights as a JSON array with these properties:\n\
         - type: \"opportunity\", \"risk\", \"trend\" or \"recommendation\"\n\
         - title: concise title (at most {MAX_TITLE_CHARS} characters)\n\
         - description: detailed description (at most {MAX_DESCRIPTION_CHARS} characters)\n\
         - impact: \"high\", \"medium\" or \"low\"\n\
         - confidence: number between 70 and 95\n\
         - category: \"performance\", \"churn\", \"engagement\" or \"system\"\n\
         - actionable: true/false\n\n\
         Reply with the JSON array only, no additional text.",
        p.response_time_secs,
        p.resolution_rate,
        p.messages_processed,
        p.system_uptime,
        c.high_risk_users,
        c.total_users,
        c.churn_rate,
        c.avg_messages_per_user,
        e.daily_active_users,
        e.avg_session_minutes,
        e.messages_sent_today,
        e.user_satisfaction,
    )
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening fence line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse and validate a model reply. Exactly [`INSIGHT_COUNT`] well-formed items are required.
pub fn parse_insights(raw: &str) -> Result<Vec<DashboardInsight>, AiClientError> {
    let insights: Vec<DashboardInsight> = serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| AiClientError::InvalidResponse(e.to_string()))?;

    if insights.len() != INSIGHT_COUNT {
        return Err(AiClientError::InvalidResponse(format!(
            "expected {INSIGHT_COUNT} insights, got {}",
            insights.len()
        )));
    }
    for (i, insight) in insights.iter().enumerate() {
        insight
            .validate()
            .map_err(|reason| AiClientError::InvalidResponse(format!("insight {i}: {reason}")))?;
    }
    Ok(insights)
}

pub fn fallback_insights(snapshot: &DashboardSnapshot) -> Vec<DashboardInsight> {
    vec![
        DashboardInsight {
            kind: InsightKind::Opportunity,
            title: "Performance Optimisation".to_string(),
            description: "Response time can improve by 30% with cache tuning".to_string(),
            impact: Impact::Medium,
            confidence: 82.0,
            category: InsightCategory::Performance,
            actionable: true,
        },
        DashboardInsight {
            kind: InsightKind::Risk,
            title: "At-Risk Users Detected".to_string(),
            description: format!(
                "{} users with high churn probability identified",
                snapshot.churn.high_risk_users
            ),
            impact: Impact::High,
            confidence: 91.0,
            category: InsightCategory::Churn,
            actionable: true,
        },
        DashboardInsight {
            kind: InsightKind::Trend,
            title: "Engagement Growth".to_string(),
            description: "15% rise in user satisfaction over the last 2 weeks".to_string(),
            impact: Impact::Low,
            confidence: 78.0,
            category: InsightCategory::Engagement,
            actionable: false,
        },
    ]
}

/// Ask the collaborator for insights, failing closed to the fallback bundle.
pub async fn generate_dashboard_insights(
    client: Option<&GenerativeClient>,
    snapshot: &DashboardSnapshot,
) -> InsightBundle {
    let fallback = || InsightBundle {
        source: InsightSource::Fallback,
        insights: fallback_insights(snapshot),
    };

    let Some(client) = client else {
        tracing::debug!("no generative client configured, using fallback insights");
        return fallback();
    };

    let reply = match client.generate(&dashboard_prompt(snapshot), None).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "insight generation failed, using fallback");
            return fallback();
        }
    };

    match parse_insights(&reply) {
        Ok(insights) => InsightBundle {
            source: InsightSource::Ai,
            insights,
        },
        Err(e) => {
            tracing::warn!(error = %e, "model reply rejected, using fallback");
            fallback()
        }
    }
}
