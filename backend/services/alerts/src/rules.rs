//! Threshold rules over a metrics sample. Pure and deterministic.

use serde::{Deserialize, Serialize};

pub const RESPONSE_TIME_CRITICAL_MS: f64 = 2000.0;
pub const CHURN_RATE_WARNING: f64 = 15.0;
pub const ERROR_RATE_CRITICAL: f64 = 5.0;
pub const UPTIME_WARNING: f64 = 98.0;

/// One sample of the operational metrics being watched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricData {
    pub response_time_ms: f64,
    pub resolution_rate: f64,
    pub messages_processed: f64,
    pub system_uptime: f64,
    pub churn_rate: f64,
    pub active_users: f64,
    pub error_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Critical,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
    Performance,
    Churn,
    System,
}

/// A rule that fired, before enrichment with a recommendation or audio.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggeredRule {
    pub level: AlertLevel,
    pub category: AlertCategory,
    pub title: &'static str,
    pub message: String,
}

pub fn evaluate_rules(metrics: &MetricData) -> Vec<TriggeredRule> {
    let mut fired = Vec::new();

    if metrics.response_time_ms > RESPONSE_TIME_CRITICAL_MS {
        fired.push(TriggeredRule {
            level: AlertLevel::Critical,
            category: AlertCategory::Performance,
            title: "Critical Response Time",
            message: format!(
                "Response time at {:.0}ms, far above normal",
                metrics.response_time_ms
            ),
        });
    }

    if metrics.churn_rate > CHURN_RATE_WARNING {
        fired.push(TriggeredRule {
            level: AlertLevel::Warning,
            category: AlertCategory::Churn,
            title: "High Churn Rate",
            message: format!(
                "Churn rate at {:.1}%, immediate action required",
                metrics.churn_rate
            ),
        });
    }

    if metrics.error_rate > ERROR_RATE_CRITICAL {
        fired.push(TriggeredRule {
            level: AlertLevel::Critical,
            category: AlertCategory::System,
            title: "High Error Rate",
            message: format!("{:.1}% of requests failing", metrics.error_rate),
        });
    }

    if metrics.system_uptime < UPTIME_WARNING {
        fired.push(TriggeredRule {
            level: AlertLevel::Warning,
            category: AlertCategory::System,
            title: "System Instability",
            message: format!(
                "Uptime at {:.1}%, below expectations",
                metrics.system_uptime
            ),
        });
    }

    fired
}

#[cfg(test)]
pub(crate) fn healthy_metrics() -> MetricData {
    MetricData {
        response_time_ms: 900.0,
        resolution_rate: 92.0,
        messages_processed: 1200.0,
        system_uptime: 99.5,
        churn_rate: 10.0,
        active_users: 200.0,
        error_rate: 1.0,
    }
}
