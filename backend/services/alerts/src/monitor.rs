use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use care_ai::{GenerativeClient, SpeechClient};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use uuid::Uuid;

use crate::rules::{evaluate_rules, AlertLevel, MetricData, TriggeredRule};
use crate::store::{Alert, AlertStore};

pub const RECOMMENDATION_UNAVAILABLE: &str = "Recommendation not available right now.";

/// Where metric samples come from.
pub trait MetricsSource {
    fn sample(&mut self) -> MetricData;
}

/// Random demo metrics drawn from fixed plausible ranges.
pub struct SyntheticMetrics<R: Rng> {
    rng: R,
}

impl<R: Rng> SyntheticMetrics<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl SyntheticMetrics<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> MetricsSource for SyntheticMetrics<R> {
    fn sample(&mut self) -> MetricData {
        MetricData {
            response_time_ms: self.rng.gen_range(800.0..2300.0),
            resolution_rate: self.rng.gen_range(85.0..100.0),
            messages_processed: self.rng.gen_range(1000.0..1500.0),
            system_uptime: self.rng.gen_range(97.0..100.0),
            churn_rate: self.rng.gen_range(8.0..20.0),
            active_users: self.rng.gen_range(150.0..250.0),
            error_rate: self.rng.gen_range(0.0..8.0),
        }
    }
}

fn recommendation_prompt(rule: &TriggeredRule, m: &MetricData) -> String {
    format!(
        "You are an expert in systems and performance analysis.\n\n\
         Alert: {}\n\
         Description: {}\n\n\
         Current metrics:\n\
         - Response time: {:.0}ms\n\
         - Resolution rate: {:.1}%\n\
         - Messages processed: {:.0}\n\
         - Uptime: {:.1}%\n\
         - Churn rate: {:.1}%\n\
         - Active users: {:.0}\n\
         - Error rate: {:.1}%\n\n\
         Give one specific, practical recommendation to fix this problem in at most 100 words.",
        rule.title,
        rule.message,
        m.response_time_ms,
        m.resolution_rate,
        m.messages_processed,
        m.system_uptime,
        m.churn_rate,
        m.active_users,
        m.error_rate,
    )
}

/// Turns fired rules into stored alerts, enriched by the AI collaborators.
pub struct AlertMonitor {
    store: Arc<AlertStore>,
    generative: Option<GenerativeClient>,
    speech: Option<SpeechClient>,
}

impl AlertMonitor {
    pub fn new(
        store: Arc<AlertStore>,
        generative: Option<GenerativeClient>,
        speech: Option<SpeechClient>,
    ) -> Self {
        Self {
            store,
            generative,
            speech,
        }
    }

    async fn recommend(&self, rule: &TriggeredRule, metrics: &MetricData) -> String {
        let Some(client) = &self.generative else {
            return RECOMMENDATION_UNAVAILABLE.to_string();
        };
        match client.generate(&recommendation_prompt(rule, metrics), None).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::error!(error = %e, title = rule.title, "recommendation failed");
                RECOMMENDATION_UNAVAILABLE.to_string()
            }
        }
    }

    async fn speak(&self, rule: &TriggeredRule) -> Option<Vec<u8>> {
        let client = self.speech.as_ref()?;
        let text = format!("Critical alert: {}. {}", rule.title, rule.message);
        match client.text_to_speech(&text, client.default_voice()).await {
            Ok(audio) => Some(audio),
            Err(e) => {
                tracing::error!(error = %e, title = rule.title, "alert audio failed");
                None
            }
        }
    }

    pub async fn materialize(&self, rule: TriggeredRule, metrics: &MetricData) -> Alert {
        let recommendation = self.recommend(&rule, metrics).await;
        let audio = if rule.level == AlertLevel::Critical {
            self.speak(&rule).await
        } else {
            None
        };

        Alert {
            id: format!("alert-{}", Uuid::new_v4()),
            level: rule.level,
            title: rule.title.to_string(),
            message: rule.message,
            timestamp: Utc::now(),
            category: rule.category,
            resolved: false,
            recommendation,
            has_audio: audio.is_some(),
            audio,
        }
    }

    /// Evaluate one sample and store whatever fired. Returns the number of new alerts.
    pub async fn check(&self, metrics: &MetricData) -> usize {
        let fired = evaluate_rules(metrics);
        if fired.is_empty() {
            tracing::debug!("all metrics within thresholds");
            return 0;
        }

        let mut batch = Vec::with_capacity(fired.len());
        for rule in fired {
            batch.push(self.materialize(rule, metrics).await);
        }
        let count = batch.len();
        for alert in &batch {
            tracing::warn!(
                id = %alert.id,
                level = ?alert.level,
                title = %alert.title,
                "alert raised"
            );
        }
        self.store.push(batch);
        count
    }

    /// Sample `source` every `period` until `shutdown` completes.
    pub async fn run<S, F>(&self, mut source: S, period: Duration, shutdown: F)
    where
        S: MetricsSource,
        F: Future<Output = ()>,
    {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        tracing::info!(period_secs = period.as_secs_f64(), "monitoring started");
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    let metrics = source.sample();
                    self.check(&metrics).await;
                }
            }
        }
        tracing::info!("monitoring stopped");
    }
}
