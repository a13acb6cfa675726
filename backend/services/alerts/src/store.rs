use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::rules::{AlertCategory, AlertLevel};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub category: AlertCategory,
    pub resolved: bool,
    pub recommendation: String,
    pub has_audio: bool,
    #[serde(skip)]
    pub audio: Option<Vec<u8>>,
}

/// Change notifications for subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertEvent {
    Raised(Vec<String>),
    Resolved(String),
}

/// Bounded in-memory alert history, newest first.
pub struct AlertStore {
    alerts: RwLock<Vec<Alert>>,
    limit: usize,
    events: broadcast::Sender<AlertEvent>,
}

impl AlertStore {
    pub fn new(limit: usize) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            alerts: RwLock::new(Vec::new()),
            limit,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AlertEvent> {
        self.events.subscribe()
    }

    /// Prepend a batch, keeping its internal order, then trim to the limit.
    pub fn push(&self, batch: Vec<Alert>) {
        if batch.is_empty() {
            return;
        }
        let ids = batch.iter().map(|a| a.id.clone()).collect();
        {
            let mut alerts = self.alerts.write().unwrap_or_else(PoisonError::into_inner);
            alerts.splice(0..0, batch);
            alerts.truncate(self.limit);
        }
        // No subscribers is fine.
        let _ = self.events.send(AlertEvent::Raised(ids));
    }

    pub fn all(&self) -> Vec<Alert> {
        self.alerts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn unresolved(&self) -> Vec<Alert> {
        self.alerts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|a| !a.resolved)
            .cloned()
            .collect()
    }

    /// Mark an alert resolved. Returns `false` for unknown ids.
    pub fn resolve(&self, id: &str) -> bool {
        let found = {
            let mut alerts = self.alerts.write().unwrap_or_else(PoisonError::into_inner);
            match alerts.iter_mut().find(|a| a.id == id) {
                Some(alert) => {
                    alert.resolved = true;
                    true
                }
                None => false,
            }
        };
        if found {
            let _ = self.events.send(AlertEvent::Resolved(id.to_string()));
        }
        found
    }

    pub fn audio(&self, id: &str) -> Option<Vec<u8>> {
        self.alerts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|a| a.id == id)
            .and_then(|a| a.audio.clone())
    }
}

#[cfg(test)]
pub(crate) fn sample_alert(id: &str, level: AlertLevel) -> Alert {
    Alert {
        id: id.to_string(),
        level,
        title: "High Error Rate".to_string(),
        message: "6.0% of requests failing".to_string(),
        timestamp: Utc::now(),
        category: AlertCategory::System,
        resolved: false,
        recommendation: "Roll back the last deploy".to_string(),
        has_audio: false,
        audio: None,
    }
}
