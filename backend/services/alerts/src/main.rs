mod monitor;
mod routes;
mod rules;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use care_ai::{GenerativeClient, GenerativeClientConfig, SpeechClient, SpeechClientConfig};
use care_config::{init_tracing, AlertsConfig};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;

use monitor::{AlertMonitor, SyntheticMetrics};
use store::{AlertEvent, AlertStore};

const SERVICE_NAME: &str = "care-alerts";

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AlertsConfig::from_env()?;
    init_tracing(&config.log_level);

    tracing::info!(
        service = SERVICE_NAME,
        interval_secs = config.interval_secs,
        history_limit = config.history_limit,
        "starting"
    );

    let generative = GenerativeClientConfig::from_env()
        .map(GenerativeClient::new)
        .transpose()?;
    let speech = SpeechClientConfig::from_env()
        .map(SpeechClient::new)
        .transpose()?;
    if generative.is_none() {
        tracing::warn!("GOOGLE_AI_API_KEY not set, alerts carry no AI recommendation");
    }
    if speech.is_none() {
        tracing::warn!("OPENAI_API_KEY not set, critical alerts are not spoken");
    }

    let store = Arc::new(AlertStore::new(config.history_limit));
    let monitor = AlertMonitor::new(store.clone(), generative, speech);

    let mut events = store.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(AlertEvent::Raised(ids)) => tracing::info!(count = ids.len(), "alerts raised"),
                Ok(AlertEvent::Resolved(id)) => tracing::info!(%id, "alert resolved"),
                Err(RecvError::Lagged(skipped)) => tracing::warn!(skipped, "event log lagging"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let (stop_tx, mut stop_rx) = watch::channel(false);
    let period = config.interval();
    let monitor_task = tokio::spawn(async move {
        let stopped = async move {
            let _ = stop_rx.changed().await;
        };
        monitor
            .run(SyntheticMetrics::from_entropy(), period, stopped)
            .await;
    });

    let addr: SocketAddr = config.bind_addr().parse()?;
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, routes::router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = stop_tx.send(true);
    monitor_task.await?;
    Ok(())
}
