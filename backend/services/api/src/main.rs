mod analyses;
mod assistant;
mod criteria;
mod error;
mod extractors;
mod insights;
#[cfg(test)]
mod memory_repo;
mod performance;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use care_ai::{GenerativeClient, GenerativeClientConfig, SpeechClient, SpeechClientConfig};
use care_common::types::ServiceInfo;
use care_config::{init_tracing, AppConfig, ScoringSettings};
use care_db::analysis::pg_repository::PgAnalysisRepository;
use care_db::analysis::repositories::AnalysisRepository;
use care_scoring::ScoringConfig;
use tower_http::cors::CorsLayer;

use analyses::AnalysisService;

const SERVICE_NAME: &str = "care-api";

#[derive(Clone)]
pub struct AppState {
    pub analyses: AnalysisService,
    pub repo: Arc<dyn AnalysisRepository>,
    pub generative: Option<GenerativeClient>,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
            HeaderValue::from_static("http://localhost:5173"),
        ])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-agent-id"),
        ]);

    let info = ServiceInfo::new(SERVICE_NAME)
        .with_collaborator("generative_ai", state.generative.is_some())
        .with_collaborator("speech_to_text", state.analyses.transcribes_audio());

    Router::new()
        .route("/health", get(health))
        .route(
            "/info",
            get(move || {
                let info = info.clone();
                async move { Json(info) }
            }),
        )
        .merge(analyses::router())
        .merge(assistant::router())
        .merge(performance::router())
        .merge(criteria::router())
        .merge(insights::router())
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.log_level);

    let settings = ScoringSettings::from_env()?;
    tracing::info!(
        service = SERVICE_NAME,
        seeded = settings.seed.is_some(),
        delay_ms = settings.analysis_delay_ms,
        "starting"
    );

    let pool =
        care_db::create_pool(&config.database_url, config.database_max_connections).await?;
    let repo: Arc<dyn AnalysisRepository> = Arc::new(PgAnalysisRepository::new(pool));

    let generative = match GenerativeClientConfig::from_env() {
        Some(cfg) => {
            let client = GenerativeClient::new(cfg)?;
            tracing::info!(model = client.model(), "generative AI enabled");
            Some(client)
        }
        None => {
            tracing::warn!(
                "GOOGLE_AI_API_KEY not set, dashboard insights use the fallback and the assistant is off"
            );
            None
        }
    };

    let speech = match SpeechClientConfig::from_env() {
        Some(cfg) => Some(SpeechClient::new(cfg)?),
        None => {
            tracing::warn!("OPENAI_API_KEY not set, recorded-call analysis is off");
            None
        }
    };

    let state = AppState {
        analyses: AnalysisService::new(repo.clone(), ScoringConfig::default(), settings)
            .with_speech(speech),
        repo,
        generative,
    };

    let app = build_router(state);
    let addr: SocketAddr = config.bind_addr().parse()?;

    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
