pub mod analysis;

use std::time::Duration;

use care_common::error::{CareError, CareResult};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the analysis store's pool, failing fast when Postgres is unreachable.
pub async fn create_pool(database_url: &str, max_connections: u32) -> CareResult<PgPool> {
    if max_connections == 0 {
        return Err(CareError::Config(
            "database pool needs at least one connection".to_string(),
        ));
    }

    tracing::info!(max_connections, "connecting to analysis store");
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
        .map_err(|e| CareError::Database(format!("analysis store unreachable: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_store_is_a_database_error() {
        let result = create_pool("postgres://invalid:5432/nonexistent", 2).await;
        assert!(matches!(result, Err(CareError::Database(msg)) if msg.contains("unreachable")));
    }

    #[tokio::test]
    async fn zero_connections_is_rejected_before_connecting() {
        let result = create_pool("postgres://invalid:5432/nonexistent", 0).await;
        assert!(matches!(result, Err(CareError::Config(_))));
    }
}
