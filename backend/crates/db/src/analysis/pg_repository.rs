use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::analysis::models::AnalysisFilter;
use crate::analysis::repositories::AnalysisRepository;
use care_common::error::{CareError, CareResult};
use care_scoring::ConversationAnalysis;

/// Stores each agent's history as a single JSON array, newest first.
#[derive(Clone)]
pub struct PgAnalysisRepository {
    pool: PgPool,
}

impl PgAnalysisRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn decode(value: serde_json::Value) -> CareResult<ConversationAnalysis> {
    serde_json::from_value(value)
        .map_err(|e| CareError::Database(format!("corrupt analysis record: {e}")))
}

fn db_err(e: sqlx::Error) -> CareError {
    CareError::Database(e.to_string())
}

#[async_trait]
impl AnalysisRepository for PgAnalysisRepository {
    async fn append(&self, analysis: ConversationAnalysis) -> CareResult<ConversationAnalysis> {
        let record = serde_json::to_value(&analysis)
            .map_err(|e| CareError::Internal(format!("encode analysis: {e}")))?;

        sqlx::query(
            "insert into agent_analyses (agent_id, analyses, updated_at)
             values ($1, jsonb_build_array($2::jsonb), now())
             on conflict (agent_id) do update
             set analyses = jsonb_build_array($2::jsonb) || agent_analyses.analyses,
                 updated_at = now()",
        )
        .bind(&analysis.agent_id)
        .bind(&record)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        tracing::debug!(agent_id = %analysis.agent_id, id = %analysis.id, "analysis stored");
        Ok(analysis)
    }

    async fn list_for_agent(
        &self,
        agent_id: &str,
        filter: AnalysisFilter,
    ) -> CareResult<Vec<ConversationAnalysis>> {
        let rows = sqlx::query(
            "select t.elem
             from agent_analyses a,
                  jsonb_array_elements(a.analyses) with ordinality as t(elem, pos)
             where a.agent_id = $1
             order by t.pos
             limit $2 offset $3",
        )
        .bind(agent_id)
        .bind(filter.limit())
        .bind(filter.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(|row| decode(row.get("elem"))).collect()
    }

    async fn history(&self, agent_id: &str) -> CareResult<Vec<ConversationAnalysis>> {
        let row = sqlx::query("select analyses from agent_analyses where agent_id = $1")
            .bind(agent_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        match row {
            Some(row) => {
                let blob: serde_json::Value = row.get("analyses");
                serde_json::from_value(blob)
                    .map_err(|e| CareError::Database(format!("corrupt analysis history: {e}")))
            }
            None => Ok(Vec::new()),
        }
    }

    async fn get(&self, agent_id: &str, id: Uuid) -> CareResult<Option<ConversationAnalysis>> {
        let row = sqlx::query(
            "select t.elem
             from agent_analyses a, jsonb_array_elements(a.analyses) as t(elem)
             where a.agent_id = $1 and t.elem->>'id' = $2",
        )
        .bind(agent_id)
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(|row| decode(row.get("elem"))).transpose()
    }

    async fn histories(&self) -> CareResult<Vec<(String, Vec<ConversationAnalysis>)>> {
        let rows = sqlx::query("select agent_id, analyses from agent_analyses order by agent_id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter()
            .map(|row| -> CareResult<(String, Vec<ConversationAnalysis>)> {
                let agent_id: String = row.get("agent_id");
                let blob: serde_json::Value = row.get("analyses");
                let history = serde_json::from_value(blob).map_err(|e| {
                    CareError::Database(format!("corrupt analysis history for {agent_id}: {e}"))
                })?;
                Ok((agent_id, history))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_pool;
    use care_scoring::{analyze_conversation, FixedJitter, ScoringConfig};

    async fn test_repo() -> Option<PgAnalysisRepository> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let pool = create_pool(&url, 2).await.expect("db should connect");

        sqlx::query(
            "create table if not exists agent_analyses (
              agent_id text primary key,
              analyses jsonb not null default '[]'::jsonb,
              updated_at timestamptz not null default now()
            )",
        )
        .execute(&pool)
        .await
        .expect("create agent_analyses");

        Some(PgAnalysisRepository::new(pool))
    }

    fn make_analysis(agent_id: &str, transcript: &str) -> ConversationAnalysis {
        analyze_conversation(
            &ScoringConfig::default(),
            transcript,
            agent_id,
            None,
            &mut FixedJitter(1.0),
        )
    }

    fn unique_agent() -> String {
        format!("agent-{}", Uuid::new_v4())
    }

    #[tokio::test]
    async fn append_and_get() {
        let repo = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let agent = unique_agent();
        let analysis = make_analysis(&agent, "olá, qual seu objetivo?");
        let id = analysis.id;

        repo.append(analysis.clone()).await.expect("append");

        let fetched = repo.get(&agent, id).await.expect("get").expect("present");
        assert_eq!(fetched, analysis);
    }

    #[tokio::test]
    async fn get_returns_none_for_other_agent() {
        let repo = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let agent = unique_agent();
        let analysis = make_analysis(&agent, "olá");
        let id = analysis.id;
        repo.append(analysis).await.expect("append");

        let result = repo.get(&unique_agent(), id).await.expect("get");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn history_is_newest_first_and_paged() {
        let repo = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let agent = unique_agent();
        let mut ids = Vec::new();
        for transcript in ["primeira", "segunda", "terceira"] {
            let analysis = make_analysis(&agent, transcript);
            ids.push(analysis.id);
            repo.append(analysis).await.expect("append");
        }

        let all = repo.history(&agent).await.expect("history");
        let all_ids: Vec<Uuid> = all.iter().map(|a| a.id).collect();
        assert_eq!(all_ids, vec![ids[2], ids[1], ids[0]]);

        let page = repo
            .list_for_agent(
                &agent,
                AnalysisFilter {
                    limit: Some(2),
                    offset: Some(1),
                },
            )
            .await
            .expect("list");
        let page_ids: Vec<Uuid> = page.iter().map(|a| a.id).collect();
        assert_eq!(page_ids, vec![ids[1], ids[0]]);
    }

    #[tokio::test]
    async fn unknown_agent_has_empty_history() {
        let repo = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let history = repo.history(&unique_agent()).await.expect("history");
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn histories_include_every_agent_in_one_read() {
        let repo = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let first = unique_agent();
        let second = unique_agent();
        repo.append(make_analysis(&first, "olá")).await.expect("append");
        repo.append(make_analysis(&second, "bom dia")).await.expect("append");
        repo.append(make_analysis(&second, "boa tarde")).await.expect("append");

        let all = repo.histories().await.expect("histories");
        let count_for = |agent: &str| {
            all.iter()
                .find(|(id, _)| id == agent)
                .map(|(_, history)| history.len())
        };
        assert_eq!(count_for(&first), Some(1));
        assert_eq!(count_for(&second), Some(2));
    }
}
