use async_trait::async_trait;
use uuid::Uuid;

use crate::analysis::models::AnalysisFilter;
use care_common::error::CareResult;
use care_scoring::ConversationAnalysis;

/// Per-agent analysis history.
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Prepend an analysis to its agent's history.
    async fn append(&self, analysis: ConversationAnalysis) -> CareResult<ConversationAnalysis>;
    /// One page of an agent's history, newest first.
    async fn list_for_agent(
        &self,
        agent_id: &str,
        filter: AnalysisFilter,
    ) -> CareResult<Vec<ConversationAnalysis>>;
    /// An agent's complete history, newest first.
    async fn history(&self, agent_id: &str) -> CareResult<Vec<ConversationAnalysis>>;
    async fn get(&self, agent_id: &str, id: Uuid) -> CareResult<Option<ConversationAnalysis>>;
    /// Every agent's complete history in one read, ordered by agent id.
    async fn histories(&self) -> CareResult<Vec<(String, Vec<ConversationAnalysis>)>>;
}
