use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use care_common::error::CareResult;
use care_db::analysis::models::AnalysisFilter;
use care_db::analysis::repositories::AnalysisRepository;
use care_scoring::ConversationAnalysis;
use uuid::Uuid;

/// In-memory stand-in for the Postgres history store.
#[derive(Default)]
pub struct MemoryAnalysisRepository {
    by_agent: Mutex<BTreeMap<String, Vec<ConversationAnalysis>>>,
}

#[async_trait]
impl AnalysisRepository for MemoryAnalysisRepository {
    async fn append(&self, analysis: ConversationAnalysis) -> CareResult<ConversationAnalysis> {
        let mut map = self.by_agent.lock().unwrap();
        map.entry(analysis.agent_id.clone())
            .or_default()
            .insert(0, analysis.clone());
        Ok(analysis)
    }

    async fn list_for_agent(
        &self,
        agent_id: &str,
        filter: AnalysisFilter,
    ) -> CareResult<Vec<ConversationAnalysis>> {
        let map = self.by_agent.lock().unwrap();
        Ok(map
            .get(agent_id)
            .map(|all| {
                all.iter()
                    .skip(filter.offset() as usize)
                    .take(filter.limit() as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn history(&self, agent_id: &str) -> CareResult<Vec<ConversationAnalysis>> {
        let map = self.by_agent.lock().unwrap();
        Ok(map.get(agent_id).cloned().unwrap_or_default())
    }

    async fn get(&self, agent_id: &str, id: Uuid) -> CareResult<Option<ConversationAnalysis>> {
        let map = self.by_agent.lock().unwrap();
        Ok(map
            .get(agent_id)
            .and_then(|all| all.iter().find(|a| a.id == id).cloned()))
    }

    async fn histories(&self) -> CareResult<Vec<(String, Vec<ConversationAnalysis>)>> {
        let map = self.by_agent.lock().unwrap();
        Ok(map
            .iter()
            .map(|(agent, all)| (agent.clone(), all.clone()))
            .collect())
    }
}
