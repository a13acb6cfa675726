use care_scoring::AgentPerformance;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RankingsResponse {
    pub data: Vec<AgentPerformance>,
    pub count: usize,
}
