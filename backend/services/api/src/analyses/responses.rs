use care_scoring::ConversationAnalysis;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AnalysisHistoryResponse {
    pub data: Vec<ConversationAnalysis>,
    pub count: usize,
}
