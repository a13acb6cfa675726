use serde::Deserialize;
use serde_json::Value;

/// A free-text question for the sales assistant. `data` switches the
/// request to a data analysis of the attached JSON payload.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub context: Option<String>,
    pub data: Option<Value>,
}
