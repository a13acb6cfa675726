use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub transcript: String,
    pub lead_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordingParams {
    pub lead_name: Option<String>,
}
