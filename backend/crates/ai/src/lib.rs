//! Clients for the external AI collaborators: text generation and
//! speech (text-to-speech / speech-to-text), plus strict parsing of
//! AI-generated dashboard insights.

pub mod error;
pub mod generative;
mod http;
pub mod insights;
pub mod speech;

pub use error::AiClientError;
pub use generative::{GenerativeClient, GenerativeClientConfig};
pub use insights::{generate_dashboard_insights, DashboardSnapshot, InsightBundle};
pub use speech::{SpeechClient, SpeechClientConfig, Voice};
