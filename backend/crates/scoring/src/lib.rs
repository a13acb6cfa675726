//! CARE conversation scoring: keyword-based pillar scores, templated
//! insights, and per-agent performance aggregation.

pub mod analysis;
pub mod config;
pub mod criteria;
pub mod engine;
pub mod insights;
pub mod jitter;
pub mod performance;
pub mod pillar;
pub mod scorers;
pub mod trace;

pub use analysis::{analyze_conversation, ConversationAnalysis, ANONYMOUS_LEAD};
pub use config::ScoringConfig;
pub use engine::{score, score_with_trace};
pub use insights::{derive_insights, ExamplePair, Insights};
pub use jitter::{FixedJitter, Jitter, RandomJitter};
pub use performance::{aggregate, rank_agents, AgentPerformance, Trend};
pub use pillar::{CareScore, Pillar};
pub use trace::{PillarTrace, ScoreTrace};
