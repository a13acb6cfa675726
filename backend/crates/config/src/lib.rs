pub mod env;
pub mod tracing_init;

pub use env::{AlertsConfig, AppConfig, ScoringSettings};
pub use tracing_init::init_tracing;
