use tracing_subscriber::{fmt, EnvFilter};

const FALLBACK_LEVEL: &str = "info";

/// `RUST_LOG` wins over the configured level. An unparsable directive falls back to `info`.
fn filter_for(rust_log: Option<&str>, level: &str) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(FALLBACK_LEVEL))
}

/// Install the global fmt subscriber at `level` (normally the `log_level`
/// of the already-loaded config, so `.env` values apply).
pub fn init_tracing(level: &str) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = filter_for(rust_log.as_deref(), level);
    fmt().with_env_filter(filter).with_target(true).init();
}
