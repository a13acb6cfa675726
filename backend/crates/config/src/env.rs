use care_common::error::{CareError, CareResult};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads required vars.
    pub fn from_env() -> CareResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        Ok(Self {
            database_url: get_var("DATABASE_URL")?,
            database_max_connections: parse_var_or("DATABASE_MAX_CONNECTIONS", 10)?,
            host: get_var_or("HOST", "0.0.0.0"),
            port: parse_var_or("PORT", 8080)?,
            log_level: get_var_or("LOG_LEVEL", "info"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Knobs of the analysis request layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    /// When set, every request scores with a jitter source seeded from this
    /// value, so identical transcripts always get identical scores.
    pub seed: Option<u64>,
    /// Emulated processing latency before scoring.
    pub analysis_delay_ms: u64,
}

impl ScoringSettings {
    pub fn from_env() -> CareResult<Self> {
        let seed = match env::var("SCORING_SEED") {
            Ok(raw) => Some(
                raw.parse()
                    .map_err(|e| CareError::Config(format!("invalid SCORING_SEED: {e}")))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            seed,
            analysis_delay_ms: parse_var_or("ANALYSIS_DELAY_MS", 0)?,
        })
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }
}

/// Settings of the alert monitor service.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertsConfig {
    pub host: String,
    pub log_level: String,
    pub port: u16,
    pub interval_secs: u64,
    pub history_limit: usize,
}

impl AlertsConfig {
    /// `ALERTS_PORT` defaults to one above `PORT`.
    pub fn from_env() -> CareResult<Self> {
        let _ = dotenvy::dotenv();

        let api_port: u16 = parse_var_or("PORT", 8080)?;
        let interval_secs = parse_var_or("ALERT_INTERVAL_SECS", 30)?;
        if interval_secs == 0 {
            return Err(CareError::Config(
                "ALERT_INTERVAL_SECS must be positive".to_string(),
            ));
        }

        Ok(Self {
            host: get_var_or("HOST", "0.0.0.0"),
            log_level: get_var_or("LOG_LEVEL", "info"),
            port: parse_var_or("ALERTS_PORT", api_port.saturating_add(1))?,
            interval_secs,
            history_limit: parse_var_or("ALERT_HISTORY_LIMIT", 50)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

fn get_var(key: &str) -> CareResult<String> {
    env::var(key).map_err(|_| CareError::Config(format!("{key} is required but not set")))
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_var_or<T>(key: &str, default: T) -> CareResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| CareError::Config(format!("invalid {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn config_from_env_succeeds_with_required_vars() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::set_var("DATABASE_URL", "postgres://localhost/care_test");
        env::remove_var("PORT");

        let cfg = AppConfig::from_env().expect("should parse config");
        assert_eq!(cfg.database_url, "postgres://localhost/care_test");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.database_max_connections, 10);

        env::remove_var("DATABASE_URL");
    }

    #[test]
    fn config_from_env_fails_without_database_url() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::remove_var("DATABASE_URL");
        let result = AppConfig::from_env();
        assert!(matches!(result, Err(CareError::Config(_))));
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::set_var("DATABASE_URL", "postgres://localhost/care_test");
        env::set_var("PORT", "not-a-port");
        let result = AppConfig::from_env();
        assert!(matches!(result, Err(CareError::Config(msg)) if msg.contains("PORT")));

        env::remove_var("PORT");
        env::remove_var("DATABASE_URL");
    }

    #[test]
    fn pool_size_and_log_level_come_from_env() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::set_var("DATABASE_URL", "postgres://localhost/care_test");
        env::set_var("DATABASE_MAX_CONNECTIONS", "3");
        env::set_var("LOG_LEVEL", "debug");
        let cfg = AppConfig::from_env().expect("should parse config");
        assert_eq!(cfg.database_max_connections, 3);
        assert_eq!(cfg.log_level, "debug");

        let alerts = AlertsConfig::from_env().expect("should parse alerts config");
        assert_eq!(alerts.log_level, "debug");

        env::remove_var("DATABASE_MAX_CONNECTIONS");
        env::remove_var("LOG_LEVEL");
        env::remove_var("DATABASE_URL");
    }

    #[test]
    fn scoring_settings_defaults() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::remove_var("SCORING_SEED");
        env::remove_var("ANALYSIS_DELAY_MS");
        let settings = ScoringSettings::from_env().expect("defaults should parse");
        assert_eq!(settings.seed, None);
        assert_eq!(settings.analysis_delay(), Duration::ZERO);
    }

    #[test]
    fn scoring_settings_reads_seed_and_delay() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::set_var("SCORING_SEED", "42");
        env::set_var("ANALYSIS_DELAY_MS", "2000");
        let settings = ScoringSettings::from_env().expect("should parse");
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.analysis_delay(), Duration::from_secs(2));

        env::remove_var("SCORING_SEED");
        env::remove_var("ANALYSIS_DELAY_MS");
    }

    #[test]
    fn alerts_config_defaults_follow_api_port() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::set_var("PORT", "9000");
        env::remove_var("ALERTS_PORT");
        env::remove_var("ALERT_INTERVAL_SECS");
        env::remove_var("ALERT_HISTORY_LIMIT");
        let cfg = AlertsConfig::from_env().expect("defaults should parse");
        assert_eq!(cfg.port, 9001);
        assert_eq!(cfg.interval(), Duration::from_secs(30));
        assert_eq!(cfg.history_limit, 50);

        env::remove_var("PORT");
    }

    #[test]
    fn alerts_config_rejects_zero_interval() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::set_var("ALERT_INTERVAL_SECS", "0");
        let result = AlertsConfig::from_env();
        assert!(
            matches!(result, Err(CareError::Config(msg)) if msg.contains("ALERT_INTERVAL_SECS"))
        );

        env::remove_var("ALERT_INTERVAL_SECS");
    }

    #[test]
    fn bind_addr_formats_correctly() {
        let cfg = AppConfig {
            database_url: String::new(),
            database_max_connections: 10,
            host: "127.0.0.1".to_owned(),
            port: 3000,
            log_level: "debug".to_owned(),
        };
        assert_eq!(cfg.bind_addr(), "127.0.0.1:3000");
    }
}
