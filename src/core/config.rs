use std::{env, path::PathBuf};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:3000",
    "http://localhost:8080",
    "https://skill4edge.com",
    "https://www.skill4edge.com",
];

const MAX_SIMULATED_LATENCY_MS: u64 = 10_000;
const MAX_SESSION_EXPIRE_MINUTES: u64 = 60 * 24 * 366;
const MAX_SESSION_IDLE_MINUTES: u64 = 60 * 24 * 366;
const MAX_SESSION_SWEEP_SECONDS: u64 = 60 * 60 * 24;

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    server: ServerSettings,
    runtime: RuntimeSettings,
    api: ApiSettings,
    security: SecuritySettings,
    cors: CorsSettings,
    catalog: CatalogSettings,
    session: SessionSettings,
    telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub(crate) struct ServerSettings {
    host: ServerHost,
    port: ServerPort,
}

#[derive(Debug, Clone)]
pub(crate) struct ApiSettings {
    pub(crate) project_name: String,
    pub(crate) version: String,
    pub(crate) api_v1_str: String,
}

#[derive(Debug, Clone)]
pub(crate) struct SecuritySettings {
    pub(crate) secret_key: String,
    pub(crate) secret_key_generated: bool,
    pub(crate) session_expire_minutes: u64,
    pub(crate) algorithm: String,
}

#[derive(Debug, Clone)]
pub(crate) struct CorsSettings {
    pub(crate) origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct CatalogSettings {
    pub(crate) path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub(crate) struct SessionSettings {
    pub(crate) simulated_latency_ms: u64,
    pub(crate) idle_minutes: u64,
    pub(crate) sweep_seconds: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct TelemetrySettings {
    pub(crate) log_level: String,
    pub(crate) json: bool,
    pub(crate) prometheus_enabled: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct RuntimeSettings {
    pub(crate) environment: Environment,
    pub(crate) strict_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Environment {
    Development,
    Production,
    Staging,
    Test,
}

impl Environment {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Staging => "staging",
            Environment::Test => "test",
        }
    }

    fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ServerHost(String);

#[derive(Debug, Clone, Copy)]
pub(crate) struct ServerPort(u16);

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("invalid server host: {0}")]
    InvalidHost(String),
    #[error("invalid server port: {0}")]
    InvalidPort(String),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("invalid cors origins: {0}")]
    InvalidCors(String),
    #[error("missing required secret for {0}")]
    MissingSecret(&'static str),
}

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let host = env_or_default("SKILL4EDGE_HOST", "0.0.0.0");
        let port = env_or_default("SKILL4EDGE_PORT", "8000");

        let environment = parse_environment(
            env_optional("SKILL4EDGE_ENV").or_else(|| env_optional("ENVIRONMENT")),
        );
        let strict_config = env_optional("SKILL4EDGE_STRICT_CONFIG")
            .map(|value| parse_bool(&value))
            .unwrap_or(false)
            || environment.is_production();

        let project_name = env_or_default("PROJECT_NAME", "Skill4Edge API");
        let version = env_or_default("VERSION", env!("CARGO_PKG_VERSION"));
        let api_v1_str = env_or_default("API_V1_STR", "/api/v1");

        let (secret_key, secret_key_generated) = match env_optional("SECRET_KEY") {
            Some(value) => (value, false),
            None => (generate_secret_key(), true),
        };
        let session_expire_minutes = parse_u64(
            "SESSION_EXPIRE_MINUTES",
            env_or_default("SESSION_EXPIRE_MINUTES", "720"),
        )?;
        let algorithm = env_or_default("ALGORITHM", "HS256");

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        let catalog_path = env_optional("CATALOG_PATH").map(PathBuf::from);

        let simulated_latency_ms =
            parse_u64("SIMULATED_LATENCY_MS", env_or_default("SIMULATED_LATENCY_MS", "0"))?;
        let idle_minutes =
            parse_u64("SESSION_IDLE_MINUTES", env_or_default("SESSION_IDLE_MINUTES", "120"))?;
        let sweep_seconds =
            parse_u64("SESSION_SWEEP_SECONDS", env_or_default("SESSION_SWEEP_SECONDS", "60"))?;

        let log_level = env_or_default("SKILL4EDGE_LOG_LEVEL", "info");
        let json = env_optional("SKILL4EDGE_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);
        let prometheus_enabled =
            env_optional("PROMETHEUS_ENABLED").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            server: ServerSettings {
                host: ServerHost::parse(host)?,
                port: ServerPort::parse(port)?,
            },
            runtime: RuntimeSettings { environment, strict_config },
            api: ApiSettings { project_name, version, api_v1_str },
            security: SecuritySettings {
                secret_key,
                secret_key_generated,
                session_expire_minutes,
                algorithm,
            },
            cors: CorsSettings { origins: cors_origins },
            catalog: CatalogSettings { path: catalog_path },
            session: SessionSettings { simulated_latency_ms, idle_minutes, sweep_seconds },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled },
        };

        settings.validate()?;

        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server.port.0)
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host.0
    }

    pub(crate) fn server_port(&self) -> u16 {
        self.server.port.0
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn security(&self) -> &SecuritySettings {
        &self.security
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn catalog(&self) -> &CatalogSettings {
        &self.catalog
    }

    pub(crate) fn session(&self) -> &SessionSettings {
        &self.session
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SESSION_EXPIRE_MINUTES).contains(&self.security.session_expire_minutes) {
            return Err(ConfigError::InvalidValue {
                field: "SESSION_EXPIRE_MINUTES",
                value: self.security.session_expire_minutes.to_string(),
            });
        }

        if self.session.simulated_latency_ms > MAX_SIMULATED_LATENCY_MS {
            return Err(ConfigError::InvalidValue {
                field: "SIMULATED_LATENCY_MS",
                value: self.session.simulated_latency_ms.to_string(),
            });
        }

        if !(1..=MAX_SESSION_IDLE_MINUTES).contains(&self.session.idle_minutes) {
            return Err(ConfigError::InvalidValue {
                field: "SESSION_IDLE_MINUTES",
                value: self.session.idle_minutes.to_string(),
            });
        }

        if !(1..=MAX_SESSION_SWEEP_SECONDS).contains(&self.session.sweep_seconds) {
            return Err(ConfigError::InvalidValue {
                field: "SESSION_SWEEP_SECONDS",
                value: self.session.sweep_seconds.to_string(),
            });
        }

        if !(self.runtime.strict_config || self.runtime.environment.is_production()) {
            return Ok(());
        }

        if self.security.secret_key_generated {
            return Err(ConfigError::MissingSecret("SECRET_KEY"));
        }

        Ok(())
    }
}

impl ServerHost {
    fn parse(value: String) -> Result<Self, ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidHost(value));
        }
        Ok(Self(value))
    }
}

impl ServerPort {
    fn parse(value: String) -> Result<Self, ConfigError> {
        let parsed: u16 = value.parse().map_err(|_| ConfigError::InvalidPort(value.clone()))?;
        if parsed == 0 {
            return Err(ConfigError::InvalidPort(value));
        }
        Ok(Self(parsed))
    }
}

fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn env_or_default(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}

fn parse_u64(field: &'static str, value: String) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidValue { field, value })
}

fn parse_cors_origins(value: Option<String>) -> Result<Vec<String>, ConfigError> {
    let Some(raw) = value else {
        return Ok(default_cors_origins());
    };

    if raw.trim().is_empty() {
        return Ok(default_cors_origins());
    }

    if raw.trim_start().starts_with('[') {
        let parsed: Vec<String> =
            serde_json::from_str(&raw).map_err(|_| ConfigError::InvalidCors(raw.clone()))?;
        if parsed.is_empty() {
            return Ok(default_cors_origins());
        }
        return Ok(parsed);
    }

    let items: Vec<String> = raw
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();

    if items.is_empty() {
        return Ok(default_cors_origins());
    }

    Ok(items)
}

fn default_cors_origins() -> Vec<String> {
    DEFAULT_CORS_ORIGINS.iter().map(|item| item.to_string()).collect()
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES" | "on" | "ON")
}

fn parse_environment(value: Option<String>) -> Environment {
    match value.as_deref().map(|val| val.to_lowercase()) {
        Some(ref val) if val == "production" || val == "prod" => Environment::Production,
        Some(ref val) if val == "staging" => Environment::Staging,
        Some(ref val) if val == "test" || val == "testing" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Session tokens only need to outlive the process, so a missing key is
/// replaced with a random one held in memory.
fn generate_secret_key() -> String {
    let mut bytes = [0u8; 64];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::security;
    use crate::test_support;

    #[test]
    fn parse_cors_origins_json() {
        let raw = "[\"http://a\",\"http://b\"]".to_string();
        let parsed = parse_cors_origins(Some(raw)).expect("cors json");
        assert_eq!(parsed, vec!["http://a".to_string(), "http://b".to_string()]);
    }

    #[test]
    fn parse_cors_origins_csv() {
        let raw = "http://a, http://b".to_string();
        let parsed = parse_cors_origins(Some(raw)).expect("cors csv");
        assert_eq!(parsed, vec!["http://a".to_string(), "http://b".to_string()]);
    }

    #[test]
    fn parse_cors_origins_defaults_on_empty() {
        let parsed = parse_cors_origins(Some(" ".to_string())).expect("cors empty");
        assert_eq!(parsed, default_cors_origins());
    }

    #[test]
    fn parse_bool_variants() {
        assert!(parse_bool("1"));
        assert!(parse_bool("true"));
        assert!(parse_bool("yes"));
        assert!(parse_bool("on"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
    }

    #[test]
    fn parse_environment_variants() {
        assert_eq!(parse_environment(Some("prod".to_string())), Environment::Production);
        assert_eq!(parse_environment(Some("staging".to_string())), Environment::Staging);
        assert_eq!(parse_environment(Some("testing".to_string())), Environment::Test);
        assert_eq!(parse_environment(None), Environment::Development);
    }

    #[tokio::test]
    async fn generated_secret_is_rejected_in_strict_mode() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();
        env::remove_var("SECRET_KEY");
        env::set_var("SKILL4EDGE_STRICT_CONFIG", "1");

        let err = Settings::load().expect_err("strict config without secret");
        assert!(matches!(err, ConfigError::MissingSecret("SECRET_KEY")));

        env::set_var("SECRET_KEY", "explicit-secret");
        let settings = Settings::load().expect("strict config with secret");
        assert!(!settings.security().secret_key_generated);
        env::set_var("SKILL4EDGE_STRICT_CONFIG", "0");
    }

    #[tokio::test]
    async fn excessive_latency_is_rejected() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();
        env::set_var("SIMULATED_LATENCY_MS", "60000");

        let err = Settings::load().expect_err("latency cap");
        assert!(matches!(err, ConfigError::InvalidValue { field: "SIMULATED_LATENCY_MS", .. }));
        env::set_var("SIMULATED_LATENCY_MS", "0");
    }

    #[tokio::test]
    async fn session_durations_are_bounded() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();

        for (field, too_large) in [
            ("SESSION_EXPIRE_MINUTES", "9000000000000"),
            ("SESSION_IDLE_MINUTES", "9000000000000"),
            ("SESSION_SWEEP_SECONDS", "9000000000000"),
        ] {
            env::set_var(field, too_large);
            let err = Settings::load().expect_err("duration cap");
            assert!(
                matches!(&err, ConfigError::InvalidValue { field: f, .. } if *f == field),
                "{field}: {err:?}"
            );

            env::set_var(field, "0");
            assert!(Settings::load().is_err(), "{field} = 0 accepted");
            env::remove_var(field);
        }

        env::set_var("SESSION_EXPIRE_MINUTES", (MAX_SESSION_EXPIRE_MINUTES).to_string());
        env::set_var("SESSION_IDLE_MINUTES", (MAX_SESSION_IDLE_MINUTES).to_string());
        let settings = Settings::load().expect("bounds are inclusive");
        assert_eq!(settings.security().session_expire_minutes, MAX_SESSION_EXPIRE_MINUTES);
        assert!(security::create_session_token(uuid::Uuid::new_v4(), &settings, None).is_ok());
        env::remove_var("SESSION_EXPIRE_MINUTES");
        env::remove_var("SESSION_IDLE_MINUTES");
    }
}
