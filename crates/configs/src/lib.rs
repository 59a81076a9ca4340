use anyhow::anyhow;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            api: ApiConfig::default(),
            rate_limit: RateLimitConfig::default(),
            logging: LoggingConfig::default(),
            environment: default_environment(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 3004, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            run_migrations: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// `*` or a comma separated list of origins.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            cors_origin: default_cors_origin(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl ApiConfig {
    /// `None` means any origin.
    pub fn cors_origins(&self) -> Option<Vec<String>> {
        let raw = self.cors_origin.trim();
        if raw.is_empty() || raw == "*" {
            return None;
        }
        Some(
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { enabled: true, window_ms: default_window_ms(), max_requests: default_max_requests() }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: Option<String>,
    /// `compact` or `json`
    #[serde(default)]
    pub format: Option<String>,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_true() -> bool { true }
fn default_prefix() -> String { "/api/v1".into() }
fn default_cors_origin() -> String { "*".into() }
fn default_body_limit() -> usize { 10 * 1024 * 1024 }
fn default_window_ms() -> u64 { 15 * 60 * 1000 }
fn default_max_requests() -> u32 { 100 }
fn default_environment() -> String { "development".into() }

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {path}"))?;
    let cfg: AppConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {path}"))?;
    Ok(cfg)
}

impl AppConfig {
    /// Defaults, then the TOML file (when present), then the process environment.
    ///
    /// An explicit `CONFIG_PATH` must exist; the implicit `config.toml` is optional.
    pub fn load() -> Result<Self> {
        let mut cfg = match std::env::var("CONFIG_PATH") {
            Ok(path) => load_from_file(&path)?,
            Err(_) if Path::new("config.toml").exists() => load_from_file("config.toml")?,
            Err(_) => AppConfig::default(),
        };
        cfg.apply_env_from(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay values from a key lookup (the process environment in production).
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(v) = get("HOST") {
            self.server.host = v;
        }
        if let Some(v) = get("PORT") {
            self.server.port = parse_var("PORT", &v)?;
        }
        if let Some(v) = get("TOKIO_WORKER_THREADS") {
            self.server.worker_threads = Some(parse_var("TOKIO_WORKER_THREADS", &v)?);
        }
        if let Some(v) = get("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(v) = get("DB_MAX_CONNECTIONS") {
            self.database.max_connections = parse_var("DB_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = get("DB_MIN_CONNECTIONS") {
            self.database.min_connections = parse_var("DB_MIN_CONNECTIONS", &v)?;
        }
        if let Some(v) = get("DB_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs = parse_var("DB_CONNECT_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = get("RUN_MIGRATIONS") {
            self.database.run_migrations = parse_bool("RUN_MIGRATIONS", &v)?;
        }
        if let Some(v) = get("API_PREFIX") {
            self.api.prefix = v;
        }
        if let Some(v) = get("CORS_ORIGIN") {
            self.api.cors_origin = v;
        }
        if let Some(v) = get("RATE_LIMIT_ENABLED") {
            self.rate_limit.enabled = parse_bool("RATE_LIMIT_ENABLED", &v)?;
        }
        if let Some(v) = get("RATE_LIMIT_WINDOW_MS") {
            self.rate_limit.window_ms = parse_var("RATE_LIMIT_WINDOW_MS", &v)?;
        }
        if let Some(v) = get("RATE_LIMIT_MAX_REQUESTS") {
            self.rate_limit.max_requests = parse_var("RATE_LIMIT_MAX_REQUESTS", &v)?;
        }
        if let Some(v) = get("LOG_LEVEL") {
            self.logging.level = Some(v);
        }
        if let Some(v) = get("LOG_FORMAT") {
            self.logging.format = Some(v);
        }
        if let Some(v) = get("APP_ENV").or_else(|| get("NODE_ENV")) {
            self.environment = v;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.validate()?;
        self.api.normalize()?;
        self.rate_limit.validate()?;
        self.environment = self.environment.trim().to_lowercase();
        if self.environment.is_empty() {
            self.environment = default_environment();
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.parse::<T>().map_err(|_| anyhow!("{key} has an invalid value: {raw}"))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("{key} must be a boolean, got {raw}")),
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl ApiConfig {
    fn normalize(&mut self) -> Result<()> {
        let prefix = self.prefix.trim().trim_end_matches('/').to_string();
        if !prefix.starts_with('/') {
            return Err(anyhow!("api.prefix must start with '/', got {:?}", self.prefix));
        }
        self.prefix = prefix;
        if self.body_limit_bytes == 0 {
            self.body_limit_bytes = default_body_limit();
        }
        Ok(())
    }
}

impl RateLimitConfig {
    fn validate(&self) -> Result<()> {
        if self.window_ms == 0 {
            return Err(anyhow!("rate_limit.window_ms must be > 0"));
        }
        if self.max_requests == 0 {
            return Err(anyhow!("rate_limit.max_requests must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn with_env(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars = env(pairs);
        let mut cfg = AppConfig::default();
        cfg.apply_env_from(|k| vars.get(k).cloned())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    #[test]
    fn defaults_match_service_conventions() {
        let cfg = with_env(&[("DATABASE_URL", "postgres://u:p@localhost/warranty")]).unwrap();
        assert_eq!(cfg.server.port, 3004);
        assert_eq!(cfg.api.prefix, "/api/v1");
        assert_eq!(cfg.api.cors_origin, "*");
        assert_eq!(cfg.rate_limit.window_ms, 900_000);
        assert_eq!(cfg.rate_limit.max_requests, 100);
        assert_eq!(cfg.environment, "development");
        assert!(cfg.database.run_migrations);
        assert!(!cfg.is_production());
    }

    #[test]
    fn env_overrides_apply() {
        let cfg = with_env(&[
            ("DATABASE_URL", "postgresql://localhost/w"),
            ("PORT", "8081"),
            ("API_PREFIX", "/api/v2/"),
            ("RATE_LIMIT_MAX_REQUESTS", "5"),
            ("CORS_ORIGIN", "https://a.example, https://b.example"),
            ("NODE_ENV", "Production"),
            ("RUN_MIGRATIONS", "false"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(cfg.server.port, 8081);
        assert_eq!(cfg.api.prefix, "/api/v2");
        assert_eq!(cfg.rate_limit.max_requests, 5);
        assert!(cfg.is_production());
        assert!(!cfg.database.run_migrations);
        assert_eq!(cfg.logging.format.as_deref(), Some("json"));
        assert_eq!(
            cfg.api.cors_origins().unwrap(),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn app_env_wins_over_node_env() {
        let cfg = with_env(&[
            ("DATABASE_URL", "postgres://localhost/w"),
            ("APP_ENV", "staging"),
            ("NODE_ENV", "production"),
        ])
        .unwrap();
        assert_eq!(cfg.environment, "staging");
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(with_env(&[]).is_err(), "missing database url");
        assert!(with_env(&[("DATABASE_URL", "mysql://localhost/w")]).is_err());
        assert!(with_env(&[("DATABASE_URL", "postgres://h/w"), ("PORT", "0")]).is_err());
        assert!(with_env(&[("DATABASE_URL", "postgres://h/w"), ("PORT", "abc")]).is_err());
        assert!(with_env(&[("DATABASE_URL", "postgres://h/w"), ("API_PREFIX", "api")]).is_err());
        assert!(with_env(&[("DATABASE_URL", "postgres://h/w"), ("RATE_LIMIT_WINDOW_MS", "0")]).is_err());
        assert!(with_env(&[("DATABASE_URL", "postgres://h/w"), ("RUN_MIGRATIONS", "maybe")]).is_err());
    }

    #[test]
    fn wildcard_cors_means_any_origin() {
        assert!(ApiConfig::default().cors_origins().is_none());
    }

    #[test]
    fn toml_sections_are_optional() {
        let cfg: AppConfig = toml::from_str(
            r#"
            environment = "test"
            [server]
            host = "127.0.0.1"
            port = 9000
            [database]
            url = "postgres://localhost/w"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.api.prefix, "/api/v1");
        assert_eq!(cfg.rate_limit.max_requests, 100);
        assert_eq!(cfg.environment, "test");
    }
}
