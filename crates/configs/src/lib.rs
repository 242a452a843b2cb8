//! Application configuration loaded from `config.toml` with env fallbacks.
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub log: LogConfig,
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
        Self { host: "127.0.0.1".into(), port: 5000, worker_threads: Some(4) }
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
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self { Self { format: default_log_format() } }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_log_format() -> String { "compact".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// File config when present, otherwise env-only defaults. Always validated.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.server.normalize_from_env();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    /// `SERVER_HOST`, `SERVER_PORT` and `TOKIO_WORKER_THREADS` override file values when set.
    pub fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            self.worker_threads = Some(w);
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

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

    pub fn connect_timeout(&self) -> Duration { Duration::from_secs(self.connect_timeout_secs) }
    pub fn acquire_timeout(&self) -> Duration { Duration::from_secs(self.acquire_timeout_secs) }
    pub fn idle_timeout(&self) -> Duration { Duration::from_secs(self.idle_timeout_secs) }
    pub fn max_lifetime(&self) -> Duration { Duration::from_secs(self.max_lifetime_secs) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let cfg = load_from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            worker_threads = 2

            [database]
            url = "postgres://u:p@localhost/recs"
            max_connections = 5

            [log]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.database.min_connections, 2);
        assert_eq!(cfg.log.format, "json");
    }

    #[test]
    fn missing_sections_use_defaults() {
        let cfg = load_from_str("").unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.database.acquire_timeout_secs, 30);
        assert_eq!(cfg.log.format, "compact");
    }

    #[test]
    fn validate_rejects_non_postgres_url() {
        let db = DatabaseConfig { url: "mysql://x".into(), ..Default::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_pool_bounds() {
        let db = DatabaseConfig {
            url: "postgres://localhost/recs".into(),
            min_connections: 4,
            max_connections: 2,
            ..Default::default()
        };
        assert!(db.validate().is_err());
    }

    #[test]
    fn server_normalize_fills_blank_host_and_threads() {
        let mut s = ServerConfig { host: "  ".into(), port: 1, worker_threads: Some(0) };
        s.normalize().unwrap();
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.worker_threads, Some(4));
    }
}
