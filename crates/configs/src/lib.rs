use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Where the collection files live and how long a request may wait for a collection lock.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_users_file")]
    pub users_file: String,
    #[serde(default = "default_tweets_file")]
    pub tweets_file: String,
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            users_file: default_users_file(),
            tweets_file: default_tweets_file(),
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_users_file() -> String { "users.json".into() }
fn default_tweets_file() -> String { "tweets.json".into() }
fn default_lock_timeout_ms() -> u64 { 5_000 }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to environment variables
    /// when the file is absent, then normalize and validate.
    pub fn load_and_validate() -> Result<Self> {
        Self::load_and_validate_from(&config_path())
    }

    /// Same as [`AppConfig::load_and_validate`] for an explicit path. Only a missing
    /// file falls back to the environment; unreadable or malformed files are errors.
    pub fn load_and_validate_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => Self::from_env(),
            Err(e) => return Err(e.context(format!("invalid config file {path}"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Build a config purely from environment variables, using defaults for anything unset.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.server.worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .or(cfg.server.worker_threads);
        if let Ok(dir) = std::env::var("DATA_DIR") {
            cfg.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(ms) = std::env::var("STORAGE_LOCK_TIMEOUT_MS").ok().and_then(|v| v.parse::<u64>().ok()) {
            cfg.storage.lock_timeout_ms = ms;
        }
        if let Ok(v) = std::env::var("LOG_JSON") {
            cfg.logging.json = matches!(v.as_str(), "1" | "true" | "TRUE");
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(anyhow!("storage.data_dir is empty"));
        }
        for (key, name) in [("storage.users_file", &self.users_file), ("storage.tweets_file", &self.tweets_file)] {
            if name.trim().is_empty() {
                return Err(anyhow!("{key} is empty"));
            }
            if name.contains('/') || name.contains('\\') {
                return Err(anyhow!("{key} must be a bare file name, got {name}"));
            }
        }
        if self.users_file == self.tweets_file {
            return Err(anyhow!("storage.users_file and storage.tweets_file must differ"));
        }
        if self.lock_timeout_ms == 0 {
            return Err(anyhow!("storage.lock_timeout_ms must be a positive number of milliseconds"));
        }
        Ok(())
    }

    pub fn users_path(&self) -> PathBuf { self.data_dir.join(&self.users_file) }

    pub fn tweets_path(&self) -> PathBuf { self.data_dir.join(&self.tweets_file) }

    pub fn lock_timeout(&self) -> Duration { Duration::from_millis(self.lock_timeout_ms) }
}
