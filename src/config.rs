// src/config.rs - Configuration management
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use anyhow::{Context, Result};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub session: SessionConfig,
    pub timers: TimerConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    pub keep_alive: u64,
    pub client_timeout: u64,
    pub client_shutdown: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
    pub max_request_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    /// Sessions untouched for this long are dropped by the sweeper.
    pub idle_minutes: u64,
    pub sweep_interval_seconds: u64,
}

/// Durations of the transient banners, in milliseconds.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TimerConfig {
    pub success_banner_ms: u64,
    pub backup_banner_ms: u64,
    pub refresh_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
            keep_alive: 30,
            client_timeout: 30,
            client_shutdown: 5,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
            max_request_size: 256 * 1024,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_minutes: 60,
            sweep_interval_seconds: 60,
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            success_banner_ms: 3000,
            backup_banner_ms: 5000,
            refresh_ms: 1000,
        }
    }
}

impl TimerConfig {
    pub fn success_banner(&self) -> Duration {
        Duration::from_millis(self.success_banner_ms)
    }

    pub fn backup_banner(&self) -> Duration {
        Duration::from_millis(self.backup_banner_ms)
    }

    pub fn refresh(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.idle_minutes as i64)
    }
}

pub fn load_config() -> Result<Config> {
    load_env_file()?;

    let mut config = if let Ok(config_file) = env::var("CONFIG_FILE") {
        let path = Path::new(&config_file);
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", config_file))?;
        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", config_file))?
    } else {
        Config::default()
    };

    override_with_env(&mut config);

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn override_with_env(config: &mut Config) {
    if let Ok(host) = env::var("BIND_ADDRESS") {
        config.server.host = host;
    }
    if let Ok(port_str) = env::var("EFFICIENCITY_PORT") {
        if let Ok(port) = port_str.parse::<u16>() {
            config.server.port = port;
        }
    }
    if let Ok(workers_str) = env::var("EFFICIENCITY_WORKERS") {
        if let Ok(workers) = workers_str.parse::<usize>() {
            config.server.workers = Some(workers);
        }
    }
    if let Ok(origins_str) = env::var("ALLOWED_ORIGINS") {
        config.security.allowed_origins = origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Ok(idle_str) = env::var("SESSION_IDLE_MINUTES") {
        if let Ok(idle) = idle_str.parse::<u64>() {
            config.session.idle_minutes = idle;
        }
    }
    if let Ok(level) = env::var("RUST_LOG") {
        config.logging.level = level;
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.session.idle_minutes == 0 {
            return Err(anyhow::anyhow!("session.idle_minutes must be greater than zero"));
        }

        if self.session.sweep_interval_seconds == 0 {
            return Err(anyhow::anyhow!("session.sweep_interval_seconds must be greater than zero"));
        }

        let timers = [
            ("timers.success_banner_ms", self.timers.success_banner_ms),
            ("timers.backup_banner_ms", self.timers.backup_banner_ms),
            ("timers.refresh_ms", self.timers.refresh_ms),
        ];
        if let Some((name, _)) = timers.iter().find(|(_, ms)| *ms == 0) {
            return Err(anyhow::anyhow!("{} must be greater than zero", name));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        env::var("EFFICIENCITY_ENV").map(|v| v == "production").unwrap_or(false)
    }

    pub fn print_startup_info(&self) {
        log::info!("🏛️  efficiencity starting up...");
        log::info!("🌐 Server: {}:{}", self.server.host, self.server.port);
        log::info!("🗂️  Storage: in-memory mock data (per view, per session)");
        log::info!("⏱️  Banners: {}ms / backup {}ms", self.timers.success_banner_ms, self.timers.backup_banner_ms);
        log::info!("🔑 Sessions: idle timeout {} min", self.session.idle_minutes);
        log::info!("📊 Logging: {} level", self.logging.level);

        if !self.is_production() {
            log::warn!("🚧 Running in development mode");
        }
    }
}

pub fn load_env_file() -> Result<()> {
    if let Ok(env_file) = env::var("ENV_FILE") {
        dotenvy::from_filename(&env_file)
            .with_context(|| format!("Failed to load environment file: {}", env_file))?;
    } else if Path::new(".env").exists() {
        dotenvy::dotenv().context("Failed to load .env file")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.timers.success_banner(), Duration::from_secs(3));
        assert_eq!(config.timers.backup_banner(), Duration::from_secs(5));
        assert_eq!(config.timers.refresh(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.timers.success_banner_ms = 0;
        assert!(config.validate().is_err());

        config.timers.success_banner_ms = 3000;
        config.session.idle_minutes = 0;
        assert!(config.validate().is_err());

        config.session.idle_minutes = 5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_partial_document() -> Result<()> {
        let toml_content = r#"
        [server]
        host = "0.0.0.0"
        port = 9000

        [timers]
        success_banner_ms = 250
        "#;

        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(toml_content.as_bytes())?;

        let raw = fs::read_to_string(temp_file.path())?;
        let config: Config = toml::from_str(&raw)?;
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.timers.success_banner_ms, 250);
        // Missing keys fall back to defaults
        assert_eq!(config.timers.backup_banner_ms, 5000);
        assert_eq!(config.session.idle_minutes, 60);

        Ok(())
    }
}
