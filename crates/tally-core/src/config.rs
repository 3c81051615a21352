//! Ledger connection configuration
//!
//! ## Configuration Resolution
//!
//! Config is resolved in three layers, later layers winning:
//! 1. Built-in defaults
//! 2. TOML file: an explicit path, else the data dir override
//!    (~/.local/share/tally/config/ledger.toml)
//! 3. Environment variables (`LEDGER_BACKEND`, `LEDGER_API_URL`,
//!    `LEDGER_API_KEY`, `LEDGER_BUDGET_ID`, `LEDGER_TIMEOUT_SECS`)
//!
//! ```toml
//! [ledger]
//! backend = "http"
//! url = "http://localhost:5007/v1"
//! budget_id = "a1b2c3"
//! timeout_secs = 30
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::error::{Error, Result};

/// Which ledger backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Ledger REST API over HTTP
    #[default]
    Http,
    /// In-process fixture data (development and tests)
    Mock,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Mock => "mock",
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" | "rest" => Ok(Self::Http),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown ledger backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    pub backend: BackendKind,
    /// Base URL of the ledger REST API
    pub url: Option<String>,
    /// Sent as `x-api-key` when set
    pub api_key: Option<String>,
    /// Budget file the API should open
    pub budget_id: Option<String>,
    /// Per-request transport timeout
    pub timeout: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Http,
            url: None,
            api_key: None,
            budget_id: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl LedgerConfig {
    /// Resolve config from file and the process environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    /// Resolve config from file, then the given environment lookup
    pub fn load_with_env<F>(config_path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let path = config_path
            .map(Path::to_path_buf)
            .or_else(default_config_path);
        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                config.apply_toml(&content)?;
            } else if config_path.is_some() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
        }

        config.apply_env(lookup)?;
        Ok(config)
    }

    /// Overlay values from TOML content
    pub fn apply_toml(&mut self, content: &str) -> Result<()> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let Some(ledger) = raw.ledger else {
            return Ok(());
        };
        if let Some(backend) = ledger.backend {
            self.backend = parse_backend(&backend);
        }
        if let Some(url) = ledger.url {
            self.url = Some(url);
        }
        if let Some(key) = ledger.api_key {
            self.api_key = Some(key);
        }
        if let Some(budget_id) = ledger.budget_id {
            self.budget_id = Some(budget_id);
        }
        if let Some(secs) = ledger.timeout_secs {
            self.timeout = timeout_from_secs(secs, "timeout_secs")?;
        }
        Ok(())
    }

    /// Overlay values from environment lookups; empty values are ignored
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(backend) = get("LEDGER_BACKEND") {
            self.backend = parse_backend(&backend);
        }
        if let Some(url) = get("LEDGER_API_URL") {
            self.url = Some(url);
        }
        if let Some(key) = get("LEDGER_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(budget_id) = get("LEDGER_BUDGET_ID") {
            self.budget_id = Some(budget_id);
        }
        if let Some(secs) = get("LEDGER_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::Config(format!("LEDGER_TIMEOUT_SECS must be an integer, got '{}'", secs))
            })?;
            self.timeout = timeout_from_secs(secs, "LEDGER_TIMEOUT_SECS")?;
        }
        Ok(())
    }

    /// URL and budget id, required by the HTTP backend
    pub fn http_target(&self) -> Result<(&str, &str)> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| Error::Config("ledger URL is not set (LEDGER_API_URL)".into()))?;
        let budget_id = self.budget_id.as_deref().ok_or_else(|| {
            Error::Config("ledger budget id is not set (LEDGER_BUDGET_ID)".into())
        })?;
        Ok((url, budget_id))
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("ledger.toml"))
}

fn timeout_from_secs(secs: u64, source: &str) -> Result<Duration> {
    if secs == 0 {
        return Err(Error::Config(format!("{} must be at least 1 second", source)));
    }
    Ok(Duration::from_secs(secs))
}

fn parse_backend(value: &str) -> BackendKind {
    value.parse().unwrap_or_else(|_| {
        warn!(backend = %value, "Unknown ledger backend, falling back to http");
        BackendKind::Http
    })
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    ledger: Option<RawLedger>,
}

#[derive(Debug, Deserialize)]
struct RawLedger {
    backend: Option<String>,
    url: Option<String>,
    api_key: Option<String>,
    budget_id: Option<String>,
    timeout_secs: Option<u64>,
}
