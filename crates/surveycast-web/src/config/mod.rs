//! Configuration loading for SurveyCast.
//! Reads surveycast.toml from the current directory or the path in SURVEYCAST_CONFIG,
//! then applies SURVEYCAST_* environment overrides.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use surveycast_common::{Domain, Result, SurveyError};
use surveycast_schema::HealthProfile;

pub const CONFIG_PATH_ENV: &str = "SURVEYCAST_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "surveycast.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub bank: BankConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Idle form sessions older than this are dropped.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

fn default_bind()             -> String { "127.0.0.1:3001".to_string() }
fn default_session_ttl_secs() -> u64    { 1800 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind(), session_ttl_secs: default_session_ttl_secs() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Prediction endpoint for the health survey. Absent means unconfigured.
    pub api_url: Option<String>,
    #[serde(default)]
    pub profile: HealthProfile,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BankConfig {
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 { 30_000 }

impl Default for ClientConfig {
    fn default() -> Self {
        Self { timeout_ms: default_timeout_ms() }
    }
}


impl Config {
    /// Load configuration from surveycast.toml plus environment overrides.
    ///
    /// A missing default file yields defaults; a missing file named explicitly
    /// by SURVEYCAST_CONFIG is an error.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var(CONFIG_PATH_ENV).ok();
        let path = explicit.clone().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&path).exists() {
            let content = std::fs::read_to_string(&path)?;
            tracing::info!(%path, "loaded configuration file");
            Self::from_toml_str(&content)?
        } else if explicit.is_some() {
            return Err(SurveyError::Config(format!("Config file not found: {}", path)));
        } else {
            tracing::info!("no {} found; using defaults", DEFAULT_CONFIG_PATH);
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.check()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply SURVEYCAST_* overrides. `lookup` is `std::env::var` in production.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup("SURVEYCAST_HEALTH_API_URL") {
            self.health.api_url = Some(url);
        }
        if let Some(url) = lookup("SURVEYCAST_BANK_API_URL") {
            self.bank.api_url = Some(url);
        }
        if let Some(bind) = lookup("SURVEYCAST_BIND") {
            self.server.bind = bind;
        }
        if let Some(profile) = lookup("SURVEYCAST_HEALTH_PROFILE") {
            self.health.profile = match profile.trim().to_ascii_lowercase().as_str() {
                "full"    => HealthProfile::Full,
                "reduced" => HealthProfile::Reduced,
                other => {
                    return Err(SurveyError::Config(format!(
                        "SURVEYCAST_HEALTH_PROFILE must be 'full' or 'reduced', got '{}'",
                        other
                    )))
                }
            };
        }
        if let Some(ms) = lookup("SURVEYCAST_TIMEOUT_MS") {
            self.client.timeout_ms = ms.trim().parse().map_err(|_| {
                SurveyError::Config(format!("SURVEYCAST_TIMEOUT_MS is not a number: {}", ms))
            })?;
        }
        Ok(())
    }

    /// Reject settings the server cannot run with.
    pub fn check(&self) -> Result<()> {
        if self.client.timeout_ms == 0 {
            return Err(SurveyError::Config("client.timeout_ms must be greater than zero".to_string()));
        }
        self.bind_addr()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server.bind.parse().map_err(|_| {
            SurveyError::Config(format!("server.bind is not a socket address: {}", self.server.bind))
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.client.timeout_ms)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.server.session_ttl_secs)
    }

    pub fn endpoint(&self, domain: Domain) -> Option<&str> {
        let url = match domain {
            Domain::Health => self.health.api_url.as_deref(),
            Domain::Bank   => self.bank.api_url.as_deref(),
        };
        url.map(str::trim).filter(|u| !u.is_empty())
    }
}
