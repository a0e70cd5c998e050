use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use prospector_common::SimulationParameters;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_PATH_ENV: &str = "PROSPECTOR_CONFIG";
pub const API_KEY_ENV: &str = "NASA_API_KEY";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// One week
pub const MAX_INTERVAL_SECS: u64 = 60 * 60 * 24 * 7;
pub const MAX_TIMEOUT_SECS: u64 = 60 * 60;
pub const MAX_RETRY_DELAY_SECS: u64 = 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// NeoWs endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_api_key")]
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// m/s
    #[serde(default = "default_target_delta_v")]
    pub target_delta_v: f64,

    /// s
    #[serde(default = "default_burn_time")]
    pub burn_time: f64,

    /// kg/m^3, typical for rocky bodies
    #[serde(default = "default_density")]
    pub density: f64,

    #[serde(default = "default_value_per_kg")]
    pub value_per_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Fixed asteroid to track; picked from `candidate_ids` when unset
    #[serde(default)]
    pub asteroid_id: Option<String>,

    #[serde(default = "default_candidate_ids")]
    pub candidate_ids: Vec<String>,

    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_base_url() -> String {
    "https://api.nasa.gov/neo/rest/v1/neo/".to_string()
}

fn default_api_key() -> String {
    "DEMO_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    2
}

fn default_target_delta_v() -> f64 {
    3000.0
}

fn default_burn_time() -> f64 {
    3600.0
}

fn default_density() -> f64 {
    3500.0
}

fn default_value_per_kg() -> f64 {
    45000.0
}

fn default_candidate_ids() -> Vec<String> {
    ["3542519", "3542517", "3542520", "3542518"]
        .iter()
        .map(|id| id.to_string())
        .collect()
}

fn default_interval_secs() -> u64 {
    5
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: default_api_key(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            target_delta_v: default_target_delta_v(),
            burn_time: default_burn_time(),
            density: default_density(),
            value_per_kg: default_value_per_kg(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            asteroid_id: None,
            candidate_ids: default_candidate_ids(),
            interval_secs: default_interval_secs(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            catalog: CatalogConfig::default(),
            simulation: SimulationConfig::default(),
            schedule: ScheduleConfig::default(),
        }
    }
}

/// Path named by `PROSPECTOR_CONFIG`, or `config.toml`
pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Read `path` if it exists, fall back to defaults otherwise, then apply
    /// the API key from the environment.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };

        Ok(config.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.catalog.api_key = key;
        }
        self
    }

    /// Check everything a run depends on. Must pass before the scheduler starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.parameters()?;

        let interval = self.schedule.interval_secs;
        if !(1..=MAX_INTERVAL_SECS).contains(&interval) {
            return Err(ConfigError::IntervalOutOfRange {
                got: interval,
                max: MAX_INTERVAL_SECS,
            });
        }

        let timeout = self.catalog.timeout_secs;
        if !(1..=MAX_TIMEOUT_SECS).contains(&timeout) {
            return Err(ConfigError::TimeoutOutOfRange {
                got: timeout,
                max: MAX_TIMEOUT_SECS,
            });
        }

        let retry_delay = self.catalog.retry_delay_secs;
        if retry_delay > MAX_RETRY_DELAY_SECS {
            return Err(ConfigError::RetryDelayOutOfRange {
                got: retry_delay,
                max: MAX_RETRY_DELAY_SECS,
            });
        }

        if self.catalog.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if self.catalog.max_retries == 0 {
            return Err(ConfigError::ZeroRetries);
        }
        if self.schedule.asteroid_id.is_none() && self.schedule.candidate_ids.is_empty() {
            return Err(ConfigError::NoAsteroidCandidates);
        }

        Ok(())
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

impl SimulationConfig {
    pub fn parameters(&self) -> Result<SimulationParameters, ConfigError> {
        Ok(SimulationParameters::new(
            self.target_delta_v,
            self.burn_time,
            self.density,
            self.value_per_kg,
        )?)
    }
}

impl ScheduleConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// The configured asteroid, or a uniformly random candidate.
    pub fn select_asteroid<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, ConfigError> {
        if let Some(id) = self.asteroid_id.as_ref().filter(|id| !id.trim().is_empty()) {
            return Ok(id.clone());
        }

        self.candidate_ids
            .choose(rng)
            .cloned()
            .ok_or(ConfigError::NoAsteroidCandidates)
    }
}
