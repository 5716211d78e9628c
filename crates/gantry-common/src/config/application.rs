use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{CommonError, CommonResult};

const DEFAULT_CONFIG: &str = include_str!("default.toml");

/// The prefix of environment variables that override the default configuration.
/// Nested keys are separated by `__`, e.g. `GANTRY__MASTER__HOST`.
pub const CONFIG_ENV_PREFIX: &str = "GANTRY__";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub framework: FrameworkConfig,
    pub master: MasterConfig,
    pub transport: TransportConfig,
    pub driver: DriverConfig,
    pub scheduler: SchedulerConfig,
    pub api: ApiConfig,
    pub runtime: RuntimeConfig,
}

impl AppConfig {
    pub fn load() -> CommonResult<Self> {
        Self::from_figment(Figment::from(Toml::string(DEFAULT_CONFIG)).admerge(
            Env::prefixed(CONFIG_ENV_PREFIX).map(|p| p.as_str().replace("__", ".").into()),
        ))
    }

    fn from_figment(figment: Figment) -> CommonResult<Self> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CommonResult<()> {
        if self.framework.name.is_empty() {
            return Err(CommonError::config("framework name must not be empty"));
        }
        if self.framework.name.contains('/') {
            return Err(CommonError::config(
                "framework name must not contain a path separator",
            ));
        }
        if self.driver.heartbeat_interval_secs == 0 {
            return Err(CommonError::config("heartbeat interval must be positive"));
        }
        if self.scheduler.poll_interval_secs == 0 {
            return Err(CommonError::config(
                "scheduler poll interval must be positive",
            ));
        }
        for (name, size) in [
            ("event", self.driver.event_buffer),
            ("command", self.driver.command_buffer),
            ("offer", self.driver.offer_buffer),
            ("update", self.driver.update_buffer),
        ] {
            if size == 0 {
                return Err(CommonError::config(format!(
                    "{name} buffer size must be positive"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkConfig {
    pub name: String,
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    pub listen_host: String,
    pub listen_port: u16,
    pub external_host: String,
    #[serde(deserialize_with = "deserialize_non_zero")]
    pub external_port: Option<u16>,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    pub heartbeat_interval_secs: u64,
    pub register_timeout_secs: u64,
    pub register_retry: RetryStrategy,
    pub health_check_retry: RetryStrategy,
    pub event_buffer: usize,
    pub command_buffer: usize,
    pub offer_buffer: usize,
    pub update_buffer: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub listen_host: String,
    pub listen_port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub stack_size: usize,
    #[serde(deserialize_with = "deserialize_non_zero")]
    pub worker_threads: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryStrategy {
    Fixed(FixedRetryStrategy),
    ExponentialBackoff(ExponentialBackoffRetryStrategy),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedRetryStrategy {
    /// The maximum number of attempts, or zero for unlimited attempts.
    pub max_attempts: usize,
    pub delay_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExponentialBackoffRetryStrategy {
    /// The maximum number of attempts, or zero for unlimited attempts.
    pub max_attempts: usize,
    pub initial_delay_secs: u64,
    pub max_delay_secs: u64,
    pub factor: u32,
}

fn deserialize_non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.is_empty() {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

fn deserialize_non_zero<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + PartialEq + Deserialize<'de>,
{
    let value = T::deserialize(deserializer)?;
    if value == T::default() {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}
