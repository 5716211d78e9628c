use std::time::Duration;

use gantry_common::config::AppConfig;
use gantry_server::RetryStrategy;

#[readonly::make]
pub struct DriverOptions {
    pub user: String,
    pub framework_name: String,
    pub heartbeat_interval: Duration,
    pub register_timeout: Duration,
    pub register_retry_strategy: RetryStrategy,
    pub health_check_retry_strategy: RetryStrategy,
    pub event_buffer: usize,
    pub command_buffer: usize,
    pub offer_buffer: usize,
    pub update_buffer: usize,
}

impl DriverOptions {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            user: config
                .framework
                .user
                .clone()
                .unwrap_or_else(current_user),
            framework_name: config.framework.name.clone(),
            heartbeat_interval: Duration::from_secs(config.driver.heartbeat_interval_secs),
            register_timeout: Duration::from_secs(config.driver.register_timeout_secs),
            register_retry_strategy: (&config.driver.register_retry).into(),
            health_check_retry_strategy: (&config.driver.health_check_retry).into(),
            event_buffer: config.driver.event_buffer,
            command_buffer: config.driver.command_buffer,
            offer_buffer: config.driver.offer_buffer,
            update_buffer: config.driver.update_buffer,
        }
    }
}

/// Returns the user that runs this process, which is also
/// the user that tasks run as when no user is configured.
fn current_user() -> String {
    ["USER", "LOGNAME"]
        .iter()
        .find_map(|key| std::env::var(key).ok().filter(|x| !x.is_empty()))
        .unwrap_or_else(|| "root".to_string())
}
