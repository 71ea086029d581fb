use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Scheduler pool size is not 0
/// - Notification buffer is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.scheduler.max_concurrent_jobs == 0 {
        return Err(ConfigError::ValidationError(
            "scheduler.max_concurrent_jobs cannot be 0".to_string(),
        ));
    }

    if config.scheduler.notification_buffer == 0 {
        return Err(ConfigError::ValidationError(
            "scheduler.notification_buffer cannot be 0".to_string(),
        ));
    }

    Ok(())
}
