use figment::{
    providers::{Env, Format as _, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix of environment variables that override file settings.
/// Nested keys are separated by `__`, e.g. `PLISTCONV_SCHEDULER__MAX_CONCURRENT_JOBS`.
pub const ENV_PREFIX: &str = "PLISTCONV_";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[scheduler]
max_concurrent_jobs = 2

[defaults]
format = "openstep"
sort = true
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.scheduler.max_concurrent_jobs, 2);
        assert_eq!(config.scheduler.notification_buffer, 64);
        assert_eq!(config.defaults.format, Format::OpenStep);
        assert!(config.defaults.sort);
        assert!(!config.defaults.compact);
    }

    #[test]
    fn test_load_config_from_str_empty() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_from_str_unknown_format() {
        let toml = r#"
[defaults]
format = "yaml"
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/plistconv.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[scheduler]
notification_buffer = 8

[defaults]
format = "binary"
compact = true
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.scheduler.notification_buffer, 8);
        assert_eq!(config.defaults.format, Format::Binary);
        assert!(config.defaults.compact);
    }
}
