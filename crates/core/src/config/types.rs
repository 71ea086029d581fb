use serde::{Deserialize, Serialize};

use crate::format::Format;
use crate::options::ConvertOptions;
use crate::scheduler::SchedulerConfig;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub defaults: ConversionDefaults,
}

/// Format and options applied when a request does not set them
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConversionDefaults {
    #[serde(default)]
    pub format: Format,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub compact: bool,
    #[serde(default)]
    pub sort: bool,
}

impl ConversionDefaults {
    /// The configured flags as an option set.
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions::from_flags(self.debug, self.compact, self.sort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.format, Format::Xml);
        assert!(config.defaults.options().is_empty());
        assert_eq!(config.scheduler, SchedulerConfig::default());
    }

    #[test]
    fn test_defaults_to_options() {
        let defaults = ConversionDefaults {
            format: Format::Json,
            debug: false,
            compact: true,
            sort: true,
        };
        let options = defaults.options();
        assert!(options.contains(ConvertOptions::COMPACT));
        assert!(options.contains(ConvertOptions::SORT));
        assert!(!options.contains(ConvertOptions::DEBUG));
    }
}
