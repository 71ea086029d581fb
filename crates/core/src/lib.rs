pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod job;
pub mod options;
pub mod scheduler;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ConversionDefaults,
};
pub use engine::{NativeEngine, PlistEngine};
pub use error::PlistError;
pub use format::Format;
pub use job::{ConversionJob, JobId, JobState};
pub use options::ConvertOptions;
pub use scheduler::{ControlContext, JobScheduler, SchedulerConfig, SchedulerError, SchedulerStatus};
