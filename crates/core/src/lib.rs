pub mod config;
pub mod errors;
pub mod executor_registry;
pub mod models;
pub mod traits;

pub use config::{AppConfig, DatabaseConfig};
pub use errors::{SchedulerError, SchedulerResult};
pub use executor_registry::ExecutorRegistry;
pub use models::{
    validate_setting_codes, Setting, SettingDef, SettingDefault, SettingValueKind, TaskType,
    SCHEDULER_SETTINGS,
};
pub use traits::{SettingRepository, SystemTask, TaskExecutor};
