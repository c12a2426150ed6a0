pub mod config_loader;
pub mod cron_utils;
pub mod executors;
pub mod job_runner;
pub mod service;
pub mod task_manager;

pub use config_loader::SettingLoader;
pub use cron_utils::CronTrigger;
pub use executors::{CollectExecutor, CreateExecutor, PublishExecutor, StatsTask};
pub use job_runner::{JobBinding, JobInfo, JobRunner};
pub use service::{SchedulerService, ServiceState, SYSTEM_STATS_CRON, SYSTEM_STATS_JOB_ID};
pub use task_manager::UserTaskManager;
