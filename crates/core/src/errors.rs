use thiserror::Error;

/// 调度器错误类型定义
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("无效的CRON表达式: {expr} - {message}")]
    InvalidCron { expr: String, message: String },

    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("调度器尚未启动")]
    RunnerNotStarted,

    #[error("调度器已在运行")]
    AlreadyRunning,

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("任务执行错误: {0}")]
    TaskExecution(String),
}

/// 统一的Result类型
pub type SchedulerResult<T> = std::result::Result<T, SchedulerError>;
