//! 默认任务执行器
//!
//! 采集、创作、发布的业务逻辑尚未接入，这里是只打日志的占位
//! 实现；统计任务同理。

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use content_scheduler_core::{SchedulerResult, SystemTask, TaskExecutor};

/// 内容采集执行器
pub struct CollectExecutor;

#[async_trait]
impl TaskExecutor for CollectExecutor {
    fn name(&self) -> &str {
        "collect"
    }

    async fn execute(&self, owner_id: i64) -> SchedulerResult<()> {
        info!("[采集任务] 开始执行, owner_id={owner_id}, time={}", Utc::now());
        // TODO: 接入实际采集流程
        info!("[采集任务] 执行完成, owner_id={owner_id}");
        Ok(())
    }
}

/// 内容创作执行器
pub struct CreateExecutor;

#[async_trait]
impl TaskExecutor for CreateExecutor {
    fn name(&self) -> &str {
        "create"
    }

    async fn execute(&self, owner_id: i64) -> SchedulerResult<()> {
        info!("[创作任务] 开始执行, owner_id={owner_id}, time={}", Utc::now());
        // TODO: 接入实际创作流程
        info!("[创作任务] 执行完成, owner_id={owner_id}");
        Ok(())
    }
}

/// 内容发布执行器
pub struct PublishExecutor;

#[async_trait]
impl TaskExecutor for PublishExecutor {
    fn name(&self) -> &str {
        "publish"
    }

    async fn execute(&self, owner_id: i64) -> SchedulerResult<()> {
        info!("[发布任务] 开始执行, owner_id={owner_id}, time={}", Utc::now());
        // TODO: 接入实际发布流程
        info!("[发布任务] 执行完成, owner_id={owner_id}");
        Ok(())
    }
}

/// 数据统计任务，系统级，与租户无关
pub struct StatsTask;

#[async_trait]
impl SystemTask for StatsTask {
    fn name(&self) -> &str {
        "system_stats"
    }

    async fn run(&self) -> SchedulerResult<()> {
        info!("[数据统计] 开始执行, time={}", Utc::now());
        // TODO: 接入统计逻辑（活跃用户数、任务执行情况等）
        info!("[数据统计] 执行完成");
        Ok(())
    }
}
