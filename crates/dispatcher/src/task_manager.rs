use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use content_scheduler_core::{ExecutorRegistry, TaskType};

use crate::cron_utils::CronTrigger;
use crate::job_runner::{JobBinding, JobRunner};

/// 租户任务管理器
///
/// 把单个租户声明的配置协调成运行器中的具体任务。三类任务相互
/// 独立处理：某一类的坏配置只影响它自己，不影响同租户的其他
/// 任务，更不影响其他租户。
pub struct UserTaskManager {
    runner: Arc<JobRunner>,
    registry: Arc<ExecutorRegistry>,
}

impl UserTaskManager {
    pub fn new(runner: Arc<JobRunner>, registry: Arc<ExecutorRegistry>) -> Self {
        Self { runner, registry }
    }

    /// 按配置为租户注册任务
    ///
    /// 任意一类任务满足"开关打开 + cron为合法字符串 + 已注册
    /// 执行器"才会注册；其余情况视为"无需调度"，逐条记录日志后
    /// 继续处理下一类。本方法不返回错误。
    pub async fn apply_config(&self, owner_id: i64, config: &HashMap<i32, Value>) {
        for task_type in TaskType::ALL {
            let job_id = task_type.job_id(owner_id);

            let enabled = match config.get(&task_type.enabled_code()) {
                Some(Value::Bool(b)) => *b,
                Some(other) => {
                    warn!(
                        "任务开关不是布尔值，视为关闭: owner_id={owner_id}, key={}, value={other}",
                        task_type.enabled_code()
                    );
                    false
                }
                None => false,
            };
            if !enabled {
                debug!("任务未启用，跳过: {job_id}");
                continue;
            }

            let Some(cron_value) = config.get(&task_type.cron_code()) else {
                debug!("未配置cron表达式，跳过: {job_id}");
                continue;
            };
            // cron配置只接受纯字符串，结构化的值直接拒绝，
            // 不把不可解析的内容传进触发器解析
            let Some(cron_expr) = cron_value.as_str() else {
                warn!(
                    "cron配置不是字符串，已拒绝: owner_id={owner_id}, key={}, value={cron_value}",
                    task_type.cron_code()
                );
                continue;
            };

            let Some(executor) = self.registry.get(task_type.cron_code()).await else {
                debug!(
                    "未注册执行器，跳过: {job_id}, code={}",
                    task_type.cron_code()
                );
                continue;
            };

            let trigger = match CronTrigger::from_crontab(cron_expr) {
                Ok(trigger) => trigger,
                Err(e) => {
                    warn!("添加任务失败 {job_id}: cron={cron_expr}: {e}");
                    continue;
                }
            };

            let binding = JobBinding::User { executor, owner_id };
            match self.runner.add_job(&job_id, trigger, binding).await {
                Ok(()) => info!("添加定时任务: {job_id}, cron={cron_expr}"),
                Err(e) => error!("添加任务失败 {job_id}: {e}"),
            }
        }
    }

    /// 移除租户的全部任务，返回实际移除的数量
    pub async fn remove_all(&self, owner_id: i64) -> usize {
        let mut removed = 0;
        for task_type in TaskType::ALL {
            if self.remove_one(owner_id, task_type).await {
                removed += 1;
            }
        }
        removed
    }

    /// 移除租户的单个任务，不存在时返回false
    pub async fn remove_one(&self, owner_id: i64, task_type: TaskType) -> bool {
        self.runner.remove_job(&task_type.job_id(owner_id)).await
    }
}
