use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use content_scheduler_core::{SchedulerError, SchedulerResult, SystemTask, TaskExecutor};

use crate::cron_utils::CronTrigger;

/// 任务与执行体的绑定
#[derive(Clone)]
pub enum JobBinding {
    /// 用户任务，触发时携带租户id调用
    User {
        executor: Arc<dyn TaskExecutor>,
        owner_id: i64,
    },
    /// 系统任务，无参数触发
    System(Arc<dyn SystemTask>),
}

impl JobBinding {
    fn owner_id(&self) -> Option<i64> {
        match self {
            JobBinding::User { owner_id, .. } => Some(*owner_id),
            JobBinding::System(_) => None,
        }
    }

    async fn invoke(&self) -> SchedulerResult<()> {
        match self {
            JobBinding::User { executor, owner_id } => executor.execute(*owner_id).await,
            JobBinding::System(task) => task.run().await,
        }
    }
}

/// 任务的只读快照，供查询和校验使用
#[derive(Debug, Clone)]
pub struct JobInfo {
    pub id: String,
    pub cron: String,
    pub owner_id: Option<i64>,
    pub next_run_at: Option<DateTime<Utc>>,
}

struct JobEntry {
    cron: String,
    owner_id: Option<i64>,
    trigger: CronTrigger,
    handle: JoinHandle<()>,
    cancelled: Arc<AtomicBool>,
}

impl JobEntry {
    /// 撤销任务：先置撤销标记再中止定时循环
    ///
    /// abort对醒来后尚未到达下一个await点的循环不生效，撤销
    /// 标记保证这样的循环也不会再派生执行。
    fn cancel(self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.handle.abort();
    }
}

/// 进程内任务运行器
///
/// 持有全部在调度的任务。每个任务是一个独立的tokio定时循环：
/// 计算下一次触发时间、休眠、派生执行、继续。同id的任务在写锁
/// 内先中止旧循环再插入新循环，不存在新旧同时触发的窗口。
pub struct JobRunner {
    jobs: Arc<RwLock<HashMap<String, JobEntry>>>,
    running: Arc<AtomicBool>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 启动运行器，重复启动报错
    pub fn start(&self) -> SchedulerResult<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(SchedulerError::AlreadyRunning);
        }
        info!("任务运行器已启动");
        Ok(())
    }

    /// 停止运行器
    ///
    /// 中止所有定时循环，不等待执行中的任务完成；未启动时为空操作。
    pub async fn shutdown(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            debug!("任务运行器未启动，忽略停止请求");
            return;
        }

        let mut jobs = self.jobs.write().await;
        for (job_id, entry) in jobs.drain() {
            entry.cancel();
            debug!("中止定时任务: {job_id}");
        }
        info!("任务运行器已停止");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// 注册任务；同id已存在时原子替换（新触发器生效，旧循环中止）
    pub async fn add_job(
        &self,
        job_id: &str,
        trigger: CronTrigger,
        binding: JobBinding,
    ) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::RunnerNotStarted);
        }

        let mut jobs = self.jobs.write().await;
        if let Some(old) = jobs.remove(job_id) {
            old.cancel();
            debug!("替换已有定时任务: {job_id}");
        }

        let cancelled = Arc::new(AtomicBool::new(false));
        let handle = tokio::spawn(run_job_loop(
            job_id.to_string(),
            trigger.clone(),
            binding.clone(),
            Arc::clone(&cancelled),
        ));
        jobs.insert(
            job_id.to_string(),
            JobEntry {
                cron: trigger.expression().to_string(),
                owner_id: binding.owner_id(),
                trigger,
                handle,
                cancelled,
            },
        );
        Ok(())
    }

    /// 按id移除任务，返回是否真的移除了；不存在不是错误
    pub async fn remove_job(&self, job_id: &str) -> bool {
        let mut jobs = self.jobs.write().await;
        match jobs.remove(job_id) {
            Some(entry) => {
                entry.cancel();
                info!("移除定时任务: {job_id}");
                true
            }
            None => false,
        }
    }

    /// 按id查询任务快照
    pub async fn get_job(&self, job_id: &str) -> Option<JobInfo> {
        let jobs = self.jobs.read().await;
        jobs.get(job_id).map(|entry| JobInfo {
            id: job_id.to_string(),
            cron: entry.cron.clone(),
            owner_id: entry.owner_id,
            next_run_at: entry.trigger.next_fire(Utc::now()),
        })
    }

    pub async fn job_ids(&self) -> Vec<String> {
        let jobs = self.jobs.read().await;
        jobs.keys().cloned().collect()
    }

    pub async fn job_count(&self) -> usize {
        let jobs = self.jobs.read().await;
        jobs.len()
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// 单个任务的定时循环
///
/// 执行体在独立任务中派生，慢执行不会推迟下一次触发的计时。
async fn run_job_loop(
    job_id: String,
    trigger: CronTrigger,
    binding: JobBinding,
    cancelled: Arc<AtomicBool>,
) {
    loop {
        let now = Utc::now();
        let Some(next) = trigger.next_fire(now) else {
            warn!("任务 {job_id} 无下一次触发时间，循环退出");
            return;
        };

        let wait = (next - now)
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);
        tokio::time::sleep(wait).await;

        // 醒来后可能已被替换或移除：撤销了就不再派生执行。
        // 已经越过这里的执行视为在途执行，与stop()的语义一致。
        if cancelled.load(Ordering::SeqCst) {
            return;
        }

        let binding = binding.clone();
        let job_id = job_id.clone();
        tokio::spawn(async move {
            debug!("触发定时任务: {job_id}");
            if let Err(e) = binding.invoke().await {
                error!("任务执行失败 {job_id}: {e}");
            }
        });
    }
}
