use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use content_scheduler_core::{
    validate_setting_codes, ExecutorRegistry, SchedulerError, SchedulerResult, SettingRepository,
    TaskExecutor, TaskType,
};

use crate::config_loader::SettingLoader;
use crate::cron_utils::CronTrigger;
use crate::executors::{CollectExecutor, CreateExecutor, PublishExecutor, StatsTask};
use crate::job_runner::{JobBinding, JobRunner};
use crate::task_manager::UserTaskManager;

/// 系统统计任务的job id
pub const SYSTEM_STATS_JOB_ID: &str = "system_stats";
/// 系统统计任务的固定调度：每小时整点
pub const SYSTEM_STATS_CRON: &str = "0 * * * *";

/// 服务生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Stopped,
    Starting,
    Running,
}

/// 调度器服务门面
///
/// 显式构造、显式启停。启动顺序：校验配置项定义表 → 启动运行器 →
/// 注册默认执行器 → 注册系统任务 → 加载全部租户配置并协调。
pub struct SchedulerService {
    runner: Arc<JobRunner>,
    registry: Arc<ExecutorRegistry>,
    task_manager: UserTaskManager,
    loader: SettingLoader,
    state: RwLock<ServiceState>,
}

impl SchedulerService {
    pub fn new(setting_repo: Arc<dyn SettingRepository>) -> Self {
        let runner = Arc::new(JobRunner::new());
        let registry = Arc::new(ExecutorRegistry::new());
        let task_manager = UserTaskManager::new(Arc::clone(&runner), Arc::clone(&registry));
        let loader = SettingLoader::new(setting_repo);

        Self {
            runner,
            registry,
            task_manager,
            loader,
            state: RwLock::new(ServiceState::Stopped),
        }
    }

    /// 启动调度器；已在运行（或启动中）时返回错误
    pub async fn start(&self) -> SchedulerResult<()> {
        {
            let mut state = self.state.write().await;
            if *state != ServiceState::Stopped {
                return Err(SchedulerError::AlreadyRunning);
            }
            *state = ServiceState::Starting;
        }

        match self.start_inner().await {
            Ok(()) => {
                *self.state.write().await = ServiceState::Running;
                info!("调度器已启动");
                Ok(())
            }
            Err(e) => {
                // 启动中途失败，回收已启动的运行器并复位状态
                self.runner.shutdown().await;
                *self.state.write().await = ServiceState::Stopped;
                Err(e)
            }
        }
    }

    async fn start_inner(&self) -> SchedulerResult<()> {
        validate_setting_codes()?;
        self.runner.start()?;
        self.register_default_executors().await;
        self.register_system_jobs().await?;
        self.load_tasks().await?;
        Ok(())
    }

    /// 停止调度器，不等待执行中的任务；已停止时为空操作
    pub async fn stop(&self) {
        let mut state = self.state.write().await;
        if *state == ServiceState::Stopped {
            debug!("调度器已处于停止状态");
            return;
        }
        self.runner.shutdown().await;
        *state = ServiceState::Stopped;
        info!("调度器已停止");
    }

    pub async fn state(&self) -> ServiceState {
        *self.state.read().await
    }

    /// 更新租户的定时任务（租户修改配置后由外部调用）
    ///
    /// 先移除该租户当前的全部任务，再重新读取配置协调。两步之间
    /// 租户短暂无任务，该窗口是可接受的。
    pub async fn update_user_tasks(&self, owner_id: i64) -> SchedulerResult<()> {
        self.task_manager.remove_all(owner_id).await;
        let config = self.loader.load_user(owner_id).await?;
        self.task_manager.apply_config(owner_id, &config).await;
        info!("已更新用户 {owner_id} 的定时任务");
        Ok(())
    }

    /// 移除租户的单个任务，不存在时返回false
    pub async fn remove_user_task(&self, owner_id: i64, task_type: TaskType) -> bool {
        self.task_manager.remove_one(owner_id, task_type).await
    }

    /// 注册任务执行器，同code覆盖；供测试替换和扩展使用
    pub async fn register_executor(&self, code: i32, executor: Arc<dyn TaskExecutor>) {
        self.registry.register(code, executor).await;
    }

    /// 任务运行器，供查询任务状态
    pub fn runner(&self) -> &JobRunner {
        &self.runner
    }

    /// 执行器注册表
    pub fn registry(&self) -> &ExecutorRegistry {
        &self.registry
    }

    /// 注册默认任务执行器
    async fn register_default_executors(&self) {
        self.registry
            .register(TaskType::Collect.cron_code(), Arc::new(CollectExecutor))
            .await;
        self.registry
            .register(TaskType::Create.cron_code(), Arc::new(CreateExecutor))
            .await;
        self.registry
            .register(TaskType::Publish.cron_code(), Arc::new(PublishExecutor))
            .await;
    }

    /// 注册系统级固定定时任务，与租户无关
    async fn register_system_jobs(&self) -> SchedulerResult<()> {
        let trigger = CronTrigger::from_crontab(SYSTEM_STATS_CRON)?;
        self.runner
            .add_job(
                SYSTEM_STATS_JOB_ID,
                trigger,
                JobBinding::System(Arc::new(StatsTask)),
            )
            .await?;
        info!("添加系统任务: 数据统计, cron={SYSTEM_STATS_CRON}");
        Ok(())
    }

    /// 加载全部租户配置并协调任务
    async fn load_tasks(&self) -> SchedulerResult<()> {
        let all_configs = self.loader.load_all().await?;
        for (owner_id, config) in all_configs {
            self.task_manager.apply_config(owner_id, &config).await;
        }
        Ok(())
    }
}
