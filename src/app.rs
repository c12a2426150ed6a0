use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::broadcast;
use tracing::info;

use content_scheduler_core::AppConfig;
use content_scheduler_dispatcher::SchedulerService;
use content_scheduler_infrastructure::SqliteSettingRepository;

/// 主应用程序
pub struct Application {
    service: SchedulerService,
}

impl Application {
    /// 创建新的应用实例
    pub async fn new(config: AppConfig) -> Result<Self> {
        info!("初始化应用程序, database={}", config.database.url);

        let repo = SqliteSettingRepository::new_embedded(&config.database.url)
            .await
            .context("初始化配置存储失败")?;
        let service = SchedulerService::new(Arc::new(repo));

        Ok(Self { service })
    }

    /// 运行应用，直到收到关闭信号
    pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        self.service.start().await.context("启动调度器失败")?;

        let _ = shutdown_rx.recv().await;

        self.service.stop().await;
        Ok(())
    }
}
