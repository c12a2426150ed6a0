use async_trait::async_trait;

use crate::errors::SchedulerResult;
use crate::models::Setting;

/// 用户任务执行器，触发时携带租户id调用
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    /// 执行器名称，用于日志
    fn name(&self) -> &str;

    /// 执行一次任务
    async fn execute(&self, owner_id: i64) -> SchedulerResult<()>;
}

/// 系统级任务，与租户无关，无参数触发
#[async_trait]
pub trait SystemTask: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self) -> SchedulerResult<()>;
}

/// 租户配置存储的访问契约
///
/// 配置由外部的设置服务写入，本子系统只读；create/delete
/// 仅用于测试和初始化路径。
#[async_trait]
pub trait SettingRepository: Send + Sync {
    /// 按配置键批量查询；owner_id为None时查询全部租户
    async fn find_by_keys(
        &self,
        owner_id: Option<i64>,
        keys: &[i32],
    ) -> SchedulerResult<Vec<Setting>>;

    /// 写入一条配置；同一 (owner_id, setting_key) 已存在时覆盖
    async fn create(
        &self,
        owner_type: i32,
        owner_id: i64,
        setting_key: i32,
        setting_value: serde_json::Value,
    ) -> SchedulerResult<Setting>;

    /// 删除某租户的全部配置，返回删除行数
    async fn delete_by_owner(&self, owner_id: i64) -> SchedulerResult<u64>;
}
