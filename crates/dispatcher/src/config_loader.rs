use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use content_scheduler_core::{SchedulerResult, SettingRepository, TaskType};

/// 调度配置加载器
///
/// 从配置存储读取六个调度配置项并按租户分组。存储中没有记录的
/// 租户不会出现在结果里。
pub struct SettingLoader {
    repo: Arc<dyn SettingRepository>,
}

impl SettingLoader {
    pub fn new(repo: Arc<dyn SettingRepository>) -> Self {
        Self { repo }
    }

    /// 加载所有租户的调度配置，按 owner_id 分组
    pub async fn load_all(&self) -> SchedulerResult<HashMap<i64, HashMap<i32, Value>>> {
        let settings = self
            .repo
            .find_by_keys(None, &TaskType::all_setting_codes())
            .await?;

        let mut grouped: HashMap<i64, HashMap<i32, Value>> = HashMap::new();
        for setting in settings {
            grouped
                .entry(setting.owner_id)
                .or_default()
                .insert(setting.setting_key, setting.setting_value);
        }
        Ok(grouped)
    }

    /// 加载单个租户的调度配置
    pub async fn load_user(&self, owner_id: i64) -> SchedulerResult<HashMap<i32, Value>> {
        let settings = self
            .repo
            .find_by_keys(Some(owner_id), &TaskType::all_setting_codes())
            .await?;

        Ok(settings
            .into_iter()
            .map(|s| (s.setting_key, s.setting_value))
            .collect())
    }
}
