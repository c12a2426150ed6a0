//! 内存版配置仓库
//!
//! 不依赖数据库的 `SettingRepository` 实现，供单元测试和
//! 嵌入式场景使用。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use content_scheduler_core::errors::SchedulerResult;
use content_scheduler_core::models::Setting;
use content_scheduler_core::traits::SettingRepository;

#[derive(Debug, Clone, Default)]
pub struct MemorySettingRepository {
    settings: Arc<Mutex<Vec<Setting>>>,
    next_id: Arc<Mutex<i64>>,
}

impl MemorySettingRepository {
    pub fn new() -> Self {
        Self {
            settings: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    pub fn with_settings(settings: Vec<Setting>) -> Self {
        let max_id = settings.iter().map(|s| s.id).max().unwrap_or(0);
        Self {
            settings: Arc::new(Mutex::new(settings)),
            next_id: Arc::new(Mutex::new(max_id + 1)),
        }
    }

    pub fn clear(&self) {
        self.settings.lock().unwrap().clear();
        *self.next_id.lock().unwrap() = 1;
    }

    pub fn count(&self) -> usize {
        self.settings.lock().unwrap().len()
    }
}

#[async_trait]
impl SettingRepository for MemorySettingRepository {
    async fn find_by_keys(
        &self,
        owner_id: Option<i64>,
        keys: &[i32],
    ) -> SchedulerResult<Vec<Setting>> {
        let settings = self.settings.lock().unwrap();
        Ok(settings
            .iter()
            .filter(|s| keys.contains(&s.setting_key))
            .filter(|s| owner_id.map_or(true, |owner| s.owner_id == owner))
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        owner_type: i32,
        owner_id: i64,
        setting_key: i32,
        setting_value: serde_json::Value,
    ) -> SchedulerResult<Setting> {
        let now = Utc::now();
        let mut settings = self.settings.lock().unwrap();

        // 同键覆盖，保持每个 (owner_id, setting_key) 只有一条
        if let Some(existing) = settings
            .iter_mut()
            .find(|s| s.owner_id == owner_id && s.setting_key == setting_key)
        {
            existing.owner_type = owner_type;
            existing.setting_value = setting_value;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let mut next_id = self.next_id.lock().unwrap();
        let setting = Setting {
            id: *next_id,
            owner_type,
            owner_id,
            setting_key,
            setting_value,
            created_at: now,
            updated_at: now,
        };
        *next_id += 1;
        settings.push(setting.clone());
        Ok(setting)
    }

    async fn delete_by_owner(&self, owner_id: i64) -> SchedulerResult<u64> {
        let mut settings = self.settings.lock().unwrap();
        let before = settings.len();
        settings.retain(|s| s.owner_id != owner_id);
        Ok((before - settings.len()) as u64)
    }
}
