use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 一条持久化的租户配置记录
///
/// 每个 (owner_id, setting_key) 只有一行；setting_value 为JSON值，
/// 开关类配置存布尔，cron类配置存字符串。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub id: i64,
    pub owner_type: i32,
    pub owner_id: i64,
    pub setting_key: i32,
    pub setting_value: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
