use serde::{Deserialize, Serialize};

use crate::errors::{SchedulerError, SchedulerResult};

/// 内容运营的三类周期任务
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    /// 内容采集
    Collect,
    /// 内容创作
    Create,
    /// 内容发布
    Publish,
}

impl TaskType {
    pub const ALL: [TaskType; 3] = [TaskType::Collect, TaskType::Create, TaskType::Publish];

    /// 任务开关的配置项code（对外稳定，不可变更）
    pub fn enabled_code(&self) -> i32 {
        match self {
            TaskType::Collect => 201,
            TaskType::Create => 203,
            TaskType::Publish => 205,
        }
    }

    /// 任务cron表达式的配置项code（对外稳定，不可变更）
    pub fn cron_code(&self) -> i32 {
        match self {
            TaskType::Collect => 202,
            TaskType::Create => 204,
            TaskType::Publish => 206,
        }
    }

    /// 任务在job id中使用的名称
    pub fn label(&self) -> &'static str {
        match self {
            TaskType::Collect => "采集",
            TaskType::Create => "创作",
            TaskType::Publish => "发布",
        }
    }

    /// 用户任务的job id，格式为 "{任务名}_{owner_id}"
    pub fn job_id(&self, owner_id: i64) -> String {
        format!("{}_{}", self.label(), owner_id)
    }

    pub fn from_label(label: &str) -> Option<TaskType> {
        TaskType::ALL.into_iter().find(|t| t.label() == label)
    }

    /// 全部六个调度配置项code，用于批量查询
    pub fn all_setting_codes() -> [i32; 6] {
        [201, 202, 203, 204, 205, 206]
    }
}

/// 配置项的取值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingValueKind {
    Bool,
    Str,
}

/// 配置项的默认值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingDefault {
    Bool(bool),
    Str(&'static str),
}

impl SettingDefault {
    pub fn as_json(&self) -> serde_json::Value {
        match self {
            SettingDefault::Bool(b) => serde_json::Value::Bool(*b),
            SettingDefault::Str(s) => serde_json::Value::String((*s).to_string()),
        }
    }
}

/// 一条调度配置项定义
#[derive(Debug, Clone, Copy)]
pub struct SettingDef {
    pub code: i32,
    pub name: &'static str,
    pub default: SettingDefault,
    pub kind: SettingValueKind,
    pub task_type: TaskType,
}

/// 调度配置项定义表，code作为配置键和存储键使用
pub const SCHEDULER_SETTINGS: [SettingDef; 6] = [
    SettingDef {
        code: 201,
        name: "采集任务开关",
        default: SettingDefault::Bool(false),
        kind: SettingValueKind::Bool,
        task_type: TaskType::Collect,
    },
    SettingDef {
        code: 202,
        name: "采集任务Cron",
        default: SettingDefault::Str("0 */2 * * *"),
        kind: SettingValueKind::Str,
        task_type: TaskType::Collect,
    },
    SettingDef {
        code: 203,
        name: "创作任务开关",
        default: SettingDefault::Bool(false),
        kind: SettingValueKind::Bool,
        task_type: TaskType::Create,
    },
    SettingDef {
        code: 204,
        name: "创作任务Cron",
        default: SettingDefault::Str("0 8 * * *"),
        kind: SettingValueKind::Str,
        task_type: TaskType::Create,
    },
    SettingDef {
        code: 205,
        name: "发布任务开关",
        default: SettingDefault::Bool(false),
        kind: SettingValueKind::Bool,
        task_type: TaskType::Publish,
    },
    SettingDef {
        code: 206,
        name: "发布任务Cron",
        default: SettingDefault::Str("0 10 * * *"),
        kind: SettingValueKind::Str,
        task_type: TaskType::Publish,
    },
];

/// 校验配置项定义表的code全局唯一，启动时调用
pub fn validate_setting_codes() -> SchedulerResult<()> {
    let mut seen = std::collections::HashSet::new();
    for def in &SCHEDULER_SETTINGS {
        if !seen.insert(def.code) {
            return Err(SchedulerError::Configuration(format!(
                "调度配置项code重复: {} ({})",
                def.code, def.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_codes_are_stable() {
        assert_eq!(TaskType::Collect.enabled_code(), 201);
        assert_eq!(TaskType::Collect.cron_code(), 202);
        assert_eq!(TaskType::Create.enabled_code(), 203);
        assert_eq!(TaskType::Create.cron_code(), 204);
        assert_eq!(TaskType::Publish.enabled_code(), 205);
        assert_eq!(TaskType::Publish.cron_code(), 206);
    }

    #[test]
    fn test_setting_defs_complete() {
        assert_eq!(SCHEDULER_SETTINGS.len(), 6);
        assert!(validate_setting_codes().is_ok());

        let collect_cron = SCHEDULER_SETTINGS.iter().find(|d| d.code == 202).unwrap();
        assert_eq!(collect_cron.default, SettingDefault::Str("0 */2 * * *"));
        let collect_enabled = SCHEDULER_SETTINGS.iter().find(|d| d.code == 201).unwrap();
        assert_eq!(collect_enabled.default, SettingDefault::Bool(false));
    }

    #[test]
    fn test_job_id_format() {
        assert_eq!(TaskType::Collect.job_id(999), "采集_999");
        assert_eq!(TaskType::Create.job_id(1), "创作_1");
        assert_eq!(TaskType::Publish.job_id(42), "发布_42");
    }

    #[test]
    fn test_from_label() {
        assert_eq!(TaskType::from_label("采集"), Some(TaskType::Collect));
        assert_eq!(TaskType::from_label("发布"), Some(TaskType::Publish));
        assert_eq!(TaskType::from_label("不存在"), None);
    }
}
