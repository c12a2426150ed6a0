mod setting;
mod task_type;

pub use setting::Setting;
pub use task_type::{
    validate_setting_codes, SettingDef, SettingDefault, SettingValueKind, TaskType,
    SCHEDULER_SETTINGS,
};
