mod sqlite_setting_repository;

pub use sqlite_setting_repository::SqliteSettingRepository;
