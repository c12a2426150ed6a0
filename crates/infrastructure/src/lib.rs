pub mod database;
pub mod memory_setting_repository;

pub use database::SqliteSettingRepository;
pub use memory_setting_repository::MemorySettingRepository;
