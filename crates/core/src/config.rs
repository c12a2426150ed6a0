use std::path::Path;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::errors::{SchedulerError, SchedulerResult};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite数据库地址，如 sqlite://data/scheduler.db
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://data/scheduler.db".to_string(),
                max_connections: 5,
                min_connections: 1,
            },
        }
    }
}

impl AppConfig {
    /// 加载配置
    ///
    /// 优先级：环境变量 > 配置文件 > 内置默认值。
    /// 指定了路径但文件不存在时报错；未指定路径时按默认路径查找，
    /// 找不到则使用默认值。
    pub fn load(config_path: Option<&str>) -> SchedulerResult<Self> {
        let mut builder = ConfigBuilder::builder()
            .set_default("database.url", "sqlite://data/scheduler.db")
            .map_err(|e| SchedulerError::Configuration(e.to_string()))?
            .set_default("database.max_connections", 5)
            .map_err(|e| SchedulerError::Configuration(e.to_string()))?
            .set_default("database.min_connections", 1)
            .map_err(|e| SchedulerError::Configuration(e.to_string()))?;

        if let Some(path) = config_path {
            if !Path::new(path).exists() {
                return Err(SchedulerError::Configuration(format!(
                    "配置文件不存在: {path}"
                )));
            }
            builder = builder.add_source(File::new(path, FileFormat::Toml));
        } else {
            for path in ["config/scheduler.toml", "scheduler.toml"] {
                if Path::new(path).exists() {
                    builder = builder.add_source(File::new(path, FileFormat::Toml));
                    break;
                }
            }
        }

        // 环境变量覆盖，如 CS_DATABASE__URL
        builder = builder.add_source(Environment::with_prefix("CS").separator("__"));

        let config: AppConfig = builder
            .build()
            .map_err(|e| SchedulerError::Configuration(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SchedulerError::Configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SchedulerResult<()> {
        if self.database.url.is_empty() {
            return Err(SchedulerError::Configuration(
                "database.url 不能为空".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(SchedulerError::Configuration(
                "database.max_connections 必须大于0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::load(None).unwrap();
        assert!(config.database.url.starts_with("sqlite://"));
        assert!(config.database.max_connections > 0);
    }

    #[test]
    fn test_missing_config_file() {
        let result = AppConfig::load(Some("/nonexistent/scheduler.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scheduler.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[database]\nurl = \"sqlite://test.db\"\nmax_connections = 3\nmin_connections = 1"
        )
        .unwrap();

        let config = AppConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.database.url, "sqlite://test.db");
        assert_eq!(config.database.max_connections, 3);
    }

    #[test]
    fn test_validate_rejects_empty_url() {
        let mut config = AppConfig::default();
        config.database.url = String::new();
        assert!(config.validate().is_err());
    }
}
