use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::debug;

use content_scheduler_core::errors::SchedulerResult;
use content_scheduler_core::models::Setting;
use content_scheduler_core::traits::SettingRepository;

/// SQLite租户配置仓库
pub struct SqliteSettingRepository {
    pool: SqlitePool,
}

impl SqliteSettingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 创建嵌入式SQLite配置仓库，自动初始化数据库
    pub async fn new_embedded(database_url: &str) -> SchedulerResult<Self> {
        debug!("创建嵌入式SQLite配置仓库: {database_url}");

        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .min_connections(1)
            .connect_with(connect_options)
            .await?;

        Self::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// 运行数据库迁移
    async fn run_migrations(pool: &SqlitePool) -> SchedulerResult<()> {
        debug!("运行settings表迁移");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_type INTEGER NOT NULL DEFAULT 1,
                owner_id INTEGER NOT NULL,
                setting_key INTEGER NOT NULL,
                setting_value TEXT NOT NULL,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL,
                UNIQUE (owner_id, setting_key)
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_settings_setting_key ON settings (setting_key)",
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    fn row_to_setting(row: &SqliteRow) -> SchedulerResult<Setting> {
        let raw_value: String = row.try_get("setting_value")?;
        let setting_value: serde_json::Value = serde_json::from_str(&raw_value)?;

        Ok(Setting {
            id: row.try_get("id")?,
            owner_type: row.try_get("owner_type")?,
            owner_id: row.try_get("owner_id")?,
            setting_key: row.try_get("setting_key")?,
            setting_value,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        })
    }
}

#[async_trait]
impl SettingRepository for SqliteSettingRepository {
    async fn find_by_keys(
        &self,
        owner_id: Option<i64>,
        keys: &[i32],
    ) -> SchedulerResult<Vec<Setting>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, owner_type, owner_id, setting_key, setting_value, created_at, updated_at \
             FROM settings WHERE setting_key IN (",
        );
        let mut in_list = builder.separated(", ");
        for key in keys {
            in_list.push_bind(*key);
        }
        in_list.push_unseparated(")");

        if let Some(owner) = owner_id {
            builder.push(" AND owner_id = ").push_bind(owner);
        }
        builder.push(" ORDER BY owner_id, setting_key");

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(Self::row_to_setting).collect()
    }

    async fn create(
        &self,
        owner_type: i32,
        owner_id: i64,
        setting_key: i32,
        setting_value: serde_json::Value,
    ) -> SchedulerResult<Setting> {
        let now = Utc::now();
        let raw_value = serde_json::to_string(&setting_value)?;

        let row = sqlx::query(
            r#"
            INSERT INTO settings (owner_type, owner_id, setting_key, setting_value, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (owner_id, setting_key) DO UPDATE SET
                owner_type = excluded.owner_type,
                setting_value = excluded.setting_value,
                updated_at = excluded.updated_at
            RETURNING id, owner_type, owner_id, setting_key, setting_value, created_at, updated_at
            "#,
        )
        .bind(owner_type)
        .bind(owner_id)
        .bind(setting_key)
        .bind(raw_value)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_setting(&row)
    }

    async fn delete_by_owner(&self, owner_id: i64) -> SchedulerResult<u64> {
        let result = sqlx::query("DELETE FROM settings WHERE owner_id = ?")
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
