#[cfg(test)]
mod setting_repository_tests {
    use serde_json::json;

    use content_scheduler_core::traits::SettingRepository;
    use content_scheduler_core::TaskType;
    use content_scheduler_infrastructure::{MemorySettingRepository, SqliteSettingRepository};

    async fn sqlite_repo(dir: &tempfile::TempDir) -> SqliteSettingRepository {
        let url = format!("sqlite://{}", dir.path().join("settings.db").display());
        SqliteSettingRepository::new_embedded(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_sqlite_create_and_find() {
        let dir = tempfile::tempdir().unwrap();
        let repo = sqlite_repo(&dir).await;

        let created = repo
            .create(1, 999, TaskType::Collect.enabled_code(), json!(true))
            .await
            .unwrap();
        assert_eq!(created.owner_id, 999);
        assert_eq!(created.setting_key, 201);
        assert_eq!(created.setting_value, json!(true));

        repo.create(1, 999, TaskType::Collect.cron_code(), json!("*/5 * * * *"))
            .await
            .unwrap();
        repo.create(1, 1000, TaskType::Collect.enabled_code(), json!(false))
            .await
            .unwrap();

        let all = repo
            .find_by_keys(None, &TaskType::all_setting_codes())
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        let owner_only = repo
            .find_by_keys(Some(999), &TaskType::all_setting_codes())
            .await
            .unwrap();
        assert_eq!(owner_only.len(), 2);
        assert!(owner_only.iter().all(|s| s.owner_id == 999));

        let key_only = repo.find_by_keys(None, &[202]).await.unwrap();
        assert_eq!(key_only.len(), 1);
        assert_eq!(key_only[0].setting_value, json!("*/5 * * * *"));
    }

    #[tokio::test]
    async fn test_sqlite_create_upserts_on_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let repo = sqlite_repo(&dir).await;

        repo.create(1, 999, 202, json!("*/5 * * * *")).await.unwrap();
        repo.create(1, 999, 202, json!("*/10 * * * *")).await.unwrap();

        let rows = repo.find_by_keys(Some(999), &[202]).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].setting_value, json!("*/10 * * * *"));
    }

    #[tokio::test]
    async fn test_sqlite_delete_by_owner() {
        let dir = tempfile::tempdir().unwrap();
        let repo = sqlite_repo(&dir).await;

        repo.create(1, 999, 201, json!(true)).await.unwrap();
        repo.create(1, 999, 202, json!("*/5 * * * *")).await.unwrap();
        repo.create(1, 1000, 201, json!(true)).await.unwrap();

        assert_eq!(repo.delete_by_owner(999).await.unwrap(), 2);
        assert_eq!(repo.delete_by_owner(999).await.unwrap(), 0);

        let remaining = repo
            .find_by_keys(None, &TaskType::all_setting_codes())
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].owner_id, 1000);
    }

    #[tokio::test]
    async fn test_sqlite_empty_keys_returns_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let repo = sqlite_repo(&dir).await;

        repo.create(1, 999, 201, json!(true)).await.unwrap();
        let rows = repo.find_by_keys(None, &[]).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_sqlite_structured_value_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = sqlite_repo(&dir).await;

        // 存储层不限制值的形状，结构化值由协调层拒绝
        let value = json!({"cron": "*/10 * * * *"});
        repo.create(1, 999, 202, value.clone()).await.unwrap();

        let rows = repo.find_by_keys(Some(999), &[202]).await.unwrap();
        assert_eq!(rows[0].setting_value, value);
    }

    #[tokio::test]
    async fn test_memory_repository_behaves_like_sqlite() {
        let repo = MemorySettingRepository::new();

        repo.create(1, 999, 201, json!(true)).await.unwrap();
        repo.create(1, 999, 202, json!("*/5 * * * *")).await.unwrap();
        repo.create(1, 999, 202, json!("*/10 * * * *")).await.unwrap();
        assert_eq!(repo.count(), 2);

        let rows = repo.find_by_keys(Some(999), &[202]).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].setting_value, json!("*/10 * * * *"));

        assert_eq!(repo.delete_by_owner(999).await.unwrap(), 2);
        assert_eq!(repo.count(), 0);

        repo.create(1, 1, 201, json!(false)).await.unwrap();
        repo.clear();
        assert_eq!(repo.count(), 0);
    }
}
