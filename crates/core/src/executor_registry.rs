use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::traits::TaskExecutor;

/// 任务执行器注册表
///
/// 以配置项code为键。正常运行期间在启动时一次性写入、之后只读；
/// 重复注册时后写者覆盖，供测试替换和扩展使用。
pub struct ExecutorRegistry {
    executors: Arc<RwLock<HashMap<i32, Arc<dyn TaskExecutor>>>>,
}

impl ExecutorRegistry {
    pub fn new() -> Self {
        Self {
            executors: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// 注册执行器，同code重复注册时覆盖
    pub async fn register(&self, code: i32, executor: Arc<dyn TaskExecutor>) {
        let name = executor.name().to_string();
        let mut registry = self.executors.write().await;
        registry.insert(code, executor);
        info!("注册任务执行器: code={code}, name={name}");
    }

    pub async fn get(&self, code: i32) -> Option<Arc<dyn TaskExecutor>> {
        let registry = self.executors.read().await;
        registry.get(&code).cloned()
    }

    pub async fn codes(&self) -> Vec<i32> {
        let registry = self.executors.read().await;
        registry.keys().copied().collect()
    }

    pub async fn len(&self) -> usize {
        let registry = self.executors.read().await;
        registry.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ExecutorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SchedulerResult;
    use async_trait::async_trait;

    struct NamedExecutor(&'static str);

    #[async_trait]
    impl TaskExecutor for NamedExecutor {
        fn name(&self) -> &str {
            self.0
        }

        async fn execute(&self, _owner_id: i64) -> SchedulerResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_register_and_get() {
        let registry = ExecutorRegistry::new();
        assert!(registry.is_empty().await);

        registry.register(202, Arc::new(NamedExecutor("collect"))).await;
        assert_eq!(registry.len().await, 1);

        let executor = registry.get(202).await;
        assert!(executor.is_some());
        assert_eq!(executor.unwrap().name(), "collect");
        assert!(registry.get(999).await.is_none());
    }

    #[tokio::test]
    async fn test_reregister_overwrites() {
        let registry = ExecutorRegistry::new();
        registry.register(202, Arc::new(NamedExecutor("first"))).await;
        registry.register(202, Arc::new(NamedExecutor("second"))).await;

        assert_eq!(registry.len().await, 1);
        assert_eq!(registry.get(202).await.unwrap().name(), "second");
    }
}
