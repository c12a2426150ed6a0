#[cfg(test)]
mod job_runner_tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use content_scheduler_core::{SchedulerError, SchedulerResult, TaskExecutor};
    use content_scheduler_dispatcher::cron_utils::CronTrigger;
    use content_scheduler_dispatcher::job_runner::{JobBinding, JobRunner};

    struct CountingExecutor {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TaskExecutor for CountingExecutor {
        fn name(&self) -> &str {
            "counting"
        }

        async fn execute(&self, _owner_id: i64) -> SchedulerResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn user_binding(owner_id: i64) -> JobBinding {
        JobBinding::User {
            executor: Arc::new(CountingExecutor {
                calls: Arc::new(AtomicUsize::new(0)),
            }),
            owner_id,
        }
    }

    #[tokio::test]
    async fn test_add_requires_start() {
        let runner = JobRunner::new();
        let trigger = CronTrigger::from_crontab("*/5 * * * *").unwrap();

        let result = runner.add_job("采集_1", trigger, user_binding(1)).await;
        assert!(matches!(result, Err(SchedulerError::RunnerNotStarted)));
    }

    #[tokio::test]
    async fn test_double_start_is_error() {
        let runner = JobRunner::new();
        assert!(runner.start().is_ok());
        assert!(matches!(
            runner.start(),
            Err(SchedulerError::AlreadyRunning)
        ));
    }

    #[tokio::test]
    async fn test_add_get_remove() {
        let runner = JobRunner::new();
        runner.start().unwrap();

        let trigger = CronTrigger::from_crontab("*/5 * * * *").unwrap();
        runner
            .add_job("采集_999", trigger, user_binding(999))
            .await
            .unwrap();

        let job = runner.get_job("采集_999").await.unwrap();
        assert_eq!(job.id, "采集_999");
        assert_eq!(job.cron, "*/5 * * * *");
        assert_eq!(job.owner_id, Some(999));
        assert!(job.next_run_at.is_some());

        assert!(runner.remove_job("采集_999").await);
        assert!(runner.get_job("采集_999").await.is_none());
        // 再移除一次不是错误，返回false
        assert!(!runner.remove_job("采集_999").await);

        runner.shutdown().await;
    }

    #[tokio::test]
    async fn test_add_replaces_existing_job() {
        let runner = JobRunner::new();
        runner.start().unwrap();

        let first = CronTrigger::from_crontab("*/5 * * * *").unwrap();
        let second = CronTrigger::from_crontab("0 8 * * *").unwrap();
        runner.add_job("采集_1", first, user_binding(1)).await.unwrap();
        runner.add_job("采集_1", second, user_binding(1)).await.unwrap();

        assert_eq!(runner.job_count().await, 1);
        let job = runner.get_job("采集_1").await.unwrap();
        assert_eq!(job.cron, "0 8 * * *");

        runner.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_clears_jobs_and_is_idempotent() {
        let runner = JobRunner::new();
        // 未启动时停止是空操作
        runner.shutdown().await;

        runner.start().unwrap();
        let trigger = CronTrigger::from_crontab("*/5 * * * *").unwrap();
        runner.add_job("采集_1", trigger, user_binding(1)).await.unwrap();

        runner.shutdown().await;
        assert!(!runner.is_running());
        assert_eq!(runner.job_count().await, 0);
        runner.shutdown().await;

        // 停止后注册被拒绝
        let trigger = CronTrigger::from_crontab("*/5 * * * *").unwrap();
        let result = runner.add_job("采集_1", trigger, user_binding(1)).await;
        assert!(matches!(result, Err(SchedulerError::RunnerNotStarted)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_fires_executor() {
        let runner = JobRunner::new();
        runner.start().unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let binding = JobBinding::User {
            executor: Arc::new(CountingExecutor {
                calls: Arc::clone(&calls),
            }),
            owner_id: 7,
        };
        let trigger = CronTrigger::from_crontab("* * * * *").unwrap();
        runner.add_job("采集_7", trigger, binding).await.unwrap();

        // 虚拟时钟下sleep自动推进，每分钟触发的任务很快会执行
        tokio::time::sleep(Duration::from_secs(180)).await;
        assert!(calls.load(Ordering::SeqCst) >= 1);

        runner.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_removed_job_does_not_fire_again() {
        let runner = JobRunner::new();
        runner.start().unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let binding = JobBinding::User {
            executor: Arc::new(CountingExecutor {
                calls: Arc::clone(&calls),
            }),
            owner_id: 7,
        };
        let trigger = CronTrigger::from_crontab("* * * * *").unwrap();
        runner.add_job("采集_7", trigger, binding).await.unwrap();

        tokio::time::sleep(Duration::from_secs(90)).await;
        assert!(calls.load(Ordering::SeqCst) >= 1);

        assert!(runner.remove_job("采集_7").await);
        // 留出在途执行收尾的时间，之后计数不得再增长
        tokio::time::sleep(Duration::from_secs(1)).await;
        let after_remove = calls.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(calls.load(Ordering::SeqCst), after_remove);

        runner.shutdown().await;
    }
}
