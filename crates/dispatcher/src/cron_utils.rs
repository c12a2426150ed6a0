use std::str::FromStr;

use chrono::{DateTime, Utc};
use cron::Schedule;

use content_scheduler_core::{SchedulerError, SchedulerResult};

/// CRON触发器
///
/// 对外接受标准5字段crontab表达式（分 时 日 月 周）。cron库
/// 本身要求带秒字段，解析前统一补一个秒字段 `0`；字段数不是
/// 5的表达式一律拒绝，避免租户依赖扩展语法。
///
/// 星期字段按crontab约定解释：0和7都是周日，1是周一。cron库
/// 的数字星期是1=周日，与crontab差一天，解析前把数字统一翻译
/// 成SUN-SAT名字回避这套编号。
#[derive(Debug, Clone)]
pub struct CronTrigger {
    schedule: Schedule,
    expr: String,
}

const DOW_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// 把星期字段里的crontab数字（0-7）翻译成星期名
///
/// 逐个处理列表项，保留范围和步长结构；名字和超出0-7的数字
/// 原样透传，由cron库解析时报错。
fn normalize_dow(field: &str) -> String {
    fn map_token(token: &str) -> String {
        match token.parse::<u8>() {
            Ok(n) if n <= 7 => DOW_NAMES[(n % 7) as usize].to_string(),
            _ => token.to_string(),
        }
    }

    field
        .split(',')
        .map(|part| {
            let (base, step) = match part.split_once('/') {
                Some((base, step)) => (base, Some(step)),
                None => (part, None),
            };
            let mapped = match base.split_once('-') {
                Some((from, to)) => format!("{}-{}", map_token(from), map_token(to)),
                None => map_token(base),
            };
            match step {
                Some(step) => format!("{mapped}/{step}"),
                None => mapped,
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

impl CronTrigger {
    /// 解析5字段crontab表达式
    pub fn from_crontab(expr: &str) -> SchedulerResult<Self> {
        let fields: Vec<&str> = expr.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(SchedulerError::InvalidCron {
                expr: expr.to_string(),
                message: format!("需要5个字段（分 时 日 月 周），实际为{}个", fields.len()),
            });
        }

        let normalized = format!(
            "0 {} {} {} {} {}",
            fields[0],
            fields[1],
            fields[2],
            fields[3],
            normalize_dow(fields[4])
        );
        let schedule =
            Schedule::from_str(&normalized).map_err(|e| SchedulerError::InvalidCron {
                expr: expr.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            schedule,
            expr: expr.to_string(),
        })
    }

    /// 原始的5字段表达式
    pub fn expression(&self) -> &str {
        &self.expr
    }

    /// 获取下一次触发时间
    pub fn next_fire(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&from).next()
    }

    /// 获取从指定时间开始的多个触发时间
    pub fn upcoming(&self, from: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
        self.schedule.after(&from).take(count).collect()
    }

    /// 校验cron表达式是否有效
    pub fn validate(expr: &str) -> SchedulerResult<()> {
        Self::from_crontab(expr).map(|_| ())
    }
}
