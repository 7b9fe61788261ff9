// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::SchedulerError;

/// 默认最大并发数
pub const DEFAULT_MAX_CONCURRENCY: usize = 3;

/// 调度器配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// 同时运行的最大任务数，必须大于等于1
    pub max_concurrency: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl SchedulerConfig {
    pub fn new(max_concurrency: usize) -> Self {
        Self { max_concurrency }
    }

    /// 校验配置
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 配置有效
    /// * `Err(SchedulerError::InvalidConcurrency)` - 并发数小于1
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.max_concurrency < 1 {
            return Err(SchedulerError::InvalidConcurrency(self.max_concurrency));
        }
        Ok(())
    }
}
