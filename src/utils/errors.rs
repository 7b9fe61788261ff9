// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 调度器错误类型
///
/// 只在构造调度器时出现；任务自身的错误原样交给调用方
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("无效的最大并发数: {0}，必须大于等于1")]
    InvalidConcurrency(usize),

    #[error("当前线程不在Tokio运行时中")]
    NoRuntime,
}
