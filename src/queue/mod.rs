// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 提供有界并发调度器、待执行队列和任务完成句柄
pub mod scheduler;
pub mod task_handle;
pub(crate) mod task_queue;

pub use scheduler::{Scheduler, SchedulerBuilder};
pub use task_handle::TaskHandle;
