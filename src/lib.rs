// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含任务模型、调度器配置、状态快照和观察者接口
pub mod domain;

/// 基础设施模块
///
/// 提供观察者的日志与指标实现以及指标导出
pub mod infrastructure;

/// 队列模块
///
/// 实现有界并发调度器和任务完成句柄
pub mod queue;

/// 工具模块
///
/// 提供错误类型和遥测初始化
pub mod utils;

pub use domain::models::scheduler_config::SchedulerConfig;
pub use domain::models::scheduler_status::SchedulerStatus;
pub use domain::models::task::{TaskId, TaskStatus};
pub use domain::services::task_observer::TaskObserver;
pub use queue::{Scheduler, SchedulerBuilder, TaskHandle};
pub use utils::errors::SchedulerError;
