// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 任务（task）：单个提交的工作单元及其状态
/// - 调度器配置（scheduler_config）
/// - 调度器状态（scheduler_status）：只读快照
pub mod scheduler_config;
pub mod scheduler_status;
pub mod task;
