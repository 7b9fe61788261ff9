// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 任务观察者（task_observer）：任务开始和结束事件的诊断钩子
pub mod task_observer;
