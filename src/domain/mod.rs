// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含调度器的核心概念：
/// - 领域模型（models）：任务记录、任务状态、调度器配置和状态快照
/// - 服务（services）：任务生命周期观察者接口
pub mod models;
pub mod services;
