// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 提供领域层接口的技术实现：
/// - 指标（metrics）：Prometheus导出器
/// - 可观测性（observability）：任务观察者的日志和指标实现
pub mod metrics;
pub mod observability;
