// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 可观测性模块
///
/// 提供任务生命周期观察者的日志和指标实现
pub mod metrics_observer;
pub mod tracing_observer;

pub use metrics_observer::MetricsObserver;
pub use tracing_observer::TracingObserver;
