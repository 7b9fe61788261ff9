// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::infrastructure::observability::metrics_observer::{
    RUNNING_TASKS, TASKS_COMPLETED_TOTAL, TASKS_FAILED_TOTAL, TASKS_STARTED_TOTAL,
};
use metrics::{describe_counter, describe_gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 初始化指标系统
///
/// 启动Prometheus导出器并注册调度器指标
///
/// # 参数
///
/// * `addr` - 导出器监听地址
pub fn init_metrics(addr: SocketAddr) {
    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return;
    }

    describe_counter!(TASKS_STARTED_TOTAL, "Total number of tasks dispatched");
    describe_counter!(TASKS_COMPLETED_TOTAL, "Total number of tasks completed");
    describe_counter!(TASKS_FAILED_TOTAL, "Total number of tasks failed");
    describe_gauge!(RUNNING_TASKS, "Number of tasks currently occupying a slot");

    info!("Metrics exporter listening on {}", addr);
}
