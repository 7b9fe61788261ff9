// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{TaskId, TaskStatus};
use crate::domain::services::task_observer::TaskObserver;
use metrics::{counter, gauge};

pub const TASKS_STARTED_TOTAL: &str = "scheduler_tasks_started_total";
pub const TASKS_COMPLETED_TOTAL: &str = "scheduler_tasks_completed_total";
pub const TASKS_FAILED_TOTAL: &str = "scheduler_tasks_failed_total";
pub const RUNNING_TASKS: &str = "scheduler_running_tasks";

/// 把任务生命周期记录为指标的观察者
///
/// 运行中任务数用增减维护，回调在锁外乱序到达时仍能回到0。
/// 未安装指标记录器时所有调用都是空操作
#[derive(Clone, Debug, Default)]
pub struct MetricsObserver;

impl TaskObserver for MetricsObserver {
    fn on_task_started(&self, _task_id: TaskId, _running: usize) {
        counter!(TASKS_STARTED_TOTAL).increment(1);
        gauge!(RUNNING_TASKS).increment(1.0);
    }

    fn on_task_finished(&self, _task_id: TaskId, status: TaskStatus, _running: usize) {
        match status {
            TaskStatus::Failed => counter!(TASKS_FAILED_TOTAL).increment(1),
            _ => counter!(TASKS_COMPLETED_TOTAL).increment(1),
        }
        gauge!(RUNNING_TASKS).decrement(1.0);
    }
}
