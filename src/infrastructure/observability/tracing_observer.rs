// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{TaskId, TaskStatus};
use crate::domain::services::task_observer::TaskObserver;
use tracing::{debug, warn};

/// 把任务生命周期写入日志的观察者
#[derive(Clone, Debug, Default)]
pub struct TracingObserver;

impl TaskObserver for TracingObserver {
    fn on_task_started(&self, task_id: TaskId, running: usize) {
        debug!(task_id, running, "Task started");
    }

    fn on_task_finished(&self, task_id: TaskId, status: TaskStatus, running: usize) {
        match status {
            TaskStatus::Failed => warn!(task_id, running, "Task failed"),
            _ => debug!(task_id, %status, running, "Task finished"),
        }
    }
}
