// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{TaskId, TaskStatus};

/// 任务生命周期观察者
///
/// 仅用于诊断（日志、指标）。回调在调度器状态锁之外、
/// 对应的状态变更之后调用，不能也不应影响调度。
pub trait TaskObserver: Send + Sync {
    /// 任务开始执行
    ///
    /// # 参数
    ///
    /// * `task_id` - 任务ID
    /// * `running` - 该任务开始后的运行中任务数
    fn on_task_started(&self, task_id: TaskId, running: usize);

    /// 任务执行结束
    ///
    /// # 参数
    ///
    /// * `task_id` - 任务ID
    /// * `status` - 终止状态（Completed或Failed）
    /// * `running` - 该任务释放槽位后的运行中任务数
    fn on_task_finished(&self, task_id: TaskId, status: TaskStatus, running: usize);
}
