// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{TaskId, TaskSummary};
use serde::{Deserialize, Serialize};

/// 调度器状态快照
///
/// 在调度器状态锁内一次性生成，与并发的提交和完成互不撕裂
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStatus {
    /// 最大并发数
    pub max_concurrency: usize,
    /// 正在运行的任务数
    pub running: usize,
    /// 排队等待的任务数
    pub waiting: usize,
    /// 排队中的任务，按提交顺序排列
    pub queued: Vec<TaskSummary>,
    /// 正在运行的任务ID，升序
    pub running_ids: Vec<TaskId>,
    /// 正在运行的任务摘要（含开始时间），按ID升序
    pub active: Vec<TaskSummary>,
}

impl SchedulerStatus {
    /// 没有运行中也没有排队中的任务
    pub fn is_idle(&self) -> bool {
        self.running == 0 && self.waiting == 0
    }
}
