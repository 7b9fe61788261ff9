// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 任务标识符
///
/// 在同一个调度器实例内按提交顺序单调递增，从1开始
pub type TaskId = u64;

/// 任务状态枚举
///
/// 状态只能向前转换：
/// Pending → Running → Completed/Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// 等待中，任务已提交但尚未获得执行槽位
    #[default]
    Pending,
    /// 运行中，任务占用一个执行槽位
    Running,
    /// 已完成，任务成功返回
    Completed,
    /// 已失败，任务返回错误或发生panic
    Failed,
}

impl TaskStatus {
    /// 是否为终止状态
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    /// 检查能否转换到目标状态
    ///
    /// # 参数
    ///
    /// * `next` - 目标状态
    ///
    /// # 返回值
    ///
    /// 仅当转换符合 Pending → Running → Completed/Failed 时返回true
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        matches!(
            (self, next),
            (TaskStatus::Pending, TaskStatus::Running)
                | (TaskStatus::Running, TaskStatus::Completed)
                | (TaskStatus::Running, TaskStatus::Failed)
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Running => write!(f, "running"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

/// 任务执行结果
///
/// 调度器只关心任务成功与否，具体的值和错误直接交给调用方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Completed,
    Failed,
}

impl From<TaskOutcome> for TaskStatus {
    fn from(outcome: TaskOutcome) -> Self {
        match outcome {
            TaskOutcome::Completed => TaskStatus::Completed,
            TaskOutcome::Failed => TaskStatus::Failed,
        }
    }
}

/// 任务记录
///
/// 描述一个已提交任务的生命周期。记录在提交时创建，
/// 在完成句柄被通知后由调度器丢弃。
#[derive(Debug, Clone)]
pub struct TaskRecord {
    /// 任务唯一标识符
    pub id: TaskId,
    /// 任务当前状态
    pub status: TaskStatus,
    /// 提交时间
    pub submitted_at: DateTime<Utc>,
    /// 开始执行时间
    pub started_at: Option<DateTime<Utc>>,
    /// 结束时间
    pub finished_at: Option<DateTime<Utc>>,
}

impl TaskRecord {
    /// 创建一个处于Pending状态的新记录
    pub fn new(id: TaskId) -> Self {
        Self {
            id,
            status: TaskStatus::Pending,
            submitted_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    /// 标记任务开始执行
    pub fn mark_running(&mut self) {
        debug_assert!(self.status.can_transition_to(TaskStatus::Running));
        self.status = TaskStatus::Running;
        self.started_at = Some(Utc::now());
    }

    /// 根据执行结果标记任务结束
    ///
    /// # 参数
    ///
    /// * `outcome` - 任务执行结果
    pub fn mark_settled(&mut self, outcome: TaskOutcome) {
        let next = TaskStatus::from(outcome);
        debug_assert!(next.is_terminal() && self.status.can_transition_to(next));
        self.status = next;
        self.finished_at = Some(Utc::now());
    }

    /// 执行耗时，仅在任务结束后可用
    pub fn duration(&self) -> Option<Duration> {
        Some(self.finished_at? - self.started_at?)
    }

    /// 生成用于状态快照的摘要
    pub fn summary(&self) -> TaskSummary {
        TaskSummary {
            id: self.id,
            status: self.status,
            submitted_at: self.submitted_at,
            started_at: self.started_at,
        }
    }
}

/// 状态快照中的单个任务摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: TaskId,
    pub status: TaskStatus,
    pub submitted_at: DateTime<Utc>,
    /// 开始执行时间，排队中的任务为空
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}
