// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{TaskOutcome, TaskRecord, TaskStatus, TaskSummary};
use futures::future::BoxFuture;
use std::collections::VecDeque;
use std::fmt;

/// 把任务结果交给调用方的回调
pub(crate) type Delivery = Box<dyn FnOnce() + Send>;

/// 类型擦除后的任务工作
///
/// 执行任务并返回结果分类，以及一个把具体值/错误投递给完成句柄的回调。
/// 投递被推迟，使调度器可以先释放槽位再通知调用方。
pub(crate) type Job = Box<dyn FnOnce() -> BoxFuture<'static, (TaskOutcome, Delivery)> + Send>;

/// 排队中的任务
pub(crate) struct QueuedTask {
    pub record: TaskRecord,
    pub work: Job,
}

impl fmt::Debug for QueuedTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueuedTask")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

/// 先进先出的待执行任务队列
///
/// 只保存Pending状态的任务；任务出队的同时即转入Running
#[derive(Debug, Default)]
pub(crate) struct PendingQueue {
    tasks: VecDeque<QueuedTask>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 入队到队尾
    pub fn enqueue(&mut self, task: QueuedTask) {
        debug_assert_eq!(task.record.status, TaskStatus::Pending);
        debug_assert!(self
            .tasks
            .back()
            .map_or(true, |last| last.record.id < task.record.id));
        self.tasks.push_back(task);
    }

    /// 从队头出队（ID最小的任务）
    pub fn dequeue(&mut self) -> Option<QueuedTask> {
        self.tasks.pop_front()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 按提交顺序列出排队任务的摘要
    pub fn summaries(&self) -> Vec<TaskSummary> {
        self.tasks.iter().map(|task| task.record.summary()).collect()
    }
}
