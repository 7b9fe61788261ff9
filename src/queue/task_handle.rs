// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::TaskId;
use std::fmt;
use std::future::Future;
use std::panic;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use std::thread;
use tokio::sync::oneshot;

/// 投递给完成句柄的结果；`Err` 为任务panic的负载
pub(crate) type Settlement<T, E> = thread::Result<Result<T, E>>;

/// 任务完成句柄
///
/// 等待该句柄得到的就是任务工作本身返回的 `Result<T, E>`，不做任何包装。
/// 无论任务当前在排队还是在运行，句柄都只会被通知一次。
///
/// 丢弃句柄不会取消任务，任务仍会执行，只是结果被丢弃。
///
/// # Panics
///
/// 如果任务工作发生panic，等待句柄时会在调用方重新抛出同一个panic。
/// 如果运行时在任务结束前被关闭，等待句柄也会panic。
pub struct TaskHandle<T, E> {
    id: TaskId,
    receiver: oneshot::Receiver<Settlement<T, E>>,
}

impl<T, E> TaskHandle<T, E> {
    pub(crate) fn new(id: TaskId, receiver: oneshot::Receiver<Settlement<T, E>>) -> Self {
        Self { id, receiver }
    }

    /// 任务ID
    pub fn id(&self) -> TaskId {
        self.id
    }
}

impl<T, E> Future for TaskHandle<T, E> {
    type Output = Result<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let id = self.id;
        match ready!(Pin::new(&mut self.receiver).poll(cx)) {
            Ok(Ok(result)) => Poll::Ready(result),
            Ok(Err(payload)) => panic::resume_unwind(payload),
            Err(_) => panic!("task {} was dropped by the runtime before it settled", id),
        }
    }
}

impl<T, E> fmt::Debug for TaskHandle<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle").field("id", &self.id).finish()
    }
}
