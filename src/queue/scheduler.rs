// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scheduler_config::SchedulerConfig;
use crate::domain::models::scheduler_status::SchedulerStatus;
use crate::domain::models::task::{TaskId, TaskOutcome, TaskRecord, TaskSummary};
use crate::domain::services::task_observer::TaskObserver;
use crate::queue::task_handle::TaskHandle;
use crate::queue::task_queue::{Delivery, Job, PendingQueue, QueuedTask};
use crate::utils::errors::SchedulerError;
use futures::FutureExt;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{oneshot, Notify};
use tracing::{debug, warn};

/// 调度器的可变状态，全部由同一把锁保护
#[derive(Debug)]
struct SchedulerState {
    queue: PendingQueue,
    running: BTreeMap<TaskId, TaskSummary>,
    next_id: TaskId,
}

impl SchedulerState {
    fn is_idle(&self) -> bool {
        self.running.is_empty() && self.queue.is_empty()
    }

    /// 在持锁期间取出所有可以立即启动的任务
    ///
    /// 每取出一个任务就占用一个槽位，因此并发的触发者不会看到过期的运行计数。
    /// 返回的每一项附带该任务启动后的运行中任务数。
    fn take_ready(&mut self, max_concurrency: usize) -> Vec<(QueuedTask, usize)> {
        let mut ready = Vec::new();
        while self.running.len() < max_concurrency {
            let Some(mut task) = self.queue.dequeue() else {
                break;
            };
            task.record.mark_running();
            self.running.insert(task.record.id, task.record.summary());
            ready.push((task, self.running.len()));
        }
        ready
    }
}

struct SchedulerInner {
    max_concurrency: usize,
    state: Mutex<SchedulerState>,
    observers: Vec<Arc<dyn TaskObserver>>,
    idle: Notify,
    runtime: Handle,
}

impl SchedulerInner {
    /// 调度一次：取出就绪任务并在运行时上启动
    fn dispatch(self: &Arc<Self>) {
        let ready = self.state.lock().take_ready(self.max_concurrency);
        let started = self.spawn_ready(ready);
        self.notify_started(&started);
    }

    /// 启动已占用槽位的任务，返回 (任务ID, 启动后的运行数)
    fn spawn_ready(self: &Arc<Self>, ready: Vec<(QueuedTask, usize)>) -> Vec<(TaskId, usize)> {
        let mut started = Vec::with_capacity(ready.len());
        for (QueuedTask { record, work }, running) in ready {
            debug!(task_id = record.id, running, "Task dispatched");
            started.push((record.id, running));

            let inner = Arc::clone(self);
            self.runtime.spawn(async move {
                inner.execute(record, work).await;
            });
        }
        started
    }

    fn notify_started(&self, started: &[(TaskId, usize)]) {
        for &(task_id, running) in started {
            self.notify_observers(task_id, |observer| {
                observer.on_task_started(task_id, running)
            });
        }
    }

    /// 逐个调用观察者；观察者panic只记录日志，不影响调度
    fn notify_observers(&self, task_id: TaskId, callback: impl Fn(&dyn TaskObserver)) {
        for observer in &self.observers {
            let result = panic::catch_unwind(AssertUnwindSafe(|| callback(observer.as_ref())));
            if result.is_err() {
                warn!(task_id, "Task observer panicked");
            }
        }
    }

    async fn execute(self: Arc<Self>, mut record: TaskRecord, work: Job) {
        let (outcome, deliver) = work().await;
        record.mark_settled(outcome);

        // Release the slot and claim successors in one step, then notify the caller.
        let (running, ready, idle) = {
            let mut state = self.state.lock();
            state.running.remove(&record.id);
            let running = state.running.len();
            let ready = state.take_ready(self.max_concurrency);
            (running, ready, state.is_idle())
        };

        deliver();
        let started = self.spawn_ready(ready);

        debug!(
            task_id = record.id,
            status = %record.status,
            running,
            duration_ms = record.duration().map(|d| d.num_milliseconds()),
            "Task settled"
        );
        let (task_id, status) = (record.id, record.status);
        self.notify_observers(task_id, |observer| {
            observer.on_task_finished(task_id, status, running)
        });
        self.notify_started(&started);

        if idle {
            self.idle.notify_waiters();
        }
    }
}

/// 有界并发任务调度器
///
/// 同一时刻最多运行 `max_concurrency` 个任务，其余任务按提交顺序排队，
/// 每当有任务结束释放槽位时，立即启动队头任务。调度只由提交和任务完成
/// 两种事件触发，没有轮询。
///
/// `Scheduler` 可以廉价克隆，所有克隆共享同一份状态。
#[derive(Clone)]
pub struct Scheduler {
    inner: Arc<SchedulerInner>,
}

impl Scheduler {
    /// 使用指定配置创建调度器
    ///
    /// 必须在Tokio运行时内调用，任务会被派发到当前运行时上执行。
    ///
    /// # 参数
    ///
    /// * `config` - 调度器配置
    ///
    /// # 返回值
    ///
    /// * `Ok(Scheduler)` - 创建成功
    /// * `Err(SchedulerError)` - 并发数无效或不在运行时内
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        SchedulerBuilder::from_config(config).build()
    }

    /// 使用指定配置创建调度器，任务派发到给定的运行时上
    ///
    /// 可以在运行时之外调用
    pub fn with_runtime(config: SchedulerConfig, runtime: Handle) -> Result<Self, SchedulerError> {
        SchedulerBuilder::from_config(config).runtime(runtime).build()
    }

    /// 创建调度器构建器
    pub fn builder() -> SchedulerBuilder {
        SchedulerBuilder::new()
    }

    /// 提交任务
    ///
    /// 为任务分配下一个ID并放入队尾，随后立即尝试调度。`work` 在获得槽位前
    /// 不会被调用。该方法从不失败，也不会等待任务执行。
    ///
    /// # 参数
    ///
    /// * `work` - 无参的异步工作，返回 `Result<T, E>`
    ///
    /// # 返回值
    ///
    /// 返回任务完成句柄，等待它得到 `work` 的原始结果
    pub fn submit<F, Fut, T, E>(&self, work: F) -> TaskHandle<T, E>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();

        let job: Job = Box::new(move || {
            async move {
                let settlement = AssertUnwindSafe(async move { work().await })
                    .catch_unwind()
                    .await;
                let outcome = match &settlement {
                    Ok(Ok(_)) => TaskOutcome::Completed,
                    Ok(Err(_)) | Err(_) => TaskOutcome::Failed,
                };
                let deliver: Delivery = Box::new(move || {
                    // The caller may have dropped its handle.
                    let _ = sender.send(settlement);
                });
                (outcome, deliver)
            }
            .boxed()
        });

        let id = {
            let mut state = self.inner.state.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.queue.enqueue(QueuedTask {
                record: TaskRecord::new(id),
                work: job,
            });
            debug!(task_id = id, waiting = state.queue.len(), "Task submitted");
            id
        };

        self.inner.dispatch();

        TaskHandle::new(id, receiver)
    }

    /// 获取调度器状态快照
    ///
    /// 只读操作，不影响调度顺序和状态
    pub fn status(&self) -> SchedulerStatus {
        let state = self.inner.state.lock();
        SchedulerStatus {
            max_concurrency: self.inner.max_concurrency,
            running: state.running.len(),
            waiting: state.queue.len(),
            queued: state.queue.summaries(),
            running_ids: state.running.keys().copied().collect(),
            active: state.running.values().cloned().collect(),
        }
    }

    /// 最大并发数
    pub fn max_concurrency(&self) -> usize {
        self.inner.max_concurrency
    }

    /// 等待所有已提交任务结束
    ///
    /// 当没有运行中和排队中的任务时返回；如果此刻已经空闲则立即返回。
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            let idle = self.inner.state.lock().is_idle();
            if idle {
                return;
            }

            notified.await;
        }
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.status();
        f.debug_struct("Scheduler")
            .field("max_concurrency", &status.max_concurrency)
            .field("running", &status.running)
            .field("waiting", &status.waiting)
            .finish()
    }
}

/// 调度器构建器
pub struct SchedulerBuilder {
    config: SchedulerConfig,
    observers: Vec<Arc<dyn TaskObserver>>,
    runtime: Option<Handle>,
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerBuilder {
    pub fn new() -> Self {
        Self::from_config(SchedulerConfig::default())
    }

    pub fn from_config(config: SchedulerConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            runtime: None,
        }
    }

    pub fn max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// 添加生命周期观察者
    pub fn observer(mut self, observer: Arc<dyn TaskObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// 指定任务运行的Tokio运行时，默认使用构建时所在的运行时
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn build(self) -> Result<Scheduler, SchedulerError> {
        self.config.validate()?;

        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?,
        };

        Ok(Scheduler {
            inner: Arc::new(SchedulerInner {
                max_concurrency: self.config.max_concurrency,
                state: Mutex::new(SchedulerState {
                    queue: PendingQueue::new(),
                    running: BTreeMap::new(),
                    next_id: 1,
                }),
                observers: self.observers,
                idle: Notify::new(),
                runtime,
            }),
        })
    }
}
