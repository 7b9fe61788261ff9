// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::ConcurrencyProbe;
use parking_lot::Mutex;
use schedrs::queue::Scheduler;
use schedrs::{SchedulerConfig, TaskStatus};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::Instant;

fn scheduler(max_concurrency: usize) -> Scheduler {
    Scheduler::new(SchedulerConfig::new(max_concurrency)).unwrap()
}

fn assert_near(actual: Duration, expected_ms: u64) {
    let expected = Duration::from_millis(expected_ms);
    let tolerance = Duration::from_millis(5);
    assert!(
        actual >= expected && actual <= expected + tolerance,
        "expected ~{:?}, got {:?}",
        expected,
        actual
    );
}

#[tokio::test(start_paused = true)]
async fn test_mixed_durations_with_two_slots() {
    let scheduler = scheduler(2);
    let origin = Instant::now();
    let timeline = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = [("T1", 200), ("T2", 100), ("T3", 150), ("T4", 50)]
        .into_iter()
        .map(|(name, millis)| {
            let timeline = timeline.clone();
            scheduler.submit(move || async move {
                let started = origin.elapsed();
                tokio::time::sleep(Duration::from_millis(millis)).await;
                timeline.lock().push((name, started, origin.elapsed()));
                Ok::<_, ()>(name)
            })
        })
        .collect();

    let status = scheduler.status();
    assert_eq!(status.running, 2);
    assert_eq!(status.waiting, 2);

    let results = futures::future::join_all(handles).await;
    assert_eq!(results, vec![Ok("T1"), Ok("T2"), Ok("T3"), Ok("T4")]);

    let timeline = timeline.lock().clone();
    let lookup = |name: &str| {
        timeline
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, start, end)| (*start, *end))
            .unwrap()
    };

    let (t1_start, t1_end) = lookup("T1");
    let (t2_start, t2_end) = lookup("T2");
    let (t3_start, t3_end) = lookup("T3");
    let (t4_start, t4_end) = lookup("T4");

    assert_near(t1_start, 0);
    assert_near(t2_start, 0);
    assert_near(t2_end, 100);
    assert_near(t3_start, 100);
    assert_near(t1_end, 200);
    assert_near(t4_start, 200);
    assert_near(t3_end, 250);
    assert_near(t4_end, 250);

    scheduler.wait_idle().await;
    assert!(scheduler.status().is_idle());
}

#[tokio::test]
async fn test_single_failure_is_reported_to_caller() {
    let scheduler = scheduler(2);

    let handle = scheduler.submit(|| async { Err::<(), _>("E") });
    assert_eq!(handle.await, Err("E"));

    let status = scheduler.status();
    assert_eq!(status.running, 0);
    assert_eq!(status.waiting, 0);
}

#[tokio::test]
async fn test_single_slot_runs_strictly_sequentially() {
    let scheduler = scheduler(1);
    let probe = ConcurrencyProbe::default();
    let log = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = (1..=3u64)
        .map(|n| {
            let probe = probe.clone();
            let log = log.clone();
            scheduler.submit(move || async move {
                let _guard = probe.enter();
                log.lock().push(format!("start {}", n));
                tokio::time::sleep(Duration::from_millis(5)).await;
                log.lock().push(format!("end {}", n));
                Ok::<_, ()>(n)
            })
        })
        .collect();

    let results = futures::future::join_all(handles).await;
    assert_eq!(results, vec![Ok(1), Ok(2), Ok(3)]);
    assert_eq!(probe.peak(), 1);
    assert_eq!(
        *log.lock(),
        vec!["start 1", "end 1", "start 2", "end 2", "start 3", "end 3"]
    );
}

#[tokio::test]
async fn test_status_mid_flight_lists_queued_in_order() {
    let scheduler = scheduler(2);
    let gate = Arc::new(Semaphore::new(0));

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let gate = gate.clone();
            scheduler.submit(move || async move {
                let _permit = gate.acquire().await.map_err(|_| "gate closed")?;
                Ok::<_, &str>(())
            })
        })
        .collect();

    let status = scheduler.status();
    assert_eq!(status.max_concurrency, 2);
    assert_eq!(status.running, 2);
    assert_eq!(status.waiting, 3);
    assert_eq!(status.running_ids, vec![1, 2]);
    assert_eq!(
        status.queued.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![3, 4, 5]
    );
    assert!(status.queued.iter().all(|t| t.status == TaskStatus::Pending));

    // Reading status is side-effect free.
    assert_eq!(scheduler.status(), status);

    gate.add_permits(2);
    for result in futures::future::join_all(handles).await {
        assert_eq!(result, Ok(()));
    }
    assert!(scheduler.status().is_idle());
}

#[tokio::test]
async fn test_status_serializes_to_json() {
    let scheduler = scheduler(1);
    let gate = Arc::new(Semaphore::new(0));

    let first = {
        let gate = gate.clone();
        scheduler.submit(move || async move {
            let _permit = gate.acquire().await.map_err(|_| ())?;
            Ok::<_, ()>(())
        })
    };
    let second = scheduler.submit(|| async { Ok::<_, ()>(()) });

    let json = serde_json::to_value(scheduler.status()).unwrap();
    assert_eq!(json["max_concurrency"], 1);
    assert_eq!(json["running"], 1);
    assert_eq!(json["waiting"], 1);
    assert_eq!(json["queued"][0]["id"], 2);
    assert_eq!(json["queued"][0]["status"], "pending");

    gate.add_permits(1);
    first.await.unwrap();
    second.await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_running_count_never_exceeds_bound() {
    let scheduler = scheduler(3);
    let probe = ConcurrencyProbe::default();

    let handles: Vec<_> = (0..40u64)
        .map(|i| {
            let probe = probe.clone();
            let observed = scheduler.clone();
            scheduler.submit(move || async move {
                let _guard = probe.enter();
                assert!(observed.status().running <= 3);
                tokio::time::sleep(Duration::from_millis(1 + i % 5)).await;
                Ok::<_, ()>(i)
            })
        })
        .collect();

    let results = futures::future::join_all(handles).await;
    assert_eq!(results, (0..40u64).map(Ok::<u64, ()>).collect::<Vec<_>>());
    assert!(probe.peak() <= 3);
    assert_eq!(probe.peak(), 3);
    assert_eq!(probe.current(), 0);

    scheduler.wait_idle().await;
    assert!(scheduler.status().is_idle());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submitters_do_not_share_ids() {
    let scheduler = scheduler(4);

    let submitters: Vec<_> = (0..8)
        .map(|_| {
            let scheduler = scheduler.clone();
            tokio::spawn(async move {
                let mut ids = Vec::new();
                for _ in 0..25 {
                    let handle = scheduler.submit(|| async {
                        tokio::task::yield_now().await;
                        Ok::<_, ()>(())
                    });
                    ids.push(handle.id());
                    handle.await.unwrap();
                }
                ids
            })
        })
        .collect();

    let mut ids = Vec::new();
    for submitter in submitters {
        ids.extend(submitter.await.unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=200).collect::<Vec<u64>>());
}

#[tokio::test]
async fn test_dispatch_follows_submission_order() {
    let scheduler = scheduler(2);
    let order = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = [30u64, 10, 20, 5, 15, 1]
        .into_iter()
        .map(|millis| {
            let order = order.clone();
            scheduler.submit(move || async move {
                order.lock().push(millis);
                tokio::time::sleep(Duration::from_millis(millis)).await;
                Ok::<_, ()>(())
            })
        })
        .collect();

    futures::future::join_all(handles).await;
    assert_eq!(*order.lock(), vec![30, 10, 20, 5, 15, 1]);
}

#[derive(Debug, PartialEq)]
struct JobError {
    code: u32,
    reason: String,
}

#[tokio::test]
async fn test_failure_does_not_block_queue() {
    let scheduler = scheduler(1);

    let failing = scheduler.submit(|| async {
        Err::<u32, _>(JobError {
            code: 42,
            reason: "bad input".to_string(),
        })
    });
    let next = scheduler.submit(|| async { Ok::<u32, JobError>(7) });

    assert_eq!(
        failing.await,
        Err(JobError {
            code: 42,
            reason: "bad input".to_string()
        })
    );
    assert_eq!(next.await, Ok(7));

    let status = scheduler.status();
    assert_eq!(status.max_concurrency, 1);
    assert!(status.is_idle());
}

#[tokio::test]
async fn test_panicking_task_releases_slot() {
    let scheduler = scheduler(1);

    let panicking = scheduler.submit(|| async {
        let explode = true;
        if explode {
            panic!("boom");
        }
        Ok::<(), ()>(())
    });
    let next = scheduler.submit(|| async { Ok::<_, ()>("after") });

    let joined = tokio::spawn(panicking).await;
    assert!(joined.unwrap_err().is_panic());
    assert_eq!(next.await, Ok("after"));

    scheduler.wait_idle().await;
    assert!(scheduler.status().is_idle());
}

#[tokio::test]
async fn test_dropped_handles_still_drain() {
    let scheduler = scheduler(2);
    let finished = Arc::new(AtomicUsize::new(0));

    for _ in 0..6 {
        let finished = finished.clone();
        drop(scheduler.submit(move || async move {
            tokio::time::sleep(Duration::from_millis(2)).await;
            finished.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(())
        }));
    }

    tokio::time::timeout(Duration::from_secs(5), scheduler.wait_idle())
        .await
        .expect("scheduler should drain");
    assert_eq!(finished.load(Ordering::SeqCst), 6);
    assert!(scheduler.status().is_idle());
}
