// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use schedrs::config::settings::Settings;
use schedrs::infrastructure::observability::{MetricsObserver, TracingObserver};
use schedrs::queue::Scheduler;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use schedrs::utils::telemetry;

/// 主函数
///
/// 按配置创建调度器，运行一组演示任务并输出状态快照
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Settings::new()?;

    // 2. Initialize logging
    telemetry::init_telemetry(settings.log.format);
    info!(format = ?settings.log.format, "Starting schedrs...");

    // 3. Metrics exporter
    if settings.metrics.enabled {
        let addr: SocketAddr = settings.metrics.listen_addr.parse()?;
        schedrs::infrastructure::metrics::init_metrics(addr);
    }

    // 4. Build scheduler
    let scheduler = Scheduler::builder()
        .max_concurrency(settings.scheduler.max_concurrency)
        .observer(Arc::new(TracingObserver))
        .observer(Arc::new(MetricsObserver))
        .build()?;
    info!(
        max_concurrency = scheduler.max_concurrency(),
        "Scheduler initialized"
    );

    // 5. Submit demo workload
    let mut handles = Vec::new();
    for (name, millis) in [("T1", 200), ("T2", 100), ("T3", 150), ("T4", 50)] {
        let handle = scheduler.submit(move || async move {
            tokio::time::sleep(Duration::from_millis(millis)).await;
            Ok::<_, String>(name)
        });
        handles.push(handle);
    }
    let failing = scheduler.submit(|| async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        Err::<&str, _>("E".to_string())
    });

    info!(
        "Status after submission: {}",
        serde_json::to_string(&scheduler.status())?
    );

    for handle in handles {
        let id = handle.id();
        match handle.await {
            Ok(name) => info!(task_id = id, "{} completed", name),
            Err(e) => warn!(task_id = id, "Task failed: {}", e),
        }
    }
    if let Err(e) = failing.await {
        warn!("Failing task reported: {}", e);
    }

    // 6. Drain
    scheduler.wait_idle().await;
    info!(
        "Final status: {}",
        serde_json::to_string(&scheduler.status())?
    );

    Ok(())
}
