// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use schedrs::config::settings::Settings;
use schedrs::queue::Scheduler;

#[test]
fn test_config_loading_from_default_toml() {
    let settings = Settings::new().expect("configuration should load");

    assert!(
        settings.scheduler.max_concurrency >= 1,
        "Minimum concurrency should be 1"
    );
    assert!(!settings.metrics.listen_addr.is_empty());
}

#[tokio::test]
async fn test_scheduler_built_from_settings() {
    let settings = Settings::from_toml("[scheduler]\nmax_concurrency = 5\n").unwrap();
    let scheduler = Scheduler::new(settings.scheduler_config()).unwrap();

    assert_eq!(scheduler.max_concurrency(), 5);
    assert_eq!(scheduler.status().max_concurrency, 5);
}

#[tokio::test]
async fn test_zero_concurrency_from_settings_is_rejected() {
    let settings = Settings::from_toml("[scheduler]\nmax_concurrency = 0\n").unwrap();
    assert!(Scheduler::new(settings.scheduler_config()).is_err());
}
