//! Monitor Invariant Tests
//!
//! Drive a seeded monitor through many ticks (scheduled and injected) and
//! check the properties every reader relies on: bounded readings, bounded
//! and ordered history, newest-first bounded alerts, pure classification.

use ladle_monitor::config::MonitorConfig;
use ladle_monitor::health::classify;
use ladle_monitor::{HealthStatus, LadleMonitor, LadleOverride, ReadingFields};
use std::sync::Arc;
use std::time::Duration;

fn seeded_config(seed: u64) -> MonitorConfig {
    let mut config = MonitorConfig::default();
    config.simulation.seed = Some(seed);
    config.simulation.history_capacity = 8;
    config.monitor.alert_capacity = 5;
    config.monitor.interval_ms = 5;
    config.monitor.autostart = false;
    config
}

async fn assert_fleet_invariants(monitor: &LadleMonitor, history_capacity: usize) {
    for reading in monitor.readings().await {
        assert!((1400..=1700).contains(&reading.temperature), "{reading:?}");
        assert!((30..=95).contains(&reading.stress), "{reading:?}");
        assert!((0.1..=1.0).contains(&reading.vibration), "{reading:?}");
        assert_eq!(reading.vibration, (reading.vibration * 100.0).round() / 100.0);

        let history = monitor.history(&reading.id).await.unwrap();
        assert!(history.len() <= history_capacity);
        assert!(history.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(history.last().map(|s| s.temperature), Some(f64::from(reading.temperature)));
    }
}

#[tokio::test]
async fn invariants_hold_across_injected_ticks() {
    let monitor = LadleMonitor::new(&seeded_config(31)).unwrap();
    let extremes = [
        ReadingFields::default().with_temperature(5000).with_stress(-10),
        ReadingFields::default().with_vibration(f64::NAN),
        ReadingFields::default().with_vibration(0.6049),
        ReadingFields::default().with_temperature(i32::MIN).with_stress(i32::MAX),
    ];

    for (i, fields) in extremes.iter().cycle().take(40).enumerate() {
        let id = format!("L-0{}", i % 6 + 1);
        monitor.inject_override(&LadleOverride::new(id, fields.clone())).await;
        assert_fleet_invariants(&monitor, 8).await;
    }
    assert_eq!(monitor.stats().await.ticks, 40);
}

#[tokio::test]
async fn invariants_hold_while_loop_runs() {
    let monitor = LadleMonitor::new(&seeded_config(8)).unwrap();
    // Seeded history carries jitter; one tick aligns it with the readings
    monitor.tick(None).await;
    monitor.start_loop().await;

    let injector = {
        let monitor = Arc::clone(&monitor);
        tokio::spawn(async move {
            for _ in 0..10 {
                monitor.inject_override(&LadleOverride::forced_overheat("L-02")).await;
                tokio::time::sleep(Duration::from_millis(3)).await;
            }
        })
    };

    for _ in 0..20 {
        assert_fleet_invariants(&monitor, 8).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    injector.await.unwrap();
    monitor.shutdown().await;

    let alerts = monitor.recent_alerts(100).await;
    assert!(!alerts.is_empty());
    assert!(alerts.len() <= 5);
    assert!(alerts.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

#[tokio::test]
async fn classification_is_pure() {
    let monitor = LadleMonitor::new(&seeded_config(3)).unwrap();
    monitor.inject_override(&LadleOverride::forced_overheat("L-05")).await;

    let before = monitor.snapshot().await;
    let reading = before["L-05"].clone();
    let first = classify(&reading);
    for _ in 0..10 {
        assert_eq!(classify(&reading), first);
        assert_eq!(monitor.classify("L-05").await.unwrap(), first);
    }
    assert_eq!(monitor.snapshot().await, before);
    assert_eq!(first.status, HealthStatus::Critical);
}

#[tokio::test]
async fn same_seed_same_fleet() {
    let a = LadleMonitor::new(&seeded_config(77)).unwrap();
    let b = LadleMonitor::new(&seeded_config(77)).unwrap();

    for _ in 0..15 {
        a.tick(None).await;
        b.tick(None).await;
    }
    let strip = |m: std::collections::BTreeMap<String, ladle_monitor::LadleReading>| {
        m.into_values()
            .map(|r| (r.id, r.temperature, r.stress, r.vibration, r.location))
            .collect::<Vec<_>>()
    };
    assert_eq!(strip(a.snapshot().await), strip(b.snapshot().await));
}

#[tokio::test]
async fn stop_never_loses_a_started_tick() {
    let monitor = LadleMonitor::new(&seeded_config(12)).unwrap();
    monitor.start_loop().await;
    tokio::time::sleep(Duration::from_millis(30)).await;
    monitor.shutdown().await;

    let stats = monitor.stats().await;
    assert!(!stats.running);
    assert!(stats.ticks >= 1);
    assert!(stats.last_tick_at.is_some());

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(monitor.stats().await.ticks, stats.ticks);
}

#[tokio::test]
async fn seeded_history_stays_within_narrow_bounds() {
    let mut config = seeded_config(1);
    config.bounds.temperature_max = 1450;
    let monitor = LadleMonitor::new(&config).unwrap();

    for reading in monitor.readings().await {
        assert_eq!(reading.temperature, 1450);
        let history = monitor.history(&reading.id).await.unwrap();
        assert_eq!(history.len(), 8);
        for sample in &history {
            assert!(
                (1400.0..=1450.0).contains(&sample.temperature),
                "{} seeded sample {} outside bounds",
                reading.id,
                sample.temperature
            );
        }
    }
}
