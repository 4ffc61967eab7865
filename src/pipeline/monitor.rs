//! `LadleMonitor` - owns the fleet state and drives the periodic tick.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{LadleStatus, MonitorStats, StatusCounts, TickReport};
use crate::alerts::AlertLog;
use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::health;
use crate::simulation::Stepper;
use crate::telemetry::{SensorBounds, TelemetryStore};
use crate::types::{AlertEntry, Analysis, HistorySample, LadleOverride, LadleReading};

/// Handle to the spawned loop task.
struct LoopRunner {
    cancel_token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Fleet monitor shared between the loop task and API handlers.
///
/// Lock order inside a tick: `stepper` -> `store` (released) -> `alerts`.
/// Readers take a single read lock, clone, and release.
pub struct LadleMonitor {
    store: RwLock<TelemetryStore>,
    alerts: RwLock<AlertLog>,
    /// Serializes ticks; held for the whole tick
    stepper: Mutex<Stepper>,
    runner: Mutex<Option<LoopRunner>>,
    interval: Duration,
    ticks: AtomicU64,
    alerts_raised: AtomicU64,
    started_at: DateTime<Utc>,
    last_tick_at: RwLock<Option<DateTime<Utc>>>,
}

impl LadleMonitor {
    /// Validate `config`, seed the fleet and build a stopped monitor.
    pub fn new(config: &MonitorConfig) -> Result<Arc<Self>, MonitorError> {
        config.validate()?;

        let now = Utc::now();
        let mut stepper = Stepper::new(&config.simulation);
        let store = stepper.seed_fleet(&config.fleet.ladle_ids, SensorBounds::from_config(&config.bounds), now);

        info!(
            ladles = store.len(),
            interval_ms = config.monitor.interval_ms,
            alert_capacity = config.monitor.alert_capacity,
            seeded = config.simulation.seed.is_some(),
            "Ladle monitor initialised"
        );

        Ok(Arc::new(Self {
            store: RwLock::new(store),
            alerts: RwLock::new(AlertLog::new(config.monitor.alert_capacity)),
            stepper: Mutex::new(stepper),
            runner: Mutex::new(None),
            interval: Duration::from_millis(config.monitor.interval_ms),
            ticks: AtomicU64::new(0),
            alerts_raised: AtomicU64::new(0),
            started_at: now,
            last_tick_at: RwLock::new(None),
        }))
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Run one tick now: step the fleet, classify, record critical alerts.
    pub async fn tick(&self, override_: Option<&LadleOverride>) -> TickReport {
        let mut stepper = self.stepper.lock().await;
        let now = Utc::now();

        let (step, snapshot) = {
            let mut store = self.store.write().await;
            let step = stepper.step(&mut store, override_, now);
            (step, store.iter().cloned().collect::<Vec<_>>())
        };

        let raised: Vec<AlertEntry> = snapshot
            .iter()
            .filter_map(|reading| {
                let analysis = health::classify(reading);
                analysis
                    .is_critical()
                    .then(|| AlertEntry::from_analysis(now, reading, &analysis))
            })
            .collect();

        let alerts = raised.len();
        if !raised.is_empty() {
            let mut log = self.alerts.write().await;
            for entry in raised {
                warn!(ladle_id = %entry.ladle_id, alert = %entry, "Critical ladle condition");
                log.append(entry);
            }
        }

        *self.last_tick_at.write().await = Some(now);
        self.alerts_raised.fetch_add(alerts as u64, Ordering::Relaxed);
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;
        drop(stepper);

        debug!(tick, relocated = step.relocated, alerts, "Tick complete");
        TickReport {
            tick,
            timestamp: now,
            step,
            alerts,
        }
    }

    /// Run a tick immediately with `override_` applied after the random walk.
    ///
    /// An id outside the fleet is not an error: the override is dropped and
    /// the ambient tick still runs.
    pub async fn inject_override(&self, override_: &LadleOverride) -> TickReport {
        info!(ladle_id = %override_.ladle_id, "Injecting manual override");
        self.tick(Some(override_)).await
    }

    // ========================================================================
    // Loop Control
    // ========================================================================

    /// Spawn the periodic loop. Returns `false` if it was already running.
    pub async fn start_loop(self: &Arc<Self>) -> bool {
        let mut runner = self.runner.lock().await;
        if runner.as_ref().is_some_and(|r| !r.handle.is_finished()) {
            debug!("Monitoring loop already running");
            return false;
        }

        let cancel_token = CancellationToken::new();
        let monitor = Arc::clone(self);
        let token = cancel_token.clone();
        let handle = tokio::spawn(async move { monitor.run_loop(token).await });

        *runner = Some(LoopRunner {
            cancel_token,
            handle,
        });
        info!(interval_ms = self.interval.as_millis() as u64, "Monitoring loop started");
        true
    }

    /// Cancel future ticks. Returns `false` if the loop was not running.
    pub async fn stop_loop(&self) -> bool {
        let Some(runner) = self.runner.lock().await.take() else {
            return false;
        };
        runner.cancel_token.cancel();
        info!("Monitoring loop stopping");
        true
    }

    pub async fn is_running(&self) -> bool {
        self.runner
            .lock()
            .await
            .as_ref()
            .is_some_and(|r| !r.handle.is_finished())
    }

    /// Stop the loop and wait for an in-flight tick to finish.
    pub async fn shutdown(&self) {
        let runner = self.runner.lock().await.take();
        if let Some(runner) = runner {
            runner.cancel_token.cancel();
            if let Err(e) = runner.handle.await {
                warn!(error = %e, "Monitoring loop task ended abnormally");
            }
        }
        info!(ticks = self.ticks.load(Ordering::Relaxed), "Ladle monitor shut down");
    }

    async fn run_loop(self: Arc<Self>, cancel_token: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel_token.cancelled() => {
                    info!("Monitoring loop stopped");
                    break;
                }
                _ = interval.tick() => {
                    self.tick(None).await;
                }
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Copy of every reading, keyed by id.
    pub async fn snapshot(&self) -> BTreeMap<String, LadleReading> {
        self.store.read().await.snapshot_all()
    }

    /// Copy of every reading in fleet order.
    pub async fn readings(&self) -> Vec<LadleReading> {
        self.store.read().await.iter().cloned().collect()
    }

    pub async fn ids(&self) -> Vec<String> {
        self.store.read().await.ids().to_vec()
    }

    pub async fn reading(&self, id: &str) -> Result<LadleReading, MonitorError> {
        self.store.read().await.get(id)
    }

    pub async fn history(&self, id: &str) -> Result<Vec<HistorySample>, MonitorError> {
        self.store.read().await.history(id)
    }

    /// Classify one ladle's current reading.
    pub async fn classify(&self, id: &str) -> Result<Analysis, MonitorError> {
        let reading = self.reading(id).await?;
        Ok(health::classify(&reading))
    }

    /// Every ladle with its classification, in fleet order.
    pub async fn fleet_status(&self) -> Vec<LadleStatus> {
        self.readings()
            .await
            .into_iter()
            .map(|reading| {
                let analysis = health::classify(&reading);
                LadleStatus { reading, analysis }
            })
            .collect()
    }

    /// Up to `limit` alerts, newest first.
    pub async fn recent_alerts(&self, limit: usize) -> Vec<AlertEntry> {
        self.alerts.read().await.recent(limit)
    }

    pub async fn alert_capacity(&self) -> usize {
        self.alerts.read().await.capacity()
    }

    pub async fn status_counts(&self) -> StatusCounts {
        self.store
            .read()
            .await
            .iter()
            .map(|reading| health::classify(reading).status)
            .collect()
    }

    pub async fn stats(&self) -> MonitorStats {
        MonitorStats {
            ticks: self.ticks.load(Ordering::Relaxed),
            alerts_raised: self.alerts_raised.load(Ordering::Relaxed),
            running: self.is_running().await,
            interval_ms: self.interval.as_millis() as u64,
            started_at: self.started_at,
            last_tick_at: *self.last_tick_at.read().await,
        }
    }
}
