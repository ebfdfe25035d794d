//! Lifecycle of the background crawl loop.
//!
//! The loop runs as one supervised tokio task. The caller holds the
//! [`CrawlScheduler`] and drives it through `start`/`stop`/`is_running`;
//! stop is signalled over a watch channel so a worker parked in the
//! inter-cycle wait wakes immediately instead of sleeping out the interval.
//! An in-flight fetch is never aborted: the signal is observed at the next
//! checkpoint between sweep and wait.

use std::sync::Arc;
use std::time::Duration;

use nf_core::{ConfigStore, EventSink};
use nf_extract::StrategyRegistry;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::sweep::{sweep, SweepStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopStatus {
    Stopped,
    Running,
    StopRequested,
}

#[derive(Debug, Clone)]
pub struct SchedulerSettings {
    /// Disables the whole scheduler at boot when false; `start` becomes a
    /// logged no-op.
    pub enabled: bool,
    /// Delay between two sweeps.
    pub wait: Duration,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            wait: Duration::from_secs(60 * 60),
        }
    }
}

impl SchedulerSettings {
    pub fn with_wait_minutes(minutes: u64) -> Self {
        Self {
            wait: Duration::from_secs(minutes * 60),
            ..Self::default()
        }
    }
}

pub struct CrawlScheduler {
    configs: Arc<dyn ConfigStore>,
    sink: Arc<dyn EventSink>,
    registry: Arc<StrategyRegistry>,
    settings: SchedulerSettings,
    status: Arc<RwLock<LoopStatus>>,
    stop_tx: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl CrawlScheduler {
    pub fn new(
        configs: Arc<dyn ConfigStore>,
        sink: Arc<dyn EventSink>,
        registry: Arc<StrategyRegistry>,
        settings: SchedulerSettings,
    ) -> Self {
        let (stop_tx, _) = watch::channel(false);
        Self {
            configs,
            sink,
            registry,
            settings,
            status: Arc::new(RwLock::new(LoopStatus::Stopped)),
            stop_tx,
            handle: Mutex::new(None),
        }
    }

    /// Spawns the control loop. No-op when the service is disabled or a
    /// loop is already running.
    pub async fn start(&self) {
        if !self.settings.enabled {
            tracing::info!("crawl service is disabled, not starting");
            return;
        }
        {
            let mut status = self.status.write().await;
            if *status != LoopStatus::Stopped {
                tracing::warn!("crawl loop already running");
                return;
            }
            *status = LoopStatus::Running;
        }
        self.stop_tx.send_replace(false);

        let worker = Worker {
            configs: Arc::clone(&self.configs),
            sink: Arc::clone(&self.sink),
            registry: Arc::clone(&self.registry),
            wait: self.settings.wait,
            status: Arc::clone(&self.status),
            stop_rx: self.stop_tx.subscribe(),
        };
        *self.handle.lock().await = Some(tokio::spawn(worker.run()));
        tracing::info!(wait_secs = self.settings.wait.as_secs(), "crawl service started");
    }

    /// Requests a stop and waits for the loop to confirm it. Wakes a worker
    /// sitting in the inter-cycle wait; a sweep already underway finishes
    /// its current source first.
    pub async fn stop(&self) {
        {
            let mut status = self.status.write().await;
            if *status != LoopStatus::Running {
                return;
            }
            *status = LoopStatus::StopRequested;
        }
        tracing::info!("crawl service stopping");
        let _ = self.stop_tx.send(true);

        if let Some(handle) = self.handle.lock().await.take() {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "crawl loop terminated abnormally");
                *self.status.write().await = LoopStatus::Stopped;
            }
        }
        tracing::info!("crawl service stopped");
    }

    pub async fn is_running(&self) -> bool {
        *self.status.read().await == LoopStatus::Running
    }

    /// One sweep on the caller's task, without the background loop. Used by
    /// the CLI's one-shot mode.
    pub async fn run_once(&self) -> SweepStats {
        sweep(&*self.configs, &*self.sink, &self.registry).await
    }
}

struct Worker {
    configs: Arc<dyn ConfigStore>,
    sink: Arc<dyn EventSink>,
    registry: Arc<StrategyRegistry>,
    wait: Duration,
    status: Arc<RwLock<LoopStatus>>,
    stop_rx: watch::Receiver<bool>,
}

impl Worker {
    async fn run(mut self) {
        loop {
            let stats = sweep(&*self.configs, &*self.sink, &self.registry).await;
            tracing::info!(
                sources = stats.sources,
                skipped = stats.skipped,
                listed = stats.listed,
                fresh = stats.fresh,
                saved = stats.saved,
                "sweep complete"
            );

            if *self.stop_rx.borrow() {
                break;
            }
            tokio::select! {
                _ = tokio::time::sleep(self.wait) => {}
                changed = self.stop_rx.changed() => match changed {
                    Ok(()) => {
                        if *self.stop_rx.borrow() {
                            break;
                        }
                    }
                    Err(e) => {
                        // Sender gone: nobody can stop us any more, so
                        // terminate instead of spinning unattended.
                        tracing::error!(error = %e, "stop channel closed, terminating loop");
                        break;
                    }
                },
            }
        }
        *self.status.write().await = LoopStatus::Stopped;
        tracing::info!("crawl loop exited");
    }
}
