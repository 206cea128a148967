//! Reminder scheduler — a recurring, self-contained trigger.
//!
//! A single timer polls at a fine granularity (every minute in steady
//! state) and fires the selector + dispatcher pipeline once per
//! wall-clock interval (hourly). Failures are terminal for that tick
//! only; the next tick proceeds independently. A small semaphore ceiling
//! keeps a slow tick from unboundedly piling up work: ticks beyond the
//! ceiling are skipped, not queued.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::ports::{EventStore, Notifier};
use crate::services::dispatcher::ReminderDispatcher;

/// Timing and concurrency settings for the scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Wall-clock spacing between ticks.
    pub interval: Duration,
    /// How often the scheduler checks whether a tick is due.
    pub poll: Duration,
    /// Maximum simultaneous tick executions.
    pub max_concurrent_ticks: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60 * 60),
            poll: Duration::from_secs(60),
            max_concurrent_ticks: 2,
        }
    }
}

/// Recurring trigger that runs the reminder pipeline unattended.
pub struct ReminderScheduler<S, N> {
    dispatcher: Arc<ReminderDispatcher<S, N>>,
    config: SchedulerConfig,
}

/// Running scheduler lifecycle handle.
///
/// Dropping the handle without calling [`stop`](Self::stop) leaves the
/// scheduler running for the lifetime of the runtime.
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop the scheduler: no new ticks start, in-flight ticks finish on
    /// their own.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

impl<S, N> ReminderScheduler<S, N>
where
    S: EventStore + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    /// Create a scheduler over a shared dispatcher.
    pub fn new(dispatcher: Arc<ReminderDispatcher<S, N>>, config: SchedulerConfig) -> Self {
        Self { dispatcher, config }
    }

    /// Spawn the polling loop. The first tick fires immediately.
    #[must_use]
    pub fn start(self) -> SchedulerHandle {
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            let permits = Arc::new(Semaphore::new(self.config.max_concurrent_ticks));
            let mut poll = tokio::time::interval(self.config.poll);
            poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut next_due = Instant::now();

            loop {
                tokio::select! {
                    _ = poll.tick() => {
                        if Instant::now() < next_due {
                            continue;
                        }
                        next_due = Instant::now() + self.config.interval;
                        match Arc::clone(&permits).try_acquire_owned() {
                            Ok(permit) => {
                                let dispatcher = Arc::clone(&self.dispatcher);
                                tokio::spawn(async move {
                                    let _permit = permit;
                                    match dispatcher.run_starting_soon().await {
                                        Ok(report) => tracing::info!(
                                            events = report.events_processed,
                                            sent = report.messages_sent,
                                            failed = report.messages_failed,
                                            "reminder tick complete"
                                        ),
                                        Err(err) => tracing::error!(
                                            error = %err,
                                            "reminder tick failed"
                                        ),
                                    }
                                });
                            }
                            Err(_) => {
                                tracing::warn!("reminder tick skipped: concurrency ceiling reached");
                            }
                        }
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
        });

        SchedulerHandle { shutdown, task }
    }
}
