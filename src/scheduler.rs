//! Periodic background refresh of the result cache.
//!
//! The scheduler keeps the cache warm so request handlers usually find a
//! fresh batch instead of paying for a probe round themselves. It runs as a
//! dedicated tokio task for the life of the process and stops cooperatively
//! when shutdown is signalled.

use crate::cache::ResultCache;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Cooperative shutdown signal shared between the scheduler task and main
#[derive(Clone, Debug, Default)]
pub struct ShutdownSignal {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    requested: AtomicBool,
    notify: Notify,
}

impl ShutdownSignal {
    /// Returns true if shutdown has been requested
    pub fn is_requested(&self) -> bool {
        self.inner.requested.load(Ordering::Relaxed)
    }

    /// Request shutdown and wake all waiters
    pub fn request_shutdown(&self) {
        self.inner.requested.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// Wait until shutdown is requested
    pub async fn wait(&self) {
        if self.is_requested() {
            return;
        }
        self.inner.notify.notified().await;
    }
}

pub struct Scheduler {
    cache: Arc<ResultCache>,
    check_interval: Duration,
    shutdown: ShutdownSignal,
}

impl Scheduler {
    pub fn new(cache: Arc<ResultCache>, check_interval: Duration, shutdown: ShutdownSignal) -> Self {
        Self {
            cache,
            check_interval,
            shutdown,
        }
    }

    /// Spawn the refresh loop as a background task
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Sleep-then-refresh loop.
    ///
    /// Each cycle forces a refresh and discards the batch; its purpose is
    /// cache warming, not output. The shutdown signal is raced against both
    /// the sleep and the refresh, so an in-flight probe round at shutdown is
    /// simply abandoned rather than waited for.
    pub async fn run(self) {
        info!(
            interval_secs = self.check_interval.as_secs(),
            "Scheduler started"
        );

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.check_interval) => {}
                _ = self.shutdown.wait() => break,
            }

            if self.shutdown.is_requested() {
                break;
            }

            tokio::select! {
                batch = self.cache.get_results(true) => {
                    debug!(services = batch.results.len(), "Scheduled refresh completed");
                }
                _ = self.shutdown.wait() => break,
            }
        }

        info!("Scheduler stopped");
    }
}
