//! Time-bounded result cache with refresh coalescing.
//!
//! The cache is the only shared mutable state in the monitor. The scheduler
//! and request handlers all go through [`ResultCache::get_results`]; a fresh
//! cached batch is returned without touching the network, and concurrent
//! refresh requests collapse onto a single in-flight probe round.

use crate::checker::ServiceChecker;
use crate::models::ResultBatch;
use chrono::Utc;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

/// Maximum age at which a cached batch is served without refreshing.
/// Deliberately fixed rather than derived from the check interval.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(5);

type SharedRefresh = Shared<BoxFuture<'static, Arc<ResultBatch>>>;

pub struct ResultCache {
    checker: Arc<ServiceChecker>,
    state: Arc<Mutex<CacheState>>,
    freshness_window: chrono::Duration,
}

#[derive(Default)]
struct CacheState {
    current: Option<Arc<ResultBatch>>,
    in_flight: Option<SharedRefresh>,
}

impl ResultCache {
    pub fn new(checker: Arc<ServiceChecker>) -> Self {
        Self::with_freshness_window(checker, FRESHNESS_WINDOW)
    }

    pub fn with_freshness_window(checker: Arc<ServiceChecker>, window: Duration) -> Self {
        Self {
            checker,
            state: Arc::new(Mutex::new(CacheState::default())),
            freshness_window: chrono::Duration::from_std(window)
                .unwrap_or_else(|_| chrono::Duration::seconds(5)),
        }
    }

    /// Return the current batch, refreshing it if needed.
    ///
    /// With `force` unset, a batch younger than the freshness window is
    /// returned as-is with no network activity. Otherwise exactly one probe
    /// round runs; callers arriving while it is in flight attach to it and
    /// observe the same resulting batch.
    pub async fn get_results(&self, force: bool) -> Arc<ResultBatch> {
        let refresh = {
            let mut state = self.state.lock().unwrap();

            if !force {
                if let Some(batch) = &state.current {
                    if Utc::now().signed_duration_since(batch.produced_at) < self.freshness_window {
                        return Arc::clone(batch);
                    }
                }
            }

            match &state.in_flight {
                Some(running) => {
                    debug!("Joining in-flight refresh");
                    running.clone()
                }
                None => {
                    let refresh = self.start_refresh();
                    state.in_flight = Some(refresh.clone());
                    refresh
                }
            }
        };

        refresh.await
    }

    /// Build the shared refresh future.
    ///
    /// The future runs the probe fan-out and then, under the state lock,
    /// installs the new batch and clears the in-flight marker in one step,
    /// so readers see either the old batch or the complete new one. It is
    /// driven by whichever caller awaits it first; if all callers go away
    /// mid-refresh the work is abandoned and the cache keeps its old batch.
    fn start_refresh(&self) -> SharedRefresh {
        let checker = Arc::clone(&self.checker);
        let state = Arc::clone(&self.state);

        async move {
            let batch = Arc::new(checker.execute_all().await);
            debug!(services = batch.results.len(), "Refresh completed");

            let mut state = state.lock().unwrap();
            state.current = Some(Arc::clone(&batch));
            state.in_flight = None;
            batch
        }
        .boxed()
        .shared()
    }
}
