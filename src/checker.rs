//! Concurrent health probing of configured services.
//!
//! Each refresh cycle issues exactly one GET per service, all in parallel,
//! and waits for the slowest probe (bounded by the request timeout) before
//! producing a batch. Probe failures never escape as errors; they are encoded
//! on the outcome itself.

use crate::errors::Result;
use crate::models::{CheckOutcome, ResultBatch, ServiceEntry};
use chrono::Utc;
use futures::future::join_all;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub struct ServiceChecker {
    services: Vec<ServiceEntry>,
    client: Client,
}

impl ServiceChecker {
    /// Create a checker with a shared HTTP client carrying the probe timeout
    pub fn new(services: Vec<ServiceEntry>, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;

        Ok(Self { services, client })
    }

    /// Probe a single service.
    ///
    /// Always returns an outcome: a received response of any status is
    /// recorded with its status code, a timeout or connection-level failure
    /// is recorded with a diagnostic message instead. Elapsed time covers
    /// the error paths too.
    pub async fn probe(&self, name: &str, url: &str) -> CheckOutcome {
        let start = Instant::now();

        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let response_time_ms = elapsed_ms(start);
                debug!(service = name, status, response_time_ms, "Probe completed");

                CheckOutcome {
                    service_name: name.to_string(),
                    url: url.to_string(),
                    is_healthy: status < 400,
                    status_code: Some(status),
                    response_time_ms,
                    error_message: None,
                    checked_at: Utc::now(),
                }
            }
            Err(err) => {
                let message = if err.is_timeout() {
                    "Connection timeout".to_string()
                } else {
                    format!("{}", err)
                };
                warn!(service = name, error = %message, "Probe failed");

                CheckOutcome {
                    service_name: name.to_string(),
                    url: url.to_string(),
                    is_healthy: false,
                    status_code: None,
                    response_time_ms: elapsed_ms(start),
                    error_message: Some(message),
                    checked_at: Utc::now(),
                }
            }
        }
    }

    /// Probe all configured services in parallel and collect one batch.
    ///
    /// Batch order matches registry order regardless of probe completion
    /// order. An empty registry yields an empty batch with no network
    /// activity.
    pub async fn execute_all(&self) -> ResultBatch {
        if self.services.is_empty() {
            return ResultBatch::empty();
        }

        let probes = self
            .services
            .iter()
            .map(|service| self.probe(&service.name, &service.url));

        ResultBatch::new(join_all(probes).await)
    }
}

/// Wall-clock milliseconds since `start`, rounded to 2 decimal digits
fn elapsed_ms(start: Instant) -> f64 {
    (start.elapsed().as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}
