//! Data models for probe outcomes and API responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A service to monitor, taken from configuration at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub name: String,
    pub url: String,
}

/// Result of a single health probe against one service.
///
/// Probe failures are carried as data here rather than as errors: a timeout
/// or connection failure sets `is_healthy = false` and fills `error_message`,
/// while an HTTP response of any status fills `status_code` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub service_name: String,
    pub url: String,
    pub is_healthy: bool,
    pub status_code: Option<u16>,
    pub response_time_ms: f64,
    pub error_message: Option<String>,
    pub checked_at: DateTime<Utc>,
}

/// One complete round of probe outcomes, one per configured service,
/// in registry order. Replaced in the cache as a whole, never in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultBatch {
    pub results: Vec<CheckOutcome>,
    pub produced_at: DateTime<Utc>,
}

impl ResultBatch {
    pub fn new(results: Vec<CheckOutcome>) -> Self {
        Self {
            results,
            produced_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

/// Aggregated status of all monitored services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesResponse {
    pub services: Vec<CheckOutcome>,
    pub total: usize,
    pub healthy: usize,
    pub unhealthy: usize,
}

/// Basic application information returned by the root endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub docs: String,
}

/// Health of the monitor process itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppHealth {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}
