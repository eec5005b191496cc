//! Service Health Monitor Library
//!
//! This library provides components for probing a configured set of HTTP
//! services, caching the probe results with refresh coalescing, and rendering
//! the results for query and metrics consumers.

pub mod cache;
pub mod checker;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod scheduler;

pub use cache::{FRESHNESS_WINDOW, ResultCache};
pub use checker::ServiceChecker;
pub use config::Config;
pub use errors::{MonitorError, Result};
pub use models::{CheckOutcome, ResultBatch, ServiceEntry, ServicesResponse};
pub use scheduler::{Scheduler, ShutdownSignal};
