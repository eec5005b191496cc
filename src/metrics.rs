//! Rendering of a result batch for API and metrics consumers.
//!
//! Both views are pure transforms over a batch: the structured view backs
//! the JSON endpoints, the exposition view backs `/metrics` in the
//! line-oriented text format pull-based scrapers consume.

use crate::models::{ResultBatch, ServicesResponse};
use std::fmt::Write;

/// Aggregate a batch into the JSON response shape
pub fn structured_view(batch: &ResultBatch) -> ServicesResponse {
    let healthy = batch.results.iter().filter(|r| r.is_healthy).count();

    ServicesResponse {
        total: batch.results.len(),
        healthy,
        unhealthy: batch.results.len() - healthy,
        services: batch.results.clone(),
    }
}

/// Render a batch as Prometheus-style text exposition.
///
/// Two gauge series, each preceded by its HELP/TYPE header pair, with one
/// line per service in batch order. An empty batch renders headers only.
pub fn exposition_view(batch: &ResultBatch) -> String {
    let mut out = String::new();

    out.push_str("# HELP service_up Whether the last probe of the service succeeded (1 = up, 0 = down)\n");
    out.push_str("# TYPE service_up gauge\n");
    for result in &batch.results {
        let _ = writeln!(
            out,
            "service_up{{service=\"{}\"}} {}",
            result.service_name,
            u8::from(result.is_healthy)
        );
    }

    out.push_str("# HELP service_response_time_ms Duration of the last probe in milliseconds\n");
    out.push_str("# TYPE service_response_time_ms gauge\n");
    for result in &batch.results {
        let _ = writeln!(
            out,
            "service_response_time_ms{{service=\"{}\"}} {}",
            result.service_name, result.response_time_ms
        );
    }

    out
}
