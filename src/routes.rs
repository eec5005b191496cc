//! HTTP route handlers.
//!
//! Thin plumbing over the cache: every handler asks the cache for results
//! and renders them. Degraded targets show up as data in the response, never
//! as an HTTP error from the monitor itself.

use crate::cache::ResultCache;
use crate::metrics;
use crate::models::{AppHealth, AppInfo};
use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use tracing::info;

pub const APP_NAME: &str = "Service Health Monitor";

/// Root endpoint with basic API information
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(AppInfo {
        name: APP_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        docs: "/api/services".to_string(),
    })
}

/// Health of the monitor process itself, not of the monitored services
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(AppHealth {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// Get status of all monitored services, served from cache when fresh
pub async fn get_services(cache: web::Data<ResultCache>) -> impl Responder {
    info!("Request for monitored service status");
    let batch = cache.get_results(false).await;
    HttpResponse::Ok().json(metrics::structured_view(&batch))
}

/// Force an immediate check of all services instead of waiting for the
/// scheduled cycle
pub async fn trigger_check(cache: web::Data<ResultCache>) -> impl Responder {
    info!("Manual check triggered");
    let batch = cache.get_results(true).await;
    HttpResponse::Ok().json(metrics::structured_view(&batch))
}

/// Text-exposition metrics for pull-based scrapers
pub async fn prometheus_metrics(cache: web::Data<ResultCache>) -> impl Responder {
    let batch = cache.get_results(false).await;
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4; charset=utf-8")
        .body(metrics::exposition_view(&batch))
}

/// Register all routes on the actix application
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/api/services", web::get().to(get_services))
        .route("/api/check", web::post().to(trigger_check))
        .route("/metrics", web::get().to(prometheus_metrics));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::ServiceChecker;
    use crate::models::{ServiceEntry, ServicesResponse};
    use actix_web::{App, test};
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cache_data(services: Vec<ServiceEntry>) -> web::Data<ResultCache> {
        let checker = Arc::new(ServiceChecker::new(services, Duration::from_secs(1)).unwrap());
        web::Data::from(Arc::new(ResultCache::new(checker)))
    }

    #[actix_web::test]
    async fn test_root_and_health_endpoints() {
        let app = test::init_service(
            App::new()
                .app_data(cache_data(Vec::new()))
                .configure(configure),
        )
        .await;

        let response = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(response.status().is_success());

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert!(response.status().is_success());
    }

    #[actix_web::test]
    async fn test_get_services_returns_structured_view() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let services = vec![ServiceEntry {
            name: "svc".to_string(),
            url: server.uri(),
        }];
        let app = test::init_service(
            App::new()
                .app_data(cache_data(services))
                .configure(configure),
        )
        .await;

        let request = test::TestRequest::get().uri("/api/services").to_request();
        let response: ServicesResponse = test::call_and_read_body_json(&app, request).await;

        assert_eq!(response.total, 1);
        assert_eq!(response.healthy, 1);
        assert_eq!(response.services[0].service_name, "svc");
    }

    #[actix_web::test]
    async fn test_trigger_check_accepts_post_only() {
        let app = test::init_service(
            App::new()
                .app_data(cache_data(Vec::new()))
                .configure(configure),
        )
        .await;

        let response =
            test::call_service(&app, test::TestRequest::post().uri("/api/check").to_request())
                .await;
        assert!(response.status().is_success());

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/api/check").to_request()).await;
        assert!(response.status().is_client_error());
    }

    #[actix_web::test]
    async fn test_metrics_endpoint_is_plain_text() {
        let app = test::init_service(
            App::new()
                .app_data(cache_data(Vec::new()))
                .configure(configure),
        )
        .await;

        let request = test::TestRequest::get().uri("/metrics").to_request();
        let response = test::call_service(&app, request).await;
        assert!(response.status().is_success());

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/plain"));

        let body = test::read_body(response).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("# HELP service_up"));
        assert!(text.contains("# TYPE service_response_time_ms gauge"));
    }
}
