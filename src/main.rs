//! Service Health Monitor Binary

use actix_web::{App, HttpServer, web};
use service_health_monitor::{Config, ResultCache, Scheduler, ServiceChecker, ShutdownSignal, routes};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    initialize_tracing();

    info!(
        "Starting service health monitor v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration loading failed: {}", e);
            std::process::exit(1);
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    info!(
        "Monitoring {} services every {}s with a {}s request timeout",
        config.services.len(),
        config.check_interval.as_secs(),
        config.request_timeout.as_secs()
    );

    let checker = match ServiceChecker::new(config.services.clone(), config.request_timeout) {
        Ok(checker) => Arc::new(checker),
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let cache = Arc::new(ResultCache::new(checker));
    let shutdown = ShutdownSignal::default();

    let scheduler = Scheduler::new(Arc::clone(&cache), config.check_interval, shutdown.clone());
    let scheduler_handle = scheduler.start();

    let cache_data = web::Data::from(Arc::clone(&cache));
    info!("Listening on {}:{}", config.host, config.port);

    let result = HttpServer::new(move || {
        App::new()
            .app_data(cache_data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    info!("Shutting down service health monitor");
    shutdown.request_shutdown();

    // Bounded wait; an in-flight probe round is abandoned rather than
    // holding up process exit.
    let _ = tokio::time::timeout(Duration::from_secs(1), scheduler_handle).await;

    info!("Shutdown complete");
    result
}

/// Initialize structured logging
fn initialize_tracing() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
