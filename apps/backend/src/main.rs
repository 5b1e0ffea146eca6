use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use tracing::{error, info};
use veridrink::config::AppConfig;
use veridrink::domain::SessionRegistry;
use veridrink::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use veridrink::routes;
use veridrink::state::build_state;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables are set by the runtime (docker env_file, shell, ...).
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state().with_config(config.clone()).build() {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    if let Some(ttl) = config.session_idle_ttl {
        spawn_idle_sweeper(Arc::clone(&app_state.registry), ttl, config.sweep_interval);
    }

    info!(
        host = %config.host,
        port = config.port,
        templates = app_state.templates.len(),
        "starting VeriDrink backend"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

/// Periodically drop sessions idle for longer than `ttl`.
fn spawn_idle_sweeper(registry: Arc<SessionRegistry>, ttl: Duration, every: Duration) {
    actix_web::rt::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            registry.evict_idle(ttl);
        }
    });
}
