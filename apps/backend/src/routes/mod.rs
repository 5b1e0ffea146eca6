use actix_web::web;

pub mod health;
pub mod sessions;

/// Register every application route.
///
/// Shared by `main.rs` and the test app builder so both serve the same
/// paths; middleware is wrapped around the `App` by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // Sessions: /api/sessions/**
    cfg.service(web::scope("/api/sessions").configure(sessions::configure_routes));
}
