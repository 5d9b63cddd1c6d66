use actix_web::web;

/// # Status Endpoint
///
/// `GET /status` answers 200 with `{"status":"OK","currentDateTime":"..."}`.
pub mod status;

/// # API Route Configuration
///
/// Mounts the status route at the server root. The path is part of the
/// consumer contract, so it is not versioned or scoped.
///
/// ```text
/// GET /status - Service status and current server time
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(status::configure_routes);
}
