use status_contract::clock::{Clock, SystemClock};
use status_contract::config::ServerConfig;
use status_contract::{server, telemetry};
use std::net::TcpListener;
use std::sync::Arc;

/// Status Producer Entry Point
///
/// Serves `GET /status` plus Swagger UI.
///
/// # Configuration
/// - `STATUS_HOST` / `STATUS_PORT` select the bind address (default `127.0.0.1:8080`)
/// - `RUST_LOG` controls log verbosity (default `info`)
/// - Environment variables are also loaded from `.env` (if present)
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_tracing("info");

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let listener = TcpListener::bind(config.bind_addr())?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    server::serve(listener, clock)?.await
}
