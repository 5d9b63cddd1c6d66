use crate::clock::Clock;
use crate::openapi::ApiDoc;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web::Data};
use std::net::TcpListener;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the producer HTTP server on an already-bound listener.
///
/// # Endpoints
/// - `GET /status` (see [`crate::routes::status`])
/// - Swagger UI: `/swagger-ui/`
/// - OpenAPI spec: `/api-docs/openapi.json`
///
/// The returned [`Server`] must be awaited (or spawned) to start serving.
pub fn serve(listener: TcpListener, clock: Arc<dyn Clock>) -> std::io::Result<Server> {
    let addr = listener.local_addr()?;
    let openapi = ApiDoc::openapi();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(Data::from(clock.clone()))
            .configure(crate::routes::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .listen(listener)?
    .run();

    tracing::info!(%addr, "status producer listening");
    Ok(server)
}
