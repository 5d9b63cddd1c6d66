use utoipa::OpenApi;

/// OpenAPI Specification Documentation
///
/// Describes the producer's HTTP surface for Swagger UI. The consumer
/// contract in [`crate::contract`] is what both test suites verify; this
/// document is for humans browsing the service.
///
/// # Endpoints
/// - Status: `GET /status`
///
/// # Schemas
/// - `StatusResponse`: status payload
/// - `Status`: status enumeration
#[derive(OpenApi)]
#[openapi(
    paths(crate::routes::status::status),
    components(schemas(
        crate::models::status::StatusResponse,
        crate::models::status::Status
    )),
    tags((name = "Status", description = "Service status endpoint")),
    info(
        description = "Producer side of the status contract demo",
        title = "Status Service API",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
