use crate::clock::Clock;
use crate::models::status::StatusResponse;
use actix_web::{HttpResponse, Responder, get, web};

/// # Status Endpoint
///
/// Reports that the service is up along with the server's current time.
///
/// ## Response
///
/// - **200 OK**
///   - Content-Type: `application/json`
///   - Body: [`StatusResponse`] with `status` ("OK") and `currentDateTime`
///     (ISO 8601, millisecond precision)
///
/// ## Example Response
///
/// ```json
/// {
///   "status": "OK",
///   "currentDateTime": "2017-06-27T13:54:29.214"
/// }
/// ```
#[utoipa::path(
    get,
    path = "/status",
    tag = "Status",
    responses(
        (status = 200, description = "Service is up", body = StatusResponse, content_type = "application/json")
    )
)]
#[get("/status")]
pub async fn status(clock: web::Data<dyn Clock>) -> impl Responder {
    let response = StatusResponse::now(clock.get_ref());
    tracing::debug!(current_date_time = %response.formatted_date_time(), "serving status");
    HttpResponse::Ok().json(response)
}

/// # Route Configuration
///
/// - `GET /status`: status endpoint
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(status);
}
