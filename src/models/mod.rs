/// # Status Response
///
/// Payload of `GET /status`, shared by the producer (serialization) and the
/// consumer (deserialization).
///
/// ## Example JSON
/// ```json
/// {
///   "status": "OK",
///   "currentDateTime": "2017-06-27T13:54:29.214"
/// }
/// ```
pub mod status;

pub use status::{Status, StatusResponse};
