use crate::utils::error::CustomError;
use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};

/// Malformed or mistyped JSON bodies get the same 400 shape as a missing field.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_error)
}

fn handle_json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    CustomError::BadRequestError(format!("Invalid JSON body: {}", err)).into()
}
