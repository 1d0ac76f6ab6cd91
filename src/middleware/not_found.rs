use actix_web::HttpResponse;
use serde_json::json;

/// Fallback for every path/method pair no route claims.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": "Not Found" }))
}
