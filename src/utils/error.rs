use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use log::{error, warn};
use serde_json::json;
use thiserror::Error;

/// Message returned to the client for every 5xx, whatever the underlying cause.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("{0}")]
    BadRequestError(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("Not Found: {0}")]
    NotFoundError(String),

    #[error("Database Error: {0}")]
    DatabaseError(String),
}

impl From<mongodb::error::Error> for CustomError {
    fn from(err: mongodb::error::Error) -> Self {
        CustomError::DatabaseError(err.to_string())
    }
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match *self {
            CustomError::BadRequestError(..) => StatusCode::BAD_REQUEST,
            CustomError::ValidationError(..) => StatusCode::BAD_REQUEST,
            // unresolved ids are reported like any other failed store operation
            CustomError::NotFoundError(..) => StatusCode::INTERNAL_SERVER_ERROR,
            CustomError::DatabaseError(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        let message = if status_code.is_server_error() {
            error!("{}", self);
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            warn!("{}", self);
            self.to_string()
        };

        HttpResponse::build(status_code).json(json!({ "message": message }))
    }
}

/// Failures while bringing the server up or tearing it down.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),
}
