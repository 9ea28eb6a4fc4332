use actix_web::HttpResponse;
use qdart_core::{EngineError, ErrorCode};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: message.into(),
    })
}

pub fn unauthorized(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse {
        error: message.into(),
    })
}

pub fn not_found(message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: message.into(),
    })
}

pub fn service_unavailable(message: impl Into<String>) -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ErrorResponse {
        error: message.into(),
    })
}

pub fn internal_error(message: impl Into<String>) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: message.into(),
    })
}

pub fn engine_error(err: EngineError) -> HttpResponse {
    match err.code {
        ErrorCode::InvalidInput | ErrorCode::InvalidStatus => bad_request(err.message),
        ErrorCode::NotFound => not_found(err.message),
        ErrorCode::Unavailable => service_unavailable(err.message),
        ErrorCode::Internal => internal_error(err.message),
    }
}
