use actix_web::{post, web, HttpResponse};
use qdart_identity::{Authenticator, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::routes::common::unauthorized;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub agency_id: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    agency_id: String,
    role: Role,
    token: String,
}

/// Mock session issuance: the token is opaque and unchecked downstream.
#[post("/v1/login")]
pub async fn login(state: web::Data<AppState>, payload: web::Json<LoginRequest>) -> HttpResponse {
    let request = payload.into_inner();
    match state
        .authenticator
        .authenticate(&request.agency_id, &request.password)
    {
        Some(role) => HttpResponse::Ok().json(LoginResponse {
            agency_id: request.agency_id,
            role,
            token: Uuid::new_v4().to_string(),
        }),
        None => unauthorized("invalid credentials"),
    }
}
