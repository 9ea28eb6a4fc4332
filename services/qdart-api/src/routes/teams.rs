use actix_web::{delete, post, web, HttpResponse};
use qdart_core::TeamId;
use qdart_storage::NewTeam;
use serde::Deserialize;

use crate::routes::common::{bad_request, engine_error};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeployRequest {
    pub status: String,
    #[serde(default)]
    pub task: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    pub message: String,
}

#[post("/v1/teams")]
pub async fn create_team(state: web::Data<AppState>, payload: web::Json<NewTeam>) -> HttpResponse {
    match state.engine.create_team(payload.into_inner()).await {
        Ok(team) => HttpResponse::Created().json(team),
        Err(err) => engine_error(err),
    }
}

#[delete("/v1/teams/{id}")]
pub async fn delete_team(state: web::Data<AppState>, id: web::Path<u64>) -> HttpResponse {
    match state.engine.delete_team(TeamId::from_u64(*id)).await {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => engine_error(err),
    }
}

#[post("/v1/teams/{id}/deploy")]
pub async fn deploy_team(
    state: web::Data<AppState>,
    id: web::Path<u64>,
    payload: web::Json<DeployRequest>,
) -> HttpResponse {
    let request = payload.into_inner();
    match state
        .engine
        .deploy_team(TeamId::from_u64(*id), &request.status, request.task)
        .await
    {
        Ok(team) => HttpResponse::Ok().json(team),
        Err(err) => engine_error(err),
    }
}

#[post("/v1/teams/{id}/notify")]
pub async fn notify_team(
    state: web::Data<AppState>,
    id: web::Path<u64>,
    payload: web::Json<NotifyRequest>,
) -> HttpResponse {
    let request = payload.into_inner();
    if request.message.trim().is_empty() {
        return bad_request("message is required");
    }
    match state
        .engine
        .notify_team(TeamId::from_u64(*id), &request.message)
        .await
    {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(err) => engine_error(err),
    }
}
