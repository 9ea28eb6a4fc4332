use actix_web::{delete, post, web, HttpResponse};
use qdart_core::AssetId;
use qdart_storage::NewAsset;
use serde::Deserialize;

use crate::routes::common::{bad_request, engine_error};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeployRequest {
    pub status: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    pub message: String,
}

#[post("/v1/assets")]
pub async fn create_asset(
    state: web::Data<AppState>,
    payload: web::Json<NewAsset>,
) -> HttpResponse {
    match state.engine.create_asset(payload.into_inner()).await {
        Ok(asset) => HttpResponse::Created().json(asset),
        Err(err) => engine_error(err),
    }
}

#[delete("/v1/assets/{id}")]
pub async fn delete_asset(state: web::Data<AppState>, id: web::Path<u64>) -> HttpResponse {
    match state.engine.delete_asset(AssetId::from_u64(*id)).await {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => engine_error(err),
    }
}

#[post("/v1/assets/{id}/deploy")]
pub async fn deploy_asset(
    state: web::Data<AppState>,
    id: web::Path<u64>,
    payload: web::Json<DeployRequest>,
) -> HttpResponse {
    let request = payload.into_inner();
    match state
        .engine
        .deploy_asset(AssetId::from_u64(*id), &request.status, request.location)
        .await
    {
        Ok(asset) => HttpResponse::Ok().json(asset),
        Err(err) => engine_error(err),
    }
}

#[post("/v1/assets/{id}/notify")]
pub async fn notify_asset(
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
        .notify_asset(AssetId::from_u64(*id), &request.message)
        .await
    {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(err) => engine_error(err),
    }
}
