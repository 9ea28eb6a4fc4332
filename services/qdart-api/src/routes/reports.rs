use actix_web::{get, post, put, web, HttpResponse};
use qdart_core::{ReportId, TeamId};
use qdart_storage::{NewReport, ReportPatch};
use serde::Deserialize;

use crate::routes::common::{bad_request, engine_error};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub team_id: Option<u64>,
}

/// `team_id` geofences the listing to that team's coverage area.
#[get("/v1/reports")]
pub async fn list_reports(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    let scope = query.team_id.map(TeamId::from_u64);
    match state.engine.list_reports(scope).await {
        Ok(reports) => HttpResponse::Ok().json(reports),
        Err(err) => engine_error(err),
    }
}

#[post("/v1/reports")]
pub async fn create_report(
    state: web::Data<AppState>,
    payload: web::Json<NewReport>,
) -> HttpResponse {
    match state.engine.create_report(payload.into_inner()).await {
        Ok(report) => HttpResponse::Created().json(report),
        Err(err) => engine_error(err),
    }
}

#[put("/v1/reports/{id}")]
pub async fn update_report(
    state: web::Data<AppState>,
    id: web::Path<u64>,
    payload: web::Json<ReportPatch>,
) -> HttpResponse {
    let patch = payload.into_inner();
    if patch.is_empty() {
        return bad_request("nothing to update");
    }
    match state
        .engine
        .update_report(ReportId::from_u64(*id), patch)
        .await
    {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(err) => engine_error(err),
    }
}
