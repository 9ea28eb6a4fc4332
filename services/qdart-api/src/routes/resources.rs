use actix_web::{get, web, HttpResponse};

use crate::routes::common::engine_error;
use crate::state::AppState;

/// Combined asset and team snapshot for the resource dashboard.
#[get("/v1/resources")]
pub async fn list_resources(state: web::Data<AppState>) -> HttpResponse {
    match state.engine.list_resources().await {
        Ok(snapshot) => HttpResponse::Ok().json(snapshot),
        Err(err) => engine_error(err),
    }
}
