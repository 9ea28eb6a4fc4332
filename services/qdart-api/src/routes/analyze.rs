use actix_web::{post, web, HttpResponse};

use crate::routes::common::{bad_request, engine_error};
use crate::state::AppState;

/// Raw image bytes in, classification out. Answers 503 until a model has
/// been attached to the engine.
#[post("/v1/analyze")]
pub async fn analyze(state: web::Data<AppState>, image: web::Bytes) -> HttpResponse {
    if image.is_empty() {
        return bad_request("image payload is required");
    }
    match state.engine.analyze_image(&image) {
        Ok(classification) => HttpResponse::Ok().json(classification),
        Err(err) => engine_error(err),
    }
}
