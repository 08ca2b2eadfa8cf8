pub mod api;
pub mod session;

use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::warn;

use crate::error::CoreError;

/// Mount every JSON route plus the handicap page.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(api::index))
        .route("/health", web::get().to(HttpResponse::Ok))
        .route("/api/rounds", web::get().to(api::list_rounds))
        .route("/api/rounds", web::post().to(api::save_round))
        .route("/api/courses", web::get().to(api::list_courses))
        .route("/api/courses", web::post().to(api::save_course))
        .route("/api/matches", web::get().to(api::list_matches))
        .route("/api/match", web::post().to(api::append_match))
        .route("/api/handicap", web::get().to(api::handicap))
        .route("/api/session", web::get().to(session::current))
        .route("/api/session", web::post().to(session::command));
}

pub(crate) fn error_response(e: &CoreError) -> HttpResponse {
    warn!(error = %e, "request failed");
    let body = json!({"error": e.to_string()});
    match e {
        CoreError::InvalidArgument(_) | CoreError::Parse(_) => HttpResponse::BadRequest().json(body),
        CoreError::NotFound(_) => HttpResponse::NotFound().json(body),
        CoreError::InvalidTransition(_) => HttpResponse::Conflict().json(body),
        CoreError::Storage(_) | CoreError::Other(_) => {
            HttpResponse::InternalServerError().json(body)
        }
    }
}
