use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::error_response;
use crate::error::CoreError;
use crate::handicap::snapshot::handicap_snapshot;
use crate::model::course::Course;
use crate::model::match_record::MatchRecord;
use crate::model::round::Round;
use crate::record::{course_for_round, fill_from_course};
use crate::storage::Storage;
use crate::view::index::render_handicap_page;

/// A round as posted by the client, optionally with the match it was played in.
#[derive(Debug, Deserialize)]
pub struct SaveRoundRequest {
    #[serde(flatten)]
    pub round: Round,
    #[serde(default)]
    pub vd_match: Option<MatchRecord>,
}

pub async fn list_rounds(storage: Data<dyn Storage>) -> impl Responder {
    match storage.load_rounds().await {
        Ok(rounds) => HttpResponse::Ok().json(rounds),
        Err(e) => error_response(&e.into()),
    }
}

pub async fn list_courses(storage: Data<dyn Storage>) -> impl Responder {
    match storage.load_courses().await {
        Ok(courses) => HttpResponse::Ok().json(courses),
        Err(e) => error_response(&e.into()),
    }
}

pub async fn list_matches(storage: Data<dyn Storage>) -> impl Responder {
    match storage.load_matches().await {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&e.into()),
    }
}

pub async fn handicap(storage: Data<dyn Storage>) -> impl Responder {
    match storage.load_rounds().await {
        Ok(rounds) => HttpResponse::Ok().json(handicap_snapshot(&rounds)),
        Err(e) => error_response(&e.into()),
    }
}

async fn store_round(storage: &dyn Storage, req: SaveRoundRequest) -> Result<Round, CoreError> {
    let SaveRoundRequest { mut round, vd_match } = req;
    if round.date.trim().is_empty() {
        return Err(CoreError::InvalidArgument("round needs a date".to_string()));
    }
    if round.slope == Some(0) {
        return Err(CoreError::InvalidArgument("slope must be positive".to_string()));
    }
    let courses = storage.load_courses().await?;
    if let Some(course) = course_for_round(&courses, &round) {
        fill_from_course(&mut round, course);
    }
    let saved = storage.save_round(round).await?;
    if let Some(mut record) = vd_match {
        if record.date.is_empty() {
            record.date.clone_from(&saved.date);
        }
        storage.append_match(record).await?;
    }
    Ok(saved)
}

pub async fn save_round(
    storage: Data<dyn Storage>,
    body: web::Json<SaveRoundRequest>,
) -> impl Responder {
    match store_round(storage.get_ref(), body.into_inner()).await {
        Ok(saved) => HttpResponse::Ok().json(saved),
        Err(e) => error_response(&e),
    }
}

pub async fn save_course(storage: Data<dyn Storage>, body: web::Json<Course>) -> impl Responder {
    let course = body.into_inner();
    if course.id.trim().is_empty() {
        return error_response(&CoreError::InvalidArgument("course needs an id".to_string()));
    }
    let id = course.id.clone();
    match storage.save_course(course).await {
        Ok(()) => HttpResponse::Ok().json(json!({"ok": true, "id": id})),
        Err(e) => error_response(&e.into()),
    }
}

/// Append a finished match on its own, without a round.
pub async fn append_match(
    storage: Data<dyn Storage>,
    body: web::Json<MatchRecord>,
) -> impl Responder {
    match storage.append_match(body.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(json!({"ok": true})),
        Err(e) => error_response(&e.into()),
    }
}

pub async fn index(storage: Data<dyn Storage>) -> impl Responder {
    let rounds = match storage.load_rounds().await {
        Ok(rounds) => rounds,
        Err(e) => return error_response(&e.into()),
    };
    let matches = storage.load_matches().await.unwrap_or_else(|e| {
        info!(error = %e, "match history unavailable");
        vec![]
    });
    let snapshot = handicap_snapshot(&rounds);
    let markup = render_handicap_page(&snapshot, &rounds, &matches);
    HttpResponse::Ok()
        .content_type("text/html")
        .body(markup.into_string())
}
