use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use serde::Serialize;

use super::error_response;
use crate::handicap::snapshot::HandicapSnapshot;
use crate::model::round::{Round, Side};
use crate::mvu::round::{Command, Deps, Msg, RoundModel};
use crate::mvu::runtime::run_round;
use crate::play::state::RoundState;
use crate::play::strokes::StrokeFlags;
use crate::play::summary::{NineSummary, RoundSummary, nine_summary};
use crate::storage::Storage;

/// What the scoring screen needs after every action.
#[derive(Debug, Serialize)]
pub struct SessionView<'a> {
    pub state: Option<&'a RoundState>,
    pub points_a: Option<i32>,
    pub points_b: Option<i32>,
    pub honor: Option<Side>,
    pub strokes: Option<StrokeFlags>,
    pub budget_remaining: Option<i32>,
    pub nine: Option<NineSummary>,
    pub summary: Option<&'a RoundSummary>,
    pub saved: Option<&'a Round>,
    pub handicap: Option<&'a HandicapSnapshot>,
}

impl<'a> SessionView<'a> {
    #[must_use]
    pub fn new(model: &'a RoundModel) -> Self {
        let state = model.state.as_ref();
        let current = state.and_then(|s| s.current_index().or(s.results.len().checked_sub(1)));
        let is_match = state.is_some_and(RoundState::is_match);
        Self {
            state,
            points_a: state.filter(|_| is_match).map(|s| s.points(Side::A)),
            points_b: state.filter(|_| is_match).map(|s| s.points(Side::B)),
            honor: state.and_then(RoundState::honor),
            strokes: state
                .zip(current)
                .filter(|_| is_match)
                .map(|(s, idx)| s.strokes_on(idx)),
            budget_remaining: state.and_then(RoundState::budget_remaining),
            nine: state.zip(current).and_then(|(s, idx)| nine_summary(s, idx)),
            summary: model.summary.as_ref(),
            saved: model.saved.as_ref(),
            handicap: model.snapshot.as_ref(),
        }
    }
}

pub async fn current(storage: Data<dyn Storage>) -> impl Responder {
    let mut model = RoundModel::new();
    let deps = Deps {
        storage: storage.get_ref(),
    };
    match run_round(&mut model, Msg::Load, deps).await {
        Ok(()) => HttpResponse::Ok().json(SessionView::new(&model)),
        Err(e) => error_response(&e),
    }
}

pub async fn command(storage: Data<dyn Storage>, body: web::Json<Command>) -> impl Responder {
    let mut model = RoundModel::new();
    let deps = Deps {
        storage: storage.get_ref(),
    };
    if let Err(e) = run_round(&mut model, Msg::Load, deps).await {
        return error_response(&e);
    }
    match run_round(&mut model, body.into_inner().into(), deps).await {
        Ok(()) => HttpResponse::Ok().json(SessionView::new(&model)),
        Err(e) => error_response(&e),
    }
}
