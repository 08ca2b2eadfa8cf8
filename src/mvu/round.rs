use serde::Deserialize;

use crate::error::CoreError;
use crate::handicap::snapshot::{HandicapSnapshot, handicap_snapshot};
use crate::model::match_record::MatchRecord;
use crate::model::round::{Round, Side};
use crate::play::state::{Entry, HandicapInputs, Phase, RoundSetup, RoundState};
use crate::play::summary::{RoundSummary, summarize};
use crate::record::{to_match_record, to_round};
use crate::storage::Storage;

/// The live session as seen by one request: the state machine plus what was loaded and
/// produced around it.
#[derive(Debug, Clone, Default)]
pub struct RoundModel {
    pub state: Option<RoundState>,
    pub snapshot: Option<HandicapSnapshot>,
    pub summary: Option<RoundSummary>,
    pub saved: Option<Round>,
    pub error: Option<CoreError>,
}

impl RoundModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// A user action on the session, as posted by the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    Start(RoundSetup),
    Adjust { side: Side, delta: i32 },
    /// Record the given scores, or the pending ones when none are given.
    Record {
        #[serde(default)]
        entry: Option<Entry>,
    },
    Advance,
    Rewind { hole: usize },
    EndEarly,
    Save,
    Discard,
}

#[derive(Debug, Clone)]
pub enum Msg {
    Load,
    SessionLoaded(Option<RoundState>),
    HistoryLoaded(Vec<Round>),
    Command(Command),
    Persisted,
    Saved(Round),
    Cleared,
    Failed(CoreError),
}

impl From<Command> for Msg {
    fn from(value: Command) -> Self {
        Self::Command(value)
    }
}

#[derive(Debug, Clone)]
pub enum Effect {
    LoadSession,
    LoadHistory,
    PersistSession(RoundState),
    SaveRound {
        round: Round,
        match_record: Option<MatchRecord>,
    },
    ClearSession,
}

fn refresh_summary(model: &mut RoundModel) {
    model.summary = model
        .state
        .as_ref()
        .filter(|s| matches!(s.phase, Phase::Summary))
        .map(|s| summarize(s, model.snapshot.as_ref()));
}

fn apply(model: &mut RoundModel, command: Command) -> Result<Vec<Effect>, CoreError> {
    if let Command::Start(mut setup) = command {
        if setup.handicap.is_none() {
            setup.handicap = model.snapshot.as_ref().and_then(|snap| {
                snap.index.map(|index| HandicapInputs {
                    index,
                    target_diff: snap.target_diff,
                })
            });
        }
        let state = RoundState::start(setup)?;
        model.state = Some(state.clone());
        model.summary = None;
        return Ok(vec![Effect::PersistSession(state)]);
    }
    if matches!(command, Command::Discard) {
        model.state = None;
        model.summary = None;
        return Ok(vec![Effect::ClearSession]);
    }

    let state = model
        .state
        .as_mut()
        .ok_or_else(|| CoreError::InvalidTransition("no round in progress".to_string()))?;
    match command {
        Command::Adjust { side, delta } => state.adjust_pending(side, delta)?,
        Command::Record { entry } => {
            let entry = entry.unwrap_or_else(|| state.pending_entry());
            state.record_hole(entry)?;
        }
        Command::Advance => state.advance()?,
        Command::Rewind { hole } => state.rewind(hole)?,
        Command::EndEarly => state.end_early()?,
        Command::Save => {
            if !matches!(state.phase, Phase::Summary) {
                return Err(CoreError::InvalidTransition(
                    "the round is still in progress".to_string(),
                ));
            }
            return Ok(vec![Effect::SaveRound {
                round: to_round(state),
                match_record: to_match_record(state),
            }]);
        }
        Command::Start(_) | Command::Discard => {}
    }
    let snapshot = state.clone();
    refresh_summary(model);
    Ok(vec![Effect::PersistSession(snapshot)])
}

/// Pure transition. A rejected command leaves the state alone and is recorded as the
/// model's error.
pub fn update(model: &mut RoundModel, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::Load => vec![Effect::LoadSession, Effect::LoadHistory],
        Msg::SessionLoaded(state) => {
            model.state = state;
            refresh_summary(model);
            vec![]
        }
        Msg::HistoryLoaded(rounds) => {
            model.snapshot = Some(handicap_snapshot(&rounds));
            refresh_summary(model);
            vec![]
        }
        Msg::Command(command) => match apply(model, command) {
            Ok(effects) => {
                model.error = None;
                effects
            }
            Err(e) => {
                model.error = Some(e);
                vec![]
            }
        },
        Msg::Persisted | Msg::Cleared => vec![],
        Msg::Saved(round) => {
            model.saved = Some(round);
            model.state = None;
            vec![Effect::ClearSession]
        }
        Msg::Failed(e) => {
            model.error = Some(e);
            vec![]
        }
    }
}

#[derive(Clone, Copy)]
pub struct Deps<'a> {
    pub storage: &'a dyn Storage,
}

pub async fn run_effect(effect: Effect, deps: Deps<'_>) -> Msg {
    match effect {
        Effect::LoadSession => match deps.storage.load_session().await {
            Ok(state) => Msg::SessionLoaded(state),
            Err(e) => Msg::Failed(e.into()),
        },
        Effect::LoadHistory => match deps.storage.load_rounds().await {
            Ok(rounds) => Msg::HistoryLoaded(rounds),
            Err(e) => Msg::Failed(e.into()),
        },
        Effect::PersistSession(state) => match deps.storage.save_session(&state).await {
            Ok(()) => Msg::Persisted,
            Err(e) => Msg::Failed(e.into()),
        },
        Effect::SaveRound {
            round,
            match_record,
        } => {
            let saved = match deps.storage.save_round(round).await {
                Ok(saved) => saved,
                Err(e) => return Msg::Failed(e.into()),
            };
            if let Some(record) = match_record {
                if let Err(e) = deps.storage.append_match(record).await {
                    return Msg::Failed(e.into());
                }
            }
            Msg::Saved(saved)
        }
        Effect::ClearSession => match deps.storage.clear_session().await {
            Ok(()) => Msg::Cleared,
            Err(e) => Msg::Failed(e.into()),
        },
    }
}
