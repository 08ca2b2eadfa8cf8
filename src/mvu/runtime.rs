use tracing::debug;

use crate::error::CoreError;
use crate::mvu::round::{Deps, Msg, RoundModel, run_effect, update};

/// Runs the MVU loop for one session message: seeds with `msg` and drains effects.
///
/// # Errors
///
/// Returns the first failed effect, or the command rejection recorded on the model.
pub async fn run_round(model: &mut RoundModel, msg: Msg, deps: Deps<'_>) -> Result<(), CoreError> {
    let mut effects = update(model, msg);
    while let Some(effect) = effects.pop() {
        debug!(?effect, "running effect");
        let msg = run_effect(effect, deps).await;
        match msg {
            Msg::Failed(e) => {
                update(model, Msg::Failed(e.clone()));
                return Err(e);
            }
            other => {
                let next = update(model, other);
                if !next.is_empty() {
                    debug!(queued = next.len(), "effects queued");
                }
                effects.extend(next);
            }
        }
    }
    match &model.error {
        Some(e) => Err(e.clone()),
        None => Ok(()),
    }
}
