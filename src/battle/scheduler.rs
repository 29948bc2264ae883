//! Picks which queued turn resolves next.

use schema::{Ailment, StatKind};
use tracing::debug;

use crate::battle::battler::{BattlerId, BATTLE_SIZE};
use crate::battle::state::{BattleState, TurnState};

/// Turn order key: boosted evade, halved while shocked.
pub fn turn_priority(state: &BattleState, id: BattlerId) -> u32 {
    let evade = state.boosted_stat(id, StatKind::Evade);
    let shocked = state
        .spectra(id)
        .is_some_and(|spectra| spectra.ailment == Some(Ailment::Shocked));
    if shocked {
        evade / 2
    } else {
        evade
    }
}

/// Drops pending turns of battlers that are empty or passed out, then
/// returns the pending turn with the highest priority. Ties go to the
/// lowest battler id. `None` means the round has nothing left to run.
pub fn pick_next_turn(state: &mut BattleState) -> Option<BattlerId> {
    for id in 0..BATTLE_SIZE {
        if state.turns[id].state == TurnState::Pending && !state.is_alive(id) {
            debug!(battler = id, "discarding turn of a battler that cannot act");
            state.turns[id].state = TurnState::Inactive;
        }
    }

    let mut best: Option<(BattlerId, u32)> = None;
    for id in 0..BATTLE_SIZE {
        if state.turns[id].state != TurnState::Pending {
            continue;
        }
        let priority = turn_priority(state, id);
        match best {
            Some((_, top)) if priority <= top => {}
            _ => best = Some((id, priority)),
        }
    }
    if let Some((id, priority)) = best {
        debug!(battler = id, priority, "next turn");
    }
    best.map(|(id, _)| id)
}
