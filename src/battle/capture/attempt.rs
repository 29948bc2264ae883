use tracing::{info, warn};

use crate::battle::battler::{is_ally_side, side_ids, BattlerFlags, BattlerId, SpectraSlot};
use crate::battle::capture::calculation::{capture_band, capture_threshold};
use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleEvent, BattleState, CaptureBand, EventBus, TurnState};
use crate::data::StaticData;

/// Rolls a capture of `target` by `user`.
///
/// Only the player's side captures, and only enemies. A successful roll
/// marks the target; it leaves the battle in [`finalize_captures`] once the
/// turn's text has been shown.
pub fn attempt_capture(
    state: &mut BattleState,
    user: BattlerId,
    target: BattlerId,
    bus: &mut EventBus,
    rng: &mut BattleRng,
) -> bool {
    if !is_ally_side(user) || is_ally_side(target) {
        return false;
    }
    let Some(fighter) = state.fighter(target) else {
        return false;
    };
    let Some(spectra) = state.spectra(target) else {
        return false;
    };

    let threshold = capture_threshold(
        spectra.species.data().catch_rate,
        spectra.ailment,
        spectra.health_fraction(),
    );
    let roll = rng.percent("capture roll");
    let band = capture_band(threshold, roll);
    info!(target, threshold, roll, ?band, "capture attempt");

    if band == CaptureBand::Success && !state.player.has_party_space() {
        bus.push(BattleEvent::CaptureNoRoom { target: fighter });
        return false;
    }
    bus.push(BattleEvent::CaptureAttempted {
        target: fighter,
        band,
    });
    if band != CaptureBand::Success {
        return false;
    }
    state.battlers[target].flags |= BattlerFlags::CAPTURED;
    true
}

/// Moves every captured enemy into the player's party and empties its
/// battler slot.
pub fn finalize_captures(state: &mut BattleState, bus: &mut EventBus) {
    for id in side_ids(false) {
        let battler = state.battlers[id];
        if !battler.flags.contains(BattlerFlags::CAPTURED) {
            continue;
        }
        let Some(SpectraSlot::Enemy(index)) = battler.slot else {
            continue;
        };
        state.battlers[id].reset_inactive();
        state.turns[id].state = TurnState::Inactive;
        let Some(spectra) = state.enemies[index].take() else {
            continue;
        };
        let species = spectra.species;
        match state.player.add_spectra(spectra) {
            Ok(_) => bus.push(BattleEvent::JoinedParty { species }),
            Err(e) => warn!(?species, error = %e, "captured creature could not join the party"),
        }
    }
}
