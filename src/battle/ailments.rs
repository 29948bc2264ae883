//! End-of-round upkeep: ailment ticks, then transient state cleanup.

use schema::{Ailment, AilmentChoice};
use tracing::debug;

use crate::battle::battler::{BattlerFlags, BATTLE_SIZE};
use crate::battle::effects::cure;
use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleEvent, BattleOutcome, BattleState, EventBus};

/// Damage of one poison or burn tick.
pub fn ailment_damage(max_health: u32) -> u32 {
    1 + max_health / 8
}

/// Ticks the ailment of every living battler in id order. Stops as soon as
/// one side is wiped out and returns that outcome; otherwise clears the
/// round's flags (and boosts, when configured) and returns `None`.
pub fn end_of_round(
    state: &mut BattleState,
    bus: &mut EventBus,
    rng: &mut BattleRng,
) -> Option<BattleOutcome> {
    for id in 0..BATTLE_SIZE {
        if !state.is_alive(id) {
            continue;
        }
        let Some(fighter) = state.fighter(id) else {
            continue;
        };
        match state.spectra(id).and_then(|spectra| spectra.ailment) {
            Some(Ailment::Asleep) => {
                if rng.percent("wake up") < 50 {
                    cure(state, id, AilmentChoice::Specific(Ailment::Asleep), bus);
                }
            }
            Some(ailment @ (Ailment::Poisoned | Ailment::Aflame)) => {
                if let Some(spectra) = state.spectra_mut(id) {
                    let damage = spectra.take_damage(ailment_damage(spectra.max_health));
                    let fainted = spectra.health == 0;
                    bus.push(BattleEvent::AilmentDamage {
                        target: fighter,
                        ailment,
                        damage,
                    });
                    if fainted {
                        bus.push(BattleEvent::Fainted { target: fighter });
                    }
                }
            }
            _ => {}
        }
        if let Some(outcome) = state.check_outcome() {
            debug!(?outcome, "battle decided during ailment ticks");
            return Some(outcome);
        }
    }

    let reset_boosts = state.config.reset_boosts_each_round;
    for battler in state.battlers.iter_mut().filter(|battler| battler.is_active()) {
        battler.flags = BattlerFlags::empty();
        if reset_boosts {
            battler.boosts = Default::default();
        }
    }
    None
}
