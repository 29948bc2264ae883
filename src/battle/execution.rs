//! Resolution of one queued turn, one gated step at a time.
//!
//! A turn moves `Pending -> Active -> Result -> Done`. The session calls one
//! of the functions below per step, only after the output queue has drained,
//! so each stage's text is read before the next stage happens.

use schema::{Ailment, AilmentChoice, EffectKind, Item, TargetMask};
use tracing::{debug, warn};

use crate::battle::battler::BattlerId;
use crate::battle::capture::finalize_captures;
use crate::battle::damage::deal_damage;
use crate::battle::effects::{apply_effect, cure, should_activate};
use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleEvent, BattleState, EventBus, TurnAction, TurnState};
use crate::data::StaticData;

/// Whether the user's ailment stops it from acting this turn. Being stuck
/// in the ground always blocks, and the blocked turn digs the user out.
fn check_blocked(
    state: &mut BattleState,
    user: BattlerId,
    bus: &mut EventBus,
    rng: &mut BattleRng,
) -> bool {
    let Some(fighter) = state.fighter(user) else {
        return true;
    };
    let Some(ailment) = state.spectra(user).and_then(|spectra| spectra.ailment) else {
        return false;
    };
    let blocked = match ailment {
        Ailment::Shocked => rng.percent("shock paralysis") < 50,
        Ailment::Buried | Ailment::Asleep => true,
        Ailment::Poisoned | Ailment::Aflame => false,
    };
    if blocked {
        bus.push(BattleEvent::CannotMove {
            user: fighter,
            ailment,
        });
        if ailment == Ailment::Buried {
            cure(state, user, AilmentChoice::Specific(Ailment::Buried), bus);
        }
    }
    blocked
}

/// `Pending -> Active`. Runs the ailment check and pays the power cost.
/// A turn that cannot go ahead skips straight to `Result`.
pub fn begin_turn(state: &mut BattleState, user: BattlerId, bus: &mut EventBus, rng: &mut BattleRng) {
    let turn = state.turns[user];
    debug_assert_eq!(turn.state, TurnState::Pending);

    if check_blocked(state, user, bus, rng) {
        state.turns[user].state = TurnState::Result;
        return;
    }
    let Some(fighter) = state.fighter(user) else {
        state.turns[user].state = TurnState::Result;
        return;
    };

    let technique = turn.action.technique();
    let cost = technique.data().cost;
    let paid = state
        .spectra_mut(user)
        .is_some_and(|spectra| spectra.spend_power(cost));
    if !paid {
        bus.push(BattleEvent::NotEnoughPower {
            user: fighter,
            technique,
        });
        state.turns[user].state = TurnState::Result;
        return;
    }

    bus.push(match turn.action {
        TurnAction::Technique(technique) => BattleEvent::TechniqueUsed {
            user: fighter,
            technique,
        },
        TurnAction::Item { item, .. } => BattleEvent::ItemUsed {
            user: fighter,
            item,
        },
    });
    state.turns[user].state = TurnState::Active;
}

/// The battlers a turn lands on. Group masks take every valid target at
/// this moment; a single target must still be valid or the turn misses.
pub fn resolve_targets(
    state: &BattleState,
    user: BattlerId,
    mask: TargetMask,
    chosen: Option<BattlerId>,
) -> Vec<BattlerId> {
    let valid = state.valid_targets(user, mask);
    if mask.is_group() {
        return valid;
    }
    match chosen {
        Some(target) if valid.contains(&target) => vec![target],
        _ => Vec::new(),
    }
}

/// `Active -> Result`. Deals damage and applies the effect.
///
/// The activation roll happens once per use and is shared by every target.
/// Effects marked to apply once run a single time after all targets, aimed
/// at the user. A target that passed out from the hit gets no effect.
pub fn resolve_turn(
    state: &mut BattleState,
    user: BattlerId,
    bus: &mut EventBus,
    rng: &mut BattleRng,
) {
    let turn = state.turns[user];
    debug_assert_eq!(turn.state, TurnState::Active);
    state.turns[user].state = TurnState::Result;

    let technique = turn.action.technique();
    let data = technique.data();
    let (effect, argument, effect_once) = match turn.action {
        TurnAction::Technique(_) => (data.effect, data.argument, data.effect_once),
        TurnAction::Item { item, .. } => {
            let item_data = item.data();
            (item_data.effect, item_data.argument, false)
        }
    };

    if let TurnAction::Item { item, .. } = turn.action {
        consume_used_item(state, item);
    }

    let targets = resolve_targets(state, user, data.target.mask(), turn.target);
    debug!(user, ?technique, ?targets, "resolving turn");
    if targets.is_empty() {
        bus.push(BattleEvent::NoTarget);
        return;
    }

    let activates = effect != EffectKind::None && should_activate(effect, argument, rng);
    let reported_from = bus.len();
    let mut changed = false;
    for &target in &targets {
        if data.power > 0 {
            changed = true;
            if deal_damage(state, user, target, technique, bus) {
                continue;
            }
        }
        if activates && !effect_once {
            changed |= apply_effect(effect, argument, user, target, state, bus, rng);
        }
    }
    if activates && effect_once {
        changed |= apply_effect(effect, argument, user, user, state, bus, rng);
    }

    // A capture roll reports its own result line.
    let capture_reported = bus.since(reported_from).iter().any(|event| {
        matches!(
            event,
            BattleEvent::CaptureAttempted { .. } | BattleEvent::CaptureNoRoom { .. }
        )
    });
    if !changed && data.power == 0 && !capture_reported {
        bus.push(BattleEvent::NoEffect);
    }
}

/// Takes one unit of a used item out of the inventory unless it is
/// reusable.
fn consume_used_item(state: &mut BattleState, item: Item) {
    if item.data().is_reusable() {
        return;
    }
    let Some(slot) = state
        .player
        .inventory
        .iter()
        .position(|stack| stack.item == item)
    else {
        warn!(?item, "used item is no longer in the inventory");
        return;
    };
    if let Err(e) = state.player.consume_item(slot) {
        warn!(?item, error = %e, "could not consume used item");
    }
}

/// `Result -> Done`. Captured enemies leave the battle here.
pub fn finish_turn(state: &mut BattleState, user: BattlerId, bus: &mut EventBus) {
    finalize_captures(state, bus);
    if state.turns[user].state == TurnState::Result {
        state.turns[user].state = TurnState::Done;
    }
}
