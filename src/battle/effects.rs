use schema::{Ailment, AilmentChoice, EffectKind, ElementType, StatKind};
use tracing::debug;

use crate::battle::battler::{BattlerFlags, BattlerId, BOOST_MAX};
use crate::battle::capture::attempt_capture;
use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleEvent, BattleState, EventBus};

/// Afflictions other than sleep only land on a percent roll below their
/// argument. Everything else always activates.
pub fn should_activate(effect: EffectKind, argument: i32, rng: &mut BattleRng) -> bool {
    if !effect.is_chance_gated() {
        return true;
    }
    (rng.percent("effect activation") as i32) < argument
}

/// Applies one effect from `user` onto `target` and reports whether
/// anything changed.
///
/// # Panics
///
/// Panics on [`EffectKind::Escape`]: escape is resolved by the battle menu
/// and never reaches turn resolution.
pub fn apply_effect(
    effect: EffectKind,
    argument: i32,
    user: BattlerId,
    target: BattlerId,
    state: &mut BattleState,
    bus: &mut EventBus,
    rng: &mut BattleRng,
) -> bool {
    let changed = match effect {
        EffectKind::None => false,
        EffectKind::Afflict(AilmentChoice::Specific(ailment)) => {
            afflict(state, target, ailment, bus)
        }
        EffectKind::Afflict(AilmentChoice::Any) => {
            if has_ailment(state, target) {
                false
            } else {
                let ailment = random_ailment(rng);
                afflict(state, target, ailment, bus)
            }
        }
        EffectKind::Cure(choice) => cure(state, target, choice, bus),
        EffectKind::HealConstant => heal(state, target, argument.max(0) as u32, bus),
        EffectKind::HealPercent => {
            let amount = state
                .spectra(target)
                .map_or(0, |spectra| spectra.max_health * argument.max(0) as u32 / 100);
            heal(state, target, amount, bus)
        }
        EffectKind::ResetStats => reset_stats(state, target, bus),
        EffectKind::Boost(stat) => boost_stat(state, target, stat, argument, bus),
        EffectKind::KillUser => kill(state, user, bus),
        EffectKind::Capture => attempt_capture(state, user, target, bus, rng),
        EffectKind::Defend => set_flag(state, target, BattlerFlags::DEFENDING, bus),
        EffectKind::Escape => {
            panic!("escape effect reached turn resolution for battler {}", user)
        }
    };
    debug!(?effect, user, target, changed, "effect applied");
    changed
}

fn has_ailment(state: &BattleState, target: BattlerId) -> bool {
    state
        .spectra(target)
        .is_some_and(|spectra| spectra.ailment.is_some())
}

fn random_ailment(rng: &mut BattleRng) -> Ailment {
    match rng.range(1, 5, "random ailment") {
        1 => Ailment::Poisoned,
        2 => Ailment::Shocked,
        3 => Ailment::Buried,
        4 => Ailment::Asleep,
        _ => Ailment::Aflame,
    }
}

/// Fire and water types cannot be set aflame; metal types cannot be poisoned.
pub fn is_immune(state: &BattleState, target: BattlerId, ailment: Ailment) -> bool {
    let Some(spectra) = state.spectra(target) else {
        return true;
    };
    match ailment {
        Ailment::Aflame => {
            spectra.has_type(ElementType::Fire) || spectra.has_type(ElementType::Water)
        }
        Ailment::Poisoned => spectra.has_type(ElementType::Metal),
        _ => false,
    }
}

pub fn afflict(
    state: &mut BattleState,
    target: BattlerId,
    ailment: Ailment,
    bus: &mut EventBus,
) -> bool {
    if has_ailment(state, target) || is_immune(state, target, ailment) {
        return false;
    }
    let Some(fighter) = state.fighter(target) else {
        return false;
    };
    if let Some(spectra) = state.spectra_mut(target) {
        spectra.ailment = Some(ailment);
    }
    bus.push(BattleEvent::AilmentInflicted {
        target: fighter,
        ailment,
    });
    true
}

pub fn cure(
    state: &mut BattleState,
    target: BattlerId,
    choice: AilmentChoice,
    bus: &mut EventBus,
) -> bool {
    let Some(fighter) = state.fighter(target) else {
        return false;
    };
    let Some(spectra) = state.spectra_mut(target) else {
        return false;
    };
    let Some(current) = spectra.ailment else {
        return false;
    };
    if let AilmentChoice::Specific(wanted) = choice {
        if wanted != current {
            return false;
        }
    }
    spectra.ailment = None;
    bus.push(BattleEvent::AilmentCured {
        target: fighter,
        ailment: current,
    });
    true
}

/// Silent no-op when the target is already at full health.
pub fn heal(
    state: &mut BattleState,
    target: BattlerId,
    amount: u32,
    bus: &mut EventBus,
) -> bool {
    let Some(fighter) = state.fighter(target) else {
        return false;
    };
    let Some(spectra) = state.spectra_mut(target) else {
        return false;
    };
    let healed = spectra.heal(amount);
    if healed == 0 {
        return false;
    }
    bus.push(BattleEvent::Healed {
        target: fighter,
        amount: healed,
    });
    true
}

/// Moves a boost by `delta` steps, clamped to the boost range. The message
/// reflects the steps actually applied.
pub fn boost_stat(
    state: &mut BattleState,
    target: BattlerId,
    stat: StatKind,
    delta: i32,
    bus: &mut EventBus,
) -> bool {
    let Some(fighter) = state.fighter(target) else {
        return false;
    };
    let boosts = &mut state.battlers[target].boosts;
    let start = boosts.get(stat);
    let end = (start as i32 + delta).clamp(-(BOOST_MAX as i32), BOOST_MAX as i32) as i8;
    if end == start {
        return false;
    }
    boosts.set(stat, end);
    bus.push(BattleEvent::StatBoosted {
        target: fighter,
        stat,
        delta: end - start,
    });
    true
}

/// Always succeeds and always reports, even when nothing was boosted.
pub fn reset_stats(
    state: &mut BattleState,
    target: BattlerId,
    bus: &mut EventBus,
) -> bool {
    let Some(fighter) = state.fighter(target) else {
        return false;
    };
    state.battlers[target].boosts = Default::default();
    bus.push(BattleEvent::StatsReset { target: fighter });
    true
}

pub fn kill(
    state: &mut BattleState,
    user: BattlerId,
    bus: &mut EventBus,
) -> bool {
    let Some(fighter) = state.fighter(user) else {
        return false;
    };
    let Some(spectra) = state.spectra_mut(user) else {
        return false;
    };
    if spectra.health == 0 {
        return false;
    }
    spectra.health = 0;
    bus.push(BattleEvent::Died { target: fighter });
    true
}

pub fn set_flag(
    state: &mut BattleState,
    target: BattlerId,
    flag: BattlerFlags,
    bus: &mut EventBus,
) -> bool {
    let Some(fighter) = state.fighter(target) else {
        return false;
    };
    state.battlers[target].flags |= flag;
    if flag.contains(BattlerFlags::DEFENDING) {
        bus.push(BattleEvent::Defending { target: fighter });
    }
    true
}
