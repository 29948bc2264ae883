use schema::{ElementType, StatKind, Technique};

use crate::battle::battler::{BattlerFlags, BattlerId};
use crate::battle::state::{BattleEvent, BattleState, EventBus};
use crate::data::StaticData;

/// Computed damage of one hit, before it is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRoll {
    pub damage: u32,
    /// Product of the matchups against each of the target's types.
    pub multiplier: f32,
}

/// Defend stat used against an attack. Defending battlers count it twice.
fn defend_against(state: &BattleState, target: BattlerId) -> f64 {
    let defend = state.boosted_stat(target, StatKind::Defend).max(1) as f64;
    if state.battlers[target].flags.contains(BattlerFlags::DEFENDING) {
        defend * 2.0
    } else {
        defend
    }
}

/// `1 + floor(power * attack/defend * level/max_level * matchup)`.
///
/// Techniques without power deal nothing; anything with power deals at
/// least 1.
pub fn calculate_damage(
    state: &BattleState,
    user: BattlerId,
    target: BattlerId,
    technique: Technique,
) -> DamageRoll {
    let data = technique.data();
    let (Some(attacker), Some(defender)) = (state.spectra(user), state.spectra(target)) else {
        return DamageRoll {
            damage: 0,
            multiplier: 1.0,
        };
    };
    let (primary, secondary) = defender.types();
    let multiplier = ElementType::matchup_against(data.element, primary, secondary);
    if data.power == 0 {
        return DamageRoll {
            damage: 0,
            multiplier,
        };
    }

    let attack_ratio = state.boosted_stat(user, StatKind::Attack) as f64 / defend_against(state, target);
    let level_scale = attacker.level as f64 / state.config.max_level as f64;
    let raw = data.power as f64 * attack_ratio * level_scale * multiplier as f64;
    DamageRoll {
        damage: 1 + raw.floor() as u32,
        multiplier,
    }
}

/// Applies a technique's damage to one target. Returns true when the hit
/// made the target pass out.
pub fn deal_damage(
    state: &mut BattleState,
    user: BattlerId,
    target: BattlerId,
    technique: Technique,
    bus: &mut EventBus,
) -> bool {
    let roll = calculate_damage(state, user, target, technique);
    let Some(fighter) = state.fighter(target) else {
        return false;
    };
    let Some(spectra) = state.spectra_mut(target) else {
        return false;
    };
    let was_standing = spectra.health > 0;
    let dealt = spectra.take_damage(roll.damage);
    let remaining_health = spectra.health;

    if roll.multiplier != 1.0 {
        bus.push(BattleEvent::Effectiveness {
            multiplier: roll.multiplier,
        });
    }
    bus.push(BattleEvent::DamageDealt {
        target: fighter,
        damage: dealt,
        remaining_health,
    });
    if was_standing && remaining_health == 0 {
        bus.push(BattleEvent::Fainted { target: fighter });
        return true;
    }
    false
}
