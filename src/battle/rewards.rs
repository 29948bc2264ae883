//! Experience and money for a won battle.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::battle::state::{BattleEvent, BattleState, EventBus, Fighter};
use crate::data::StaticData;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rewards {
    /// Experience for each living ally.
    pub experience: u32,
    pub money: u32,
}

/// Rewards for the enemies still in the battle. Captured enemies already
/// left it and yield nothing.
pub fn battle_rewards(state: &BattleState) -> Rewards {
    let mut total_yield = 0u32;
    let mut money = 0u32;
    let mut defeated = 0usize;
    for enemy in state.enemies.iter().flatten() {
        let data = enemy.species.data();
        total_yield += data.experience * enemy.level as u32;
        money += data.money;
        defeated += 1;
    }
    if defeated == 0 {
        return Rewards::default();
    }
    Rewards {
        experience: (total_yield / state.config.experience_divisor.max(1)).max(1),
        money,
    }
}

/// Hands out [`battle_rewards`] and reports levels and techniques gained.
pub fn grant_rewards(state: &mut BattleState, bus: &mut EventBus) -> Rewards {
    let rewards = battle_rewards(state);
    info!(?rewards, "battle rewards");

    if rewards.experience > 0 {
        let allies: Vec<_> = state.living_ids(true).collect();
        for id in allies {
            let Some(spectra) = state.spectra_mut(id) else {
                continue;
            };
            let start_level = spectra.level;
            let gain = spectra.gain_experience(rewards.experience);
            let target = Fighter {
                id,
                species: spectra.species,
            };
            bus.push(BattleEvent::ExperienceGained {
                target,
                amount: rewards.experience,
            });
            for level in (start_level + 1)..=(start_level + gain.levels_gained) {
                bus.push(BattleEvent::LevelUp { target, level });
            }
            for technique in gain.learned {
                bus.push(BattleEvent::TechniqueLearned { target, technique });
            }
        }
    }

    if rewards.money > 0 {
        state.player.money = state.player.money.saturating_add(rewards.money);
        bus.push(BattleEvent::MoneyGained {
            amount: rewards.money,
        });
    }
    rewards
}
