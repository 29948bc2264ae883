use schema::StatKind;
use tracing::info;

use crate::battle::rng::BattleRng;
use crate::battle::state::BattleState;

/// Chance that the player's side gets away:
/// `allies(evade + luck) / (allies(evade + luck) + enemies(evade))`,
/// summed over living battlers with boosts applied.
///
/// # Panics
///
/// Panics when either side has no living battler; the battle is already
/// over at that point.
pub fn escape_chance(state: &BattleState) -> f64 {
    assert!(
        state.any_alive(true) && state.any_alive(false),
        "escape attempted without living combatants on both sides"
    );
    let allies: u32 = state
        .living_ids(true)
        .map(|id| state.boosted_stat(id, StatKind::Evade) + state.boosted_stat(id, StatKind::Luck))
        .sum();
    let enemies: u32 = state
        .living_ids(false)
        .map(|id| state.boosted_stat(id, StatKind::Evade))
        .sum();
    let total = allies + enemies;
    if total == 0 {
        return 0.5;
    }
    allies as f64 / total as f64
}

/// Rolls an escape attempt.
pub fn attempt_escape(state: &BattleState, rng: &mut BattleRng) -> bool {
    let chance = escape_chance(state);
    let roll = rng.unit("escape roll");
    let escaped = roll < chance;
    info!(chance, roll, escaped, "escape attempt");
    escaped
}
