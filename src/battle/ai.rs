//! Automatic turn selection.

use schema::Technique;
use std::fmt;

use crate::battle::battler::BattlerId;
use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleState, Turn, TurnAction};
use crate::data::StaticData;

/// Something that can pick a battler's turn without player input.
pub trait Behavior: fmt::Debug {
    /// Inspects the battle and returns a pending turn for `user`.
    fn decide_turn(&self, user: BattlerId, state: &BattleState, rng: &mut BattleRng) -> Turn;
}

/// Picks uniformly among Attack, Defend and every known technique the user
/// can pay for, then uniformly among the valid targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAI;

impl RandomAI {
    pub fn new() -> Self {
        Self
    }

    /// Attack and Defend, then affordable moveset techniques in order.
    pub fn candidates(user: BattlerId, state: &BattleState) -> Vec<Technique> {
        let mut candidates = vec![Technique::Attack, Technique::Defend];
        if let Some(spectra) = state.spectra(user) {
            candidates.extend(
                spectra
                    .moveset
                    .iter()
                    .copied()
                    .filter(|technique| technique.data().cost <= spectra.power),
            );
        }
        candidates
    }
}

impl Behavior for RandomAI {
    fn decide_turn(&self, user: BattlerId, state: &BattleState, rng: &mut BattleRng) -> Turn {
        let candidates = Self::candidates(user, state);
        let technique = candidates[rng.index(candidates.len(), "ai technique")];
        let action = TurnAction::Technique(technique);
        let mask = action.target_mask();

        let target = if mask.is_group() {
            None
        } else {
            let targets = state.valid_targets(user, mask);
            if targets.is_empty() {
                None
            } else {
                Some(targets[rng.index(targets.len(), "ai target")])
            }
        };
        Turn::pending(user, action, target)
    }
}
