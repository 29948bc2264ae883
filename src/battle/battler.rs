use bitflags::bitflags;
use schema::StatKind;
use serde::{Deserialize, Serialize};

/// Battlers per side.
pub const TEAM_SIZE: usize = 3;

/// Battlers in the whole battle. Ids below [`TEAM_SIZE`] are the player's
/// side; the rest are the enemy side.
pub const BATTLE_SIZE: usize = TEAM_SIZE * 2;

/// Largest boost level in either direction.
pub const BOOST_MAX: i8 = 6;

pub type BattlerId = usize;

pub fn is_ally_side(id: BattlerId) -> bool {
    id < TEAM_SIZE
}

pub fn same_side(a: BattlerId, b: BattlerId) -> bool {
    is_ally_side(a) == is_ally_side(b)
}

/// The ids of one side, in index order.
pub fn side_ids(ally_side: bool) -> std::ops::Range<BattlerId> {
    if ally_side {
        0..TEAM_SIZE
    } else {
        TEAM_SIZE..BATTLE_SIZE
    }
}

/// Where a battler's creature record lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectraSlot {
    /// Index into the player's party.
    Party(usize),
    /// Index into the session's enemy buffer.
    Enemy(usize),
}

bitflags! {
    /// Transient per-round battler state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct BattlerFlags: u8 {
        const DEFENDING = 0x01;
        /// Captured this turn; leaves the battle once the turn finishes.
        const CAPTURED  = 0x02;
    }
}

/// Four independent stat boost levels, each in `-BOOST_MAX..=BOOST_MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boosts {
    pub attack: i8,
    pub defend: i8,
    pub evade: i8,
    pub luck: i8,
}

impl Boosts {
    pub fn get(&self, stat: StatKind) -> i8 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defend => self.defend,
            StatKind::Evade => self.evade,
            StatKind::Luck => self.luck,
        }
    }

    /// Sets a boost level, clamped to the allowed range.
    pub fn set(&mut self, stat: StatKind, value: i8) {
        let value = value.clamp(-BOOST_MAX, BOOST_MAX);
        match stat {
            StatKind::Attack => self.attack = value,
            StatKind::Defend => self.defend = value,
            StatKind::Evade => self.evade = value,
            StatKind::Luck => self.luck = value,
        }
    }
}

/// Stat multiplier for a boost level: `1 + 3(b/6)^2` above zero and
/// `1 - 0.75(b/6)^2` below, so +6 is 4x and -6 is 0.25x.
pub fn boost_scale(boost: i8) -> f64 {
    let ratio = boost as f64 / BOOST_MAX as f64;
    if boost > 0 {
        1.0 + 3.0 * ratio * ratio
    } else if boost < 0 {
        1.0 - 0.75 * ratio * ratio
    } else {
        1.0
    }
}

/// A combatant's session-scoped state. An empty slot has no creature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Battler {
    pub slot: Option<SpectraSlot>,
    pub boosts: Boosts,
    pub flags: BattlerFlags,
}

impl Battler {
    pub fn new(slot: SpectraSlot) -> Self {
        Self {
            slot: Some(slot),
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.slot.is_some()
    }

    /// Empties the slot and zeroes boosts and flags.
    pub fn reset_inactive(&mut self) {
        *self = Self::empty();
    }
}
