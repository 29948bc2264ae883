use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Who a technique may hit, relative to the side of its user.
    ///
    /// Each nibble is one role: the user, the user's allies, the opposing
    /// side, and whether the whole selection is hit at once.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TargetMask: u16 {
        const USER  = 0x000F;
        const ALLY  = 0x00F0;
        const ENEMY = 0x0F00;
        const GROUP = 0xF000;
    }
}

/// The named target shapes used by the technique table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// Hits the user of the technique.
    Yourself,
    /// Hits one enemy.
    TargetEnemy,
    /// Hits one teammate, or the user.
    Ally,
    /// Hits any one combatant.
    Anyone,
    /// Hits each enemy.
    AllEnemies,
    /// Hits everyone but the user.
    EveryoneElse,
}

impl TargetKind {
    /// Raw encodings: Yourself 0x0001, TargetEnemy 0x0100, Ally 0x0011,
    /// Anyone 0x0111, AllEnemies 0x1100, EveryoneElse 0x1110.
    pub fn bits(self) -> u16 {
        match self {
            TargetKind::Yourself => 0x0001,
            TargetKind::TargetEnemy => 0x0100,
            TargetKind::Ally => 0x0011,
            TargetKind::Anyone => 0x0111,
            TargetKind::AllEnemies => 0x1100,
            TargetKind::EveryoneElse => 0x1110,
        }
    }

    pub fn mask(self) -> TargetMask {
        TargetMask::from_bits_truncate(self.bits())
    }

    pub fn is_group(self) -> bool {
        self.mask().is_group()
    }
}

impl TargetMask {
    pub fn includes_user(self) -> bool {
        self.intersects(TargetMask::USER)
    }

    pub fn includes_allies(self) -> bool {
        self.intersects(TargetMask::ALLY)
    }

    pub fn includes_enemies(self) -> bool {
        self.intersects(TargetMask::ENEMY)
    }

    pub fn is_group(self) -> bool {
        self.intersects(TargetMask::GROUP)
    }
}
