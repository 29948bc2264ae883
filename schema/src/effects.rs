use crate::{Ailment, StatKind};
use serde::{Deserialize, Serialize};

/// Which ailment an afflict or cure effect refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AilmentChoice {
    Specific(Ailment),
    /// Afflict: a random ailment. Cure: whatever the target has.
    Any,
}

/// The closed set of effects a technique or item can carry.
///
/// The numeric argument lives next to the effect on the technique or item
/// record; its meaning depends on the variant (a percent chance for
/// afflictions, an amount for heals, a signed step count for boosts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EffectKind {
    #[default]
    None,
    Afflict(AilmentChoice),
    Cure(AilmentChoice),
    HealConstant,
    HealPercent,
    ResetStats,
    Boost(StatKind),
    KillUser,
    Capture,
    Defend,
    Escape,
}

impl EffectKind {
    /// Afflictions other than sleep are gated on a percent roll.
    pub fn is_chance_gated(self) -> bool {
        matches!(
            self,
            EffectKind::Afflict(AilmentChoice::Any)
                | EffectKind::Afflict(AilmentChoice::Specific(
                    Ailment::Buried | Ailment::Aflame | Ailment::Poisoned | Ailment::Shocked
                ))
        )
    }
}
