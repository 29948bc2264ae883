use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// A status condition. A creature carries at most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Ailment {
    Poisoned,
    Shocked,
    Buried,
    Asleep,
    Aflame,
}

impl fmt::Display for Ailment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            Ailment::Poisoned => "poisoned",
            Ailment::Shocked => "shocked",
            Ailment::Buried => "buried",
            Ailment::Asleep => "asleep",
            Ailment::Aflame => "aflame",
        };
        write!(f, "{}", display_name)
    }
}

/// The four boostable stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum StatKind {
    Attack,
    Defend,
    Evade,
    Luck,
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatKind::Attack => "attack",
            StatKind::Defend => "defend",
            StatKind::Evade => "evade",
            StatKind::Luck => "luck",
        };
        write!(f, "{}", display_name)
    }
}
