use crate::{EffectKind, ElementType, TargetKind};
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Stable identifier for every technique, including the four built-in
/// actions the battle menu offers directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[repr(u8)]
pub enum Technique {
    // Built-in menu actions
    Attack = 81,
    Defend = 82,
    UseItem = 83,
    Escape = 84,

    // Basic
    Bite = 1,
    Collide = 2,
    Slice = 3,
    Rampage = 4,
    Engulf = 5,
    Bombard = 8,
    TriBeam = 9,
    Crush = 11,
    Recover = 12,
    Purge = 13,
    Dispel = 14,
    Sharpen = 16,
    Prevent = 19,
    Disarm = 21,
    Lurk = 22,
    Provoke = 23,
    Explosion = 24,
    MindRay = 56,
    Hypnosis = 59,
    Capture = 72,
    Ailment = 73,

    // Wind
    Gust = 25,
    Cyclone = 26,

    // Fire
    HotGust = 31,
    Inferno = 36,
    FireBreath = 79,

    // Water
    SwimAttack = 37,
    Riptide = 39,
    Tsunami = 41,

    // Dark
    PoisonClaw = 42,
    Smog = 46,

    // Light
    Zap = 47,
    Thunder = 51,

    // Ice
    ColdGust = 53,
    Avalanche = 55,

    // Earth
    Fracture = 62,
    Earthquake = 63,
    Solidify = 69,

    // Metal
    CoreBeam = 65,
    IronAttack = 67,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechniqueData {
    pub name: String,
    pub element: ElementType,
    /// Base damage. Zero for techniques that only carry an effect.
    pub power: u32,
    /// Power points spent by the user.
    pub cost: u32,
    pub target: TargetKind,
    #[serde(default)]
    pub effect: EffectKind,
    #[serde(default)]
    pub argument: i32,
    /// The effect fires once after every target was hit, on the user.
    #[serde(default)]
    pub effect_once: bool,
    #[serde(default)]
    pub description: String,
}
