use schema::{Ailment, ElementType, Species, StatKind, Technique};
use serde::{Deserialize, Serialize};

use crate::data::{get_species_data, StaticData};
use crate::errors::DataResult;

/// The maximum number of techniques a creature knows at once.
pub const MOVESET_SIZE: usize = 8;

/// The level cap.
pub const LEVEL_MAX: u8 = 100;

/// A persistent creature record.
///
/// Records are owned by the player's party, or created for the duration of
/// a battle for wild and boss enemies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectra {
    pub species: Species,
    pub level: u8,
    /// Experience still needed to reach the next level. Counts down.
    pub experience: u32,
    pub health: u32,
    pub max_health: u32,
    pub power: u32,
    pub max_power: u32,
    pub attack: u32,
    pub defend: u32,
    pub evade: u32,
    pub luck: u32,
    pub ailment: Option<Ailment>,
    pub moveset: Vec<Technique>,
}

/// The result of [`Spectra::gain_experience`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceGain {
    pub levels_gained: u8,
    /// Techniques that joined the moveset while levelling up.
    pub learned: Vec<Technique>,
}

/// Experience needed to advance past `level` on the given curve.
pub fn experience_needed(rate: u32, level: u8) -> u32 {
    let level = level as u32;
    1 + rate * level * level / 100
}

/// Scales a base stat for a level: `ceil(base * 0.03 * (level + 5))`,
/// computed in integers.
fn scaled_stat(base: u32, level: u8) -> u32 {
    (base * 3 * (level as u32 + 5)).div_ceil(100)
}

impl Spectra {
    /// Creates a fully healed creature of the given species and level.
    pub fn new(species: Species, level: u8) -> DataResult<Self> {
        let data = get_species_data(species)?;
        let level = level.clamp(1, LEVEL_MAX);
        let mut spectra = Self {
            species,
            level,
            experience: experience_needed(data.growth.experience_rate(), level),
            health: 0,
            max_health: 0,
            power: 0,
            max_power: 0,
            attack: 0,
            defend: 0,
            evade: 0,
            luck: 0,
            ailment: None,
            moveset: Vec::new(),
        };
        if level >= LEVEL_MAX {
            spectra.experience = 0;
        }
        spectra.update_active_stats();
        spectra.recover();
        Ok(spectra)
    }

    pub fn types(&self) -> (ElementType, Option<ElementType>) {
        self.species.data().types
    }

    pub fn has_type(&self, element: ElementType) -> bool {
        self.species.data().has_type(element)
    }

    /// Recomputes the level-dependent stats and the moveset.
    ///
    /// Current health and power are clamped to the new maxima but otherwise
    /// untouched. Calling this repeatedly gives the same result.
    pub fn update_active_stats(&mut self) {
        let data = self.species.data();
        self.max_health = scaled_stat(data.health, self.level);
        self.max_power = scaled_stat(data.power, self.level);
        self.attack = scaled_stat(data.attack, self.level);
        self.defend = scaled_stat(data.defend, self.level);
        self.evade = scaled_stat(data.evade, self.level);
        self.luck = scaled_stat(data.luck, self.level);

        self.moveset = data
            .moveset
            .iter()
            .filter(|entry| entry.level <= self.level)
            .map(|entry| entry.technique)
            .take(MOVESET_SIZE)
            .collect();

        self.health = self.health.min(self.max_health);
        self.power = self.power.min(self.max_power);
    }

    /// Restores health and power and clears any ailment.
    pub fn recover(&mut self) {
        self.health = self.max_health;
        self.power = self.max_power;
        self.ailment = None;
    }

    pub fn is_fainted(&self) -> bool {
        self.health == 0
    }

    pub fn base_stat(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defend => self.defend,
            StatKind::Evade => self.evade,
            StatKind::Luck => self.luck,
        }
    }

    /// Fraction of health remaining, in `[0, 1]`.
    pub fn health_fraction(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f64 / self.max_health as f64
    }

    /// Raises health by up to `amount`. Returns how much was actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_health - self.health);
        self.health += healed;
        healed
    }

    /// Lowers health by up to `amount`. Returns how much was actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.health);
        self.health -= lost;
        lost
    }

    /// Pays `cost` power points if the creature has them.
    pub fn spend_power(&mut self, cost: u32) -> bool {
        if self.power < cost {
            return false;
        }
        self.power -= cost;
        true
    }

    /// Total experience earned over the creature's lifetime.
    pub fn experience_total(&self) -> u64 {
        let rate = self.species.data().growth.experience_rate() as u64;
        let level = self.level as u64;
        let needed = experience_needed(rate as u32, self.level) as u64;
        (level - 1) + rate * level * level * level / 300 + needed.saturating_sub(self.experience as u64)
    }

    /// Counts experience down toward the next level, levelling up as many
    /// times as `amount` allows.
    ///
    /// Each level gained raises current health and power by the increase of
    /// their maxima. At the level cap no more experience is stored.
    pub fn gain_experience(&mut self, amount: u32) -> ExperienceGain {
        let mut gain = ExperienceGain::default();
        if self.level >= LEVEL_MAX {
            self.experience = 0;
            return gain;
        }

        let rate = self.species.data().growth.experience_rate();
        let old_max_health = self.max_health;
        let old_max_power = self.max_power;
        let old_moveset = self.moveset.clone();

        let mut remaining = amount;
        while remaining >= self.experience {
            remaining -= self.experience;
            self.level += 1;
            gain.levels_gained += 1;
            if self.level >= LEVEL_MAX {
                self.experience = 0;
                break;
            }
            self.experience = experience_needed(rate, self.level);
        }
        if self.level < LEVEL_MAX {
            self.experience -= remaining;
        }

        if gain.levels_gained > 0 {
            self.update_active_stats();
            self.health += self.max_health.saturating_sub(old_max_health);
            self.power += self.max_power.saturating_sub(old_max_power);
            self.health = self.health.min(self.max_health);
            self.power = self.power.min(self.max_power);
            gain.learned = self
                .moveset
                .iter()
                .filter(|technique| !old_moveset.contains(technique))
                .copied()
                .collect();
        }
        gain
    }
}
