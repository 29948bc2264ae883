use schema::{Ailment, EncounterKind, Item, Species, StatKind, TargetMask, Technique};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::battle::battler::{
    boost_scale, is_ally_side, same_side, side_ids, Battler, BattlerId, SpectraSlot, BATTLE_SIZE,
    TEAM_SIZE,
};
use crate::config::BattleConfig;
use crate::data::StaticData;
use crate::player::Player;
use crate::spectra::Spectra;

/// How a battle ended.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Win,
    Lose,
    Escaped,
}

/// Sub-phases of one round.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// The player picks an action for each living ally.
    PlayerInput,
    /// The AI picks an action for each living enemy.
    EnemyInput,
    /// Queued turns resolve one at a time.
    Execution,
    /// Ailment ticks and flag cleanup.
    EndOfRound,
}

/// Top-level battle state machine.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    Intro,
    Active(RoundPhase),
    /// A failed escape; returns to enemy input once its message is shown.
    NoEscape,
    Win,
    Lose,
    Escaped,
    /// Terminal output was shown and the mode switch was requested.
    Finished(BattleOutcome),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Inactive,
    Pending,
    Active,
    Result,
    Done,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    Technique(Technique),
    /// Use the item in inventory slot `slot`.
    Item { slot: usize, item: Item },
}

impl Default for TurnAction {
    fn default() -> Self {
        TurnAction::Technique(Technique::Attack)
    }
}

impl TurnAction {
    /// The technique whose target mask, power and type drive resolution.
    pub fn technique(&self) -> Technique {
        match self {
            TurnAction::Technique(technique) => *technique,
            TurnAction::Item { .. } => Technique::UseItem,
        }
    }

    pub fn target_mask(&self) -> TargetMask {
        self.technique().data().target.mask()
    }
}

/// One battler's intended action for the round.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Turn {
    pub state: TurnState,
    pub user: BattlerId,
    pub action: TurnAction,
    /// `None` for group actions, which pick their targets when they resolve.
    pub target: Option<BattlerId>,
}

impl Turn {
    pub fn pending(user: BattlerId, action: TurnAction, target: Option<BattlerId>) -> Self {
        Self {
            state: TurnState::Pending,
            user,
            action,
            target,
        }
    }
}

/// A battler as named in battle text. Enemy-side battlers are prefixed
/// with "Enemy".
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fighter {
    pub id: BattlerId,
    pub species: Species,
}

impl fmt::Display for Fighter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.species.data().name;
        if is_ally_side(self.id) {
            write!(f, "{}", name)
        } else {
            write!(f, "Enemy {}", name)
        }
    }
}

/// Result bands of a capture attempt, from best to worst.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureBand {
    Success,
    BrokeFree,
    Failed,
    GotAway,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Battle flow
    EncounterStarted {
        kind: EncounterKind,
        lead: Species,
        count: usize,
    },
    RoundStarted {
        round: u32,
    },
    EscapeSucceeded,
    EscapeFailed,
    Victory,
    Defeat,

    // Turn flow
    TechniqueUsed {
        user: Fighter,
        technique: Technique,
    },
    ItemUsed {
        user: Fighter,
        item: Item,
    },
    NotEnoughPower {
        user: Fighter,
        technique: Technique,
    },
    CannotMove {
        user: Fighter,
        ailment: Ailment,
    },
    NoTarget,
    NoEffect,

    // Damage
    DamageDealt {
        target: Fighter,
        damage: u32,
        remaining_health: u32,
    },
    Effectiveness {
        multiplier: f32,
    },
    Fainted {
        target: Fighter,
    },
    AilmentDamage {
        target: Fighter,
        ailment: Ailment,
        damage: u32,
    },

    // Effects
    AilmentInflicted {
        target: Fighter,
        ailment: Ailment,
    },
    AilmentCured {
        target: Fighter,
        ailment: Ailment,
    },
    Healed {
        target: Fighter,
        amount: u32,
    },
    StatBoosted {
        target: Fighter,
        stat: StatKind,
        delta: i8,
    },
    StatsReset {
        target: Fighter,
    },
    Died {
        target: Fighter,
    },
    Defending {
        target: Fighter,
    },
    CaptureAttempted {
        target: Fighter,
        band: CaptureBand,
    },
    CaptureNoRoom {
        target: Fighter,
    },
    JoinedParty {
        species: Species,
    },

    // Rewards
    ExperienceGained {
        target: Fighter,
        amount: u32,
    },
    LevelUp {
        target: Fighter,
        level: u8,
    },
    TechniqueLearned {
        target: Fighter,
        technique: Technique,
    },
    MoneyGained {
        amount: u32,
    },
}

fn article_for(name: &str) -> &'static str {
    match name.chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('A' | 'E' | 'I' | 'O' | 'U') => "An",
        _ => "A",
    }
}

impl BattleEvent {
    /// The line shown for this event, or `None` for silent bookkeeping.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::EncounterStarted { kind, lead, count } => {
                let name = &lead.data().name;
                let cohort = match count {
                    0 | 1 => String::new(),
                    2 => " and its cohort".to_string(),
                    _ => " and its cohorts".to_string(),
                };
                let plural = *count > 1;
                let verb = match (kind, plural) {
                    (EncounterKind::Fishing, false) => "was hooked!",
                    (EncounterKind::Fishing, true) => "were hooked!",
                    (_, false) => "draws near!",
                    (_, true) => "draw near!",
                };
                Some(format!("{} {}{} {}", article_for(name), name, cohort, verb))
            }
            BattleEvent::RoundStarted { .. } => None,
            BattleEvent::EscapeSucceeded => Some("You got away safely!".to_string()),
            BattleEvent::EscapeFailed => Some("You couldn't get away!".to_string()),
            BattleEvent::Victory => Some("You won the battle!".to_string()),
            BattleEvent::Defeat => Some("Your team was defeated...".to_string()),

            BattleEvent::TechniqueUsed { user, technique } => {
                Some(format!("{} used {}!", user, technique.data().name))
            }
            BattleEvent::ItemUsed { user, item } => {
                Some(format!("{} used the {}!", user, item.data().name))
            }
            BattleEvent::NotEnoughPower { user, technique } => Some(format!(
                "{} doesn't have enough power for {}!",
                user,
                technique.data().name
            )),
            BattleEvent::CannotMove { user, ailment } => match ailment {
                Ailment::Shocked => Some(format!("{} is shocked and can't move!", user)),
                Ailment::Buried => Some(format!("{} is stuck in the ground!", user)),
                Ailment::Asleep => Some(format!("{} is fast asleep.", user)),
                // Poison and burns never stop a turn.
                Ailment::Poisoned | Ailment::Aflame => None,
            },
            BattleEvent::NoTarget => Some("But there was no target...".to_string()),
            BattleEvent::NoEffect => Some("But it had no effect...".to_string()),

            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", target, damage))
            }
            BattleEvent::Effectiveness { multiplier } => {
                if *multiplier > 1.0 {
                    Some("It's super effective!".to_string())
                } else if *multiplier < 1.0 {
                    Some("It's not very effective...".to_string())
                } else {
                    None
                }
            }
            BattleEvent::Fainted { target } => Some(format!("{} passed out!", target)),
            BattleEvent::AilmentDamage {
                target,
                ailment,
                damage,
            } => Some(match ailment {
                Ailment::Aflame => format!("{} took {} damage from its burns!", target, damage),
                _ => format!("{} took {} damage from poison!", target, damage),
            }),

            BattleEvent::AilmentInflicted { target, ailment } => Some(match ailment {
                Ailment::Poisoned => format!("{} was poisoned!", target),
                Ailment::Shocked => format!("{} was shocked!", target),
                Ailment::Buried => format!("{} was buried in the ground!", target),
                Ailment::Asleep => format!("{} fell asleep!", target),
                Ailment::Aflame => format!("{} was set on fire!", target),
            }),
            BattleEvent::AilmentCured { target, ailment } => Some(match ailment {
                Ailment::Poisoned => format!("{} is no longer poisoned!", target),
                Ailment::Shocked => format!("{} is no longer shocked!", target),
                Ailment::Buried => format!("{} was unburied!", target),
                Ailment::Asleep => format!("{} woke up!", target),
                Ailment::Aflame => format!("{} was extinguished!", target),
            }),
            BattleEvent::Healed { target, amount } => {
                Some(format!("{} healed by {}!", target, amount))
            }
            BattleEvent::StatBoosted {
                target,
                stat,
                delta,
            } => {
                let direction = if *delta > 0 { "rose" } else { "fell" };
                let amount = if delta.abs() > 1 { "a lot" } else { "a little" };
                Some(format!("{}'s {} {} {}!", target, stat, direction, amount))
            }
            BattleEvent::StatsReset { target } => {
                Some(format!("{}'s stats went back to normal.", target))
            }
            BattleEvent::Died { target } => Some(format!("{} died!", target)),
            BattleEvent::Defending { target } => Some(format!("{} is defending.", target)),
            BattleEvent::CaptureAttempted { target, band } => Some(match band {
                CaptureBand::Success => format!("{} was captured!", target),
                CaptureBand::BrokeFree => format!("So close! {} broke free!", target),
                CaptureBand::Failed => "The capture failed.".to_string(),
                CaptureBand::GotAway => format!("{} got away!", target),
            }),
            BattleEvent::CaptureNoRoom { target } => Some(format!(
                "There's no room in your party for {}! The capture failed.",
                target
            )),
            BattleEvent::JoinedParty { species } => {
                Some(format!("{} joined your party!", species.data().name))
            }

            BattleEvent::ExperienceGained { target, amount } => {
                Some(format!("{} gained {} experience!", target, amount))
            }
            BattleEvent::LevelUp { target, level } => {
                Some(format!("{} grew to level {}!", target, level))
            }
            BattleEvent::TechniqueLearned { target, technique } => {
                Some(format!("{} learned {}!", target, technique.data().name))
            }
            BattleEvent::MoneyGained { amount } => Some(format!("You got {} coins!", amount)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Events pushed at or after `start`.
    pub fn since(&self, start: usize) -> &[BattleEvent] {
        &self.events[start.min(self.events.len())..]
    }

    /// Formatted lines of every event, skipping silent ones.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl fmt::Display for EventBus {
    /// Shows the formatted text of every event, or its debug form when silent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            match event.format() {
                Some(line) => writeln!(f, "  {}", line)?,
                None => writeln!(f, "  {:?} (silent)", event)?,
            }
        }
        Ok(())
    }
}

/// Everything a battle mutates: the player's roster for the duration of the
/// battle, the enemy creatures, battlers and the round's turns.
#[derive(Debug, Clone)]
pub struct BattleState {
    pub player: Player,
    pub enemies: [Option<Spectra>; TEAM_SIZE],
    pub battlers: [Battler; BATTLE_SIZE],
    pub turns: [Turn; BATTLE_SIZE],
    pub encounter: EncounterKind,
    pub round: u32,
    pub config: BattleConfig,
}

impl BattleState {
    /// Binds the first party members to the ally slots and the given
    /// creatures to the enemy slots.
    pub fn new(
        player: Player,
        enemies: Vec<Spectra>,
        encounter: EncounterKind,
        config: BattleConfig,
    ) -> Self {
        let mut battlers = [Battler::empty(); BATTLE_SIZE];
        for (index, battler) in battlers.iter_mut().take(TEAM_SIZE).enumerate() {
            if index < player.party.len() {
                *battler = Battler::new(SpectraSlot::Party(index));
            }
        }

        let mut enemy_slots: [Option<Spectra>; TEAM_SIZE] = Default::default();
        for (index, spectra) in enemies.into_iter().take(TEAM_SIZE).enumerate() {
            enemy_slots[index] = Some(spectra);
            battlers[TEAM_SIZE + index] = Battler::new(SpectraSlot::Enemy(index));
        }

        let mut turns = [Turn::default(); BATTLE_SIZE];
        for (id, turn) in turns.iter_mut().enumerate() {
            turn.user = id;
        }

        Self {
            player,
            enemies: enemy_slots,
            battlers,
            turns,
            encounter,
            round: 0,
            config,
        }
    }

    pub fn spectra(&self, id: BattlerId) -> Option<&Spectra> {
        match self.battlers.get(id)?.slot? {
            SpectraSlot::Party(index) => self.player.party.get(index),
            SpectraSlot::Enemy(index) => self.enemies.get(index)?.as_ref(),
        }
    }

    pub fn spectra_mut(&mut self, id: BattlerId) -> Option<&mut Spectra> {
        match self.battlers.get(id)?.slot? {
            SpectraSlot::Party(index) => self.player.party.get_mut(index),
            SpectraSlot::Enemy(index) => self.enemies.get_mut(index)?.as_mut(),
        }
    }

    pub fn fighter(&self, id: BattlerId) -> Option<Fighter> {
        self.spectra(id).map(|spectra| Fighter {
            id,
            species: spectra.species,
        })
    }

    pub fn is_active(&self, id: BattlerId) -> bool {
        self.battlers.get(id).is_some_and(Battler::is_active)
    }

    pub fn is_alive(&self, id: BattlerId) -> bool {
        self.is_active(id) && self.spectra(id).is_some_and(|spectra| spectra.health > 0)
    }

    /// Base stat times the boost scale, truncated.
    pub fn boosted_stat(&self, id: BattlerId, stat: StatKind) -> u32 {
        let Some(spectra) = self.spectra(id) else {
            return 0;
        };
        let boost = self.battlers[id].boosts.get(stat);
        (spectra.base_stat(stat) as f64 * boost_scale(boost)) as u32
    }

    pub fn living_ids(&self, ally_side: bool) -> impl Iterator<Item = BattlerId> + '_ {
        side_ids(ally_side).filter(|id| self.is_alive(*id))
    }

    pub fn any_alive(&self, ally_side: bool) -> bool {
        self.living_ids(ally_side).next().is_some()
    }

    /// Battlers a user may aim at under `mask`, in index order. Empty and
    /// fainted battlers are never included.
    pub fn valid_targets(&self, user: BattlerId, mask: TargetMask) -> Vec<BattlerId> {
        (0..BATTLE_SIZE)
            .filter(|id| self.is_alive(*id))
            .filter(|id| {
                if *id == user {
                    mask.includes_user()
                } else if same_side(user, *id) {
                    mask.includes_allies()
                } else {
                    mask.includes_enemies()
                }
            })
            .collect()
    }

    /// Win when every enemy is down and an ally stands. Everything else
    /// with a side wiped out is a loss, including a mutual wipe-out.
    pub fn check_outcome(&self) -> Option<BattleOutcome> {
        if !self.any_alive(true) {
            Some(BattleOutcome::Lose)
        } else if !self.any_alive(false) {
            Some(BattleOutcome::Win)
        } else {
            None
        }
    }
}
