//! The battle state machine.
//!
//! A [`BattleSession`] owns everything one battle touches and advances by
//! at most one transition per [`BattleSession::step`]. Every transition
//! waits for the output queue to drain first, so the player always reads
//! one action's text before the next action happens.

use schema::EncounterKind;
use tracing::{debug, info};

use crate::battle::ai::{Behavior, RandomAI};
use crate::battle::ailments::end_of_round;
use crate::battle::battler::BattlerId;
use crate::battle::encounter::Encounter;
use crate::battle::escape::attempt_escape;
use crate::battle::execution::{begin_turn, finish_turn, resolve_turn};
use crate::battle::menu::{MenuSignal, PlayerMenu};
use crate::battle::rewards::grant_rewards;
use crate::battle::rng::BattleRng;
use crate::battle::scheduler::pick_next_turn;
use crate::battle::state::{
    BattleEvent, BattleOutcome, BattlePhase, BattleState, EventBus, RoundPhase, TurnState,
};
use crate::config::BattleConfig;
use crate::errors::{Result, SpectraError};
use crate::input::{GameMode, InputSource, ModeSwitch};
use crate::output::OutputSink;
use crate::player::Player;
use crate::spectra::Spectra;

/// Who picks the turns of the player's side.
#[derive(Debug)]
pub enum PlayerControl {
    /// The interactive menu, driven by input.
    Menu,
    /// An automatic behavior; the input is ignored.
    Ai(Box<dyn Behavior>),
}

#[derive(Debug)]
pub struct BattleSession {
    state: BattleState,
    phase: BattlePhase,
    bus: EventBus,
    /// Events already handed to the output sink.
    flushed: usize,
    rng: BattleRng,
    control: PlayerControl,
    menu: PlayerMenu,
    enemy_ai: Box<dyn Behavior>,
    /// The turn being resolved during execution.
    current: Option<BattlerId>,
}

impl BattleSession {
    /// Rolls the enemies for `encounter` and opens the battle.
    pub fn begin_encounter(
        player: Player,
        encounter: &Encounter,
        control: PlayerControl,
        mut rng: BattleRng,
        config: BattleConfig,
    ) -> Result<Self> {
        let enemies = encounter.build_enemies(&mut rng)?;
        Self::with_enemies(player, enemies, encounter.kind(), control, rng, config)
    }

    /// Opens a battle against the given creatures.
    pub fn with_enemies(
        player: Player,
        enemies: Vec<Spectra>,
        kind: EncounterKind,
        control: PlayerControl,
        rng: BattleRng,
        config: BattleConfig,
    ) -> Result<Self> {
        let Some(lead) = enemies.first().map(|spectra| spectra.species) else {
            return Err(SpectraError::Setup("an encounter needs at least one enemy".into()));
        };
        let count = enemies.len();
        let state = BattleState::new(player, enemies, kind, config);
        if !state.any_alive(true) {
            return Err(SpectraError::Setup(
                "no conscious creature in the first party slots".into(),
            ));
        }
        if !state.any_alive(false) {
            return Err(SpectraError::Setup("every enemy is already defeated".into()));
        }

        let mut bus = EventBus::new();
        bus.push(BattleEvent::EncounterStarted { kind, lead, count });
        info!(?kind, ?lead, count, "battle started");

        Ok(Self {
            state,
            phase: BattlePhase::Intro,
            bus,
            flushed: 0,
            rng,
            control,
            menu: PlayerMenu::new(),
            enemy_ai: Box::new(RandomAI::new()),
            current: None,
        })
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    pub fn menu(&self) -> &PlayerMenu {
        &self.menu
    }

    pub fn rng(&self) -> &BattleRng {
        &self.rng
    }

    /// True once the closing text was read and the map was requested.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, BattlePhase::Finished(_))
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Win => Some(BattleOutcome::Win),
            BattlePhase::Lose => Some(BattleOutcome::Lose),
            BattlePhase::Escaped => Some(BattleOutcome::Escaped),
            BattlePhase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Hands the roster back, with captures, experience and money applied.
    pub fn into_player(self) -> Player {
        self.state.player
    }

    /// Advances the battle by at most one transition.
    pub fn step(
        &mut self,
        output: &mut dyn OutputSink,
        input: &dyn InputSource,
        modes: &mut dyn ModeSwitch,
    ) {
        self.flush(output);
        if !output.is_done() {
            return;
        }

        match self.phase {
            BattlePhase::Intro => self.start_round(),
            BattlePhase::Active(RoundPhase::PlayerInput) => self.player_input(input),
            BattlePhase::Active(RoundPhase::EnemyInput) => self.enemy_input(),
            BattlePhase::Active(RoundPhase::Execution) => self.execute_step(),
            BattlePhase::Active(RoundPhase::EndOfRound) => {
                match end_of_round(&mut self.state, &mut self.bus, &mut self.rng) {
                    Some(outcome) => self.end_battle(outcome),
                    None => self.start_round(),
                }
            }
            BattlePhase::NoEscape => self.set_phase(BattlePhase::Active(RoundPhase::EnemyInput)),
            BattlePhase::Win | BattlePhase::Lose | BattlePhase::Escaped => {
                if let Some(outcome) = self.outcome() {
                    modes.switch_mode(GameMode::Map);
                    info!(?outcome, round = self.state.round, "battle finished");
                    self.set_phase(BattlePhase::Finished(outcome));
                }
            }
            BattlePhase::Finished(_) => {}
        }

        self.flush(output);
    }

    fn flush(&mut self, output: &mut dyn OutputSink) {
        for line in self.bus.since(self.flushed).iter().filter_map(BattleEvent::format) {
            output.enqueue(&line);
        }
        self.flushed = self.bus.len();
    }

    fn set_phase(&mut self, phase: BattlePhase) {
        debug!(from = ?self.phase, to = ?phase, "battle phase");
        self.phase = phase;
    }

    fn start_round(&mut self) {
        self.state.round += 1;
        self.bus.push(BattleEvent::RoundStarted {
            round: self.state.round,
        });
        for turn in self.state.turns.iter_mut() {
            turn.state = TurnState::Inactive;
            turn.target = None;
        }
        self.current = None;
        if matches!(self.control, PlayerControl::Menu) {
            self.menu.begin_round(&self.state);
        }
        self.set_phase(BattlePhase::Active(RoundPhase::PlayerInput));
    }

    fn player_input(&mut self, input: &dyn InputSource) {
        let signal = match &self.control {
            PlayerControl::Menu => self.menu.update(&mut self.state, &mut self.bus, input),
            PlayerControl::Ai(behavior) => {
                let allies: Vec<_> = self.state.living_ids(true).collect();
                for id in allies {
                    let turn = behavior.decide_turn(id, &self.state, &mut self.rng);
                    self.state.turns[id] = turn;
                }
                MenuSignal::Done
            }
        };
        match signal {
            MenuSignal::Waiting => {}
            MenuSignal::Done => self.set_phase(BattlePhase::Active(RoundPhase::EnemyInput)),
            MenuSignal::Escape => self.try_escape(),
        }
    }

    fn try_escape(&mut self) {
        if attempt_escape(&self.state, &mut self.rng) {
            self.bus.push(BattleEvent::EscapeSucceeded);
            self.set_phase(BattlePhase::Escaped);
            return;
        }
        self.bus.push(BattleEvent::EscapeFailed);
        let allies: Vec<_> = self.state.living_ids(true).collect();
        for id in allies {
            self.state.turns[id].state = TurnState::Inactive;
        }
        self.set_phase(BattlePhase::NoEscape);
    }

    fn enemy_input(&mut self) {
        let enemies: Vec<_> = self.state.living_ids(false).collect();
        for id in enemies {
            let turn = self.enemy_ai.decide_turn(id, &self.state, &mut self.rng);
            self.state.turns[id] = turn;
        }
        self.set_phase(BattlePhase::Active(RoundPhase::Execution));
    }

    fn execute_step(&mut self) {
        if let Some(id) = self.current {
            match self.state.turns[id].state {
                TurnState::Active => resolve_turn(&mut self.state, id, &mut self.bus, &mut self.rng),
                TurnState::Result => {
                    finish_turn(&mut self.state, id, &mut self.bus);
                    self.current = None;
                    if let Some(outcome) = self.state.check_outcome() {
                        self.end_battle(outcome);
                    }
                }
                _ => self.current = None,
            }
            return;
        }

        match pick_next_turn(&mut self.state) {
            Some(id) => {
                begin_turn(&mut self.state, id, &mut self.bus, &mut self.rng);
                self.current = Some(id);
            }
            None => self.set_phase(BattlePhase::Active(RoundPhase::EndOfRound)),
        }
    }

    fn end_battle(&mut self, outcome: BattleOutcome) {
        match outcome {
            BattleOutcome::Win => {
                self.bus.push(BattleEvent::Victory);
                grant_rewards(&mut self.state, &mut self.bus);
                self.set_phase(BattlePhase::Win);
            }
            BattleOutcome::Lose => {
                self.bus.push(BattleEvent::Defeat);
                self.set_phase(BattlePhase::Lose);
            }
            BattleOutcome::Escaped => {
                unreachable!("escape ends the battle in try_escape, not through check_outcome")
            }
        }
    }
}
