use schema::{Ailment, EncounterKind, Item, Species, StatKind, Technique};

use crate::battle::rng::BattleRng;
use crate::battle::session::{BattleSession, PlayerControl};
use crate::battle::state::{BattlePhase, BattleState, RoundPhase};
use crate::config::BattleConfig;
use crate::frontend::HeadlessFrontend;
use crate::input::{FrameInput, InputAction};
use crate::output::OutputSink;
use crate::player::Player;
use crate::spectra::Spectra;

/// A builder for creating test creatures with common defaults.
///
/// # Example
/// ```ignore
/// let spectra = TestSpectraBuilder::new(Species::Puzzle, 20)
///     .with_moveset(vec![Technique::Bite])
///     .with_ailment(Ailment::Poisoned)
///     .build();
/// ```
pub struct TestSpectraBuilder {
    species: Species,
    level: u8,
    moveset: Option<Vec<Technique>>,
    ailment: Option<Ailment>,
    max_health: Option<u32>,
    health: Option<u32>,
    power: Option<u32>,
    stats: Vec<(StatKind, u32)>,
}

impl TestSpectraBuilder {
    pub fn new(species: Species, level: u8) -> Self {
        Self {
            species,
            level,
            moveset: None,
            ailment: None,
            max_health: None,
            health: None,
            power: None,
            stats: Vec::new(),
        }
    }

    pub fn with_moveset(mut self, moveset: Vec<Technique>) -> Self {
        self.moveset = Some(moveset);
        self
    }

    pub fn with_ailment(mut self, ailment: Ailment) -> Self {
        self.ailment = Some(ailment);
        self
    }

    /// Overrides max health. Current health follows unless set separately.
    pub fn with_max_health(mut self, max_health: u32) -> Self {
        self.max_health = Some(max_health);
        self
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_power(mut self, power: u32) -> Self {
        self.power = Some(power);
        self
    }

    pub fn with_stat(mut self, stat: StatKind, value: u32) -> Self {
        self.stats.push((stat, value));
        self
    }

    pub fn build(self) -> Spectra {
        let mut spectra = match Spectra::new(self.species, self.level) {
            Ok(spectra) => spectra,
            Err(err) => panic!("Failed to create {:?} for a test: {}", self.species, err),
        };
        if let Some(moveset) = self.moveset {
            spectra.moveset = moveset;
        }
        if let Some(max_health) = self.max_health {
            spectra.max_health = max_health;
            spectra.health = max_health;
        }
        if let Some(health) = self.health {
            spectra.health = health.min(spectra.max_health);
        }
        if let Some(power) = self.power {
            spectra.power = power;
        }
        for (stat, value) in self.stats {
            match stat {
                StatKind::Attack => spectra.attack = value,
                StatKind::Defend => spectra.defend = value,
                StatKind::Evade => spectra.evade = value,
                StatKind::Luck => spectra.luck = value,
            }
        }
        spectra.ailment = self.ailment;
        spectra
    }
}

/// Assembles a battle from explicit allies, enemies and inventory.
#[derive(Default)]
pub struct TestBattleBuilder {
    allies: Vec<Spectra>,
    enemies: Vec<Spectra>,
    items: Vec<(Item, u16)>,
    kind: Option<EncounterKind>,
    config: Option<BattleConfig>,
}

impl TestBattleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ally(mut self, spectra: Spectra) -> Self {
        self.allies.push(spectra);
        self
    }

    pub fn enemy(mut self, spectra: Spectra) -> Self {
        self.enemies.push(spectra);
        self
    }

    pub fn item(mut self, item: Item, count: u16) -> Self {
        self.items.push((item, count));
        self
    }

    pub fn kind(mut self, kind: EncounterKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build_player(&self) -> Player {
        let mut player = Player::new("Tester");
        player.party = self.allies.clone();
        for (item, count) in &self.items {
            if let Err(err) = player.add_item(*item, *count) {
                panic!("Failed to add {:?} for a test: {}", item, err);
            }
        }
        player
    }

    pub fn build_state(self) -> BattleState {
        let player = self.build_player();
        BattleState::new(
            player,
            self.enemies,
            self.kind.unwrap_or(EncounterKind::Overworld),
            self.config.unwrap_or_default(),
        )
    }

    pub fn build_session(self, control: PlayerControl, rng: BattleRng) -> BattleSession {
        let player = self.build_player();
        match BattleSession::with_enemies(
            player,
            self.enemies,
            self.kind.unwrap_or(EncounterKind::Overworld),
            control,
            rng,
            self.config.unwrap_or_default(),
        ) {
            Ok(session) => session,
            Err(err) => panic!("Failed to start a test battle: {}", err),
        }
    }
}

/// Creates a `BattleRng` instance with a long list of default values (50).
/// Useful for tests where the specific RNG outcome is not important, preventing panics from exhaustion.
pub fn predictable_rng() -> BattleRng {
    BattleRng::new_for_test(vec![50; 100])
}

/// Runs frames until every line is read and the menu waits for input.
pub fn settle_to_menu(frontend: &mut HeadlessFrontend, session: &mut BattleSession) {
    let reached = frontend.run_until(session, 100_000, |session, output| {
        session.phase() == BattlePhase::Active(RoundPhase::PlayerInput) && output.is_done()
    });
    assert!(reached, "battle never reached player input, phase {:?}", session.phase());
}

/// Feeds one frame with a single press.
pub fn press(frontend: &mut HeadlessFrontend, session: &mut BattleSession, action: InputAction) {
    frontend.frame(session, &FrameInput::press(action));
}

/// Moves the cursor down `steps` times and confirms.
pub fn pick(
    frontend: &mut HeadlessFrontend,
    session: &mut BattleSession,
    steps: usize,
) {
    for _ in 0..steps {
        press(frontend, session, InputAction::Down);
    }
    press(frontend, session, InputAction::Confirm);
}
