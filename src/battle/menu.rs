//! The player's action picker: one pass through a small menu tree per
//! living ally, each pass ending in a pending turn.
//!
//! ```text
//! Root ─┬─ Attack / Defend ───────────────┐
//!       ├─ Technique ── technique list ───┼── Target ── (next ally)
//!       ├─ Item ─────── item list ────────┘
//!       └─ Escape (first ally) / Cancel (back to previous ally)
//! ```

use schema::{Item, Technique};
use tracing::debug;

use crate::battle::battler::{same_side, BattlerId, TEAM_SIZE};
use crate::battle::state::{BattleEvent, BattleState, EventBus, Turn, TurnAction, TurnState};
use crate::data::StaticData;
use crate::input::InputSource;
use crate::menu::{ControlState, MenuControl};

/// One selectable line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Attack,
    Defend,
    Techniques,
    Items,
    Escape,
    /// Back to the previous ally.
    Back,
    Technique(Technique),
    Item { slot: usize, item: Item, count: u16 },
    /// `id` is `None` for the single entry of a group action.
    Target { label: String, id: Option<BattlerId> },
}

impl MenuEntry {
    pub fn label(&self) -> String {
        match self {
            MenuEntry::Attack => "Attack".to_string(),
            MenuEntry::Defend => "Defend".to_string(),
            MenuEntry::Techniques => "Technique".to_string(),
            MenuEntry::Items => "Item".to_string(),
            MenuEntry::Escape => "Escape".to_string(),
            MenuEntry::Back => "Cancel".to_string(),
            MenuEntry::Technique(technique) => {
                let data = technique.data();
                format!("{:<16}{:>3}", data.name, data.cost)
            }
            MenuEntry::Item { item, count, .. } => format!("{:<16}x{}", item.data().name, count),
            MenuEntry::Target { label, .. } => label.clone(),
        }
    }
}

/// Where the target list goes back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOrigin {
    Root,
    Techniques,
    Items,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStage {
    Root,
    Techniques,
    Items,
    Target { action: TurnAction, origin: MenuOrigin },
}

impl From<MenuOrigin> for MenuStage {
    fn from(origin: MenuOrigin) -> Self {
        match origin {
            MenuOrigin::Root => MenuStage::Root,
            MenuOrigin::Techniques => MenuStage::Techniques,
            MenuOrigin::Items => MenuStage::Items,
        }
    }
}

/// What the session should do after a menu update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSignal {
    Waiting,
    /// The first ally backed out of its root menu.
    Escape,
    /// Every living ally has a pending turn.
    Done,
}

#[derive(Debug, Clone)]
pub struct PlayerMenu {
    user: Option<BattlerId>,
    stage: MenuStage,
    entries: Vec<MenuEntry>,
    control: MenuControl,
    /// Inventory slot held by each ally's pending turn this round.
    item_locks: [Option<usize>; TEAM_SIZE],
}

impl Default for PlayerMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerMenu {
    pub fn new() -> Self {
        Self {
            user: None,
            stage: MenuStage::Root,
            entries: Vec::new(),
            control: MenuControl::default(),
            item_locks: [None; TEAM_SIZE],
        }
    }

    /// The ally currently choosing, if any.
    pub fn user(&self) -> Option<BattlerId> {
        self.user
    }

    pub fn stage(&self) -> MenuStage {
        self.stage
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.control.index
    }

    pub fn item_locks(&self) -> &[Option<usize>; TEAM_SIZE] {
        &self.item_locks
    }

    /// Clears item locks and opens the root menu for the first living ally.
    /// Returns false when there is nobody to choose for.
    pub fn begin_round(&mut self, state: &BattleState) -> bool {
        self.item_locks = [None; TEAM_SIZE];
        self.user = state.living_ids(true).next();
        if self.user.is_none() {
            return false;
        }
        self.open(MenuStage::Root, state);
        true
    }

    /// Applies one frame of input.
    pub fn update(
        &mut self,
        state: &mut BattleState,
        bus: &mut EventBus,
        input: &dyn InputSource,
    ) -> MenuSignal {
        let Some(user) = self.user else {
            return MenuSignal::Done;
        };
        self.control.update(input);
        match self.control.state {
            ControlState::Idle => MenuSignal::Waiting,
            ControlState::Cancel => self.cancel(user, state),
            ControlState::Confirm => match self.entries.get(self.control.index).cloned() {
                Some(entry) => self.confirm(user, entry, state, bus),
                None => {
                    self.control.resume();
                    MenuSignal::Waiting
                }
            },
        }
    }

    fn open(&mut self, stage: MenuStage, state: &BattleState) {
        self.stage = stage;
        self.entries = match self.user {
            Some(user) => self.build_entries(user, state),
            None => Vec::new(),
        };
        self.control = MenuControl::new(self.entries.len());
        debug!(user = ?self.user, ?stage, entries = self.entries.len(), "menu opened");
    }

    fn build_entries(&self, user: BattlerId, state: &BattleState) -> Vec<MenuEntry> {
        match self.stage {
            MenuStage::Root => {
                let first = state.living_ids(true).next() == Some(user);
                vec![
                    MenuEntry::Attack,
                    MenuEntry::Defend,
                    MenuEntry::Techniques,
                    MenuEntry::Items,
                    if first { MenuEntry::Escape } else { MenuEntry::Back },
                ]
            }
            MenuStage::Techniques => state
                .spectra(user)
                .map(|spectra| spectra.moveset.iter().copied().map(MenuEntry::Technique).collect())
                .unwrap_or_default(),
            MenuStage::Items => state
                .player
                .inventory
                .iter()
                .enumerate()
                .filter(|(_, stack)| stack.item.data().usable_in_battle())
                .filter(|(slot, _)| {
                    self.item_locks
                        .iter()
                        .enumerate()
                        .all(|(holder, lock)| holder == user || *lock != Some(*slot))
                })
                .map(|(slot, stack)| MenuEntry::Item {
                    slot,
                    item: stack.item,
                    count: stack.count,
                })
                .collect(),
            MenuStage::Target { action, .. } => target_entries(user, action, state),
        }
    }

    fn confirm(
        &mut self,
        user: BattlerId,
        entry: MenuEntry,
        state: &mut BattleState,
        bus: &mut EventBus,
    ) -> MenuSignal {
        match entry {
            MenuEntry::Attack => {
                self.choose(user, TurnAction::Technique(Technique::Attack), MenuOrigin::Root, state)
            }
            MenuEntry::Defend => {
                self.choose(user, TurnAction::Technique(Technique::Defend), MenuOrigin::Root, state)
            }
            MenuEntry::Techniques => {
                self.open(MenuStage::Techniques, state);
                MenuSignal::Waiting
            }
            MenuEntry::Items => {
                self.open(MenuStage::Items, state);
                MenuSignal::Waiting
            }
            MenuEntry::Escape => {
                self.control.resume();
                MenuSignal::Escape
            }
            MenuEntry::Back => self.back_out(user, state),
            MenuEntry::Technique(technique) => {
                let affordable = state
                    .spectra(user)
                    .is_some_and(|spectra| spectra.power >= technique.data().cost);
                if !affordable {
                    if let Some(fighter) = state.fighter(user) {
                        bus.push(BattleEvent::NotEnoughPower {
                            user: fighter,
                            technique,
                        });
                    }
                    self.control.resume();
                    return MenuSignal::Waiting;
                }
                self.choose(
                    user,
                    TurnAction::Technique(technique),
                    MenuOrigin::Techniques,
                    state,
                )
            }
            MenuEntry::Item { slot, item, .. } => {
                self.choose(user, TurnAction::Item { slot, item }, MenuOrigin::Items, state)
            }
            MenuEntry::Target { id, .. } => match self.stage {
                MenuStage::Target { action, .. } => self.finalize(user, action, id, state),
                _ => {
                    self.control.resume();
                    MenuSignal::Waiting
                }
            },
        }
    }

    fn cancel(&mut self, user: BattlerId, state: &mut BattleState) -> MenuSignal {
        match self.stage {
            MenuStage::Root => self.back_out(user, state),
            MenuStage::Techniques | MenuStage::Items => {
                self.open(MenuStage::Root, state);
                MenuSignal::Waiting
            }
            MenuStage::Target { origin, .. } => {
                self.open(origin.into(), state);
                MenuSignal::Waiting
            }
        }
    }

    /// Returns to the previous living ally and drops its pending turn, or
    /// asks for an escape when `user` is the first one.
    fn back_out(&mut self, user: BattlerId, state: &mut BattleState) -> MenuSignal {
        let previous = state.living_ids(true).filter(|id| *id < user).last();
        let Some(previous) = previous else {
            self.control.resume();
            return MenuSignal::Escape;
        };
        state.turns[previous].state = TurnState::Inactive;
        self.item_locks[previous] = None;
        self.user = Some(previous);
        self.open(MenuStage::Root, state);
        MenuSignal::Waiting
    }

    /// Actions aimed only at the user need no target list.
    fn choose(
        &mut self,
        user: BattlerId,
        action: TurnAction,
        origin: MenuOrigin,
        state: &mut BattleState,
    ) -> MenuSignal {
        let mask = action.target_mask();
        if mask.includes_user() && !mask.includes_allies() && !mask.includes_enemies() {
            return self.finalize(user, action, Some(user), state);
        }
        self.open(MenuStage::Target { action, origin }, state);
        MenuSignal::Waiting
    }

    fn finalize(
        &mut self,
        user: BattlerId,
        action: TurnAction,
        target: Option<BattlerId>,
        state: &mut BattleState,
    ) -> MenuSignal {
        state.turns[user] = Turn::pending(user, action, target);
        if let TurnAction::Item { slot, .. } = action {
            self.item_locks[user] = Some(slot);
        }
        debug!(user, ?action, ?target, "turn chosen");

        let next = state.living_ids(true).find(|id| *id > user);
        self.user = next;
        match next {
            Some(_) => {
                self.open(MenuStage::Root, state);
                MenuSignal::Waiting
            }
            None => {
                self.entries.clear();
                self.control = MenuControl::default();
                MenuSignal::Done
            }
        }
    }
}

/// Target list for an action. Group masks get one entry covering everyone
/// they hit.
pub fn target_entries(user: BattlerId, action: TurnAction, state: &BattleState) -> Vec<MenuEntry> {
    let mask = action.target_mask();
    if mask.is_group() {
        let label = match (mask.includes_allies(), mask.includes_enemies()) {
            (true, true) => "Everyone",
            (_, true) => "Enemies",
            _ => "Allies",
        };
        return vec![MenuEntry::Target {
            label: label.to_string(),
            id: None,
        }];
    }
    state
        .valid_targets(user, mask)
        .into_iter()
        .filter_map(|id| {
            let fighter = state.fighter(id)?;
            let label = if id == user {
                "Yourself".to_string()
            } else if !same_side(user, id) && !mask.includes_allies() {
                fighter.species.data().name.clone()
            } else {
                fighter.to_string()
            };
            Some(MenuEntry::Target { label, id: Some(id) })
        })
        .collect()
}
