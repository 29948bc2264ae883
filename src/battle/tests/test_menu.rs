#[cfg(test)]
mod tests {
    use crate::battle::menu::{target_entries, MenuEntry, MenuStage};
    use crate::battle::rng::BattleRng;
    use crate::battle::session::{BattleSession, PlayerControl};
    use crate::battle::state::{BattleEvent, BattleOutcome, BattlePhase, TurnAction, TurnState};
    use crate::battle::tests::common::{
        pick, predictable_rng, press, settle_to_menu, TestBattleBuilder, TestSpectraBuilder,
    };
    use crate::frontend::HeadlessFrontend;
    use crate::input::{GameMode, InputAction};
    use pretty_assertions::assert_eq;
    use schema::{Item, Species, Technique};

    fn labels(session: &BattleSession) -> Vec<String> {
        session.menu().entries().iter().map(MenuEntry::label).collect()
    }

    fn menu_items(session: &BattleSession) -> Vec<Item> {
        session
            .menu()
            .entries()
            .iter()
            .filter_map(|entry| match entry {
                MenuEntry::Item { item, .. } => Some(*item),
                _ => None,
            })
            .collect()
    }

    fn two_allies(rng: BattleRng) -> (HeadlessFrontend, BattleSession) {
        allies_with_power(rng, 18)
    }

    fn allies_with_power(rng: BattleRng, power: u32) -> (HeadlessFrontend, BattleSession) {
        let builder = TestBattleBuilder::new()
            .ally(
                TestSpectraBuilder::new(Species::Coalshark, 10)
                    .with_moveset(vec![Technique::Bite, Technique::Inferno])
                    .with_power(power)
                    .build(),
            )
            .ally(TestSpectraBuilder::new(Species::Puzzle, 10).build())
            .enemy(TestSpectraBuilder::new(Species::Sssnake, 10).build())
            .item(Item::Potion, 2)
            .item(Item::Serum, 1)
            .item(Item::FishingRod, 1);
        let mut session = builder.build_session(PlayerControl::Menu, rng);
        let mut frontend = HeadlessFrontend::new(&session.state().config);
        settle_to_menu(&mut frontend, &mut session);
        (frontend, session)
    }

    #[test]
    fn test_escape_is_offered_to_the_first_ally_only() {
        let (mut frontend, mut session) = two_allies(predictable_rng());
        assert_eq!(session.menu().user(), Some(0));
        assert_eq!(labels(&session), vec!["Attack", "Defend", "Technique", "Item", "Escape"]);

        pick(&mut frontend, &mut session, 0);
        assert!(matches!(session.menu().stage(), MenuStage::Target { .. }));
        assert_eq!(labels(&session), vec!["Sssnake"]);

        pick(&mut frontend, &mut session, 0);
        assert_eq!(
            session.state().turns[0].action,
            TurnAction::Technique(Technique::Attack)
        );
        assert_eq!(session.state().turns[0].state, TurnState::Pending);
        assert_eq!(session.state().turns[0].target, Some(3));
        assert_eq!(session.menu().user(), Some(1));
        assert_eq!(labels(&session).last().unwrap(), "Cancel");
    }

    #[test]
    fn test_cancel_returns_to_the_previous_ally() {
        let (mut frontend, mut session) = two_allies(predictable_rng());
        pick(&mut frontend, &mut session, 0);
        pick(&mut frontend, &mut session, 0);
        assert_eq!(session.menu().user(), Some(1));

        press(&mut frontend, &mut session, InputAction::Cancel);
        assert_eq!(session.menu().user(), Some(0));
        assert_eq!(session.menu().stage(), MenuStage::Root);
        assert_eq!(session.state().turns[0].state, TurnState::Inactive);
    }

    #[test]
    fn test_cancel_pops_one_level() {
        let (mut frontend, mut session) = two_allies(predictable_rng());
        pick(&mut frontend, &mut session, 2);
        assert_eq!(session.menu().stage(), MenuStage::Techniques);
        pick(&mut frontend, &mut session, 0);
        assert!(matches!(session.menu().stage(), MenuStage::Target { .. }));

        press(&mut frontend, &mut session, InputAction::Cancel);
        assert_eq!(session.menu().stage(), MenuStage::Techniques);
        press(&mut frontend, &mut session, InputAction::Cancel);
        assert_eq!(session.menu().stage(), MenuStage::Root);
        assert_eq!(session.menu().user(), Some(0));
    }

    #[test]
    fn test_unaffordable_technique_is_refused() {
        let (mut frontend, mut session) = allies_with_power(predictable_rng(), 5);

        pick(&mut frontend, &mut session, 2);
        pick(&mut frontend, &mut session, 1);
        assert_eq!(session.menu().stage(), MenuStage::Techniques);
        assert_eq!(
            session.events().lines().last().unwrap(),
            "Coalshark doesn't have enough power for Inferno!"
        );
        assert_eq!(session.state().turns[0].state, TurnState::Inactive);
    }

    #[test]
    fn test_item_slots_are_locked_per_round() {
        let (mut frontend, mut session) = two_allies(predictable_rng());
        pick(&mut frontend, &mut session, 3);
        // The fishing rod cannot be used in battle.
        assert_eq!(menu_items(&session), vec![Item::Potion, Item::Serum]);

        pick(&mut frontend, &mut session, 0);
        assert_eq!(labels(&session), vec!["Yourself", "Puzzle"]);
        pick(&mut frontend, &mut session, 0);
        assert_eq!(session.menu().item_locks()[0], Some(0));
        assert_eq!(session.state().turns[0].target, Some(0));

        pick(&mut frontend, &mut session, 3);
        assert_eq!(menu_items(&session), vec![Item::Serum]);

        press(&mut frontend, &mut session, InputAction::Cancel);
        press(&mut frontend, &mut session, InputAction::Cancel);
        assert_eq!(session.menu().user(), Some(0));
        assert_eq!(session.menu().item_locks(), &[None, None, None]);

        pick(&mut frontend, &mut session, 3);
        assert_eq!(menu_items(&session), vec![Item::Potion, Item::Serum]);
    }

    #[test]
    fn test_group_targets_collapse_to_one_entry() {
        let state = TestBattleBuilder::new()
            .ally(TestSpectraBuilder::new(Species::Coalshark, 10).build())
            .ally(TestSpectraBuilder::new(Species::Puzzle, 10).build())
            .enemy(TestSpectraBuilder::new(Species::Sssnake, 10).build())
            .enemy(TestSpectraBuilder::new(Species::Hocus, 10).build())
            .build_state();

        let group = |technique| {
            target_entries(0, TurnAction::Technique(technique), &state)
                .iter()
                .map(MenuEntry::label)
                .collect::<Vec<_>>()
        };
        assert_eq!(group(Technique::Inferno), vec!["Enemies"]);
        assert_eq!(group(Technique::Explosion), vec!["Everyone"]);
        assert_eq!(group(Technique::Bite), vec!["Sssnake", "Hocus"]);
        assert_eq!(group(Technique::Recover), vec!["Yourself", "Puzzle"]);
        assert_eq!(
            target_entries(0, TurnAction::Technique(Technique::Inferno), &state),
            vec![MenuEntry::Target {
                label: "Enemies".to_string(),
                id: None
            }]
        );
    }

    #[test]
    fn test_defend_needs_no_target() {
        let (mut frontend, mut session) = two_allies(predictable_rng());
        pick(&mut frontend, &mut session, 1);
        assert_eq!(session.state().turns[0].target, Some(0));
        assert_eq!(session.menu().user(), Some(1));
    }

    #[test]
    fn test_successful_escape_ends_the_battle() {
        let (mut frontend, mut session) = two_allies(BattleRng::new_for_test(vec![0]));
        press(&mut frontend, &mut session, InputAction::Cancel);
        assert_eq!(session.phase(), BattlePhase::Escaped);

        assert_eq!(
            frontend.run_to_end(&mut session, 100_000),
            Some(BattleOutcome::Escaped)
        );
        assert_eq!(frontend.modes.requested, vec![GameMode::Map]);
        assert!(frontend.shown.contains(&"You got away safely!".to_string()));
    }

    #[test]
    fn test_failed_escape_skips_to_the_enemy() {
        let mut script = vec![99];
        script.extend(vec![0; 50]);
        let (mut frontend, mut session) = two_allies(BattleRng::new_for_test(script));
        pick(&mut frontend, &mut session, 4);
        assert_eq!(session.phase(), BattlePhase::NoEscape);

        settle_to_menu(&mut frontend, &mut session);
        assert_eq!(session.state().round, 2);
        assert!(frontend.shown.contains(&"You couldn't get away!".to_string()));
        let ally_acted = session.events().events().iter().any(|event| {
            matches!(event, BattleEvent::TechniqueUsed { user, .. } if user.id < 3)
        });
        assert!(!ally_acted);
        assert!(frontend.shown.contains(&"Enemy Sssnake used Attack!".to_string()));
    }
}
