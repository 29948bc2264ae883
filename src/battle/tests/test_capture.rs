#[cfg(test)]
mod tests {
    use crate::battle::battler::BattlerFlags;
    use crate::battle::capture::{attempt_capture, finalize_captures};
    use crate::battle::execution::{begin_turn, finish_turn, resolve_turn};
    use crate::battle::rng::BattleRng;
    use crate::battle::state::{BattleEvent, BattleState, EventBus, Turn, TurnAction, TurnState};
    use crate::battle::tests::common::{TestBattleBuilder, TestSpectraBuilder};
    use crate::player::PARTY_SIZE;
    use pretty_assertions::assert_eq;
    use schema::{Species, Technique};

    /// A Replica (catch rate 40) at 10 of 50 health.
    fn weakened_replica() -> BattleState {
        TestBattleBuilder::new()
            .ally(TestSpectraBuilder::new(Species::Coalshark, 20).build())
            .enemy(
                TestSpectraBuilder::new(Species::Replica, 20)
                    .with_max_health(50)
                    .with_health(10)
                    .build(),
            )
            .build_state()
    }

    #[test]
    fn test_roll_under_threshold_captures() {
        let mut state = weakened_replica();
        let mut bus = EventBus::new();
        let mut rng = BattleRng::new_for_test(vec![70]);

        assert!(attempt_capture(&mut state, 0, 3, &mut bus, &mut rng));
        assert!(state.battlers[3].flags.contains(BattlerFlags::CAPTURED));
        assert_eq!(bus.lines(), vec!["Enemy Replica was captured!".to_string()]);
        // Still in battle until the turn finishes.
        assert!(state.is_active(3));

        finalize_captures(&mut state, &mut bus);
        assert!(!state.is_active(3));
        assert!(state.enemies[0].is_none());
        assert_eq!(state.player.party.len(), 2);
        assert_eq!(state.player.party[1].species, Species::Replica);
        assert_eq!(state.player.party[1].health, 10);
        assert_eq!(bus.lines().last().unwrap(), "Replica joined your party!");
    }

    #[test]
    fn test_roll_far_over_threshold_fails() {
        let mut state = weakened_replica();
        let mut bus = EventBus::new();
        let mut rng = BattleRng::new_for_test(vec![90]);

        assert!(!attempt_capture(&mut state, 0, 3, &mut bus, &mut rng));
        assert_eq!(bus.lines(), vec!["The capture failed.".to_string()]);
        assert!(state.battlers[3].flags.is_empty());

        finalize_captures(&mut state, &mut bus);
        assert!(state.is_active(3));
        assert_eq!(state.player.party.len(), 1);
    }

    #[test]
    fn test_near_miss_breaks_free_and_far_miss_gets_away() {
        let mut state = weakened_replica();
        let mut bus = EventBus::new();
        let mut rng = BattleRng::new_for_test(vec![80, 99]);

        assert!(!attempt_capture(&mut state, 0, 3, &mut bus, &mut rng));
        // 78.4 + 20 is still above 98, so 99 is the only roll that escapes.
        assert!(!attempt_capture(&mut state, 0, 3, &mut bus, &mut rng));
        assert_eq!(
            bus.lines(),
            vec![
                "So close! Enemy Replica broke free!".to_string(),
                "Enemy Replica got away!".to_string(),
            ]
        );
    }

    #[test]
    fn test_full_party_refuses_the_capture() {
        let mut builder = TestBattleBuilder::new();
        for _ in 0..PARTY_SIZE {
            builder = builder.ally(TestSpectraBuilder::new(Species::Puzzle, 10).build());
        }
        let mut state = builder
            .enemy(TestSpectraBuilder::new(Species::Replica, 10).with_health(1).build())
            .build_state();
        let mut bus = EventBus::new();
        let mut rng = BattleRng::new_for_test(vec![0]);

        assert!(!attempt_capture(&mut state, 0, 3, &mut bus, &mut rng));
        assert!(state.battlers[3].flags.is_empty());
        assert!(matches!(bus.events()[0], BattleEvent::CaptureNoRoom { .. }));
        assert_eq!(
            bus.lines(),
            vec!["There's no room in your party for Enemy Replica! The capture failed.".to_string()]
        );
    }

    #[test]
    fn test_only_the_player_side_captures_enemies() {
        let mut state = weakened_replica();
        let mut bus = EventBus::new();
        let mut rng = BattleRng::new_for_test(vec![]);

        assert!(!attempt_capture(&mut state, 3, 0, &mut bus, &mut rng));
        assert!(!attempt_capture(&mut state, 0, 0, &mut bus, &mut rng));
        assert!(bus.is_empty());
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_capture_technique_leaves_battle_after_the_turn() {
        let mut state = weakened_replica();
        let mut bus = EventBus::new();
        let mut rng = BattleRng::new_for_test(vec![10]);
        state.turns[0] = Turn::pending(0, TurnAction::Technique(Technique::Capture), Some(3));

        begin_turn(&mut state, 0, &mut bus, &mut rng);
        resolve_turn(&mut state, 0, &mut bus, &mut rng);
        assert!(state.is_active(3));
        finish_turn(&mut state, 0, &mut bus);

        assert_eq!(state.turns[0].state, TurnState::Done);
        assert!(!state.any_alive(false));
        assert_eq!(
            bus.lines(),
            vec![
                "Coalshark used Capture!".to_string(),
                "Enemy Replica was captured!".to_string(),
                "Replica joined your party!".to_string(),
            ]
        );
    }

    #[test]
    fn test_failed_capture_has_no_extra_line() {
        let mut state = weakened_replica();
        let mut bus = EventBus::new();
        let mut rng = BattleRng::new_for_test(vec![90]);
        state.turns[0] = Turn::pending(0, TurnAction::Technique(Technique::Capture), Some(3));

        begin_turn(&mut state, 0, &mut bus, &mut rng);
        resolve_turn(&mut state, 0, &mut bus, &mut rng);
        finish_turn(&mut state, 0, &mut bus);
        assert_eq!(
            bus.lines(),
            vec![
                "Coalshark used Capture!".to_string(),
                "The capture failed.".to_string(),
            ]
        );
    }

    #[test]
    fn test_enemy_capture_reports_no_effect() {
        let mut state = weakened_replica();
        let mut bus = EventBus::new();
        let mut rng = BattleRng::new_for_test(vec![]);
        state.turns[3] = Turn::pending(3, TurnAction::Technique(Technique::Capture), Some(0));

        begin_turn(&mut state, 3, &mut bus, &mut rng);
        resolve_turn(&mut state, 3, &mut bus, &mut rng);
        finish_turn(&mut state, 3, &mut bus);
        assert_eq!(
            bus.lines(),
            vec![
                "Enemy Replica used Capture!".to_string(),
                "But it had no effect...".to_string(),
            ]
        );
        assert_eq!(state.player.party.len(), 1);
        assert_eq!(rng.remaining(), 0);
    }
}
