#[cfg(test)]
mod tests {
    use crate::battle::ai::RandomAI;
    use crate::battle::encounter::Encounter;
    use crate::battle::rng::BattleRng;
    use crate::battle::session::{BattleSession, PlayerControl};
    use crate::battle::state::{BattleOutcome, BattlePhase, RoundPhase};
    use crate::battle::tests::common::{
        pick, predictable_rng, settle_to_menu, TestBattleBuilder, TestSpectraBuilder,
    };
    use crate::config::BattleConfig;
    use crate::errors::SpectraError;
    use crate::frontend::HeadlessFrontend;
    use crate::input::{FrameInput, GameMode};
    use crate::output::OutputSink;
    use crate::player::Player;
    use pretty_assertions::assert_eq;
    use schema::{EncounterKind, Species, StatKind, Technique};

    fn frontend() -> HeadlessFrontend {
        HeadlessFrontend::new(&BattleConfig::default())
    }

    fn shown(frontend: &HeadlessFrontend, line: &str) -> bool {
        frontend.shown.iter().any(|shown| shown == line)
    }

    #[test]
    fn test_intro_flows_into_player_input() {
        let mut session = TestBattleBuilder::new()
            .ally(TestSpectraBuilder::new(Species::Coalshark, 10).build())
            .enemy(TestSpectraBuilder::new(Species::Puzzle, 5).build())
            .build_session(PlayerControl::Menu, predictable_rng());
        assert_eq!(session.phase(), BattlePhase::Intro);
        assert_eq!(session.events().lines(), vec!["A Puzzle draws near!"]);

        let mut frontend = frontend();
        settle_to_menu(&mut frontend, &mut session);
        assert_eq!(frontend.shown, vec!["A Puzzle draws near!"]);
        assert_eq!(session.state().round, 1);
        assert_eq!(session.menu().user(), Some(0));
    }

    #[test]
    fn test_nothing_advances_while_text_is_shown() {
        let mut session = TestBattleBuilder::new()
            .ally(TestSpectraBuilder::new(Species::Coalshark, 10).build())
            .enemy(TestSpectraBuilder::new(Species::Puzzle, 5).build())
            .build_session(PlayerControl::Menu, predictable_rng());
        let mut frontend = frontend();

        let idle = FrameInput::none();

        // The first frame queues the intro line and then waits on it.
        frontend.frame(&mut session, &idle);
        assert_eq!(session.phase(), BattlePhase::Intro);
        assert!(!frontend.output.is_done());

        assert!(frontend.run_until(&mut session, 10_000, |_, output| output.is_done()));
        assert_eq!(session.phase(), BattlePhase::Intro);
        frontend.frame(&mut session, &idle);
        assert_eq!(
            session.phase(),
            BattlePhase::Active(RoundPhase::PlayerInput)
        );
    }

    #[test]
    fn test_ai_battle_runs_to_completion() {
        let mut session = TestBattleBuilder::new()
            .ally(TestSpectraBuilder::new(Species::Coalshark, 12).build())
            .ally(TestSpectraBuilder::new(Species::Puzzle, 10).build())
            .enemy(TestSpectraBuilder::new(Species::Sssnake, 10).build())
            .enemy(TestSpectraBuilder::new(Species::Jayraptor, 8).build())
            .build_session(
                PlayerControl::Ai(Box::new(RandomAI::new())),
                BattleRng::new_seeded(7),
            );
        let mut frontend = frontend();

        let outcome = frontend.run_to_end(&mut session, 2_000_000);
        assert!(outcome.is_some(), "battle did not finish");
        assert!(session.is_finished());
        assert_eq!(frontend.modes.requested, vec![GameMode::Map]);
        assert!(session.state().round >= 1);
    }

    #[test]
    fn test_mutual_wipe_out_is_a_loss() {
        let mut session = TestBattleBuilder::new()
            .ally(
                TestSpectraBuilder::new(Species::Coalshark, 20)
                    .with_moveset(vec![Technique::Explosion])
                    .build(),
            )
            .enemy(TestSpectraBuilder::new(Species::Puzzle, 1).build())
            .build_session(PlayerControl::Menu, predictable_rng());
        let mut frontend = frontend();
        settle_to_menu(&mut frontend, &mut session);

        pick(&mut frontend, &mut session, 2);
        pick(&mut frontend, &mut session, 0);
        pick(&mut frontend, &mut session, 0);

        assert_eq!(
            frontend.run_to_end(&mut session, 100_000),
            Some(BattleOutcome::Lose)
        );
        assert!(shown(&frontend, "Enemy Puzzle passed out!"));
        assert!(shown(&frontend, "Coalshark died!"));
        assert!(shown(&frontend, "Your team was defeated..."));
        assert!(!shown(&frontend, "You won the battle!"));
    }

    #[test]
    fn test_victory_grants_rewards() {
        let mut session = TestBattleBuilder::new()
            .ally(TestSpectraBuilder::new(Species::Coalshark, 20).build())
            .enemy(
                TestSpectraBuilder::new(Species::Puzzle, 1)
                    .with_health(1)
                    .build(),
            )
            .build_session(PlayerControl::Menu, predictable_rng());
        let mut frontend = frontend();
        settle_to_menu(&mut frontend, &mut session);

        pick(&mut frontend, &mut session, 0);
        pick(&mut frontend, &mut session, 0);

        assert_eq!(
            frontend.run_to_end(&mut session, 100_000),
            Some(BattleOutcome::Win)
        );
        assert!(shown(&frontend, "You won the battle!"));
        // Puzzle yields 30 experience per level, split by the divisor of 10.
        assert!(shown(&frontend, "Coalshark gained 3 experience!"));
        assert!(shown(&frontend, "You got 6 coins!"));
        assert_eq!(session.into_player().money, 6);
    }

    #[test]
    fn test_capturing_the_last_enemy_wins_without_rewards() {
        let mut session = TestBattleBuilder::new()
            .ally(
                TestSpectraBuilder::new(Species::Coalshark, 20)
                    .with_moveset(vec![Technique::Capture])
                    .with_stat(StatKind::Evade, 100)
                    .build(),
            )
            .enemy(
                TestSpectraBuilder::new(Species::Replica, 20)
                    .with_max_health(50)
                    .with_health(10)
                    .build(),
            )
            .build_session(PlayerControl::Menu, BattleRng::new_for_test(vec![0; 20]));
        let mut frontend = frontend();
        settle_to_menu(&mut frontend, &mut session);

        pick(&mut frontend, &mut session, 2);
        pick(&mut frontend, &mut session, 0);
        pick(&mut frontend, &mut session, 0);

        assert_eq!(
            frontend.run_to_end(&mut session, 100_000),
            Some(BattleOutcome::Win)
        );
        assert!(shown(&frontend, "Enemy Replica was captured!"));
        assert!(shown(&frontend, "Replica joined your party!"));
        assert!(!frontend.shown.iter().any(|line| line.contains("experience")));

        let player = session.into_player();
        assert_eq!(player.party.len(), 2);
        assert_eq!(player.party[1].species, Species::Replica);
        assert_eq!(player.money, 0);
    }

    #[test]
    fn test_fainted_party_cannot_start_a_battle() {
        let mut player = Player::new("Tester");
        player.party = vec![TestSpectraBuilder::new(Species::Puzzle, 5)
            .with_health(0)
            .build()];
        let encounter = Encounter::Boss("lake_guardian".to_string());
        let result = BattleSession::begin_encounter(
            player,
            &encounter,
            PlayerControl::Menu,
            predictable_rng(),
            BattleConfig::default(),
        );
        assert!(matches!(result, Err(SpectraError::Setup(_))));
    }

    #[test]
    fn test_empty_enemy_list_is_rejected() {
        let player = TestBattleBuilder::new()
            .ally(TestSpectraBuilder::new(Species::Puzzle, 5).build())
            .build_player();
        let result = BattleSession::with_enemies(
            player,
            Vec::new(),
            EncounterKind::Overworld,
            PlayerControl::Menu,
            predictable_rng(),
            BattleConfig::default(),
        );
        assert!(matches!(result, Err(SpectraError::Setup(_))));
    }
}
