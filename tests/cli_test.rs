#[cfg(feature = "std")]
#[cfg(test)]
mod cli_tests {
    use std::cell::RefCell;
    use std::io::{self, Cursor, Write};
    use std::rc::Rc;

    use pirate_fleet::{
        config::messages, Cells, CliPlayer, ComputerPlayer, FleetQuota, GameEngine, Grid,
        GridLocation, PenaltyCounts, Player, Rules, Session, Ship, Side,
    };
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// Output sink the test keeps a handle to after the player is boxed.
    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Count `symbol` inside the grid rows of rendered output.
    fn board_symbols(text: &str, symbol: char) -> usize {
        text.lines()
            .filter(|l| l.contains('║'))
            .map(|l| l.matches(symbol).count())
            .sum()
    }

    #[test]
    fn test_select_target_skips_bad_input() {
        let mut rng = SmallRng::seed_from_u64(1);
        let input = Cursor::new("help\nZ9\n\nA1\nb2\n");
        let mut player = CliPlayer::new(input, Vec::new());
        let mut performed = Cells::new();
        performed.set(GridLocation::new(0, 0)).unwrap();

        let target = player.select_target(&mut rng, &performed);
        assert_eq!(target, Some(GridLocation::new(1, 1)));

        let out = String::from_utf8(player.into_output()).unwrap();
        assert!(out.contains("Invalid target 'Z9'"));
        assert!(out.contains("You already fired at A1"));
    }

    #[test]
    fn test_end_of_input_forfeits() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut player = CliPlayer::new(Cursor::new("quit\n"), Vec::new());
        assert_eq!(player.select_target(&mut rng, &Cells::new()), None);
        let mut player = CliPlayer::new(Cursor::new(""), Vec::new());
        assert_eq!(player.select_target(&mut rng, &Cells::new()), None);
    }

    #[test]
    fn test_standard_deployment() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let mut player = CliPlayer::new(Cursor::new(""), Vec::new());
        let mut grid = Grid::default();
        player
            .deploy(&mut rng, &mut grid, PenaltyCounts::from_rules(&Rules::default()))
            .unwrap();
        assert!(grid.has_required_ships());
        assert!(grid.has_required_mines());
        assert!(grid.has_required_sea_monsters());
        let out = String::from_utf8(player.into_output()).unwrap();
        assert!(out.contains("Your fleet is deployed"));
        assert_eq!(board_symbols(&out, 'S'), 17);
        assert_eq!(board_symbols(&out, 'm'), 2);
        assert_eq!(board_symbols(&out, 'w'), 2);
    }

    #[test]
    fn test_reproducible_random_deployment() {
        let deploy = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut player = CliPlayer::new(Cursor::new(""), Vec::new()).with_random_fleet();
            let mut grid = Grid::default();
            player
                .deploy(&mut rng, &mut grid, PenaltyCounts::default())
                .unwrap();
            grid.occupied()
        };
        assert_eq!(deploy(42), deploy(42));
        assert_eq!(deploy(42).count_ones(), 17);
    }

    #[test]
    fn test_scripted_game_against_computer() {
        let mut rng = SmallRng::seed_from_u64(2024);
        let script: String = GridLocation::all().map(|l| format!("{}\n", l)).collect();
        let out = SharedBuf::default();
        let human = CliPlayer::new(Cursor::new(script), out.clone());
        let mut session = Session::new(
            Rules::default(),
            Box::new(human),
            Box::new(ComputerPlayer::new()),
        );
        let summary = session.run(&mut rng).unwrap();
        assert!(summary.winner.is_some());

        let text = out.text();
        assert!(text.contains("Opponent grid:"));
        assert!(text.contains(messages::GAME_OVER_TITLE));
        match summary.winner {
            Some(Side::Human) => assert!(text.contains(messages::GAME_OVER_WIN)),
            _ => assert!(text.contains(messages::GAME_OVER_LOSE)),
        }
        assert!(text.contains(&format!("Final score: {}", summary.human.score)));
    }

    #[test]
    fn test_final_score_after_defeat() {
        let rules = Rules {
            fleet: FleetQuota {
                small: 1,
                medium: 0,
                large: 0,
                x_large: 0,
            },
            mines: 0,
            sea_monsters: 0,
            ..Rules::default()
        };
        let mut engine = GameEngine::new(rules);
        for side in [Side::Human, Side::Computer] {
            engine
                .grid_mut(side)
                .unwrap()
                .add_ship(Ship::horizontal(2, 0, 0))
                .unwrap();
        }
        engine.start().unwrap();
        engine.attack(Side::Human, GridLocation::new(7, 7)).unwrap();
        engine.attack(Side::Computer, GridLocation::new(0, 0)).unwrap();
        engine.attack(Side::Human, GridLocation::new(7, 6)).unwrap();
        let report = engine.attack(Side::Computer, GridLocation::new(1, 0)).unwrap();
        assert_eq!(report.winner, Some(Side::Computer));

        let mut player = CliPlayer::new(Cursor::new(""), Vec::new());
        player.handle_report(&report);
        player.game_over(&engine, Side::Human);
        let out = String::from_utf8(player.into_output()).unwrap();
        assert!(out.contains(messages::GAME_OVER_LOSE));
        assert!(!out.contains(messages::GAME_OVER_WIN));
        let score = engine.score(Side::Human);
        assert!(out.contains(&format!("Final score: {}", score)));
    }

    #[test]
    fn test_play_again_prompt() {
        let mut player = CliPlayer::new(Cursor::new("maybe\nY\nno\n"), Vec::new());
        assert!(player.play_again());
        assert!(!player.play_again());
        // End of input declines.
        assert!(!player.play_again());
        let out = String::from_utf8(player.into_output()).unwrap();
        assert_eq!(out.matches("Play again?").count(), 4);
    }

    #[test]
    fn test_view_hides_enemy_items() {
        let mut engine = GameEngine::default();
        let mut rng = SmallRng::seed_from_u64(3);
        ComputerPlayer::new()
            .deploy(
                &mut rng,
                engine.grid_mut(Side::Computer).unwrap(),
                PenaltyCounts::default(),
            )
            .unwrap();
        let fog = pirate_fleet::ui::render_grid(engine.grid(Side::Computer), false);
        assert_eq!(board_symbols(&fog, 'S'), 0);
        assert_eq!(board_symbols(&fog, '.'), 64);
        let own = pirate_fleet::ui::render_grid(engine.grid(Side::Computer), true);
        assert_eq!(board_symbols(&own, 'S'), 17);
    }
}
