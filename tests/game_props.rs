use pirate_fleet::{
    deploy_random, ComputerPlayer, GameError, GameStatus, Grid, GridLocation, PenaltyCounts,
    Rules, Session, SessionError, Shot, Side,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_grid(seed: u64, counts: PenaltyCounts) -> Grid {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut grid = Grid::default();
    deploy_random(&mut rng, &mut grid, counts).unwrap();
    grid
}

fn counts(mines: usize, sea_monsters: usize) -> PenaltyCounts {
    PenaltyCounts {
        mines,
        sea_monsters,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_deployment_is_complete_and_disjoint(
        seed in any::<u64>(),
        mines in 0..=2usize,
        monsters in 0..=2usize,
    ) {
        let grid = random_grid(seed, counts(mines, monsters));
        prop_assert!(grid.has_required_ships());
        prop_assert_eq!(grid.mine_count(), mines);
        prop_assert_eq!(grid.sea_monster_count(), monsters);
        // 2 + 3 + 3 + 4 + 5 ship cells, every item on its own cell
        prop_assert_eq!(grid.occupied().count_ones(), 17 + mines + monsters);
        for ship in grid.ships() {
            prop_assert!(ship.cells().all(|c| c.in_bounds()));
        }
    }

    #[test]
    fn second_shot_is_rejected(seed in any::<u64>(), x in 0..8usize, y in 0..8usize) {
        let mut grid = random_grid(seed, counts(2, 2));
        let at = GridLocation::new(x, y);
        let first = grid.fire_at(at).unwrap();
        let attacked = grid.attacked();
        let sunk = grid.number_sunk();
        prop_assert!(grid.fire_at(at).is_err());
        prop_assert_eq!(grid.attacked(), attacked);
        prop_assert_eq!(grid.number_sunk(), sunk);
        match first {
            Shot::Miss => prop_assert!(!grid.is_occupied(at)),
            Shot::Penalty(_) => prop_assert!(grid.penalty_at(at).is_some()),
            Shot::Hit(id) | Shot::Sunk(id) => prop_assert_eq!(grid.ship_at(at), Some(id)),
        }
    }

    #[test]
    fn computer_games_always_finish(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut session = Session::new(
            Rules::default(),
            Box::new(ComputerPlayer::new()),
            Box::new(ComputerPlayer::new()),
        );
        let summary = session.run(&mut rng).unwrap();
        let winner = summary.winner.unwrap();
        let engine = session.engine();
        prop_assert_eq!(engine.status(), GameStatus::Over { winner });
        prop_assert!(engine.grid(winner.opponent()).all_sunk());
        prop_assert!(!engine.grid(winner).all_sunk());
        // Every move targets a fresh cell of the opponent.
        prop_assert!(summary.moves <= 128);
        for side in [Side::Human, Side::Computer] {
            let state = engine.side(side);
            prop_assert_eq!(state.performed().count_ones(), state.hits() + state.misses());
            prop_assert_eq!(engine.grid(side.opponent()).attacked(), state.performed());
        }
        prop_assert_eq!(summary.human.hits + summary.computer.hits
            + summary.human.misses + summary.computer.misses, summary.moves);
        // The winner hit every enemy ship cell.
        let winner_summary = if winner == Side::Human { summary.human } else { summary.computer };
        prop_assert_eq!(winner_summary.hits, 17);
        prop_assert_eq!(
            session.step(&mut rng).unwrap_err(),
            SessionError::Game(GameError::GameOver)
        );
    }

    #[test]
    fn random_moves_keep_one_active_side(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut session = Session::new(
            Rules::default(),
            Box::new(ComputerPlayer::new()),
            Box::new(ComputerPlayer::new()),
        );
        session.setup(&mut rng).unwrap();
        let steps = rng.random_range(1..40);
        for _ in 0..steps {
            if session.engine().is_over() {
                break;
            }
            let turn = session.engine().turn().unwrap();
            let other = session.engine().side(turn.side.opponent()).moves().len();
            let report = session.step(&mut rng).unwrap();
            prop_assert_eq!(report.attacker, turn.side);
            prop_assert_eq!(report.kind, turn.kind);
            if report.winner.is_some() {
                break;
            }
            // The waiting side only gains moves through penalties or a handover.
            let after = session.engine().side(turn.side.opponent()).moves().len();
            prop_assert!(after >= other);
            if let Some(next) = report.next {
                prop_assert!(session.engine().side(next.side.opponent()).moves().is_empty()
                    || next.side == turn.side);
            }
        }
    }
}
