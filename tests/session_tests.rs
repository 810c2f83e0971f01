use log::LevelFilter;
use pirate_fleet::{
    parse_level, Cells, ComputerPlayer, Fleet, GameError, Grid, GridLocation, PenaltyCounts,
    PlacementError, Player, ReadyState, Rules, Session, SessionError, Ship, Side,
};
use rand::{rngs::SmallRng, SeedableRng};

/// Deploys a fixed layout and never fires.
struct Quitter(Fleet);

impl Player for Quitter {
    fn deploy(
        &mut self,
        _rng: &mut SmallRng,
        grid: &mut Grid,
        penalties: PenaltyCounts,
    ) -> Result<(), PlacementError> {
        self.0.deploy(grid, penalties)
    }

    fn select_target(&mut self, _rng: &mut SmallRng, _performed: &Cells) -> Option<GridLocation> {
        None
    }
}

/// Places nothing at all.
struct Idle;

impl Player for Idle {
    fn deploy(
        &mut self,
        _rng: &mut SmallRng,
        _grid: &mut Grid,
        _penalties: PenaltyCounts,
    ) -> Result<(), PlacementError> {
        Ok(())
    }

    fn select_target(&mut self, _rng: &mut SmallRng, _performed: &Cells) -> Option<GridLocation> {
        None
    }
}

fn computer_session(counts: PenaltyCounts) -> Session {
    Session::new(
        Rules::default(),
        Box::new(ComputerPlayer::new()),
        Box::new(ComputerPlayer::new()),
    )
    .with_penalties(counts)
}

#[test]
fn computer_mirrors_human_penalties() {
    let mut rng = SmallRng::seed_from_u64(11);
    let counts = PenaltyCounts {
        mines: 2,
        sea_monsters: 0,
    };
    let mut session = computer_session(counts);
    session.setup(&mut rng).unwrap();
    let engine = session.engine();
    assert_eq!(PenaltyCounts::of(engine.grid(Side::Human)), counts);
    assert_eq!(PenaltyCounts::of(engine.grid(Side::Computer)), counts);
    assert_eq!(engine.check_ready(), ReadyState::ReadyToPlay);
}

#[test]
fn plain_battleship_without_penalties() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut session = computer_session(PenaltyCounts::default());
    let summary = session.run(&mut rng).unwrap();
    assert!(summary.winner.is_some());
    assert!(session.engine().grid(Side::Human).penalties().is_empty());
    assert!(session.engine().grid(Side::Computer).penalties().is_empty());
}

#[test]
fn summary_matches_engine() {
    let mut rng = SmallRng::seed_from_u64(99);
    let mut session = computer_session(PenaltyCounts::from_rules(&Rules::default()));
    let summary = session.run(&mut rng).unwrap();
    let engine = session.engine();
    assert_eq!(summary.moves, engine.moves_made());
    assert_eq!(summary.human.score, engine.score(Side::Human));
    assert_eq!(summary.computer.hits, engine.side(Side::Computer).hits());
    let winner = summary.winner.unwrap();
    let (won, lost) = match winner {
        Side::Human => (summary.human, summary.computer),
        Side::Computer => (summary.computer, summary.human),
    };
    assert_eq!(won.ships_sunk, 5);
    assert_eq!(lost.ships_lost, 5);
    assert!(won.ships_lost < 5);
}

#[test]
fn step_before_setup_is_rejected() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut session = computer_session(PenaltyCounts::default());
    assert_eq!(
        session.step(&mut rng).unwrap_err(),
        SessionError::Game(GameError::NotStarted)
    );
}

#[test]
fn forfeit_ends_the_session() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut session = Session::new(
        Rules::default(),
        Box::new(Quitter(Fleet::standard())),
        Box::new(ComputerPlayer::new()),
    );
    assert_eq!(
        session.run(&mut rng).unwrap_err(),
        SessionError::Forfeit(Side::Human)
    );
}

#[test]
fn bad_layout_fails_setup() {
    let mut rng = SmallRng::seed_from_u64(1);
    let fleet = Fleet {
        ships: vec![Ship::horizontal(7, 0, 0)],
        ..Fleet::default()
    };
    let mut session = Session::new(
        Rules::default(),
        Box::new(Quitter(fleet)),
        Box::new(ComputerPlayer::new()),
    );
    assert_eq!(
        session.setup(&mut rng).unwrap_err(),
        SessionError::Deploy {
            side: Side::Human,
            source: PlacementError::UnsupportedLength(7)
        }
    );
}

#[test]
fn incomplete_setup_is_not_ready() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut session = Session::new(
        Rules::default(),
        Box::new(ComputerPlayer::new()),
        Box::new(Idle),
    );
    assert_eq!(
        session.setup(&mut rng).unwrap_err(),
        SessionError::NotReady(ReadyState::ShipsMinesMonstersNotReady)
    );
}

#[test]
fn same_seed_same_game() {
    let play = |seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        computer_session(PenaltyCounts::from_rules(&Rules::default()))
            .run(&mut rng)
            .unwrap()
    };
    assert_eq!(play(314), play(314));
}

#[test]
fn reset_allows_another_game() {
    let mut rng = SmallRng::seed_from_u64(21);
    let mut session = computer_session(PenaltyCounts::from_rules(&Rules::default()));
    let first = session.run(&mut rng).unwrap();
    assert!(first.winner.is_some());
    assert!(!session.play_again());

    session.reset();
    assert_eq!(session.engine().moves_made(), 0);
    assert_eq!(session.engine().grid(Side::Human).ship_count(), 0);
    let second = session.run(&mut rng).unwrap();
    assert!(second.winner.is_some());
    assert_eq!(second.moves, session.engine().moves_made());
}

#[test]
fn empty_fleet_cannot_start() {
    let mut rng = SmallRng::seed_from_u64(2);
    let rules: Rules = serde_json::from_str(
        r#"{ "fleet": { "small": 0, "medium": 0, "large": 0, "x_large": 0 } }"#,
    )
    .unwrap();
    let mut session = Session::new(
        rules,
        Box::new(ComputerPlayer::new()),
        Box::new(ComputerPlayer::new()),
    )
    .with_penalties(PenaltyCounts::default());
    assert_eq!(
        session.run(&mut rng).unwrap_err(),
        SessionError::NotReady(ReadyState::Invalid)
    );
    assert_eq!(session.engine().moves_made(), 0);
}

#[test]
fn rules_load_from_partial_json() {
    let rules: Rules = serde_json::from_str(r#"{ "mines": 1, "scoring": { "guess_penalty": 5 } }"#)
        .unwrap();
    assert_eq!(rules.mines, 1);
    assert_eq!(rules.sea_monsters, 2);
    assert_eq!(rules.fleet.total(), 5);
    assert_eq!(rules.scoring.guess_penalty, 5);
    assert_eq!(rules.scoring.sink_bonus, 100);
}

#[test]
fn summary_serializes_to_json() {
    let mut rng = SmallRng::seed_from_u64(8);
    let summary = computer_session(PenaltyCounts::default())
        .run(&mut rng)
        .unwrap();
    let v = serde_json::to_value(summary).unwrap();
    assert!(v["winner"].is_string());
    assert!(v["human"]["score"].is_i64());
}

#[test]
fn log_level_parsing() {
    assert_eq!(parse_level(Some("debug")), LevelFilter::Debug);
    assert_eq!(parse_level(Some(" WARN ")), LevelFilter::Warn);
    assert_eq!(parse_level(Some("bogus")), LevelFilter::Info);
    assert_eq!(parse_level(None), LevelFilter::Info);
}
