//! Turn-resolution engine: readiness, move allotments, attacks, penalty
//! effects, win detection and scoring.

use alloc::vec::Vec;
use core::fmt;

use log::{debug, info};
use rand::Rng;

use crate::{
    common::{AttackError, Cells, GridLocation},
    config::{messages, Rules},
    grid::{Grid, Shot},
    penalty::{MoveKind, PenaltyCell, PenaltyKind},
    score::{final_score, GameStats},
    ship::Ship,
};

/// The two sides of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Human,
    Computer,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Side::Human => "human",
            Side::Computer => "computer",
        })
    }
}

/// Whether both sides deployed what the rules require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ReadyState {
    ShipsNotReady,
    ShipsMinesNotReady,
    ShipsMonstersNotReady,
    ShipsMinesMonstersNotReady,
    ReadyToPlay,
    Invalid,
}

impl ReadyState {
    pub fn message(self) -> &'static str {
        match self {
            ReadyState::ShipsNotReady => messages::SHIPS_NOT_READY,
            ReadyState::ShipsMinesNotReady => messages::SHIPS_MINES_NOT_READY,
            ReadyState::ShipsMonstersNotReady => messages::SHIPS_MONSTERS_NOT_READY,
            ReadyState::ShipsMinesMonstersNotReady => messages::SHIPS_MINES_MONSTERS_NOT_READY,
            ReadyState::ReadyToPlay => messages::READY_TO_PLAY,
            ReadyState::Invalid => messages::INVALID,
        }
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    /// Items are being placed.
    Setup,
    InProgress,
    Over { winner: Side },
}

/// Whose move it is and what kind of move they hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn {
    pub side: Side,
    pub kind: MoveKind,
}

/// Errors returned by [`GameEngine`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("the game has not started")]
    NotStarted,
    #[error("the game has already started")]
    AlreadyStarted,
    #[error("the game is over")]
    GameOver,
    #[error("cannot start: {0}")]
    NotReady(ReadyState),
    #[error("it is not the {0} side's turn")]
    NotYourTurn(Side),
    #[error("the pending move is {expected:?}")]
    WrongMove { expected: MoveKind },
    #[error("no intact ship cell left to strike")]
    NoTarget,
    #[error(transparent)]
    Attack(#[from] AttackError),
}

/// Everything that happened during one resolved move.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub attacker: Side,
    pub location: GridLocation,
    pub kind: MoveKind,
    pub shot: Shot,
    /// The ship that went down, so its cells can be revealed.
    pub sunk_ship: Option<Ship>,
    pub next: Option<Turn>,
    pub winner: Option<Side>,
}

impl TurnReport {
    /// Alert text for a struck mine or sea monster, worded for the human.
    pub fn penalty_alert(&self) -> Option<(&str, &'static str)> {
        let Shot::Penalty(penalty) = &self.shot else {
            return None;
        };
        let message = match (penalty.kind(), self.attacker) {
            (PenaltyKind::Mine, Side::Human) => messages::HUMAN_HIT_MINE,
            (PenaltyKind::Mine, Side::Computer) => messages::COMPUTER_HIT_MINE,
            (PenaltyKind::SeaMonster, Side::Human) => messages::HUMAN_HIT_MONSTER,
            (PenaltyKind::SeaMonster, Side::Computer) => messages::COMPUTER_HIT_MONSTER,
        };
        Some((penalty.penalty_text(), message))
    }
}

/// Per-side state: grid, move allotment and tallies.
#[derive(Debug, Clone)]
pub struct SideState {
    grid: Grid,
    moves: Vec<MoveKind>,
    hits: usize,
    misses: usize,
    performed: Cells,
}

impl SideState {
    fn new(rules: &Rules) -> Self {
        Self {
            grid: Grid::new(rules),
            moves: Vec::new(),
            hits: 0,
            misses: 0,
            performed: Cells::new(),
        }
    }

    fn reset(&mut self) {
        self.grid.reset();
        self.moves.clear();
        self.hits = 0;
        self.misses = 0;
        self.performed.clear_all();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Pending moves; the last entry is played next.
    pub fn moves(&self) -> &[MoveKind] {
        &self.moves
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Misses, including strikes on mines and sea monsters.
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Locations this side has fired on.
    pub fn performed(&self) -> Cells {
        self.performed
    }
}

/// Core game logic holding both sides.
#[derive(Debug, Clone)]
pub struct GameEngine {
    rules: Rules,
    human: SideState,
    computer: SideState,
    status: GameStatus,
    active: Side,
    moves_made: usize,
}

impl GameEngine {
    pub fn new(rules: Rules) -> Self {
        Self {
            human: SideState::new(&rules),
            computer: SideState::new(&rules),
            rules,
            status: GameStatus::Setup,
            active: Side::Human,
            moves_made: 0,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Side> {
        match self.status {
            GameStatus::Over { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Total moves resolved so far, both sides.
    pub fn moves_made(&self) -> usize {
        self.moves_made
    }

    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Human => &self.human,
            Side::Computer => &self.computer,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Human => &mut self.human,
            Side::Computer => &mut self.computer,
        }
    }

    /// Split into (attacker, defender).
    fn pair_mut(&mut self, attacker: Side) -> (&mut SideState, &mut SideState) {
        match attacker {
            Side::Human => (&mut self.human, &mut self.computer),
            Side::Computer => (&mut self.computer, &mut self.human),
        }
    }

    pub fn grid(&self, side: Side) -> &Grid {
        &self.side(side).grid
    }

    /// Mutable grid access, only while setting up.
    pub fn grid_mut(&mut self, side: Side) -> Result<&mut Grid, GameError> {
        if self.status != GameStatus::Setup {
            return Err(GameError::AlreadyStarted);
        }
        Ok(&mut self.side_mut(side).grid)
    }

    /// Check both sides against the rules. The human's mine and sea-monster
    /// counts decide which penalty kinds are in play; the computer must
    /// mirror them. Rules that cannot produce a winnable game are `Invalid`.
    pub fn check_ready(&self) -> ReadyState {
        if !self.rules.is_playable() {
            return ReadyState::Invalid;
        }
        let mines = self.human.grid.mine_count();
        let monsters = self.human.grid.sea_monster_count();
        if mines > self.rules.mines || monsters > self.rules.sea_monsters {
            return ReadyState::Invalid;
        }
        let with_mines = mines > 0;
        let with_monsters = monsters > 0;
        let want_mines = if with_mines { self.rules.mines } else { 0 };
        let want_monsters = if with_monsters {
            self.rules.sea_monsters
        } else {
            0
        };
        let ready = [&self.human, &self.computer].iter().all(|s| {
            s.grid.has_required_ships()
                && s.grid.mine_count() == want_mines
                && s.grid.sea_monster_count() == want_monsters
        });
        if ready {
            return ReadyState::ReadyToPlay;
        }
        match (with_mines, with_monsters) {
            (false, false) => ReadyState::ShipsNotReady,
            (true, false) => ReadyState::ShipsMinesNotReady,
            (_, true) => ReadyState::ShipsMinesMonstersNotReady,
        }
    }

    /// Leave setup. The human moves first with a single normal move.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.status != GameStatus::Setup {
            return Err(GameError::AlreadyStarted);
        }
        let ready = self.check_ready();
        if ready != ReadyState::ReadyToPlay {
            return Err(GameError::NotReady(ready));
        }
        self.human.moves.push(MoveKind::Normal);
        self.active = Side::Human;
        self.status = GameStatus::InProgress;
        info!("game started");
        Ok(())
    }

    /// Clear both sides and return to setup.
    pub fn reset(&mut self) {
        self.human.reset();
        self.computer.reset();
        self.status = GameStatus::Setup;
        self.active = Side::Human;
        self.moves_made = 0;
    }

    /// The pending move, if the game is in progress.
    pub fn turn(&self) -> Option<Turn> {
        if self.status != GameStatus::InProgress {
            return None;
        }
        self.side(self.active).moves.last().map(|&kind| Turn {
            side: self.active,
            kind,
        })
    }

    /// Whether `side` may still fire on `loc`, ignoring whose turn it is.
    pub fn can_attack(&self, side: Side, loc: GridLocation) -> bool {
        loc.in_bounds() && !self.side(side).performed.contains(loc)
    }

    /// Play a normal move for `side` at `loc`.
    pub fn attack(&mut self, side: Side, loc: GridLocation) -> Result<TurnReport, GameError> {
        self.check_turn(side, MoveKind::Normal)?;
        self.resolve(side, loc, MoveKind::Normal)
    }

    /// Play a guaranteed hit for `side` on a random intact ship cell of the
    /// opponent.
    pub fn guaranteed_hit<R: Rng + ?Sized>(
        &mut self,
        side: Side,
        rng: &mut R,
    ) -> Result<TurnReport, GameError> {
        self.check_turn(side, MoveKind::GuaranteedHit)?;
        let targets: Vec<GridLocation> =
            self.grid(side.opponent()).unattacked_ship_cells().collect();
        if targets.is_empty() {
            return Err(GameError::NoTarget);
        }
        let loc = targets[rng.random_range(0..targets.len())];
        self.resolve(side, loc, MoveKind::GuaranteedHit)
    }

    fn check_turn(&self, side: Side, kind: MoveKind) -> Result<(), GameError> {
        match self.status {
            GameStatus::Setup => return Err(GameError::NotStarted),
            GameStatus::Over { .. } => return Err(GameError::GameOver),
            GameStatus::InProgress => {}
        }
        if self.active != side {
            return Err(GameError::NotYourTurn(side));
        }
        match self.side(side).moves.last() {
            Some(&pending) if pending == kind => Ok(()),
            Some(&pending) => Err(GameError::WrongMove { expected: pending }),
            None => Err(GameError::NotYourTurn(side)),
        }
    }

    fn resolve(
        &mut self,
        side: Side,
        loc: GridLocation,
        kind: MoveKind,
    ) -> Result<TurnReport, GameError> {
        if !loc.in_bounds() {
            return Err(AttackError::OutOfBounds(loc).into());
        }
        if self.side(side).performed.contains(loc) {
            return Err(AttackError::AlreadyAttacked(loc).into());
        }

        let (attacker, defender) = self.pair_mut(side);
        let shot = defender.grid.fire_at(loc)?;
        attacker.moves.pop();
        let _ = attacker.performed.set(loc);

        match &shot {
            Shot::Miss => attacker.misses += 1,
            Shot::Hit(_) | Shot::Sunk(_) => attacker.hits += 1,
            Shot::Penalty(penalty) => {
                attacker.misses += 1;
                defender.moves.push(penalty.reward());
                info!(
                    "{} struck a {} at {}: {}",
                    side,
                    penalty.kind(),
                    loc,
                    penalty.penalty_text()
                );
            }
        }
        let sunk_ship = match shot {
            Shot::Sunk(id) => defender.grid.ship(id).map(|s| s.ship()),
            _ => None,
        };
        if let Some(ship) = &sunk_ship {
            info!("{} sank a {}-cell ship at {}", side, ship.length, ship.location);
        }

        let defeated = defender.grid.all_sunk();
        if defeated {
            attacker.moves.clear();
            defender.moves.clear();
        } else if attacker.moves.is_empty() {
            defender.moves.push(MoveKind::Normal);
        }
        let attacker_done = attacker.moves.is_empty();

        self.moves_made += 1;
        if defeated {
            self.status = GameStatus::Over { winner: side };
            info!("{} wins after {} moves", side, self.moves_made);
        } else if attacker_done {
            self.active = side.opponent();
        }
        debug!("{} fired at {} with {:?}: {:?}", side, loc, kind, shot);

        Ok(TurnReport {
            attacker: side,
            location: loc,
            kind,
            shot,
            sunk_ship,
            next: self.turn(),
            winner: self.winner(),
        })
    }

    /// Scoring inputs for `side`.
    pub fn stats(&self, side: Side) -> GameStats {
        let own = self.side(side);
        let enemy = self.side(side.opponent());
        GameStats {
            hits_on_enemy: own.hits,
            misses: own.misses,
            total_enemy_ships: enemy.grid.ship_count(),
            enemy_ships_remaining: enemy.grid.ships_remaining(),
            total_own_ships: own.grid.ship_count(),
            own_ships_sunk: own.grid.number_sunk(),
        }
    }

    /// Score of `side` under the configured weights.
    pub fn score(&self, side: Side) -> i64 {
        final_score(&self.stats(side), &self.rules.scoring)
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}
