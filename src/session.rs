//! Drives a [`GameEngine`] with two players from setup to a winner.

use alloc::boxed::Box;

use log::{debug, info};
use rand::rngs::SmallRng;

use crate::{
    common::PlacementError,
    config::Rules,
    game::{GameEngine, GameError, ReadyState, Side, TurnReport},
    penalty::MoveKind,
    player::{PenaltyCounts, Player},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("{side} deployment failed: {source}")]
    Deploy {
        side: Side,
        #[source]
        source: PlacementError,
    },
    #[error("{0}")]
    NotReady(ReadyState),
    #[error("the {0} side gave up")]
    Forfeit(Side),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Per-side totals at the end of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SideSummary {
    pub hits: usize,
    pub misses: usize,
    pub ships_sunk: usize,
    pub ships_lost: usize,
    pub score: i64,
}

/// Outcome of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSummary {
    pub winner: Option<Side>,
    pub moves: usize,
    pub human: SideSummary,
    pub computer: SideSummary,
}

pub struct Session {
    engine: GameEngine,
    human: Box<dyn Player>,
    computer: Box<dyn Player>,
    human_penalties: PenaltyCounts,
}

impl Session {
    /// The human side is asked for the full complement of mines and sea
    /// monsters allowed by `rules`.
    pub fn new(rules: Rules, human: Box<dyn Player>, computer: Box<dyn Player>) -> Self {
        Self {
            human_penalties: PenaltyCounts::from_rules(&rules),
            engine: GameEngine::new(rules),
            human,
            computer,
        }
    }

    /// Ask the human side for other penalty counts, e.g. none at all.
    pub fn with_penalties(mut self, counts: PenaltyCounts) -> Self {
        self.human_penalties = counts;
        self
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Deploy the human, then the computer mirroring the human's mine and
    /// sea-monster counts, then start the game.
    pub fn setup(&mut self, rng: &mut SmallRng) -> Result<(), SessionError> {
        let grid = self.engine.grid_mut(Side::Human)?;
        self.human
            .deploy(rng, grid, self.human_penalties)
            .map_err(|source| SessionError::Deploy {
                side: Side::Human,
                source,
            })?;
        let mirrored = PenaltyCounts::of(self.engine.grid(Side::Human));

        let grid = self.engine.grid_mut(Side::Computer)?;
        self.computer
            .deploy(rng, grid, mirrored)
            .map_err(|source| SessionError::Deploy {
                side: Side::Computer,
                source,
            })?;

        match self.engine.check_ready() {
            ReadyState::ReadyToPlay => {}
            state => return Err(SessionError::NotReady(state)),
        }
        self.engine.start()?;
        info!(
            "session ready: {} mines, {} sea monsters per side",
            mirrored.mines, mirrored.sea_monsters
        );
        Ok(())
    }

    /// Resolve the pending move and show the report to both players.
    pub fn step(&mut self, rng: &mut SmallRng) -> Result<TurnReport, SessionError> {
        let turn = match self.engine.turn() {
            Some(turn) => turn,
            None if self.engine.is_over() => return Err(GameError::GameOver.into()),
            None => return Err(GameError::NotStarted.into()),
        };
        let report = match turn.kind {
            MoveKind::Normal => {
                let player = match turn.side {
                    Side::Human => &mut self.human,
                    Side::Computer => &mut self.computer,
                };
                player.observe(&self.engine, turn.side);
                let performed = self.engine.side(turn.side).performed();
                let target = player
                    .select_target(rng, &performed)
                    .ok_or(SessionError::Forfeit(turn.side))?;
                self.engine.attack(turn.side, target)?
            }
            MoveKind::GuaranteedHit => self.engine.guaranteed_hit(turn.side, rng)?,
        };
        debug!("{:?}", report);
        self.human.handle_report(&report);
        self.computer.handle_report(&report);
        if report.winner.is_some() {
            self.human.game_over(&self.engine, Side::Human);
            self.computer.game_over(&self.engine, Side::Computer);
        }
        Ok(report)
    }

    /// Ask the human side whether to play another game.
    pub fn play_again(&mut self) -> bool {
        self.human.play_again()
    }

    /// Clear the finished game so [`Session::setup`] can deploy anew.
    pub fn reset(&mut self) {
        self.engine.reset();
        info!("session reset");
    }

    /// Set up and play until one side wins.
    pub fn run(&mut self, rng: &mut SmallRng) -> Result<GameSummary, SessionError> {
        self.setup(rng)?;
        while !self.engine.is_over() {
            self.step(rng)?;
        }
        Ok(self.summary())
    }

    pub fn summary(&self) -> GameSummary {
        let side_summary = |side: Side| {
            let stats = self.engine.stats(side);
            SideSummary {
                hits: stats.hits_on_enemy,
                misses: stats.misses,
                ships_sunk: stats.total_enemy_ships - stats.enemy_ships_remaining,
                ships_lost: stats.own_ships_sunk,
                score: self.engine.score(side),
            }
        };
        GameSummary {
            winner: self.engine.winner(),
            moves: self.engine.moves_made(),
            human: side_summary(Side::Human),
            computer: side_summary(Side::Computer),
        }
    }
}
