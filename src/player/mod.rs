//! Player trait and implementations
//!
//! - ComputerPlayer: random deployment and uniform random targeting
//! - Fleet: a fixed, declared layout of ships, mines and sea monsters
//! - CliPlayer: interactive command-line player

use rand::rngs::SmallRng;

use crate::{
    common::{Cells, GridLocation, PlacementError},
    config::Rules,
    game::{GameEngine, Side, TurnReport},
    grid::Grid,
};

/// How many mines and sea monsters a side should deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PenaltyCounts {
    pub mines: usize,
    pub sea_monsters: usize,
}

impl PenaltyCounts {
    /// The full complement allowed by `rules`.
    pub fn from_rules(rules: &Rules) -> Self {
        Self {
            mines: rules.mines,
            sea_monsters: rules.sea_monsters,
        }
    }

    /// Counts already present on `grid`.
    pub fn of(grid: &Grid) -> Self {
        Self {
            mines: grid.mine_count(),
            sea_monsters: grid.sea_monster_count(),
        }
    }
}

/// Interface implemented by the different kinds of player.
///
/// A player places its side's items during setup and picks targets for
/// normal moves. Guaranteed hits are resolved by the engine.
pub trait Player {
    /// Place ships plus the requested mines and sea monsters on `grid`.
    fn deploy(
        &mut self,
        rng: &mut SmallRng,
        grid: &mut Grid,
        penalties: PenaltyCounts,
    ) -> Result<(), PlacementError>;

    /// Choose the next target, avoiding `performed`. `None` forfeits.
    fn select_target(&mut self, rng: &mut SmallRng, performed: &Cells) -> Option<GridLocation>;

    /// Called before each normal move of `side`.
    fn observe(&mut self, _engine: &GameEngine, _side: Side) {}

    /// Inform the player of every resolved move, from either side.
    fn handle_report(&mut self, _report: &TurnReport) {}

    /// Called once the game has a winner; `side` is the side this player
    /// played.
    fn game_over(&mut self, _engine: &GameEngine, _side: Side) {}

    /// Whether to set up another game after this one.
    fn play_again(&mut self) -> bool {
        false
    }
}

pub mod computer;
pub use computer::{deploy_random, ComputerPlayer};

pub mod fleet;
pub use fleet::Fleet;

#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub use cli::CliPlayer;
