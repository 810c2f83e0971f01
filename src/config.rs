//! Game constants and the tunable [`Rules`].

use crate::score::ScoreWeights;
use crate::ship::ShipSize;

pub const GRID_WIDTH: usize = 8;
pub const GRID_HEIGHT: usize = 8;

pub const REQUIRED_MINES: usize = 2;
pub const REQUIRED_SEA_MONSTERS: usize = 2;

pub const DEFAULT_MINE_TEXT: &str = "Boom!";
pub const DEFAULT_MONSTER_TEXT: &str = "Yikes!";

pub const SINK_BONUS: i64 = 100;
pub const SHIP_BONUS: i64 = 100;
pub const GUESS_PENALTY: i64 = 10;

/// How many ships of each class a side must deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct FleetQuota {
    pub small: usize,
    pub medium: usize,
    pub large: usize,
    pub x_large: usize,
}

impl FleetQuota {
    /// Required count for the given class.
    pub fn get(&self, size: ShipSize) -> usize {
        match size {
            ShipSize::Small => self.small,
            ShipSize::Medium => self.medium,
            ShipSize::Large => self.large,
            ShipSize::XLarge => self.x_large,
        }
    }

    /// Total ships across all classes.
    pub fn total(&self) -> usize {
        ShipSize::ALL.iter().map(|&s| self.get(s)).sum()
    }

    /// Grid cells covered by the whole fleet.
    pub fn cells(&self) -> usize {
        ShipSize::ALL.iter().map(|&s| self.get(s) * s.length()).sum()
    }
}

impl Default for FleetQuota {
    fn default() -> Self {
        Self {
            small: 1,
            medium: 2,
            large: 1,
            x_large: 1,
        }
    }
}

/// Tunable rules of a game. Every field falls back to its default when
/// loaded from a partial rules file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct Rules {
    pub fleet: FleetQuota,
    pub mines: usize,
    pub sea_monsters: usize,
    pub scoring: ScoreWeights,
}

impl Rules {
    /// At least one ship, and every ship, mine and sea monster fits on the
    /// grid at once.
    pub fn is_playable(&self) -> bool {
        let items = self.fleet.cells() + self.mines + self.sea_monsters;
        self.fleet.total() > 0 && items <= GRID_WIDTH * GRID_HEIGHT
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            fleet: FleetQuota::default(),
            mines: REQUIRED_MINES,
            sea_monsters: REQUIRED_SEA_MONSTERS,
            scoring: ScoreWeights::default(),
        }
    }
}

/// Text shown to the player.
pub mod messages {
    pub const GAME_OVER_TITLE: &str = "Game Over";
    pub const GAME_OVER_WIN: &str = "You won! Congrats!";
    pub const GAME_OVER_LOSE: &str = "You've been defeated by the computer.";

    pub const UNABLE_TO_START_TITLE: &str = "Cannot Start Game";

    pub const HUMAN_HIT_MINE: &str =
        "You've hit a mine! The computer has been rewarded an extra move on their next turn.";
    pub const COMPUTER_HIT_MINE: &str =
        "The computer has hit a mine! You've been awarded an extra move on your next turn.";

    pub const HUMAN_HIT_MONSTER: &str =
        "You've hit a sea monster! On the computer's next turn, they will get a guaranteed hit.";
    pub const COMPUTER_HIT_MONSTER: &str =
        "The computer has hit a sea monster! On your next turn, you'll get a guaranteed hit.";

    pub const SHIPS_NOT_READY: &str = "You do not have the correct amount of ships. You need one small ship (size of 2), two medium ships (size of 3), one large ship (size of 4), one x-large ship (size of 5).";
    pub const SHIPS_MINES_NOT_READY: &str = "You do not have the correct amount of ships/mines. You need one small ship (size of 2), two medium ships (size of 3), one large ship (size of 4), one x-large ship (size of 5), and two mines.";
    pub const SHIPS_MONSTERS_NOT_READY: &str = "You do not have the correct amount of ships/monsters. You need one small ship (size of 2), two medium ships (size of 3), one large ship (size of 4), one x-large ship (size of 5), and two sea monsters.";
    pub const SHIPS_MINES_MONSTERS_NOT_READY: &str = "You do not have the correct amount of ships/mines/monsters. You need one small ship (size of 2), two medium ships (size of 3), one large ship (size of 4), one x-large ship (size of 5), two mines, and two sea monsters.";
    pub const READY_TO_PLAY: &str = "All Ready!";
    pub const INVALID: &str = "Invalid Ready State!";
}
