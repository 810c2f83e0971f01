//! Penalty cells: mines and sea monsters hidden on a grid.

use alloc::string::{String, ToString};
use core::fmt;

use crate::common::GridLocation;
use crate::config::{DEFAULT_MINE_TEXT, DEFAULT_MONSTER_TEXT};

/// Kind of move granted to a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    /// The side picks a target.
    Normal,
    /// The engine strikes an intact ship cell of the opponent.
    GuaranteedHit,
}

/// A cell that penalises whoever fires on it.
pub trait PenaltyCell {
    fn location(&self) -> GridLocation;

    /// Alert title shown when the cell is struck.
    fn penalty_text(&self) -> &str;

    /// Whether the cell is flagged as guaranteeing a hit.
    fn guarantees_hit(&self) -> bool;

    /// Move pushed onto the defender's allotment when this cell is struck.
    fn reward(&self) -> MoveKind {
        if self.guarantees_hit() {
            MoveKind::GuaranteedHit
        } else {
            MoveKind::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Mine {
    location: GridLocation,
    penalty_text: String,
    guarantees_hit: bool,
}

impl Mine {
    pub fn new(location: GridLocation) -> Self {
        Self::with_text(location, DEFAULT_MINE_TEXT)
    }

    pub fn with_text(location: GridLocation, text: &str) -> Self {
        Self {
            location,
            penalty_text: text.to_string(),
            guarantees_hit: false,
        }
    }

    /// Flag the mine as guaranteeing a hit. The flag is carried as data;
    /// a struck mine always rewards the defender with a normal move.
    pub fn guaranteeing_hit(mut self) -> Self {
        self.guarantees_hit = true;
        self
    }
}

impl PenaltyCell for Mine {
    fn location(&self) -> GridLocation {
        self.location
    }

    fn penalty_text(&self) -> &str {
        &self.penalty_text
    }

    fn guarantees_hit(&self) -> bool {
        self.guarantees_hit
    }

    fn reward(&self) -> MoveKind {
        MoveKind::Normal
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SeaMonster {
    location: GridLocation,
    penalty_text: String,
}

impl SeaMonster {
    pub fn new(location: GridLocation) -> Self {
        Self::with_text(location, DEFAULT_MONSTER_TEXT)
    }

    pub fn with_text(location: GridLocation, text: &str) -> Self {
        Self {
            location,
            penalty_text: text.to_string(),
        }
    }
}

impl PenaltyCell for SeaMonster {
    fn location(&self) -> GridLocation {
        self.location
    }

    fn penalty_text(&self) -> &str {
        &self.penalty_text
    }

    fn guarantees_hit(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PenaltyKind {
    Mine,
    SeaMonster,
}

impl fmt::Display for PenaltyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            PenaltyKind::Mine => "mine",
            PenaltyKind::SeaMonster => "sea monster",
        })
    }
}

/// Either penalty item, as stored on a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Penalty {
    Mine(Mine),
    SeaMonster(SeaMonster),
}

impl Penalty {
    pub fn kind(&self) -> PenaltyKind {
        match self {
            Penalty::Mine(_) => PenaltyKind::Mine,
            Penalty::SeaMonster(_) => PenaltyKind::SeaMonster,
        }
    }

    fn cell(&self) -> &dyn PenaltyCell {
        match self {
            Penalty::Mine(m) => m,
            Penalty::SeaMonster(m) => m,
        }
    }
}

impl PenaltyCell for Penalty {
    fn location(&self) -> GridLocation {
        self.cell().location()
    }

    fn penalty_text(&self) -> &str {
        self.cell().penalty_text()
    }

    fn guarantees_hit(&self) -> bool {
        self.cell().guarantees_hit()
    }

    fn reward(&self) -> MoveKind {
        self.cell().reward()
    }
}

impl From<Mine> for Penalty {
    fn from(mine: Mine) -> Self {
        Penalty::Mine(mine)
    }
}

impl From<SeaMonster> for Penalty {
    fn from(monster: SeaMonster) -> Self {
        Penalty::SeaMonster(monster)
    }
}
