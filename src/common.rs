//! Common types for Pirate Fleet: grid locations, cell sets and the errors
//! returned while placing items or firing on a grid.

use core::fmt;
use core::str::FromStr;

use crate::bitboard::{BitBoard, BitBoardError};
use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::penalty::PenaltyKind;
use crate::ship::ShipSize;

/// Cell set covering one player's grid.
pub type Cells = BitBoard<u64, GRID_WIDTH, GRID_HEIGHT>;

/// A cell on a player's grid. `x` is the column and `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLocation {
    pub x: usize,
    pub y: usize,
}

impl GridLocation {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Whether the location lies on the 8×8 grid.
    pub const fn in_bounds(&self) -> bool {
        self.x < GRID_WIDTH && self.y < GRID_HEIGHT
    }

    /// The location `steps` cells further along the given axis.
    pub(crate) fn offset(self, steps: usize, vertical: bool) -> Self {
        if vertical {
            Self::new(self.x, self.y.saturating_add(steps))
        } else {
            Self::new(self.x.saturating_add(steps), self.y)
        }
    }

    /// Every location of the grid, row by row.
    pub fn all() -> impl Iterator<Item = GridLocation> {
        (0..GRID_HEIGHT).flat_map(|y| (0..GRID_WIDTH).map(move |x| GridLocation::new(x, y)))
    }
}

impl From<(usize, usize)> for GridLocation {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

/// Formats as column letter plus 1-based row, e.g. `C5`. Columns past `Z`
/// fall back to `(x,y)`.
impl fmt::Display for GridLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.x < 26 {
            write!(f, "{}{}", (b'A' + self.x as u8) as char, self.y + 1)
        } else {
            write!(f, "({},{})", self.x, self.y)
        }
    }
}

/// Error returned when parsing a location such as `C5`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseLocationError {
    #[error("empty input")]
    Empty,
    #[error("column must be a letter A-H")]
    BadColumn,
    #[error("row must be a number 1-8")]
    BadRow,
    #[error("location is off the grid")]
    OutOfBounds,
}

impl FromStr for GridLocation {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let col = chars.next().ok_or(ParseLocationError::Empty)?;
        if !col.is_ascii_alphabetic() {
            return Err(ParseLocationError::BadColumn);
        }
        let x = (col.to_ascii_uppercase() as u8 - b'A') as usize;
        let digits = chars.as_str().trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseLocationError::BadRow);
        }
        let row: usize = digits.parse().map_err(|_| ParseLocationError::BadRow)?;
        if row == 0 {
            return Err(ParseLocationError::BadRow);
        }
        let loc = GridLocation::new(x, row - 1);
        if loc.in_bounds() {
            Ok(loc)
        } else {
            Err(ParseLocationError::OutOfBounds)
        }
    }
}

/// Reasons a ship, mine or sea monster could not be added to a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// No ship class has this length.
    #[error("no ship class is {0} cells long")]
    UnsupportedLength(usize),
    /// The grid already holds every ship of this class it needs.
    #[error("already holding enough {0} ships")]
    ClassFull(ShipSize),
    /// Part of the item would lie off the grid.
    #[error("placement runs off the grid")]
    OutOfBounds,
    /// A ship cell would cover an occupied cell.
    #[error("ship overlaps an occupied cell at {0}")]
    Overlaps(GridLocation),
    /// The grid already holds the maximum number of this penalty kind.
    #[error("already holding the maximum number of {0}s")]
    PenaltyLimit(PenaltyKind),
    /// The target cell of a penalty item is already occupied.
    #[error("cell {0} is already occupied")]
    Occupied(GridLocation),
    /// Random placement gave up.
    #[error("no room left to place the item")]
    NoRoom,
}

/// Reasons a shot at a grid was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AttackError {
    #[error("location {0} is off the grid")]
    OutOfBounds(GridLocation),
    #[error("location {0} was already attacked")]
    AlreadyAttacked(GridLocation),
}

impl From<BitBoardError> for PlacementError {
    fn from(_: BitBoardError) -> Self {
        PlacementError::OutOfBounds
    }
}
