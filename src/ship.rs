//! Ship definitions and the hit tracking of a placed ship.

use core::fmt;

use crate::common::{Cells, GridLocation, PlacementError};

/// Orientation of a ship on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Cells run along increasing `x`.
    Horizontal,
    /// Cells run along increasing `y`.
    Vertical,
}

/// Ship classes, valued by their length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipSize {
    Small = 2,
    Medium = 3,
    Large = 4,
    XLarge = 5,
}

impl ShipSize {
    pub const ALL: [ShipSize; 4] = [
        ShipSize::Small,
        ShipSize::Medium,
        ShipSize::Large,
        ShipSize::XLarge,
    ];

    pub const fn length(self) -> usize {
        self as usize
    }

    /// Class for a ship of `length` cells, if there is one.
    pub fn from_length(length: usize) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.length() == length)
    }

    pub fn name(self) -> &'static str {
        match self {
            ShipSize::Small => "small",
            ShipSize::Medium => "medium",
            ShipSize::Large => "large",
            ShipSize::XLarge => "x-large",
        }
    }
}

impl fmt::Display for ShipSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A ship as requested by a player: length, anchor and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    pub length: usize,
    pub location: GridLocation,
    pub orientation: Orientation,
}

impl Ship {
    pub const fn new(length: usize, location: GridLocation, orientation: Orientation) -> Self {
        Self {
            length,
            location,
            orientation,
        }
    }

    /// Shorthand for a horizontal ship anchored at `(x, y)`.
    pub const fn horizontal(length: usize, x: usize, y: usize) -> Self {
        Self::new(length, GridLocation::new(x, y), Orientation::Horizontal)
    }

    /// Shorthand for a vertical ship anchored at `(x, y)`.
    pub const fn vertical(length: usize, x: usize, y: usize) -> Self {
        Self::new(length, GridLocation::new(x, y), Orientation::Vertical)
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    /// The ship's class, if its length names one.
    pub fn size(&self) -> Option<ShipSize> {
        ShipSize::from_length(self.length)
    }

    /// Last cell of the ship. Equal to the anchor for a one-cell ship.
    pub fn end_location(&self) -> GridLocation {
        self.location
            .offset(self.length.saturating_sub(1), self.is_vertical())
    }

    /// Projected cells from the anchor to the end. May run off the grid.
    pub fn cells(&self) -> impl Iterator<Item = GridLocation> {
        let ship = *self;
        (0..ship.length).map(move |i| ship.location.offset(i, ship.is_vertical()))
    }
}

/// Index of a ship on its grid, in placement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub usize);

/// A ship that has been placed on a grid, with hits tracked per cell.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PlacedShip {
    ship: Ship,
    size: ShipSize,
    mask: Cells,
    hits: Cells,
}

impl PlacedShip {
    /// Project `ship` onto the grid. Fails if its length has no class or any
    /// cell falls off the grid. Does not check for overlap.
    pub fn new(ship: Ship) -> Result<Self, PlacementError> {
        let size = ship
            .size()
            .ok_or(PlacementError::UnsupportedLength(ship.length))?;
        let mask = Self::project(&ship)?;
        Ok(Self {
            ship,
            size,
            mask,
            hits: Cells::new(),
        })
    }

    pub(crate) fn project(ship: &Ship) -> Result<Cells, PlacementError> {
        if !ship.end_location().in_bounds() || !ship.location.in_bounds() {
            return Err(PlacementError::OutOfBounds);
        }
        Ok(Cells::from_locations(ship.cells())?)
    }

    /// Register a shot at `loc`. Returns `true` if it struck this ship.
    pub fn strike(&mut self, loc: GridLocation) -> bool {
        if self.mask.contains(loc) {
            let _ = self.hits.set(loc);
            true
        } else {
            false
        }
    }

    /// `true` once every cell has been hit.
    pub fn is_sunk(&self) -> bool {
        self.hits == self.mask
    }

    pub fn ship(&self) -> Ship {
        self.ship
    }

    pub fn size(&self) -> ShipSize {
        self.size
    }

    pub fn mask(&self) -> Cells {
        self.mask
    }

    pub fn hits(&self) -> Cells {
        self.hits
    }

    /// Cells that have not been hit yet.
    pub fn intact(&self) -> impl Iterator<Item = GridLocation> {
        (self.mask & !self.hits).iter()
    }

    /// The ship's cells, anchor first.
    pub fn cells(&self) -> impl Iterator<Item = GridLocation> {
        self.ship.cells()
    }
}

impl fmt::Debug for PlacedShip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PlacedShip {{ size: {}, anchor: {}, orientation: {:?}, hits: {}/{} }}",
            self.size,
            self.ship.location,
            self.ship.orientation,
            self.hits.count_ones(),
            self.size.length(),
        )
    }
}
