//! One side's grid: ship, mine and sea-monster placement plus shot
//! resolution.

use alloc::vec::Vec;
use core::fmt;

use log::debug;
use rand::Rng;

use crate::common::{AttackError, Cells, GridLocation, PlacementError};
use crate::config::{FleetQuota, Rules, GRID_HEIGHT, GRID_WIDTH};
use crate::penalty::{Mine, Penalty, PenaltyCell, PenaltyKind, SeaMonster};
use crate::ship::{Orientation, PlacedShip, Ship, ShipId, ShipSize};

/// Attempts made by the random ship placer before giving up.
const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

const CLASSES: usize = ShipSize::ALL.len();

/// What occupies a cell.
#[derive(Debug, Clone, Copy)]
pub enum Occupant<'a> {
    Ship(ShipId, &'a PlacedShip),
    Penalty(&'a Penalty),
}

/// Result of firing on a grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Shot {
    /// Open water.
    Miss,
    /// A ship segment was hit; the ship is still afloat.
    Hit(ShipId),
    /// A ship segment was hit and the ship is now sunk.
    Sunk(ShipId),
    /// A mine or sea monster was struck.
    Penalty(Penalty),
}

impl Shot {
    /// Whether a ship segment was struck.
    pub fn is_hit(&self) -> bool {
        matches!(self, Shot::Hit(_) | Shot::Sunk(_))
    }
}

/// A player's grid. Each cell holds at most one of ship segment, mine or
/// sea monster.
#[derive(Clone)]
pub struct Grid {
    fleet: FleetQuota,
    max_mines: usize,
    max_sea_monsters: usize,
    ships: Vec<PlacedShip>,
    penalties: Vec<Penalty>,
    class_counts: [usize; CLASSES],
    occupied: Cells,
    ship_map: Cells,
    attacked: Cells,
}

fn class_index(size: ShipSize) -> usize {
    match size {
        ShipSize::Small => 0,
        ShipSize::Medium => 1,
        ShipSize::Large => 2,
        ShipSize::XLarge => 3,
    }
}

impl Grid {
    /// Create an empty grid enforcing the limits in `rules`.
    pub fn new(rules: &Rules) -> Self {
        Self {
            fleet: rules.fleet,
            max_mines: rules.mines,
            max_sea_monsters: rules.sea_monsters,
            ships: Vec::new(),
            penalties: Vec::new(),
            class_counts: [0; CLASSES],
            occupied: Cells::new(),
            ship_map: Cells::new(),
            attacked: Cells::new(),
        }
    }

    /// Remove every item and shot, keeping the limits.
    pub fn reset(&mut self) {
        self.ships.clear();
        self.penalties.clear();
        self.class_counts = [0; CLASSES];
        self.occupied.clear_all();
        self.ship_map.clear_all();
        self.attacked.clear_all();
    }

    /// Add a ship. Rejected if its class is unknown or already full, if it
    /// runs off the grid, or if it overlaps any occupied cell.
    pub fn add_ship(&mut self, ship: Ship) -> Result<ShipId, PlacementError> {
        let size = ship
            .size()
            .ok_or(PlacementError::UnsupportedLength(ship.length))?;
        if self.class_counts[class_index(size)] >= self.fleet.get(size) {
            return Err(PlacementError::ClassFull(size));
        }
        let placed = PlacedShip::new(ship)?;
        if let Some(loc) = (placed.mask() & self.occupied).iter().next() {
            return Err(PlacementError::Overlaps(loc));
        }
        self.occupied |= placed.mask();
        self.ship_map |= placed.mask();
        self.class_counts[class_index(size)] += 1;
        self.ships.push(placed);
        debug!("placed {} ship at {} ({:?})", size, ship.location, ship.orientation);
        Ok(ShipId(self.ships.len() - 1))
    }

    pub fn add_mine(&mut self, mine: Mine) -> Result<(), PlacementError> {
        self.add_penalty(mine.into())
    }

    pub fn add_sea_monster(&mut self, monster: SeaMonster) -> Result<(), PlacementError> {
        self.add_penalty(monster.into())
    }

    /// Add a mine or sea monster on an unoccupied, in-bounds cell, up to the
    /// per-kind limit.
    pub fn add_penalty(&mut self, penalty: Penalty) -> Result<(), PlacementError> {
        let loc = penalty.location();
        if !loc.in_bounds() {
            return Err(PlacementError::OutOfBounds);
        }
        let kind = penalty.kind();
        if self.penalty_count(kind) >= self.penalty_limit(kind) {
            return Err(PlacementError::PenaltyLimit(kind));
        }
        if self.occupied.contains(loc) {
            return Err(PlacementError::Occupied(loc));
        }
        self.occupied.set(loc)?;
        self.penalties.push(penalty);
        debug!("placed {} at {}", kind, loc);
        Ok(())
    }

    /// Place a ship of class `size` at a uniformly random anchor and
    /// orientation, retrying until it fits.
    pub fn random_ship_placement<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        size: ShipSize,
    ) -> Result<ShipId, PlacementError> {
        if self.class_counts[class_index(size)] >= self.fleet.get(size) {
            return Err(PlacementError::ClassFull(size));
        }
        let len = size.length();
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            };
            let (max_x, max_y) = match orientation {
                Orientation::Horizontal => (GRID_WIDTH.saturating_sub(len), GRID_HEIGHT - 1),
                Orientation::Vertical => (GRID_WIDTH - 1, GRID_HEIGHT.saturating_sub(len)),
            };
            let anchor = GridLocation::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
            match self.add_ship(Ship::new(len, anchor, orientation)) {
                Ok(id) => return Ok(id),
                Err(PlacementError::Overlaps(_)) | Err(PlacementError::OutOfBounds) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(PlacementError::NoRoom)
    }

    /// Place a penalty item built by `make` on a uniformly random free cell.
    pub fn random_penalty_placement<R, F>(
        &mut self,
        rng: &mut R,
        kind: PenaltyKind,
        make: F,
    ) -> Result<GridLocation, PlacementError>
    where
        R: Rng + ?Sized,
        F: FnOnce(GridLocation) -> Penalty,
    {
        if self.penalty_count(kind) >= self.penalty_limit(kind) {
            return Err(PlacementError::PenaltyLimit(kind));
        }
        let free: Vec<GridLocation> = self.occupied.iter_unset().collect();
        if free.is_empty() {
            return Err(PlacementError::NoRoom);
        }
        let loc = free[rng.random_range(0..free.len())];
        self.add_penalty(make(loc))?;
        Ok(loc)
    }

    /// Fire on `loc`. Each cell can be fired on once.
    pub fn fire_at(&mut self, loc: GridLocation) -> Result<Shot, AttackError> {
        if !loc.in_bounds() {
            return Err(AttackError::OutOfBounds(loc));
        }
        if self.attacked.contains(loc) {
            return Err(AttackError::AlreadyAttacked(loc));
        }
        self.attacked
            .set(loc)
            .map_err(|_| AttackError::OutOfBounds(loc))?;

        if let Some(penalty) = self.penalty_at(loc) {
            return Ok(Shot::Penalty(penalty.clone()));
        }
        for (i, ship) in self.ships.iter_mut().enumerate() {
            if ship.strike(loc) {
                return Ok(if ship.is_sunk() {
                    Shot::Sunk(ShipId(i))
                } else {
                    Shot::Hit(ShipId(i))
                });
            }
        }
        Ok(Shot::Miss)
    }

    pub fn penalty_at(&self, loc: GridLocation) -> Option<&Penalty> {
        self.penalties.iter().find(|p| p.location() == loc)
    }

    pub fn ship_at(&self, loc: GridLocation) -> Option<ShipId> {
        if !self.ship_map.contains(loc) {
            return None;
        }
        self.ships
            .iter()
            .position(|s| s.mask().contains(loc))
            .map(ShipId)
    }

    pub fn occupant(&self, loc: GridLocation) -> Option<Occupant<'_>> {
        if let Some(id) = self.ship_at(loc) {
            return Some(Occupant::Ship(id, &self.ships[id.0]));
        }
        self.penalty_at(loc).map(Occupant::Penalty)
    }

    pub fn ship(&self, id: ShipId) -> Option<&PlacedShip> {
        self.ships.get(id.0)
    }

    pub fn ships(&self) -> &[PlacedShip] {
        &self.ships
    }

    pub fn penalties(&self) -> &[Penalty] {
        &self.penalties
    }

    pub fn is_occupied(&self, loc: GridLocation) -> bool {
        self.occupied.contains(loc)
    }

    pub fn is_attacked(&self, loc: GridLocation) -> bool {
        self.attacked.contains(loc)
    }

    pub fn attacked(&self) -> Cells {
        self.attacked
    }

    pub fn occupied(&self) -> Cells {
        self.occupied
    }

    /// `true` if `loc` holds a ship segment whose ship is sunk. Penalty cells
    /// never count.
    pub fn check_sink(&self, loc: GridLocation) -> bool {
        self.ship_at(loc)
            .and_then(|id| self.ship(id))
            .map_or(false, PlacedShip::is_sunk)
    }

    /// `true` once every ship is sunk. A grid with no ships is never beaten.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(PlacedShip::is_sunk)
    }

    pub fn number_sunk(&self) -> usize {
        self.ships.iter().filter(|s| s.is_sunk()).count()
    }

    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    pub fn ships_remaining(&self) -> usize {
        self.ship_count() - self.number_sunk()
    }

    /// Ship cells that have not been fired on yet.
    pub fn unattacked_ship_cells(&self) -> impl Iterator<Item = GridLocation> {
        (self.ship_map & !self.attacked).iter()
    }

    /// Ships per class this grid must hold.
    pub fn fleet(&self) -> &FleetQuota {
        &self.fleet
    }

    pub fn class_count(&self, size: ShipSize) -> usize {
        self.class_counts[class_index(size)]
    }

    pub fn penalty_count(&self, kind: PenaltyKind) -> usize {
        self.penalties.iter().filter(|p| p.kind() == kind).count()
    }

    pub fn penalty_limit(&self, kind: PenaltyKind) -> usize {
        match kind {
            PenaltyKind::Mine => self.max_mines,
            PenaltyKind::SeaMonster => self.max_sea_monsters,
        }
    }

    pub fn mine_count(&self) -> usize {
        self.penalty_count(PenaltyKind::Mine)
    }

    pub fn sea_monster_count(&self) -> usize {
        self.penalty_count(PenaltyKind::SeaMonster)
    }

    /// Exactly the required number of ships in every class.
    pub fn has_required_ships(&self) -> bool {
        ShipSize::ALL
            .iter()
            .all(|&s| self.class_count(s) == self.fleet.get(s))
    }

    pub fn has_required_mines(&self) -> bool {
        self.mine_count() == self.max_mines
    }

    pub fn has_required_sea_monsters(&self) -> bool {
        self.sea_monster_count() == self.max_sea_monsters
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(&Rules::default())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("ships", &self.ships)
            .field("penalties", &self.penalties)
            .field("attacked", &self.attacked.count_ones())
            .finish()
    }
}
