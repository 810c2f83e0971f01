use alloc::{vec, vec::Vec};

use crate::{
    common::{GridLocation, PlacementError},
    grid::Grid,
    penalty::{Mine, SeaMonster},
    ship::Ship,
};

use super::PenaltyCounts;

/// A declared layout of one side's items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    pub ships: Vec<Ship>,
    pub mines: Vec<Mine>,
    pub sea_monsters: Vec<SeaMonster>,
}

impl Fleet {
    /// The stock human layout.
    pub fn standard() -> Self {
        Self {
            ships: vec![
                Ship::vertical(2, 3, 4),
                Ship::horizontal(3, 0, 0),
                Ship::horizontal(3, 3, 1),
                Ship::vertical(4, 6, 3),
                Ship::vertical(5, 7, 2),
            ],
            mines: vec![
                Mine::with_text(GridLocation::new(6, 0), "Ka-Boom!"),
                Mine::with_text(GridLocation::new(3, 3), "Ka-Bang!"),
            ],
            sea_monsters: vec![
                SeaMonster::with_text(GridLocation::new(5, 6), "Chomp!"),
                SeaMonster::new(GridLocation::new(2, 2)),
            ],
        }
    }

    /// Add every ship, then the first `penalties.mines` mines and the first
    /// `penalties.sea_monsters` sea monsters.
    pub fn deploy(&self, grid: &mut Grid, penalties: PenaltyCounts) -> Result<(), PlacementError> {
        for ship in &self.ships {
            grid.add_ship(*ship)?;
        }
        for mine in self.mines.iter().take(penalties.mines) {
            grid.add_mine(mine.clone())?;
        }
        for monster in self.sea_monsters.iter().take(penalties.sea_monsters) {
            grid.add_sea_monster(monster.clone())?;
        }
        Ok(())
    }
}
