use alloc::vec::Vec;

use rand::{rngs::SmallRng, Rng};

use crate::{
    common::{Cells, GridLocation, PlacementError},
    grid::Grid,
    penalty::{Mine, PenaltyKind, SeaMonster},
    ship::ShipSize,
};

use super::{PenaltyCounts, Player};

/// Computer opponent: random layout, random targets.
#[derive(Debug, Default)]
pub struct ComputerPlayer;

impl ComputerPlayer {
    pub fn new() -> Self {
        Self
    }
}

/// Fill `grid` up to its fleet quota with randomly placed ships, then add
/// mines and sea monsters with the default texts until `penalties` is met.
pub fn deploy_random<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &mut Grid,
    penalties: PenaltyCounts,
) -> Result<(), PlacementError> {
    // Largest first, they are the hardest to fit.
    for &size in ShipSize::ALL.iter().rev() {
        while grid.class_count(size) < grid.fleet().get(size) {
            grid.random_ship_placement(rng, size)?;
        }
    }
    while grid.mine_count() < penalties.mines {
        grid.random_penalty_placement(rng, PenaltyKind::Mine, |loc| Mine::new(loc).into())?;
    }
    while grid.sea_monster_count() < penalties.sea_monsters {
        grid.random_penalty_placement(rng, PenaltyKind::SeaMonster, |loc| {
            SeaMonster::new(loc).into()
        })?;
    }
    Ok(())
}

/// Uniformly random location not in `performed`.
pub(crate) fn random_target<R: Rng + ?Sized>(rng: &mut R, performed: &Cells) -> Option<GridLocation> {
    let open: Vec<GridLocation> = performed.iter_unset().collect();
    if open.is_empty() {
        None
    } else {
        Some(open[rng.random_range(0..open.len())])
    }
}

impl Player for ComputerPlayer {
    fn deploy(
        &mut self,
        rng: &mut SmallRng,
        grid: &mut Grid,
        penalties: PenaltyCounts,
    ) -> Result<(), PlacementError> {
        deploy_random(rng, grid, penalties)
    }

    fn select_target(&mut self, rng: &mut SmallRng, performed: &Cells) -> Option<GridLocation> {
        random_target(rng, performed)
    }
}
