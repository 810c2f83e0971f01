//! End-of-game scoring.

/// Per-event weights used by [`final_score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct ScoreWeights {
    /// Awarded per enemy ship sunk.
    pub sink_bonus: i64,
    /// Awarded per own ship still afloat.
    pub ship_bonus: i64,
    /// Deducted per move made, hit or miss.
    pub guess_penalty: i64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            sink_bonus: crate::config::SINK_BONUS,
            ship_bonus: crate::config::SHIP_BONUS,
            guess_penalty: crate::config::GUESS_PENALTY,
        }
    }
}

/// Tallies a side's score is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameStats {
    pub hits_on_enemy: usize,
    pub misses: usize,
    pub total_enemy_ships: usize,
    pub enemy_ships_remaining: usize,
    pub total_own_ships: usize,
    pub own_ships_sunk: usize,
}

/// `sink × sunk enemy ships + ship × surviving own ships − penalty × moves`.
pub fn final_score(stats: &GameStats, weights: &ScoreWeights) -> i64 {
    let sunk = stats
        .total_enemy_ships
        .saturating_sub(stats.enemy_ships_remaining) as i64;
    let afloat = stats.total_own_ships.saturating_sub(stats.own_ships_sunk) as i64;
    let moves = (stats.hits_on_enemy + stats.misses) as i64;
    weights.sink_bonus * sunk + weights.ship_bonus * afloat - weights.guess_penalty * moves
}
