#![cfg(feature = "std")]

use std::fmt::Write;
use std::string::String;

use crate::{
    common::GridLocation,
    config::{GRID_HEIGHT, GRID_WIDTH},
    game::{GameEngine, Side},
    grid::{Grid, Occupant},
    penalty::Penalty,
};

/// Symbol for one cell. With `reveal`, untouched items are shown too.
fn cell_symbol(grid: &Grid, loc: GridLocation, reveal: bool) -> char {
    let attacked = grid.is_attacked(loc);
    match grid.occupant(loc) {
        Some(Occupant::Ship(_, ship)) if attacked && ship.is_sunk() => '#',
        Some(Occupant::Ship(..)) if attacked => 'X',
        Some(Occupant::Ship(..)) if reveal => 'S',
        Some(Occupant::Penalty(Penalty::Mine(_))) if attacked => 'M',
        Some(Occupant::Penalty(Penalty::Mine(_))) if reveal => 'm',
        Some(Occupant::Penalty(Penalty::SeaMonster(_))) if attacked => 'W',
        Some(Occupant::Penalty(Penalty::SeaMonster(_))) if reveal => 'w',
        _ if attacked => 'o',
        _ => '.',
    }
}

/// Render `grid` as text. `reveal` shows the owner's view; otherwise only
/// attacked cells are shown.
pub fn render_grid(grid: &Grid, reveal: bool) -> String {
    let mut out = String::new();
    out.push_str("    ╔════════════════════╗\n");
    out.push_str("    ║   ");
    for x in 0..GRID_WIDTH {
        let _ = write!(out, " {}", (b'A' + x as u8) as char);
    }
    out.push_str(" ║\n");
    out.push_str("    ╠════════════════════╣\n");
    for y in 0..GRID_HEIGHT {
        let _ = write!(out, "    ║ {:2}", y + 1);
        for x in 0..GRID_WIDTH {
            let _ = write!(out, " {}", cell_symbol(grid, GridLocation::new(x, y), reveal));
        }
        out.push_str(" ║\n");
    }
    out.push_str("    ╚════════════════════╝\n");
    if reveal {
        out.push_str("    Legend: S=Ship m=Mine w=Monster X=Hit #=Sunk o=Miss M/W=Struck\n");
    } else {
        out.push_str("    Legend: X=Hit #=Sunk o=Miss M=Mine W=Monster .=Unknown\n");
    }
    out
}

/// Status line per ship: class, anchor and hits taken.
pub fn render_ship_status(grid: &Grid) -> String {
    let mut out = String::from("    Ships:\n");
    for ship in grid.ships() {
        let state = if ship.is_sunk() { "SUNK" } else { "Afloat" };
        let _ = writeln!(
            out,
            "      {} ({}) at {}: {} [{}/{} hit]",
            ship.size(),
            ship.size().length(),
            ship.ship().location,
            state,
            ship.hits().count_ones(),
            ship.size().length(),
        );
    }
    out
}

/// The opponent's grid (fogged) above `side`'s own grid.
pub fn render_view(engine: &GameEngine, side: Side) -> String {
    let mut out = String::from("Opponent grid:\n");
    out.push_str(&render_grid(engine.grid(side.opponent()), false));
    out.push_str("\nYour grid:\n");
    out.push_str(&render_grid(engine.grid(side), true));
    out.push_str(&render_ship_status(engine.grid(side)));
    out
}
