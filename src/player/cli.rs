#![cfg(feature = "std")]

use std::io::{self, BufRead, Write};
use std::string::String;

use log::warn;
use rand::rngs::SmallRng;

use crate::{
    common::{Cells, GridLocation, PlacementError},
    config::messages,
    game::{GameEngine, Side, TurnReport},
    grid::{Grid, Shot},
    ui,
};

use super::{deploy_random, Fleet, PenaltyCounts, Player};

/// Interactive player reading targets such as `C5` from `input`.
pub struct CliPlayer<R, W> {
    input: R,
    output: W,
    fleet: Option<Fleet>,
    side: Side,
}

impl CliPlayer<io::StdinLock<'static>, io::Stdout> {
    /// Player on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> CliPlayer<R, W> {
    /// Player deploying [`Fleet::standard`] on the human side.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            fleet: Some(Fleet::standard()),
            side: Side::Human,
        }
    }

    /// Deploy a random layout instead of the standard one.
    pub fn with_random_fleet(mut self) -> Self {
        self.fleet = None;
        self
    }

    /// Deploy the given layout.
    pub fn with_fleet(mut self, fleet: Fleet) -> Self {
        self.fleet = Some(fleet);
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) {
        let _ = writeln!(self.output, "{}", text);
    }

    fn describe(&self, report: &TurnReport) -> String {
        let mine = report.attacker == self.side;
        let who = if mine { "You" } else { "The computer" };
        let verb = if report.kind == crate::penalty::MoveKind::GuaranteedHit {
            "struck (guaranteed hit)"
        } else {
            "fired at"
        };
        let outcome = match &report.shot {
            Shot::Miss => "water",
            Shot::Hit(_) => "a ship",
            Shot::Sunk(_) => "a ship and sank it",
            Shot::Penalty(_) => "a hidden danger",
        };
        format!("{} {} {}: {}.", who, verb, report.location, outcome)
    }
}

impl<R: BufRead, W: Write> Player for CliPlayer<R, W> {
    fn deploy(
        &mut self,
        rng: &mut SmallRng,
        grid: &mut Grid,
        penalties: PenaltyCounts,
    ) -> Result<(), PlacementError> {
        match &self.fleet {
            Some(fleet) => fleet.deploy(grid, penalties)?,
            None => deploy_random(rng, grid, penalties)?,
        }
        self.say("Your fleet is deployed:");
        let board = ui::render_grid(grid, true);
        self.say(&board);
        Ok(())
    }

    fn select_target(&mut self, _rng: &mut SmallRng, performed: &Cells) -> Option<GridLocation> {
        loop {
            let _ = write!(self.output, "Enter target (e.g. C5, 'help'): ");
            let _ = self.output.flush();
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case("help") {
                self.say("Columns A-H, rows 1-8. X=Hit #=Sunk o=Miss M=Mine W=Monster.");
                continue;
            }
            if line.eq_ignore_ascii_case("quit") {
                return None;
            }
            match line.parse::<GridLocation>() {
                Ok(loc) if performed.contains(loc) => {
                    self.say(&format!("You already fired at {}. Choose another target.", loc));
                }
                Ok(loc) => return Some(loc),
                Err(e) => {
                    warn!("rejected target {:?}: {}", line, e);
                    self.say(&format!("Invalid target '{}': {}", line, e));
                }
            }
        }
    }

    fn observe(&mut self, engine: &GameEngine, side: Side) {
        self.side = side;
        let view = ui::render_view(engine, side);
        self.say(&view);
    }

    fn handle_report(&mut self, report: &TurnReport) {
        let line = self.describe(report);
        self.say(&line);
        if let Some((title, message)) = report.penalty_alert() {
            self.say(&format!("{} {}", title, message));
        }
        if let Some(ship) = &report.sunk_ship {
            self.say(&format!(
                "Sunk: {}-cell ship at {} to {}.",
                ship.length,
                ship.location,
                ship.end_location()
            ));
        }
    }

    fn game_over(&mut self, engine: &GameEngine, side: Side) {
        self.side = side;
        self.say(messages::GAME_OVER_TITLE);
        if engine.winner() == Some(side) {
            self.say(messages::GAME_OVER_WIN);
        } else {
            self.say(messages::GAME_OVER_LOSE);
        }
        self.say(&format!("Final score: {}", engine.score(side)));
    }

    fn play_again(&mut self) -> bool {
        loop {
            let _ = write!(self.output, "Play again? (y/n): ");
            let _ = self.output.flush();
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return false,
                Ok(_) => {}
            }
            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return true,
                "n" | "no" | "quit" => return false,
                other => warn!("rejected answer {:?}", other),
            }
        }
    }
}
