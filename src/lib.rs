#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitboard;
mod common;
pub mod config;
mod game;
mod grid;
#[cfg(feature = "std")]
mod logging;
mod penalty;
pub mod player;
mod score;
pub mod session;
mod ship;
#[cfg(feature = "std")]
pub mod ui;

pub use bitboard::{BitBoard, BitBoardError, SetCells};
pub use common::*;
pub use config::{FleetQuota, Rules};
pub use game::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, parse_level, LOG_ENV};
pub use penalty::*;
pub use player::{deploy_random, ComputerPlayer, Fleet, PenaltyCounts, Player};
#[cfg(feature = "std")]
pub use player::CliPlayer;
pub use score::*;
pub use session::{GameSummary, Session, SessionError, SideSummary};
pub use ship::*;
