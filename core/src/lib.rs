#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use agent::*;
pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use player::*;
pub use session::*;
pub use types::*;

mod agent;
mod board;
mod cell;
mod engine;
mod error;
mod player;
mod session;
mod types;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Supported board sides.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridSize {
    #[default]
    Classic,
    Large,
    Huge,
}

impl GridSize {
    pub const ALL: [Self; 3] = [Self::Classic, Self::Large, Self::Huge];

    pub const fn side(self) -> Coord {
        match self {
            Self::Classic => 10,
            Self::Large => 16,
            Self::Huge => 20,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Classic => "10x10 (Classic)",
            Self::Large => "16x16 (Large)",
            Self::Huge => "20x20 (Huge)",
        }
    }
}

impl TryFrom<Coord> for GridSize {
    type Error = GameError;

    fn try_from(side: Coord) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.side() == side)
            .ok_or(GameError::InvalidGridSize(side))
    }
}

/// One seat as chosen on the setup screen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    pub controller: Controller,
}

impl PlayerSetup {
    pub fn human(name: &str) -> Self {
        Self {
            name: normalize_name(name),
            controller: Controller::Human,
        }
    }

    pub fn agent(difficulty: Difficulty) -> Self {
        Self {
            name: String::new(),
            controller: Controller::Agent(difficulty),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid_size: GridSize,
    pub players: Vec<PlayerSetup>,
}

impl GameConfig {
    pub fn new(grid_size: GridSize, players: Vec<PlayerSetup>) -> Result<Self> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(GameError::InvalidPlayerCount(players.len()));
        }
        Ok(Self { grid_size, players })
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub(crate) fn build_players(&self) -> Vec<Player> {
        self.players
            .iter()
            .zip(0..)
            .map(|(setup, id)| Player::new(id, &setup.name, setup.controller))
            .collect()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GridSize::default(),
            players: alloc::vec![PlayerSetup::default(); MIN_PLAYERS],
        }
    }
}

/// Why a move was turned away. The session is left unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    NotInProgress,
    Busy,
    OutOfBounds,
    OccupiedByOpponent,
    ReservedByOpponent,
    /// An agent move was requested while a human is to play.
    HumanSeat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Rejected(RejectReason),
    Placed,
    Passed,
    Won(PlayerId),
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            Rejected(_) => false,
            Placed => true,
            Passed => true,
            Won(_) => true,
        }
    }
}
