use alloc::format;
use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::{Difficulty, PlayerId};

/// Longest accepted player name, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// Fixed four-entry player palette, indexed by player id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerColor {
    Coral,
    Teal,
    Sky,
    Salmon,
}

impl PlayerColor {
    pub const PALETTE: [Self; 4] = [Self::Coral, Self::Teal, Self::Sky, Self::Salmon];

    pub const fn for_player(id: PlayerId) -> Self {
        Self::PALETTE[id as usize % Self::PALETTE.len()]
    }

    pub const fn hex(self) -> &'static str {
        use PlayerColor::*;
        match self {
            Coral => "#FF6B6B",
            Teal => "#4ECDC4",
            Sky => "#45B7D1",
            Salmon => "#FFA07A",
        }
    }
}

/// Who makes the moves for a seat.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    #[default]
    Human,
    Agent(Difficulty),
}

impl Controller {
    pub const fn agent_difficulty(self) -> Option<Difficulty> {
        match self {
            Self::Human => None,
            Self::Agent(difficulty) => Some(difficulty),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    pub controller: Controller,
}

impl Player {
    pub fn new(id: PlayerId, name: &str, controller: Controller) -> Self {
        Self {
            id,
            name: normalize_name(name),
            color: PlayerColor::for_player(id),
            controller,
        }
    }

    pub fn human(id: PlayerId) -> Self {
        Self::new(id, "", Controller::Human)
    }

    pub fn agent(id: PlayerId, difficulty: Difficulty) -> Self {
        Self::new(id, "", Controller::Agent(difficulty))
    }

    /// The entered name, or `Player N` (1-based) when none was given.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("Player {}", u16::from(self.id) + 1)
        } else {
            self.name.clone()
        }
    }
}

/// Trims surrounding whitespace and caps the length at [`MAX_NAME_LEN`] characters.
pub fn normalize_name(name: &str) -> String {
    name.trim().chars().take(MAX_NAME_LEN).collect()
}
