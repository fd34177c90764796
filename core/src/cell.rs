use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// State of one grid cell.
///
/// An unclaimed cell has no owner and no dots. A cell that just discharged in
/// an explosion keeps its owner with zero dots and `is_empty` set, which
/// reserves it for that owner.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub dots: u8,
    pub owner: Option<PlayerId>,
    pub is_empty: bool,
}

impl Cell {
    pub const UNCLAIMED: Self = Self {
        dots: 0,
        owner: None,
        is_empty: false,
    };

    pub const fn claimed(owner: PlayerId, dots: u8) -> Self {
        Self {
            dots,
            owner: Some(owner),
            is_empty: false,
        }
    }

    pub const fn discharged(owner: Option<PlayerId>) -> Self {
        Self {
            dots: 0,
            owner,
            is_empty: true,
        }
    }

    pub const fn is_unclaimed(self) -> bool {
        self.owner.is_none()
    }

    pub fn is_owned_by(self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    pub fn is_opponent_of(self, player: PlayerId) -> bool {
        matches!(self.owner, Some(owner) if owner != player)
    }

    /// Whether `player` may place a dot here.
    pub fn accepts(self, player: PlayerId) -> bool {
        !self.is_opponent_of(player)
    }

    /// Dots counted towards `player`'s total.
    pub fn dots_of(self, player: PlayerId) -> u8 {
        if self.is_owned_by(player) { self.dots } else { 0 }
    }

    /// The cell after `player` drops one more dot on it.
    pub const fn with_dot_from(self, player: PlayerId) -> Self {
        Self::claimed(player, self.dots.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unclaimed_cells_accept_everyone() {
        assert!(Cell::UNCLAIMED.accepts(0));
        assert!(Cell::UNCLAIMED.accepts(3));
        assert!(Cell::UNCLAIMED.is_unclaimed());
    }

    #[test]
    fn empty_marker_is_reserved_for_its_owner() {
        let marker = Cell::discharged(Some(1));
        assert!(marker.accepts(1));
        assert!(!marker.accepts(0));
        assert_eq!(marker.dots_of(1), 0);
    }

    #[test]
    fn placing_claims_and_clears_marker() {
        let cell = Cell::discharged(Some(2)).with_dot_from(2);
        assert_eq!(cell, Cell::claimed(2, 1));
        assert!(!cell.is_empty);
    }
}
