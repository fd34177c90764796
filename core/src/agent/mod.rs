use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;
pub use heuristics::*;
pub use random::*;

mod heuristics;
mod random;

/// Strength tier of a computer-controlled player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Uniform random legal move.
    Low,
    #[default]
    Medium,
    High,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Easy",
            Self::Medium => "Medium",
            Self::High => "Hard",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Candidate {
    coords: Coord2,
    score: Score,
}

/// Picks one legal move for `player`, or `None` when there is none.
pub fn select_move<R: RandomSource + ?Sized>(
    board: &Board,
    player: PlayerId,
    difficulty: Difficulty,
    random: &mut R,
) -> Option<Coord2> {
    let legal = board.legal_moves(player);
    if legal.is_empty() {
        return None;
    }

    let choice = match difficulty {
        Difficulty::Low => legal[random.pick_index(legal.len())],
        Difficulty::Medium => {
            let ranked = rank(board, player, &legal, 1);
            if ranked[0].score > 20 {
                ranked[0].coords
            } else {
                pick_among_top(&ranked, 3, random)
            }
        }
        Difficulty::High => {
            let ranked = rank(board, player, &legal, 2);
            if ranked[0].score > 30 || random.chance(0.8) {
                ranked[0].coords
            } else {
                pick_among_top(&ranked, 2, random)
            }
        }
    };

    log::debug!("agent {player} ({difficulty:?}) picks {choice:?}");
    Some(choice)
}

/// Scores every legal move, best first; equal scores keep scan order.
fn rank(board: &Board, player: PlayerId, legal: &[Coord2], winning_weight: Score) -> Vec<Candidate> {
    let mut ranked: Vec<_> = legal
        .iter()
        .map(|&coords| Candidate {
            coords,
            score: fill_score(board, coords)
                + strategic_score(board, player, coords)
                + winning_weight * winning_score(board, player, coords),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

fn pick_among_top<R: RandomSource + ?Sized>(ranked: &[Candidate], top: usize, random: &mut R) -> Coord2 {
    let top = top.min(ranked.len());
    ranked[random.pick_index(top)].coords
}
