//! Scoring functions for a single candidate placement.
//!
//! Every function looks at the board as it is plus the one dot the agent is
//! about to place. None of them resolve explosions.

use crate::*;

pub type Score = i32;

/// Favors safe, high-capacity cells and building towards an explosion.
pub fn fill_score(board: &Board, coords: Coord2) -> Score {
    let capacity = Score::from(board.capacity_at(coords));
    let after = Score::from(board[coords].dots) + 1;

    let mut score = 0;
    if after < capacity {
        score += 10;
    }
    score += 2 * capacity;
    if after == capacity - 1 {
        score += 5;
    }
    if capacity == 2 {
        score -= 3;
    }
    score
}

/// Rewards pressure on opponent cells that are one dot away from exploding.
pub fn strategic_score(board: &Board, player: PlayerId, coords: Coord2) -> Score {
    let capacity = Score::from(board.capacity_at(coords));
    let after = Score::from(board[coords].dots) + 1;

    let mut score = 0;
    for pos in board.iter_neighbors(coords) {
        let neighbor = board[pos];
        let neighbor_capacity = Score::from(board.capacity_at(pos));
        if neighbor.is_opponent_of(player) && Score::from(neighbor.dots) >= neighbor_capacity - 1 {
            score += 8;
        }
    }
    if after == capacity - 1 {
        score += 6;
    }
    score
}

/// Rewards placements that explode right away, capture cells and chain further.
pub fn winning_score(board: &Board, player: PlayerId, coords: Coord2) -> Score {
    let cell = board[coords];
    let capacity = board.capacity_at(coords);

    let mut score = 0;
    if cell.dots.saturating_add(1) >= capacity {
        let neighbors = board.neighbor_vec(coords);
        let mut captured = 0;
        for &pos in &neighbors {
            let neighbor = board[pos];
            if !neighbor.is_owned_by(player) {
                captured += 1;
                score += 1;
                if neighbor.owner.is_some() {
                    score += 15;
                }
            }
        }
        if captured >= 2 {
            score += 25;
        }
        for &pos in &neighbors {
            if board[pos].dots.saturating_add(1) >= board.capacity_at(pos) {
                score += 20;
            }
        }
    }
    if cell.is_opponent_of(player) {
        score += 10;
    }
    score
}
