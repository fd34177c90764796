use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// Outcome of resolving the explosions triggered by one placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub board: Board,
    /// Every cell that exploded or received a dot, for highlighting only.
    pub touched: BTreeSet<Coord2>,
    pub waves: u32,
}

#[derive(Copy, Clone, Debug)]
struct Explosion {
    coords: Coord2,
    owner: Option<PlayerId>,
}

/// Resolves every overflowing cell, wave by wave, starting after a dot was placed at `trigger`.
///
/// Each wave collects all cells at or above capacity from the same snapshot
/// and explodes them in row-major order. Resolution stops once the board is
/// stable or at most one player still holds dots. The input board is left
/// untouched.
pub fn resolve(board: &Board, trigger: Coord2) -> Resolution {
    let mut board = board.clone();
    let mut touched = BTreeSet::new();
    let mut waves = 0;

    loop {
        if board.players_with_dots().len() <= 1 {
            log::trace!("resolution from {trigger:?} halted, game decided");
            break;
        }

        let batch = collect_explosions(&board);
        if batch.is_empty() {
            break;
        }

        waves += 1;
        log::trace!("wave {waves} from {trigger:?}: {} explosions", batch.len());

        for Explosion { coords, owner } in batch {
            board[coords] = Cell::discharged(owner);
            touched.insert(coords);

            for pos in board.iter_neighbors(coords) {
                let neighbor = board[pos];
                board[pos] = Cell {
                    dots: neighbor.dots.saturating_add(1),
                    owner,
                    is_empty: false,
                };
                touched.insert(pos);
            }
        }
    }

    Resolution {
        board,
        touched,
        waves,
    }
}

fn collect_explosions(board: &Board) -> Vec<Explosion> {
    board
        .iter_cells()
        .filter(|&(coords, cell)| cell.dots >= board.capacity_at(coords))
        .map(|(coords, cell)| Explosion {
            coords,
            owner: cell.owner,
        })
        .collect()
}
