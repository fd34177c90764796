/// Single coordinate axis used for the board side and positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Count type used for dot totals across the board.
pub type DotCount = u32;

/// Player identifier, `0..player_count`.
pub type PlayerId = u8;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Orthogonal displacements as `(d_row, d_col)`: top, bottom, left, right.
///
/// Explosions feed neighbors in exactly this order.
const DISPLACEMENTS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Applies `delta` to `coords`, returning a value only when it remains on a board of side `size`.
fn apply_delta(coords: Coord2, delta: (i8, i8), size: Coord) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= size {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= size {
        return None;
    }

    Some((next_row, next_col))
}

/// In-bounds orthogonal neighbors of `coords` on a board of side `size`.
pub fn neighbors(coords: Coord2, size: Coord) -> NeighborIter {
    NeighborIter::new(coords, size)
}

/// Dot threshold at which the cell explodes, equal to its neighbor count.
pub fn capacity(coords: Coord2, size: Coord) -> u8 {
    // at most four neighbors
    neighbors(coords, size).count() as u8
}

#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, size: Coord) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.size);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn capacity_depends_on_position() {
        assert_eq!(capacity((0, 0), 10), 2);
        assert_eq!(capacity((9, 9), 10), 2);
        assert_eq!(capacity((0, 5), 10), 3);
        assert_eq!(capacity((5, 9), 10), 3);
        assert_eq!(capacity((4, 4), 10), 4);
        assert_eq!(capacity((0, 0), 1), 0);
    }

    #[test]
    fn neighbors_follow_top_bottom_left_right_order() {
        let all: Vec<_> = neighbors((2, 2), 5).collect();
        assert_eq!(all, [(1, 2), (3, 2), (2, 1), (2, 3)]);

        let corner: Vec<_> = neighbors((0, 0), 5).collect();
        assert_eq!(corner, [(1, 0), (0, 1)]);

        let bottom_right: Vec<_> = neighbors((4, 4), 5).collect();
        assert_eq!(bottom_right, [(3, 4), (4, 3)]);
    }
}
