//! Tile row layout.
//!
//! Partitions an ordered tile set into a fixed number of display rows.
//! Overflow beyond the visible grid is distributed round-robin so horizontal
//! scrolling reveals a balanced continuation in every row.

/// Number of display rows in the grid.
pub const DISPLAY_ROWS: usize = 3;

/// Partition tiles into display rows.
///
/// The first `DISPLAY_ROWS * per_row` tiles fill the rows sequentially;
/// remaining tiles are dealt round-robin across the rows.
pub fn layout_rows<T>(tiles: Vec<T>, per_row: usize) -> Vec<Vec<T>> {
    let per_row = per_row.max(1);
    let mut rows: Vec<Vec<T>> = (0..DISPLAY_ROWS).map(|_| Vec::new()).collect();

    for (index, tile) in tiles.into_iter().enumerate() {
        let row = if index < DISPLAY_ROWS * per_row {
            index / per_row
        } else {
            index % DISPLAY_ROWS
        };
        rows[row].push(tile);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_fill_within_grid() {
        let rows = layout_rows((0..6).collect(), 2);

        assert_eq!(rows, vec![vec![0, 1], vec![2, 3], vec![4, 5]]);
    }

    #[test]
    fn test_overflow_distributed_round_robin() {
        let rows = layout_rows((0..8).collect(), 2);

        assert_eq!(rows[0], vec![0, 1, 6]);
        assert_eq!(rows[1], vec![2, 3, 7]);
        assert_eq!(rows[2], vec![4, 5]);
    }

    #[test]
    fn test_zero_per_row_is_clamped() {
        let rows = layout_rows(vec![1, 2, 3, 4], 0);

        assert_eq!(rows, vec![vec![1, 4], vec![2], vec![3]]);
    }

    #[test]
    fn test_empty_input_yields_empty_rows() {
        let rows = layout_rows(Vec::<u8>::new(), 4);

        assert_eq!(rows.len(), DISPLAY_ROWS);
        assert!(rows.iter().all(|row| row.is_empty()));
    }
}
