//! Winning line analysis for the 3x3 board

use crate::board::{Cell, Side};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Find the side holding a completed line, if any.
///
/// At most one line can be complete on a legally reached board, so the scan
/// order across `WINNING_LINES` does not affect the result.
pub fn winner(cells: &[Cell; 9]) -> Option<Side> {
    for line in &WINNING_LINES {
        if let Cell::Mark(side) = cells[line[0]] {
            if cells[line[1]] == cells[line[0]] && cells[line[2]] == cells[line[0]] {
                return Some(side);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_horizontal() {
        let mut cells = [Cell::Empty; 9];
        cells[3] = Cell::Mark(Side::First);
        cells[4] = Cell::Mark(Side::First);
        cells[5] = Cell::Mark(Side::First);

        assert_eq!(winner(&cells), Some(Side::First));
    }

    #[test]
    fn test_winner_vertical() {
        let mut cells = [Cell::Empty; 9];
        cells[1] = Cell::Mark(Side::Second);
        cells[4] = Cell::Mark(Side::Second);
        cells[7] = Cell::Mark(Side::Second);

        assert_eq!(winner(&cells), Some(Side::Second));
    }

    #[test]
    fn test_winner_diagonal() {
        let mut cells = [Cell::Empty; 9];
        cells[2] = Cell::Mark(Side::First);
        cells[4] = Cell::Mark(Side::First);
        cells[6] = Cell::Mark(Side::First);

        assert_eq!(winner(&cells), Some(Side::First));
    }

    #[test]
    fn test_no_winner() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::Mark(Side::First);
        cells[1] = Cell::Mark(Side::Second);
        cells[2] = Cell::Mark(Side::First);

        assert_eq!(winner(&cells), None);
    }

    #[test]
    fn every_line_is_detected() {
        for line in &WINNING_LINES {
            let mut cells = [Cell::Empty; 9];
            for &idx in line {
                cells[idx] = Cell::Mark(Side::Second);
            }
            assert_eq!(winner(&cells), Some(Side::Second), "line {line:?} missed");
        }
    }
}
