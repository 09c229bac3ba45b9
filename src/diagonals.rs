use crate::positions::*;
use array_const_fn_init::array_const_fn_init;
use array_init::array_init;
use lazy_static::lazy_static;

// Every move in draughts runs along a diagonal. For each square we precompute
// the neighbouring square in each of the four directions (one step) and the
// square two steps away (the landing square of a jump), so the move generator
// never has to do bounds arithmetic itself.
//
//     a   b   c   d   e
//    --------------------
// 5 |     .       .      | 5      UpLeft    UpRight
// 4 |         x          | 4            \  /
// 3 |     .       .      | 3            /  \
//    --------------------        DownLeft    DownRight
//     a   b   c   d   e

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

pub const ALL_DIAGONALS: [Diagonal; 4] = [
    Diagonal::UpLeft,
    Diagonal::UpRight,
    Diagonal::DownLeft,
    Diagonal::DownRight,
];

// Same order as the enum
const DIAGONAL_OFFSETS: [(i16, i16); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

type DiagonalTable = [[Option<Position>; 4]; 64];

impl Diagonal {
    /// Row direction of this diagonal: -1 towards row 0 (the top edge), 1 towards row 7.
    pub const fn rows(self) -> i8 {
        DIAGONAL_OFFSETS[self as usize].0 as i8
    }

    pub const fn offset(self) -> Offset {
        let (rows, cols) = DIAGONAL_OFFSETS[self as usize];
        Offset::new(rows as i8, cols as i8)
    }
}

const fn diagonal_neighbours(pos: usize) -> [Option<Position>; 4] {
    let row = (pos / 8) as i16;
    let col = (pos % 8) as i16;
    let mut res = [None; 4];
    let mut i = 0;
    while i < 4 {
        let (dr, dc) = DIAGONAL_OFFSETS[i];
        if Position::in_board(row + dr, col + dc) {
            res[i] = Some(Position::const_from_row_col(
                (row + dr) as u8,
                (col + dc) as u8,
            ));
        }
        i += 1;
    }
    res
}

const STEPS: DiagonalTable = array_const_fn_init![diagonal_neighbours; 64];

fn jump_table() -> DiagonalTable {
    array_init(|pos: usize| {
        array_init(|dir: usize| STEPS[pos][dir].and_then(|over| STEPS[over.index()][dir]))
    })
}

lazy_static! {
    static ref JUMPS: Box<DiagonalTable> = Box::new(jump_table());
}

/// The adjacent square in direction `dir`, if it is on the board.
pub fn step(pos: Position, dir: Diagonal) -> Option<Position> {
    STEPS[pos.index()][dir as usize]
}

/// The jumped-over square and the landing square of a jump from `pos` in
/// direction `dir`, if the landing square is on the board.
pub fn jump(pos: Position, dir: Diagonal) -> Option<(Position, Position)> {
    let landing = JUMPS[pos.index()][dir as usize]?;
    let over = STEPS[pos.index()][dir as usize]?;
    Some((over, landing))
}
