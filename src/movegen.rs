use crate::boards::Board;
use crate::diagonals::*;
use crate::moves::Move;
use crate::pieces::*;
use crate::positions::Position;

// -------------------------------------
// Move generation
// ------------------------------------
//
// Captures are mandatory: if any piece of the side to move can jump, only
// jumps are legal. A capture chain may stop wherever it can not be continued,
// it is not required to take the maximum number of pieces.

impl Board {
    /// Returns all legal moves of the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        let side = self.side_to_move();
        let own: Vec<Position> = self
            .pieces()
            .filter(|(_, square)| square.belongs_to(side))
            .map(|(pos, _)| pos)
            .collect();

        let jumps: Vec<Move> = own.iter().flat_map(|pos| self.piece_jumps(*pos)).collect();
        if !jumps.is_empty() {
            return jumps;
        }
        own.iter().flat_map(|pos| self.piece_steps(*pos)).collect()
    }

    /// Legal moves of the piece on `pos`. Empty if the square does not hold a
    /// piece of the side to move, or if this piece can not capture while
    /// another one can.
    pub fn legal_moves_for(&self, pos: Position) -> Vec<Move> {
        if !self[pos].belongs_to(self.side_to_move()) {
            return Vec::new();
        }
        self.legal_moves()
            .into_iter()
            .filter(|m| m.start == pos)
            .collect()
    }

    /// Whether the side to move is obliged to capture this turn.
    pub fn must_capture(&self) -> bool {
        let side = self.side_to_move();
        self.pieces()
            .filter(|(_, square)| square.belongs_to(side))
            .any(|(pos, _)| !self.piece_jumps(pos).is_empty())
    }

    /// Every capture chain of the piece on `pos`, moving by the rules of the
    /// piece's own side regardless of whose turn it is.
    pub fn piece_jumps(&self, pos: Position) -> Vec<Move> {
        let square = self[pos];
        let side = match square.get_side() {
            Some(side) => side,
            None => return Vec::new(),
        };
        let mut res = Vec::new();
        let mut captured = Vec::new();
        self.jumps_from(pos, pos, side, square.is_king(), &mut captured, &mut res);
        res
    }

    /// Every non-capturing single step of the piece on `pos`.
    pub fn piece_steps(&self, pos: Position) -> Vec<Move> {
        let square = self[pos];
        let side = match square.get_side() {
            Some(side) => side,
            None => return Vec::new(),
        };
        self.directions(side, square.is_king())
            .filter_map(|dir| step(pos, dir))
            .filter(|target| self[*target].is_empty())
            .map(|target| Move::new(pos, target, Vec::new()))
            .collect()
    }

    // Men move towards their promotion row only, kings in all four directions.
    fn directions(&self, side: Side, king: bool) -> impl Iterator<Item = Diagonal> {
        let forward = self.forward_rows(side);
        ALL_DIAGONALS
            .into_iter()
            .filter(move |dir| king || dir.rows() == forward)
    }

    // Depth first search over the jumps available from `at`. `captured` holds
    // the squares jumped so far in this chain; it is pushed before and popped
    // after each recursive call. A node from which no jump continues closes
    // the chain and yields one move.
    //
    // The origin square still holds the moving piece on the board, but the
    // piece has left it, so a chain may land there again.
    fn jumps_from(
        &self,
        at: Position,
        origin: Position,
        side: Side,
        king: bool,
        captured: &mut Vec<Position>,
        res: &mut Vec<Move>,
    ) {
        let mut continued = false;

        for dir in self.directions(side, king) {
            let (over, landing) = match jump(at, dir) {
                Some(squares) => squares,
                None => continue,
            };
            if !self[over].belongs_to(side.opposite()) || captured.contains(&over) {
                continue;
            }
            if !self[landing].is_empty() && landing != origin {
                continue;
            }

            continued = true;
            captured.push(over);
            self.jumps_from(landing, origin, side, king, captured, res);
            captured.pop();
        }

        if !continued && !captured.is_empty() {
            res.push(Move::new(origin, at, captured.clone()));
        }
    }
}
