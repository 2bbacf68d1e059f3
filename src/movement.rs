use crate::game::Match;
use crate::pieces::PieceKind::{
    Builder, Guardian, Infantry, Sapper, SiegeEngine, Sovereign, Trickster, Wall, Wyrm
};
use crate::pieces::{Piece, PieceId, Side};
use crate::rules::SiegeMovement;
use crate::tiles::{RowColOffset, Tile};

/// The absolute row and column distances a siege engine bombards at.
const BOMBARD_PATTERNS: [(u8, u8); 3] = [(0, 3), (3, 0), (2, 2)];

/// Pure movement and attack predicates. None of these look at whether the target tile is empty or
/// who stands on it unless the piece's rule itself depends on that (tricksters swapping with
/// friends, sovereigns avoiding threatened tiles); the action layer checks occupancy.
///
/// Every predicate is false for the piece's own tile and for tiles off the board. Asking about a
/// piece that is not on the board is a bug in the caller and panics.
impl Match {
    fn placed(&self, id: PieceId) -> (&Piece, Tile) {
        let piece = self.piece(id);
        let origin = piece.tile.expect("rules queried for a piece that is not on the board");
        (piece, origin)
    }

    /// Whether the piece's movement rule allows it to relocate to `target`.
    pub fn can_move_to(&self, id: PieceId, target: Tile) -> bool {
        let (piece, origin) = self.placed(id);
        if target == origin || !self.grid().tile_in_bounds(target) {
            return false
        }
        let offset = origin.offset_to(target);
        match piece.kind {
            Wall => false,
            Infantry => self.infantry_step(piece, offset),
            Builder => offset.chebyshev_dist() == 1,
            Sapper => offset.is_orthogonal() && self.grid().path_clear(origin, target),
            Trickster => offset.chebyshev_dist() == 1 && self.trickster_may_enter(piece, target),
            Guardian => is_l_leap(offset),
            SiegeEngine => match self.rules().siege_movement {
                SiegeMovement::Bombard => is_bombardment(offset),
                SiegeMovement::Step => offset.manhattan_dist() == 1
            },
            Wyrm => {
                let min_dist = if self.rules().wyrm_adjacent_moves { 1 } else { 2 };
                self.wyrm_line(origin, target, min_dist)
            },
            Sovereign => self.sovereign_step(piece, offset, target)
        }
    }

    /// Whether the piece's attack rule allows it to strike `target`.
    pub fn can_attack(&self, id: PieceId, target: Tile) -> bool {
        let (piece, origin) = self.placed(id);
        if target == origin || !self.grid().tile_in_bounds(target) {
            return false
        }
        let offset = origin.offset_to(target);
        match piece.kind {
            Wall => false,
            Infantry => self.infantry_step(piece, offset) || self.infantry_leap(piece, origin, offset),
            Builder => offset.chebyshev_dist() == 1,
            Sapper => offset.is_orthogonal() && self.grid().path_clear(origin, target),
            Trickster => offset.chebyshev_dist() == 1 && !self.is_enemy_sovereign(piece, target),
            Guardian => is_l_leap(offset),
            SiegeEngine => is_bombardment(offset),
            Wyrm => self.wyrm_line(origin, target, 2),
            Sovereign => self.sovereign_step(piece, offset, target)
        }
    }

    /// Whether any piece of `side` on the board could attack `tile`. Sovereigns count as
    /// threatening only the tiles adjacent to them, which keeps the two sovereigns from asking
    /// about each other forever.
    pub fn is_threatened_by(&self, side: Side, tile: Tile) -> bool {
        self.roster(side).iter().any(|id| {
            let piece = self.piece(id);
            match piece.tile {
                None => false,
                Some(at) if piece.kind == Sovereign => at.offset_to(tile).chebyshev_dist() == 1,
                Some(_) => self.can_attack(id, tile)
            }
        })
    }

    fn infantry_step(&self, piece: &Piece, offset: RowColOffset) -> bool {
        let Some(side) = piece.side else { return false };
        offset.row == side.direction() && offset.col.abs() <= 1
    }

    fn infantry_leap(&self, piece: &Piece, origin: Tile, offset: RowColOffset) -> bool {
        let Some(side) = piece.side else { return false };
        let dir = side.direction();
        if offset.row != 2 * dir || ![0, 2, -2].contains(&offset.col) {
            return false
        }
        self.grid()
            .offset_tile(origin, RowColOffset::new(dir, offset.col / 2))
            .is_some_and(|mid| self.grid().is_free(mid))
    }

    fn trickster_may_enter(&self, piece: &Piece, target: Tile) -> bool {
        match self.piece_at(target) {
            None => true,
            Some(other) => {
                let other = self.piece(other);
                other.kind != Trickster && piece.side.is_some() && other.side == piece.side
            }
        }
    }

    fn is_enemy_sovereign(&self, piece: &Piece, target: Tile) -> bool {
        self.piece_at(target).is_some_and(|id| {
            let other = self.piece(id);
            other.kind == Sovereign && piece.side.is_some_and(|s| other.is_enemy_of(s))
        })
    }

    fn wyrm_line(&self, origin: Tile, target: Tile, min_dist: u8) -> bool {
        let offset = origin.offset_to(target);
        offset.is_straight()
            && offset.chebyshev_dist() >= min_dist
            && self.grid().path_clear(origin, target)
    }

    fn sovereign_step(&self, piece: &Piece, offset: RowColOffset, target: Tile) -> bool {
        let Some(side) = piece.side else { return false };
        offset.chebyshev_dist() == 1 && !self.is_threatened_by(side.other(), target)
    }
}

fn is_l_leap(offset: RowColOffset) -> bool {
    offset.row != 0 && offset.col != 0 && offset.manhattan_dist() == 3
}

fn is_bombardment(offset: RowColOffset) -> bool {
    BOMBARD_PATTERNS.contains(&offset.abs())
}
