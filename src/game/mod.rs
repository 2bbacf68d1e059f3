pub mod logic;

use crate::board::geometry::Grid;
use crate::error::{BoardError, ParseError};
use crate::pieces::{Piece, PieceId, Side};
use crate::roster::Roster;
use crate::rules::Ruleset;
use crate::tiles::Tile;
use log::debug;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A single match: the board, every piece that has been recruited onto it, and the rosters of the
/// two armies and of the neutral walls.
///
/// Pieces live in an arena owned by the match and are referred to everywhere else by
/// [`PieceId`]. A captured piece keeps its arena slot but is taken off the board and out of every
/// roster. The arena only shrinks when a wall construction is undone.
///
/// Mutation happens in place and is not reentrant. To search in parallel, give each worker its own
/// clone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    rules: Ruleset,
    grid: Grid,
    pieces: Vec<Piece>,
    armies: [Roster; 2],
    walls: Roster
}

impl Match {
    /// Create a match with an empty board.
    pub fn new(rules: Ruleset) -> Self {
        Self {
            rules,
            grid: Grid::new(rules.side_len),
            pieces: vec![],
            armies: [Roster::new(), Roster::new()],
            walls: Roster::new()
        }
    }

    /// Create a match from the given rules and board snapshot.
    pub fn from_snapshot(rules: Ruleset, snapshot: &str) -> Result<Self, ParseError> {
        let mut game = Self::new(rules);
        game.load(snapshot)?;
        Ok(game)
    }

    pub fn rules(&self) -> &Ruleset {
        &self.rules
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Look up a piece by handle. Panics if the handle did not come from this match.
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0]
    }

    /// The piece standing on the given tile, if any.
    pub fn piece_at(&self, tile: Tile) -> Option<PieceId> {
        self.grid.occupant(tile)
    }

    /// The pieces currently fighting for `side`.
    pub fn roster(&self, side: Side) -> &Roster {
        &self.armies[side.index()]
    }

    /// The walls currently standing on the board.
    pub fn walls(&self) -> &Roster {
        &self.walls
    }

    /// Number of pieces ever recruited into the arena, including captured ones.
    pub fn arena_len(&self) -> usize {
        self.pieces.len()
    }

    fn roster_for(&mut self, side: Option<Side>) -> &mut Roster {
        match side {
            Some(s) => &mut self.armies[s.index()],
            None => &mut self.walls
        }
    }

    /// Remove every piece from the board, the rosters and the arena.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.pieces.clear();
        self.armies.iter_mut().for_each(Roster::clear);
        self.walls.clear();
    }

    /// Bring a new piece into the match on the given tile, adding it to the roster of its side
    /// (or to the walls if it has none).
    pub fn recruit(&mut self, piece: Piece, tile: Tile) -> Result<PieceId, BoardError> {
        let id = PieceId(self.pieces.len());
        self.grid.place(tile, id)?;
        self.pieces.push(Piece { tile: Some(tile), ..piece });
        self.roster_for(piece.side).add(id);
        Ok(id)
    }

    /// Replace the whole match state with the given snapshot. The snapshot is parsed into a fresh
    /// board first, so on error the current state is left as it was.
    pub fn load(&mut self, snapshot: &str) -> Result<(), ParseError> {
        let side_len = self.rules.side_len as usize;
        let mut rows: Vec<&str> = snapshot.lines().collect();
        while rows.last().is_some_and(|l| l.trim().is_empty()) {
            rows.pop();
        }
        if rows.len() != side_len {
            return Err(ParseError::BadRowCount(rows.len()))
        }
        let mut fresh = Self::new(self.rules);
        for (r, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != side_len {
                return Err(ParseError::BadLineLen { row: r, len })
            }
            for (c, ch) in line.chars().enumerate() {
                if ch == '.' {
                    continue
                }
                let piece = Piece::try_from(ch)?;
                fresh.recruit(piece, Tile::new(r as u8, c as u8))
                    .expect("each snapshot tile is visited once");
            }
        }
        debug!(
            "Loaded snapshot with {} white, {} black and {} wall pieces",
            fresh.roster(Side::White).len(),
            fresh.roster(Side::Black).len(),
            fresh.walls.len()
        );
        *self = fresh;
        Ok(())
    }

    /// Render the board as a snapshot: one line per row, `.` for empty tiles.
    pub fn to_display_str(&self) -> String {
        let side_len = self.grid.side_len() as usize;
        let mut s = String::with_capacity(side_len * (side_len + 1));
        for t in self.grid.iter_tiles() {
            s.push(match self.piece_at(t) {
                Some(id) => char::from(*self.piece(id)),
                None => '.'
            });
            if t.col as usize == side_len - 1 {
                s.push('\n');
            }
        }
        s
    }

    /// Place an off-board piece onto a tile.
    pub(crate) fn put(&mut self, id: PieceId, tile: Tile) -> Result<(), BoardError> {
        if self.pieces[id.0].is_on_board() {
            return Err(BoardError::PieceAlreadyPlaced(id))
        }
        self.grid.place(tile, id)?;
        self.pieces[id.0].tile = Some(tile);
        Ok(())
    }

    /// Take a piece off the board, returning the tile it stood on. Roster membership is
    /// unaffected.
    pub(crate) fn lift(&mut self, id: PieceId) -> Result<Tile, BoardError> {
        let tile = self.pieces[id.0].tile.ok_or(BoardError::PieceOffBoard(id))?;
        self.grid.remove(tile)?;
        self.pieces[id.0].tile = None;
        Ok(tile)
    }

    /// Move a piece to another tile, returning the tile it left. The destination is claimed
    /// before the origin is released, so a failure leaves the piece where it was.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Tile) -> Result<Tile, BoardError> {
        let from = self.pieces[id.0].tile.ok_or(BoardError::PieceOffBoard(id))?;
        self.grid.place(to, id)?;
        if let Err(e) = self.grid.remove(from) {
            self.grid.remove(to)?;
            return Err(e)
        }
        self.pieces[id.0].tile = Some(to);
        Ok(from)
    }

    /// Remove a piece from the roster it belongs to, returning its former index.
    pub(crate) fn discharge(&mut self, id: PieceId) -> Option<usize> {
        let side = self.pieces[id.0].side;
        self.roster_for(side).remove(id)
    }

    /// Return a piece to the roster of its side at the given index.
    pub(crate) fn enlist(&mut self, id: PieceId, index: usize) {
        let side = self.pieces[id.0].side;
        self.roster_for(side).insert(index, id);
    }

    /// Switch a piece to the other army, appending it to that army's roster. Returns the index it
    /// held in its old roster.
    pub fn defect(&mut self, id: PieceId) -> Result<usize, BoardError> {
        let side = self.pieces[id.0].side.ok_or(BoardError::NoAllegiance(id))?;
        let index = self.armies[side.index()].remove(id).ok_or(BoardError::PieceOffBoard(id))?;
        self.pieces[id.0].side = Some(side.other());
        self.armies[side.other().index()].add(id);
        Ok(index)
    }

    /// Put a piece back into the army of `side` at exactly the given roster index, undoing a
    /// [`Match::defect`].
    pub(crate) fn restore_allegiance(&mut self, id: PieceId, side: Side, index: usize) {
        self.discharge(id);
        self.pieces[id.0].side = Some(side);
        self.armies[side.index()].insert(index, id);
    }

    /// Raise a new wall on an empty tile.
    pub(crate) fn push_wall(&mut self, tile: Tile) -> Result<PieceId, BoardError> {
        self.recruit(Piece::wall(), tile)
    }

    /// Remove the most recently raised wall from the board, its roster and the arena.
    pub(crate) fn pop_wall(&mut self, id: PieceId) -> Result<(), BoardError> {
        if id.0 + 1 != self.pieces.len() {
            return Err(BoardError::UndoOutOfOrder(id))
        }
        self.lift(id)?;
        self.walls.remove(id);
        self.pieces.pop();
        Ok(())
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new(Ruleset::default())
    }
}

impl FromStr for Match {
    type Err = ParseError;

    /// Parse a snapshot using the standard rules.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_snapshot(Ruleset::default(), s)
    }
}

impl Display for Match {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_display_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{BoardError, ParseError};
    use crate::game::Match;
    use crate::pieces::PieceKind::{Infantry, Sovereign, Wall};
    use crate::pieces::Side::{Black, White};
    use crate::pieces::Piece;
    use crate::preset::{boards, rules};
    use crate::tiles::Tile;
    use std::str::FromStr;

    const EMPTY_ROW: &str = ".........";

    #[test]
    fn test_load_standard() {
        let game = Match::from_snapshot(rules::STANDARD, boards::STANDARD).unwrap();
        assert_eq!(game.roster(Black).len(), 18);
        assert_eq!(game.roster(White).len(), 18);
        assert!(game.walls().is_empty());
        let g = game.piece_at(Tile::new(8, 4)).unwrap();
        assert_eq!(game.piece(g).kind, Sovereign);
        assert_eq!(game.piece(g).side, Some(White));
        let z = game.piece_at(Tile::new(1, 1)).unwrap();
        assert_eq!(*game.piece(z), Piece { kind: Infantry, side: Some(Black), tile: Some(Tile::new(1, 1)) });
        assert_eq!(game.to_display_str(), boards::STANDARD);
    }

    #[test]
    fn test_round_trip() {
        let snapshot = "\
g........
..#......
...z.....
.........
....J....
.........
.....#...
.........
........G
";
        let game = Match::from_str(snapshot).unwrap();
        assert_eq!(game.walls().len(), 2);
        let written = game.to_string();
        assert_eq!(written, snapshot);
        let reloaded = Match::from_str(&written).unwrap();
        assert_eq!(reloaded, game);
        let wall = game.piece_at(Tile::new(1, 2)).unwrap();
        assert_eq!(game.piece(wall).kind, Wall);
        assert_eq!(game.piece(wall).side, None);
    }

    #[test]
    fn test_bad_snapshots() {
        let short = [EMPTY_ROW; 8].join("\n");
        assert_eq!(Match::from_str(&short), Err(ParseError::BadRowCount(8)));

        let mut rows = [EMPTY_ROW; 9].map(String::from);
        rows[3] = "....".to_string();
        assert_eq!(Match::from_str(&rows.join("\n")), Err(ParseError::BadLineLen { row: 3, len: 4 }));

        let mut rows = [EMPTY_ROW; 9].map(String::from);
        rows[5] = "....q....".to_string();
        assert_eq!(Match::from_str(&rows.join("\n")), Err(ParseError::BadChar('q')));

        let long = [EMPTY_ROW; 10].join("\n");
        assert_eq!(Match::from_str(&long), Err(ParseError::BadRowCount(10)));

        let trailing = format!("{}\n\n\n", [EMPTY_ROW; 9].join("\n"));
        assert!(Match::from_str(&trailing).is_ok());
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let mut game = Match::from_str(boards::STANDARD).unwrap();
        let before = game.clone();
        assert!(game.load("nonsense").is_err());
        assert_eq!(game, before);
        game.load(&[EMPTY_ROW; 9].join("\n")).unwrap();
        assert!(game.roster(White).is_empty());
        assert!(game.roster(Black).is_empty());
        assert_eq!(game.arena_len(), 0);
    }

    #[test]
    fn test_defect() {
        let mut game = Match::from_str(boards::STANDARD).unwrap();
        let z = game.piece_at(Tile::new(1, 1)).unwrap();
        let index = game.defect(z).unwrap();
        assert_eq!(game.piece(z).side, Some(White));
        assert!(game.roster(White).contains(z));
        assert!(!game.roster(Black).contains(z));
        assert_eq!(game.roster(Black).len(), 17);
        game.restore_allegiance(z, Black, index);
        assert_eq!(game, Match::from_str(boards::STANDARD).unwrap());

        let wall = game.recruit(Piece::wall(), Tile::new(4, 4)).unwrap();
        assert_eq!(game.defect(wall), Err(BoardError::NoAllegiance(wall)));
    }

    #[test]
    fn test_relocate_and_walls() {
        let mut game = Match::from_str(boards::STANDARD).unwrap();
        let z = game.piece_at(Tile::new(1, 1)).unwrap();
        assert_eq!(
            game.relocate(z, Tile::new(0, 0)),
            Err(BoardError::CellOccupied(Tile::new(0, 0)))
        );
        assert_eq!(game.piece(z).tile, Some(Tile::new(1, 1)));
        assert_eq!(game.relocate(z, Tile::new(2, 1)), Ok(Tile::new(1, 1)));
        assert_eq!(game.piece_at(Tile::new(2, 1)), Some(z));
        assert_eq!(game.piece_at(Tile::new(1, 1)), None);

        let w1 = game.push_wall(Tile::new(4, 4)).unwrap();
        let w2 = game.push_wall(Tile::new(4, 5)).unwrap();
        assert_eq!(game.pop_wall(w1), Err(BoardError::UndoOutOfOrder(w1)));
        game.pop_wall(w2).unwrap();
        game.pop_wall(w1).unwrap();
        assert!(game.walls().is_empty());
        assert_eq!(game.arena_len(), 36);
        assert_eq!(game.put(z, Tile::new(5, 5)), Err(BoardError::PieceAlreadyPlaced(z)));
        assert_eq!(game.lift(z), Ok(Tile::new(2, 1)));
        assert_eq!(game.lift(z), Err(BoardError::PieceOffBoard(z)));
    }
}
