use crate::board::cell::Cell;
use crate::error::BoardError;
use crate::pieces::PieceId;
use crate::tiles::{Coords, RowColOffset, Tile, TileIterator};

/// Side length of the standard board.
pub const BOARD_SIZE: u8 = 9;

/// The largest board a [`Grid`] (and a [`crate::bitfield::GridMask`]) can describe.
pub const MAX_SIDE_LEN: u8 = 15;

const ORTHOGONAL_OFFSETS: [[i8; 2]; 4] = [[-1, 0], [1, 0], [0, -1], [0, 1]];
const SURROUNDING_OFFSETS: [[i8; 2]; 8] = [
    [-1, -1], [-1, 0], [-1, 1],
    [0, -1], [0, 1],
    [1, -1], [1, 0], [1, 1]
];

/// A fixed-size square board. The grid creates one [`Cell`] per coordinate when it is built and
/// keeps them for its whole lifetime; only their occupants change.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    side_len: u8,
    cells: Vec<Cell>
}

impl Grid {
    /// Create an empty board with the given side length.
    pub fn new(side_len: u8) -> Self {
        assert!((1..=MAX_SIDE_LEN).contains(&side_len), "unsupported board size {side_len}");
        let cells = TileIterator::new(side_len).map(Cell::new).collect();
        Self { side_len, cells }
    }

    pub fn side_len(&self) -> u8 {
        self.side_len
    }

    fn index(&self, tile: Tile) -> usize {
        tile.row as usize * self.side_len as usize + tile.col as usize
    }

    /// Check whether the given tile is on the board.
    pub fn tile_in_bounds(&self, tile: Tile) -> bool {
        let r = 0..self.side_len;
        r.contains(&tile.row) && r.contains(&tile.col)
    }

    /// Check whether the coords refer to a position on the board.
    pub fn coords_in_bounds(&self, coords: Coords) -> bool {
        let range = 0..(self.side_len as i8);
        range.contains(&coords.row) && range.contains(&coords.col)
    }

    /// Convert an unbounded [`Coords`] to a [`Tile`] representing a position on the board, if
    /// possible. If the coords represents a position not on the board, return a
    /// [`BoardError::OutOfBounds`] error.
    pub fn coords_to_tile(&self, coords: Coords) -> Result<Tile, BoardError> {
        if self.coords_in_bounds(coords) {
            Ok(Tile::new(coords.row as u8, coords.col as u8))
        } else {
            Err(BoardError::OutOfBounds)
        }
    }

    /// The tile reached by applying `offset` to `tile`, if it is on the board.
    pub fn offset_tile(&self, tile: Tile, offset: RowColOffset) -> Option<Tile> {
        self.coords_to_tile(Coords::from(tile) + offset).ok()
    }

    /// Bounds-checked lookup by row and column.
    pub fn lookup(&self, row: i8, col: i8) -> Option<&Cell> {
        let tile = self.coords_to_tile(Coords::new(row, col)).ok()?;
        self.cell(tile)
    }

    pub fn cell(&self, tile: Tile) -> Option<&Cell> {
        if self.tile_in_bounds(tile) {
            self.cells.get(self.index(tile))
        } else {
            None
        }
    }

    fn cell_mut(&mut self, tile: Tile) -> Result<&mut Cell, BoardError> {
        if !self.tile_in_bounds(tile) {
            return Err(BoardError::OutOfBounds)
        }
        let i = self.index(tile);
        self.cells.get_mut(i).ok_or(BoardError::OutOfBounds)
    }

    /// The piece on the given tile, if any. Out-of-bounds tiles are empty.
    pub fn occupant(&self, tile: Tile) -> Option<PieceId> {
        self.cell(tile).and_then(Cell::occupant)
    }

    /// Whether the tile is on the board and unoccupied.
    pub fn is_free(&self, tile: Tile) -> bool {
        self.cell(tile).is_some_and(Cell::is_free)
    }

    pub(crate) fn place(&mut self, tile: Tile, id: PieceId) -> Result<(), BoardError> {
        self.cell_mut(tile)?.place(id)
    }

    pub(crate) fn remove(&mut self, tile: Tile) -> Result<PieceId, BoardError> {
        self.cell_mut(tile)?.remove()
    }

    /// Empty every cell.
    pub(crate) fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = Cell::new(cell.tile());
        }
    }

    fn neighbors_by(&self, tile: Tile, offsets: &[[i8; 2]]) -> Vec<Tile> {
        offsets.iter()
            .filter_map(|[r, c]| self.offset_tile(tile, RowColOffset::new(*r, *c)))
            .collect()
    }

    /// Find a tile's orthogonal neighbours (ie, the tiles directly above, below and to either side
    /// of it).
    pub fn orthogonal_neighbors(&self, tile: Tile) -> Vec<Tile> {
        self.neighbors_by(tile, &ORTHOGONAL_OFFSETS)
    }

    /// Find all eight tiles touching the given tile.
    pub fn neighbors(&self, tile: Tile) -> Vec<Tile> {
        self.neighbors_by(tile, &SURROUNDING_OFFSETS)
    }

    /// Get all the tiles strictly between the given two tiles. If the tiles do not share a row,
    /// column or diagonal, an empty vector is returned.
    pub fn tiles_between(&self, t1: Tile, t2: Tile) -> Vec<Tile> {
        let offset = t1.offset_to(t2);
        if !offset.is_straight() {
            return vec![]
        }
        let step = offset.unit();
        let mut tiles = vec![];
        let mut current = Coords::from(t1) + step;
        let end = Coords::from(t2);
        while current != end {
            if let Ok(t) = self.coords_to_tile(current) {
                tiles.push(t);
            }
            current = current + step;
        }
        tiles
    }

    /// Whether every tile strictly between the two tiles is empty.
    pub fn path_clear(&self, t1: Tile, t2: Tile) -> bool {
        self.tiles_between(t1, t2).iter().all(|t| self.is_free(*t))
    }

    /// Return an iterator over all tiles on the board.
    pub fn iter_tiles(&self) -> TileIterator {
        TileIterator::new(self.side_len)
    }

    /// Return an iterator over all cells on the board, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::board::geometry::{Grid, BOARD_SIZE};
    use crate::error::BoardError;
    use crate::pieces::PieceId;
    use crate::tiles::{Coords, Tile};
    use crate::utils::check_tile_vec;

    #[test]
    fn test_bounds() {
        let g = Grid::new(BOARD_SIZE);
        assert_eq!(g.iter_cells().count(), 81);
        assert!(g.lookup(0, 0).is_some());
        assert!(g.lookup(8, 8).is_some());
        assert!(g.lookup(-1, 0).is_none());
        assert!(g.lookup(0, 9).is_none());
        assert_eq!(g.lookup(4, 5).map(|c| c.tile()), Some(Tile::new(4, 5)));
        assert_eq!(g.coords_to_tile(Coords::new(9, 0)), Err(BoardError::OutOfBounds));
        assert!(g.cell(Tile::new(9, 9)).is_none());
    }

    #[test]
    fn test_neighbors() {
        let g = Grid::new(BOARD_SIZE);
        check_tile_vec(
            g.orthogonal_neighbors(Tile::new(0, 0)),
            vec![Tile::new(1, 0), Tile::new(0, 1)]
        );
        check_tile_vec(
            g.neighbors(Tile::new(0, 0)),
            vec![Tile::new(1, 0), Tile::new(0, 1), Tile::new(1, 1)]
        );
        assert_eq!(g.neighbors(Tile::new(4, 4)).len(), 8);
        assert_eq!(g.orthogonal_neighbors(Tile::new(4, 4)).len(), 4);
        assert_eq!(g.neighbors(Tile::new(8, 3)).len(), 5);
    }

    #[test]
    fn test_tiles_between() {
        let g = Grid::new(BOARD_SIZE);
        check_tile_vec(
            g.tiles_between(Tile::new(1, 1), Tile::new(1, 4)),
            vec![Tile::new(1, 2), Tile::new(1, 3)]
        );
        check_tile_vec(
            g.tiles_between(Tile::new(5, 2), Tile::new(2, 2)),
            vec![Tile::new(4, 2), Tile::new(3, 2)]
        );
        check_tile_vec(
            g.tiles_between(Tile::new(0, 4), Tile::new(3, 1)),
            vec![Tile::new(1, 3), Tile::new(2, 2)]
        );
        assert!(g.tiles_between(Tile::new(0, 0), Tile::new(1, 2)).is_empty());
        assert!(g.tiles_between(Tile::new(0, 0), Tile::new(0, 1)).is_empty());
    }

    #[test]
    fn test_path_clear() {
        let mut g = Grid::new(BOARD_SIZE);
        assert!(g.path_clear(Tile::new(0, 0), Tile::new(0, 8)));
        g.place(Tile::new(0, 4), PieceId(0)).unwrap();
        assert!(!g.path_clear(Tile::new(0, 0), Tile::new(0, 8)));
        assert!(g.path_clear(Tile::new(0, 0), Tile::new(0, 4)));
        assert!(!g.is_free(Tile::new(0, 4)));
        assert!(!g.is_free(Tile::new(9, 0)));
        assert_eq!(g.place(Tile::new(0, 4), PieceId(1)), Err(BoardError::CellOccupied(Tile::new(0, 4))));
        assert_eq!(g.remove(Tile::new(0, 4)), Ok(PieceId(0)));
        assert_eq!(g.remove(Tile::new(0, 4)), Err(BoardError::CellEmpty(Tile::new(0, 4))));
        assert_eq!(g.place(Tile::new(10, 0), PieceId(1)), Err(BoardError::OutOfBounds));
    }
}
