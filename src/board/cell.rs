use crate::error::BoardError;
use crate::pieces::PieceId;
use crate::tiles::Tile;

/// One location on the board. A cell records which piece, if any, currently sits on it; it does
/// not own that piece.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Cell {
    tile: Tile,
    occupant: Option<PieceId>
}

impl Cell {
    pub(crate) fn new(tile: Tile) -> Self {
        Self { tile, occupant: None }
    }

    pub fn tile(&self) -> Tile {
        self.tile
    }

    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Whether `other` touches this cell along an edge or a corner.
    pub fn is_adjacent_to(&self, other: Tile) -> bool {
        self.tile.offset_to(other).chebyshev_dist() == 1
    }

    /// Whether `other` shares an edge with this cell.
    pub fn is_orthogonally_adjacent_to(&self, other: Tile) -> bool {
        self.tile.offset_to(other).manhattan_dist() == 1
    }

    /// Record `id` as sitting on this cell. Fails if the cell is already occupied.
    pub(crate) fn place(&mut self, id: PieceId) -> Result<(), BoardError> {
        if self.occupant.is_some() {
            return Err(BoardError::CellOccupied(self.tile))
        }
        self.occupant = Some(id);
        Ok(())
    }

    /// Clear the cell, returning whoever was on it. Fails if the cell is empty.
    pub(crate) fn remove(&mut self) -> Result<PieceId, BoardError> {
        self.occupant.take().ok_or(BoardError::CellEmpty(self.tile))
    }
}
