use crate::error::ParseError::{BadChar, EmptyString};
use crate::error::ParseError;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Add;
use std::str::FromStr;

/// An offset which can be applied to [`Coords`] and which is composed of the row and column offset
/// to be applied.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RowColOffset {
    pub row: i8,
    pub col: i8
}

impl RowColOffset {
    pub fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Return the Manhattan distance represented by this offset.
    pub fn manhattan_dist(&self) -> u8 {
        self.row.unsigned_abs() + self.col.unsigned_abs()
    }

    /// Return the Chebyshev (king-move) distance represented by this offset.
    pub fn chebyshev_dist(&self) -> u8 {
        self.row.unsigned_abs().max(self.col.unsigned_abs())
    }

    /// Whether the offset lies along a single row or column.
    pub fn is_orthogonal(&self) -> bool {
        (self.row == 0) != (self.col == 0)
    }

    /// Whether the offset lies along a diagonal.
    pub fn is_diagonal(&self) -> bool {
        self.row != 0 && self.row.unsigned_abs() == self.col.unsigned_abs()
    }

    /// Whether the offset lies along a row, column or diagonal.
    pub fn is_straight(&self) -> bool {
        self.is_orthogonal() || self.is_diagonal()
    }

    /// The single-step offset pointing in the same direction as this one. Only meaningful for
    /// straight offsets.
    pub fn unit(&self) -> RowColOffset {
        RowColOffset::new(self.row.signum(), self.col.signum())
    }

    /// Absolute row and column distances, ignoring direction.
    pub fn abs(&self) -> (u8, u8) {
        (self.row.unsigned_abs(), self.col.unsigned_abs())
    }
}

/// An unbounded row-column pair representing a hypothetical location, which may or may not be on
/// the board. Can be used to represent out-of-bounds locations, including those with negative row
/// or column values.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Coords {
    pub row: i8,
    pub col: i8
}

impl Coords {
    pub fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn row_col_offset_from(&self, other: Coords) -> RowColOffset {
        RowColOffset {
            row: self.row - other.row,
            col: self.col - other.col
        }
    }
}

impl From<Tile> for Coords {
    fn from(t: Tile) -> Self {
        Self {
            row: t.row as i8,
            col: t.col as i8
        }
    }
}

impl Add<RowColOffset> for Coords {
    type Output = Self;

    fn add(self, rhs: RowColOffset) -> Self {
        Self {
            row: self.row + rhs.row,
            col: self.col + rhs.col
        }
    }
}

/// The location of a single tile on the board, ie, row and column. Row 0 is the top row of a
/// snapshot. This struct is only a reference to a location on the board, and does not contain any
/// other information such as piece placement.
///
/// Avoid constructing `Tile`s which may refer to positions not on the game board (use [`Coords`]
/// for that instead).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Tile {
    pub row: u8,
    pub col: u8
}

impl Tile {
    /// Create a new [`Tile`] with the given row and column.
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// The offset that leads from `self` to `other`.
    pub fn offset_to(&self, other: Tile) -> RowColOffset {
        Coords::from(other).row_col_offset_from(Coords::from(*self))
    }
}

impl Debug for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile(row={}, col={})", self.row, self.col)
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (self.col + 97) as char, self.row + 1)
    }
}

impl FromStr for Tile {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let col = if let Some(&byte) = s.as_bytes().first() {
            if !(97..=122).contains(&byte) {
                return Err(BadChar(byte as char))
            }
            byte - 97
        } else {
            return Err(EmptyString)
        };
        let row = s[1..].parse::<u8>()?.checked_sub(1).ok_or(BadChar('0'))?;
        Ok(Tile::new(row, col))
    }
}

impl From<Tile> for (u8, u8) {
    fn from(value: Tile) -> Self {
        (value.row, value.col)
    }
}

/// Iterator over all tiles on a board, row by row starting at the top.
pub struct TileIterator {
    side_len: u8,
    current_row: u8,
    current_col: u8
}

impl TileIterator {
    pub(crate) fn new(side_len: u8) -> Self {
        Self {
            side_len,
            current_row: 0,
            current_col: 0
        }
    }
}

impl Iterator for TileIterator {
    type Item = Tile;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row >= self.side_len {
            return None
        }
        let tile = Tile::new(self.current_row, self.current_col);
        if self.current_col >= self.side_len - 1 {
            self.current_row += 1;
            self.current_col = 0;
        } else {
            self.current_col += 1;
        }
        Some(tile)
    }
}
