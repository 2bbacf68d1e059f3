use crate::error::ParseError;
use crate::error::ParseError::{BadChar, BadSide};
use crate::pieces::PieceKind::{
    Builder, Guardian, Infantry, Sapper, SiegeEngine, Sovereign, Trickster, Wall, Wyrm
};
use crate::pieces::Side::{Black, White};
use crate::tiles::Tile;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The two sides of the game. Black starts at the top of the board and advances down it; White
/// starts at the bottom and advances up.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Side {
    White = 0,
    Black = 1
}

impl Side {
    /// Return the other side.
    pub fn other(&self) -> Self {
        match self {
            White => Black,
            Black => White
        }
    }

    /// The sign of a forward step along the row axis.
    pub fn direction(&self) -> i8 {
        match self {
            White => -1,
            Black => 1
        }
    }

    /// Index of this side's roster in per-side arrays.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            White => write!(f, "white"),
            Black => write!(f, "black")
        }
    }
}

impl FromStr for Side {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(White),
            "black" | "b" => Ok(Black),
            _ => Err(BadSide(s.to_string()))
        }
    }
}

/// The different kinds of pieces that can occupy a board.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum PieceKind {
    /// Advances one row at a time and can leap two rows to attack.
    Infantry,
    /// Neutral obstacle which never moves.
    Wall,
    /// Steps in any direction and can raise walls.
    Builder,
    /// Slides along rows and columns and can tear down walls.
    Sapper,
    /// Steps in any direction, swaps places with friends and turns enemies.
    Trickster,
    /// Leaps in an L and protects the tiles around it.
    Guardian,
    /// Bombards tiles at a fixed distance without moving.
    SiegeEngine,
    /// Slides along rows, columns and diagonals, but never to an adjacent tile.
    Wyrm,
    /// The royal piece. Steps in any direction onto tiles the enemy does not threaten.
    Sovereign
}

impl PieceKind {
    /// The lowercase glyph used for this kind in board snapshots.
    pub fn glyph(&self) -> char {
        match self {
            Infantry => 'z',
            Wall => '#',
            Builder => 'b',
            Sapper => 'm',
            Trickster => 'j',
            Guardian => 's',
            SiegeEngine => 'c',
            Wyrm => 'd',
            Sovereign => 'g'
        }
    }

    /// Look up a kind by its lowercase glyph.
    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            'z' => Some(Infantry),
            '#' => Some(Wall),
            'b' => Some(Builder),
            'm' => Some(Sapper),
            'j' => Some(Trickster),
            's' => Some(Guardian),
            'c' => Some(SiegeEngine),
            'd' => Some(Wyrm),
            'g' => Some(Sovereign),
            _ => None
        }
    }

    /// Material value used when ranking positions.
    pub fn value(&self) -> i32 {
        match self {
            Wall => 0,
            Infantry => 1,
            Builder => 2,
            Trickster => 3,
            Sapper => 4,
            Guardian => 5,
            SiegeEngine => 6,
            Wyrm => 7,
            Sovereign => 1000
        }
    }
}

/// Handle to a piece owned by a [`crate::game::Match`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct PieceId(pub usize);

/// A single piece. Walls have no side; every other piece fights for exactly one side at a time,
/// which can change when it is turned by a trickster.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Option<Side>,
    pub tile: Option<Tile>
}

impl Piece {
    /// Create a new, unplaced piece of the given kind and side.
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side: Some(side), tile: None }
    }

    /// Create a new, unplaced wall.
    pub fn wall() -> Self {
        Self { kind: Wall, side: None, tile: None }
    }

    pub fn is_on_board(&self) -> bool {
        self.tile.is_some()
    }

    /// Whether this piece fights for `side`.
    pub fn is_on_side(&self, side: Side) -> bool {
        self.side == Some(side)
    }

    /// Whether this piece fights for the opponent of `side`. Walls are enemies of nobody.
    pub fn is_enemy_of(&self, side: Side) -> bool {
        self.side == Some(side.other())
    }
}

impl From<Piece> for char {
    /// A single-character representation of a given piece.
    fn from(value: Piece) -> Self {
        let c = value.kind.glyph();
        match value.side {
            Some(White) => c.to_ascii_uppercase(),
            _ => c
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = ParseError;
    fn try_from(value: char) -> Result<Self, Self::Error> {
        if value == '#' {
            return Ok(Piece::wall())
        }
        if !value.is_ascii_alphabetic() {
            return Err(BadChar(value))
        }
        let side = if value.is_ascii_uppercase() { White } else { Black };
        match PieceKind::from_glyph(value.to_ascii_lowercase()) {
            Some(Wall) | None => Err(BadChar(value)),
            Some(kind) => Ok(Piece::new(kind, side))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ParseError::{BadChar, BadSide};
    use crate::pieces::PieceKind::{Guardian, Infantry, Sovereign, Trickster, Wall};
    use crate::pieces::Side::{Black, White};
    use crate::pieces::{Piece, Side};
    use std::str::FromStr;

    #[test]
    fn test_piece_chars() {
        assert_eq!(Piece::try_from('z'), Ok(Piece::new(Infantry, Black)));
        assert_eq!(Piece::try_from('Z'), Ok(Piece::new(Infantry, White)));
        assert_eq!(Piece::try_from('S'), Ok(Piece::new(Guardian, White)));
        assert_eq!(Piece::try_from('#'), Ok(Piece::wall()));
        assert_eq!(Piece::try_from('x'), Err(BadChar('x')));
        assert_eq!(Piece::try_from('.'), Err(BadChar('.')));
        assert_eq!(char::from(Piece::new(Sovereign, White)), 'G');
        assert_eq!(char::from(Piece::new(Trickster, Black)), 'j');
        assert_eq!(char::from(Piece::wall()), '#');
        assert_eq!(Piece::wall().kind, Wall);
    }

    #[test]
    fn test_sides() {
        assert_eq!(White.other(), Black);
        assert_eq!(Black.other().other(), Black);
        assert_eq!(White.direction(), -1);
        assert_eq!(Black.direction(), 1);
        assert_eq!(Side::from_str("WHITE"), Ok(White));
        assert_eq!(Side::from_str("black"), Ok(Black));
        assert_eq!(Side::from_str("red"), Err(BadSide("red".to_string())));
        assert_eq!(White.to_string(), "white");
    }

    #[test]
    fn test_allegiance() {
        let p = Piece::new(Infantry, White);
        assert!(p.is_on_side(White));
        assert!(p.is_enemy_of(Black));
        assert!(!p.is_enemy_of(White));
        assert!(!Piece::wall().is_enemy_of(White));
        assert!(!Piece::wall().is_enemy_of(Black));
    }
}
