use crate::pieces::{PieceId, Side};
use crate::tiles::Tile;
use std::num::ParseIntError;
use thiserror::Error;

/// Errors that may be encountered when parsing a string.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    /// Tried to parse a multi-line board string but encountered a line that was not the expected
    /// length.
    #[error("row {row} has {len} cells")]
    BadLineLen { row: usize, len: usize },
    /// The board string did not contain the expected number of rows. The given `usize` is the
    /// actual number of rows.
    #[error("snapshot has {0} rows")]
    BadRowCount(usize),
    /// Encountered an unexpected character in a string.
    #[error("unexpected character {0:?}")]
    BadChar(char),
    /// Tried to parse a string that does not name a side.
    #[error("unknown side {0:?}")]
    BadSide(String),
    /// Tried to parse an empty string.
    #[error("empty string")]
    EmptyString,
    /// Could not parse an integer from a string.
    #[error(transparent)]
    BadInt(#[from] ParseIntError),
}

/// Violated preconditions on the board or on the pieces. These signal a bug in the caller rather
/// than an illegal move, and the operation that produced them should be abandoned.
#[derive(Debug, Error, Eq, PartialEq, Copy, Clone)]
pub enum BoardError {
    /// Coordinates are out of bounds, ie, not on board.
    #[error("coordinates out of bounds")]
    OutOfBounds,
    /// Tried to place a piece on a tile that already holds one.
    #[error("tile {0} is already occupied")]
    CellOccupied(Tile),
    /// There is no piece at the given tile, where one is expected.
    #[error("tile {0} is empty")]
    CellEmpty(Tile),
    /// The piece is expected to be on the board but is not.
    #[error("piece {0:?} is not on the board")]
    PieceOffBoard(PieceId),
    /// The piece is expected to be off the board but is already placed.
    #[error("piece {0:?} is already on the board")]
    PieceAlreadyPlaced(PieceId),
    /// The side has no sovereign, so its safety cannot be assessed.
    #[error("{0} has no sovereign")]
    NoSovereign(Side),
    /// Tried to change the allegiance of a piece that belongs to neither side.
    #[error("piece {0:?} belongs to no side")]
    NoAllegiance(PieceId),
    /// Tried to undo an action that has not been applied.
    #[error("action has not been applied")]
    NotApplied,
    /// Tried to undo a wall construction while later pieces exist.
    #[error("wall {0:?} is not the most recently recruited piece")]
    UndoOutOfOrder(PieceId),
}

/// Different ways an [`crate::action::Action`] can be invalid.
#[derive(Debug, Error, Eq, PartialEq, Copy, Clone)]
pub enum ActionInvalid {
    /// The acting piece is not on the board.
    #[error("actor is not on the board")]
    ActorOffBoard,
    /// The acting piece is a wall, which belongs to no side.
    #[error("actor belongs to no side")]
    NeutralActor,
    /// The actor has moved since the action was created.
    #[error("actor is no longer on its origin tile")]
    StaleOrigin,
    /// The target tile would be outside the board.
    #[error("target is out of bounds")]
    OutOfBounds,
    /// The movement or attack rules of the acting piece do not permit this target.
    #[error("rules forbid this target")]
    RuleForbids,
    /// A relocation or wall construction targets an occupied tile.
    #[error("target tile is occupied")]
    TargetOccupied,
    /// A capture or wall destruction targets an empty tile.
    #[error("target tile is empty")]
    TargetEmpty,
    /// A capture targets a piece of the actor's own side.
    #[error("target belongs to the acting side")]
    FriendlyTarget,
    /// A capture targets a wall.
    #[error("walls cannot be captured")]
    TargetIsWall,
    /// A wall destruction targets something other than a wall.
    #[error("target is not a wall")]
    NotAWall,
    /// The acting piece cannot perform this kind of action.
    #[error("piece cannot perform this action")]
    WrongPiece,
    /// The target is covered by an enemy guardian.
    #[error("target is protected by an enemy guardian")]
    Protected,
    /// The action has already been applied.
    #[error("action already applied")]
    AlreadyApplied,
    /// A board precondition was violated while applying.
    #[error(transparent)]
    Board(#[from] BoardError),
}
