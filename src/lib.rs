//! This crate provides the rule engine for Advance, a two-player game of perfect information
//! played on a 9x9 board. It keeps track of the board and both armies, enumerates the legal
//! actions for a side, decides whether a side's sovereign is in danger and finds actions that
//! deliver checkmate in one. It is not a goal of this crate to provide a game client or any
//! strategy deeper than the one-ply checkmate search; choosing between legal actions is delegated
//! to an [`chooser::ActionChooser`].
//!
//! # Getting started
//!
//! - [`rules::Ruleset`]: Specifies the variable rules of the game. [`preset::rules`] contains the
//!   standard rules and an older variant.
//! - [`game::Match`]: Holds the board, the pieces and the rosters of both sides, and reads and
//!   writes board snapshots (see [`preset::boards`] for the standard starting position). All rule
//!   logic is implemented as methods on it: movement predicates, safety checks, legal action
//!   generation and checkmate search.
//! - [`action::Action`]: A single reversible transition. Search works by applying an action,
//!   inspecting the result and undoing it again, so undo restores the match exactly.
//!
//! # Pieces and handles
//!
//! Pieces are stored in an arena owned by the [`game::Match`] and are referred to by
//! [`pieces::PieceId`] everywhere else: board cells record the handle of their occupant, rosters
//! are ordered lists of handles and actions remember the handles they touched. A piece's side is
//! a plain [`pieces::Side`] value, so turning a piece with a trickster is just a matter of moving
//! its handle from one roster to the other.
//!
//! # Board snapshots
//!
//! A snapshot is one line per row, top row first, with one character per tile. `.` is an empty
//! tile and `#` a wall. Other pieces are written as a letter (see [`pieces::PieceKind::glyph`]),
//! lowercase for Black and uppercase for White.

/// Miscellaneous utilities used elsewhere in the crate.
#[macro_use]
mod utils;

/// Code for defining game rules.
pub mod rules;

/// Code relating to game pieces.
pub mod pieces;

/// Errors used elsewhere in the crate.
pub mod error;

/// Code for implementing a match, including legality, safety and checkmate search.
pub mod game;

/// Code relating to board tiles and coordinates.
pub mod tiles;

/// An implementation of a bitfield, used to hold sets of tiles.
pub mod bitfield;

/// Code relating to actions (ie, the transitions a piece can make) and their reversal.
pub mod action;

/// Per-piece movement and attack rules.
pub mod movement;

/// Ordered collections of the pieces fighting for one side.
pub mod roster;

/// Strategies for picking one of a set of legal actions.
pub mod chooser;

/// Pre-defined rulesets and board positions.
pub mod preset;

/// Code relating to the board, including its cells and geometry.
pub mod board;
