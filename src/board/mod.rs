/// Code relating to a single board location.
pub mod cell;

/// Code relating to the board geometry and the cells it owns.
pub mod geometry;
