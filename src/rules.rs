/// Which tiles around a guardian are covered by its protection.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Neighbourhood {
    /// The four tiles sharing an edge with the guardian.
    Orthogonal,
    /// All eight tiles touching the guardian.
    Surrounding
}

/// How siege engines move (their attack is always the bombardment pattern).
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum SiegeMovement {
    /// Siege engines move along the same fixed patterns they bombard.
    Bombard,
    /// Siege engines trundle one tile along a row or column.
    Step
}

/// A struct describing the variable rules of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ruleset {
    /// Length of each side of the (square) board. At most 15.
    pub side_len: u8,
    /// The tiles protected by a guardian.
    pub guardian_zone: Neighbourhood,
    /// How siege engines move.
    pub siege_movement: SiegeMovement,
    /// Whether a wyrm may move (but not attack) onto a tile adjacent to it.
    pub wyrm_adjacent_moves: bool
}

impl Default for Ruleset {
    fn default() -> Self {
        crate::preset::rules::STANDARD
    }
}
