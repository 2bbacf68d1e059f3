pub mod rules {
    use crate::rules::Neighbourhood::{Orthogonal, Surrounding};
    use crate::rules::SiegeMovement::{Bombard, Step};
    use crate::rules::Ruleset;

    /// The standard rules: guardians cover all eight neighbours, siege engines move as they
    /// bombard and wyrms never land next to their starting tile.
    pub const STANDARD: Ruleset = Ruleset {
        side_len: 9,
        guardian_zone: Surrounding,
        siege_movement: Bombard,
        wyrm_adjacent_moves: false
    };

    /// The older house rules, in which guardians only cover their four orthogonal neighbours,
    /// siege engines step one tile at a time and wyrms may move to adjacent tiles.
    pub const CLASSIC: Ruleset = Ruleset {
        side_len: 9,
        guardian_zone: Orthogonal,
        siege_movement: Step,
        wyrm_adjacent_moves: true
    };
}

pub mod boards {
    /// The standard starting position. Black occupies the top two rows.
    pub const STANDARD: &str = "\
bdcjgjcdb
mzzszszzm
.........
.........
.........
.........
.........
MZZSZSZZM
BDCJGJCDB
";
}
