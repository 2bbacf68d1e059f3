use crate::action::Action;
use crate::error::BoardError;
use crate::game::Match;
use crate::pieces::Side;
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks one of a set of legal actions. The engine only ever offers legal actions, so choosers
/// decide preference, never legality.
pub trait ActionChooser {
    /// Return the index into `actions` of the action to play, or `None` to play nothing. `game` is
    /// lent mutably so that a chooser can simulate actions; it must be left as it was found.
    fn choose(&mut self, game: &mut Match, side: Side, actions: &[Action]) -> Result<Option<usize>, BoardError>;
}

impl<C: ActionChooser + ?Sized> ActionChooser for Box<C> {
    fn choose(&mut self, game: &mut Match, side: Side, actions: &[Action]) -> Result<Option<usize>, BoardError> {
        (**self).choose(game, side, actions)
    }
}

/// Chooses uniformly at random.
pub struct RandomChooser {
    rng: StdRng
}

impl RandomChooser {
    /// A chooser seeded from the operating system.
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// A chooser that makes the same choices every time for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionChooser for RandomChooser {
    fn choose(&mut self, _game: &mut Match, _side: Side, actions: &[Action]) -> Result<Option<usize>, BoardError> {
        if actions.is_empty() {
            return Ok(None)
        }
        Ok(Some(self.rng.gen_range(0..actions.len())))
    }
}

/// Always chooses the first action offered.
#[derive(Copy, Clone, Debug, Default)]
pub struct FirstChooser;

impl ActionChooser for FirstChooser {
    fn choose(&mut self, _game: &mut Match, _side: Side, actions: &[Action]) -> Result<Option<usize>, BoardError> {
        Ok(if actions.is_empty() { None } else { Some(0) })
    }
}

/// Chooses the action leaving the best material balance for the acting side. Ties go to the
/// earliest action.
#[derive(Copy, Clone, Debug, Default)]
pub struct MaterialChooser;

impl ActionChooser for MaterialChooser {
    fn choose(&mut self, game: &mut Match, side: Side, actions: &[Action]) -> Result<Option<usize>, BoardError> {
        let mut best: Option<(usize, i32)> = None;
        for (i, action) in actions.iter().enumerate() {
            let Some(score) = game.simulate(action, |g| Ok(g.evaluate(side)))? else { continue };
            trace!("{action} scores {score}");
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((i, score));
            }
        }
        Ok(best.map(|(i, _)| i))
    }
}

#[cfg(test)]
mod tests {
    use crate::chooser::{ActionChooser, FirstChooser, MaterialChooser, RandomChooser};
    use crate::game::Match;
    use crate::pieces::Side::White;
    use crate::preset::boards;
    use std::str::FromStr;

    #[test]
    fn test_empty_choices() {
        let mut game = Match::from_str(boards::STANDARD).unwrap();
        assert_eq!(FirstChooser.choose(&mut game, White, &[]), Ok(None));
        assert_eq!(MaterialChooser.choose(&mut game, White, &[]), Ok(None));
        assert_eq!(RandomChooser::seeded(1).choose(&mut game, White, &[]), Ok(None));
    }

    #[test]
    fn test_seeded_random_is_repeatable() {
        let mut game = Match::from_str(boards::STANDARD).unwrap();
        let actions = game.legal_actions(White).unwrap();
        let mut a = RandomChooser::seeded(42);
        let mut b = RandomChooser::seeded(42);
        for _ in 0..10 {
            let i = a.choose(&mut game, White, &actions).unwrap();
            assert_eq!(i, b.choose(&mut game, White, &actions).unwrap());
            assert!(i.unwrap() < actions.len());
        }
    }

    #[test]
    fn test_material_prefers_captures() {
        let mut game = Match::from_str(boards::STANDARD).unwrap();
        let before = game.clone();
        let actions = game.legal_actions(White).unwrap();
        let i = MaterialChooser.choose(&mut game, White, &actions).unwrap().unwrap();
        assert_eq!(actions[i].to_string(), "a8xa2");
        assert_eq!(game, before);
    }
}
