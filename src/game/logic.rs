use crate::action::{Action, ActionKind};
use crate::bitfield::GridMask;
use crate::chooser::ActionChooser;
use crate::error::{ActionInvalid, BoardError};
use crate::game::Match;
use crate::pieces::PieceKind::{Guardian, Sovereign, Trickster};
use crate::pieces::{PieceId, Side};
use crate::rules::Neighbourhood;
use crate::tiles::Tile;
use log::{debug, info, trace};

const ATTACK_KINDS: [ActionKind; 3] = [
    ActionKind::Capture,
    ActionKind::ConstructWall,
    ActionKind::DestroyWall
];

/// Legality, safety and search. Nothing here keeps state between calls: every answer is computed
/// from the board and rosters as they stand, and every simulation is undone before returning.
impl Match {
    /// The sovereign of `side`. Its absence is a broken invariant, not a game state.
    pub fn sovereign(&self, side: Side) -> Result<PieceId, BoardError> {
        self.roster(side)
            .iter()
            .find(|id| self.piece(*id).kind == Sovereign)
            .ok_or(BoardError::NoSovereign(side))
    }

    /// Every tile covered by an on-board guardian of `side`.
    pub fn protection_zone(&self, side: Side) -> GridMask {
        let mut zone = GridMask::new(self.grid().side_len());
        for id in self.roster(side).iter() {
            let piece = self.piece(id);
            if piece.kind != Guardian {
                continue
            }
            let Some(at) = piece.tile else { continue };
            match self.rules().guardian_zone {
                Neighbourhood::Orthogonal => zone.extend(self.grid().orthogonal_neighbors(at)),
                Neighbourhood::Surrounding => zone.extend(self.grid().neighbors(at))
            }
        }
        zone
    }

    /// Every tile that some on-board piece of `side` threatens.
    pub fn threat_map(&self, side: Side) -> GridMask {
        let mut threats = GridMask::new(self.grid().side_len());
        threats.extend(self.grid().iter_tiles().filter(|t| self.is_threatened_by(side, *t)));
        threats
    }

    /// Whether `tile` is shielded from a capture by `actor`, ie, lies in the protection zone of a
    /// guardian on the other side. Tricksters ignore protection.
    pub fn is_protected_from(&self, actor: PieceId, tile: Tile) -> bool {
        let piece = self.piece(actor);
        match piece.side {
            Some(side) if piece.kind != Trickster => self.protection_zone(side.other()).contains(tile),
            _ => false
        }
    }

    /// Whether the sovereign of `side` is out of danger: no enemy piece can attack its tile, or a
    /// friendly guardian covers it.
    pub fn is_royal_safe(&self, side: Side) -> Result<bool, BoardError> {
        let sovereign = self.sovereign(side)?;
        let at = self.piece(sovereign).tile.ok_or(BoardError::PieceOffBoard(sovereign))?;
        if self.protection_zone(side).contains(at) {
            return Ok(true)
        }
        let attacked = self.roster(side.other())
            .iter()
            .any(|id| self.piece(id).is_on_board() && self.can_attack(id, at));
        Ok(!attacked)
    }

    fn collect_actions(&self, side: Side, kinds: &[ActionKind]) -> Vec<Action> {
        let mut actions = vec![];
        for id in self.roster(side).iter() {
            let Some(origin) = self.piece(id).tile else { continue };
            for target in self.grid().iter_tiles() {
                for kind in kinds {
                    let action = Action::new(*kind, id, origin, target);
                    if action.validate(self).is_ok() {
                        actions.push(action);
                    }
                }
            }
        }
        actions
    }

    /// Every relocation (including trickster swaps) open to the on-board pieces of `side`,
    /// ignoring the safety of its sovereign.
    pub fn candidate_moves(&self, side: Side) -> Vec<Action> {
        self.collect_actions(side, &[ActionKind::Relocate])
    }

    /// Every capture, wall construction and wall destruction open to the on-board pieces of
    /// `side`, ignoring the safety of its sovereign.
    pub fn candidate_attacks(&self, side: Side) -> Vec<Action> {
        self.collect_actions(side, &ATTACK_KINDS)
    }

    /// Apply a copy of `action`, run `f` on the resulting position and undo again. Returns
    /// `Ok(None)` if the action is not legal here.
    pub fn simulate<R>(
        &mut self,
        action: &Action,
        f: impl FnOnce(&mut Match) -> Result<R, BoardError>
    ) -> Result<Option<R>, BoardError> {
        let mut trial = action.fresh();
        match trial.apply(self) {
            Ok(()) => {},
            Err(ActionInvalid::Board(e)) => return Err(e),
            Err(e) => {
                trace!("Skipping simulation of {trial}: {e}");
                return Ok(None)
            }
        }
        let result = f(self);
        trial.undo(self)?;
        result.map(Some)
    }

    /// The subset of `candidates` after which the sovereign of `side` is safe.
    pub fn rescue_actions(&mut self, side: Side, candidates: Vec<Action>) -> Result<Vec<Action>, BoardError> {
        let mut rescues = vec![];
        for action in candidates {
            if self.simulate(&action, |g| g.is_royal_safe(side))? == Some(true) {
                trace!("{action} rescues the {side} sovereign");
                rescues.push(action);
            }
        }
        Ok(rescues)
    }

    /// All legal actions for `side`. When its sovereign is in danger only actions that make it
    /// safe are legal, and an empty result means the side has lost.
    pub fn legal_actions(&mut self, side: Side) -> Result<Vec<Action>, BoardError> {
        if self.is_royal_safe(side)? {
            let mut actions = self.candidate_moves(side);
            actions.extend(self.candidate_attacks(side));
            debug!("{side} is safe with {} legal actions", actions.len());
            Ok(actions)
        } else {
            let mut candidates = self.candidate_attacks(side);
            candidates.extend(self.candidate_moves(side));
            let total = candidates.len();
            let rescues = self.rescue_actions(side, candidates)?;
            debug!("{side} is in danger: {} of {total} actions rescue the sovereign", rescues.len());
            Ok(rescues)
        }
    }

    /// Whether `side` has lost: its sovereign is gone, or is in danger with no rescue.
    pub fn is_defeated(&mut self, side: Side) -> Result<bool, BoardError> {
        if self.sovereign(side).is_err() {
            return Ok(true)
        }
        if self.is_royal_safe(side)? {
            return Ok(false)
        }
        Ok(self.legal_actions(side)?.is_empty())
    }

    /// If any of `candidates` (actions for `side`) leaves the opponent defeated, narrow the list
    /// to just those. Otherwise return the candidates unchanged.
    pub fn winning_actions(&mut self, side: Side, candidates: Vec<Action>) -> Result<Vec<Action>, BoardError> {
        let mut mates = vec![];
        for action in candidates.iter() {
            if self.simulate(action, |g| g.is_defeated(side.other()))? == Some(true) {
                trace!("{action} checkmates {}", side.other());
                mates.push(action.clone());
            }
        }
        if mates.is_empty() {
            Ok(candidates)
        } else {
            debug!("{side} has {} mating actions", mates.len());
            Ok(mates)
        }
    }

    /// Total value of the on-board pieces of `side`.
    pub fn material(&self, side: Side) -> i32 {
        self.roster(side)
            .iter()
            .map(|id| self.piece(id))
            .filter(|p| p.is_on_board())
            .map(|p| p.kind.value())
            .sum()
    }

    /// Material balance from the point of view of `side`.
    pub fn evaluate(&self, side: Side) -> i32 {
        self.material(side) - self.material(side.other())
    }

    /// Play one turn for `side`: work out the legal actions, prefer mating ones, let `chooser`
    /// pick one and apply it for good. Returns the applied action, or `None` if `side` had
    /// nothing to play.
    pub fn play_turn(
        &mut self,
        side: Side,
        chooser: &mut impl ActionChooser
    ) -> Result<Option<Action>, ActionInvalid> {
        let actions = self.legal_actions(side)?;
        if actions.is_empty() {
            info!("{side} has no legal actions");
            return Ok(None)
        }
        let actions = self.winning_actions(side, actions)?;
        let Some(index) = chooser.choose(self, side, &actions)? else {
            info!("{side} passes");
            return Ok(None)
        };
        let Some(mut action) = actions.into_iter().nth(index) else {
            return Ok(None)
        };
        action.apply(self)?;
        info!("{side} plays {action}");
        Ok(Some(action))
    }
}

#[cfg(test)]
mod tests {
    use crate::action::ActionKind::{Capture, ConstructWall, DestroyWall, Relocate};
    use crate::action::{Action, ActionKind};
    use crate::chooser::FirstChooser;
    use crate::error::BoardError;
    use crate::game::Match;
    use crate::pieces::PieceKind::Sovereign;
    use crate::pieces::Side::{Black, White};
    use crate::preset::{boards, rules};
    use crate::tiles::Tile;
    use std::collections::HashSet;
    use std::str::FromStr;

    fn tile(s: &str) -> Tile {
        Tile::from_str(s).unwrap()
    }

    fn notation(actions: &[Action]) -> HashSet<String> {
        actions.iter().map(|a| a.to_string()).collect()
    }

    fn count(actions: &[Action], kind: ActionKind) -> usize {
        actions.iter().filter(|a| a.kind() == kind).count()
    }

    #[test]
    fn test_opening_actions() {
        let mut game = Match::from_snapshot(rules::STANDARD, boards::STANDARD).unwrap();
        assert!(game.is_royal_safe(White).unwrap());
        assert!(game.is_royal_safe(Black).unwrap());
        let actions = game.legal_actions(White).unwrap();
        let played = notation(&actions);
        assert_eq!(played.len(), actions.len());
        assert_eq!(count(&actions, ConstructWall), 0);
        assert_eq!(count(&actions, DestroyWall), 0);
        // sappers can strike straight up their files
        assert_eq!(count(&actions, Capture), 2);
        assert!(played.contains("a8xa2"));
        assert!(played.contains("i8xi2"));
        assert!(played.contains("b8-b7"));
        assert!(played.contains("d8-c6"));
        assert!(played.contains("c9-c6"));
        assert!(!played.contains("e9-e8"));
    }

    #[test]
    fn test_missing_sovereign() {
        let mut game = Match::from_str("\
.........
.........
.........
.........
....z....
.........
.........
.........
........G
").unwrap();
        assert_eq!(game.sovereign(Black), Err(BoardError::NoSovereign(Black)));
        assert_eq!(game.is_royal_safe(Black), Err(BoardError::NoSovereign(Black)));
        assert_eq!(game.legal_actions(Black), Err(BoardError::NoSovereign(Black)));
        assert!(game.is_defeated(Black).unwrap());
        assert!(!game.is_defeated(White).unwrap());
    }

    #[test]
    fn test_guardian_protects_sovereign() {
        let game = Match::from_str("\
.........
.........
.........
....g....
...s.....
.........
....D....
.........
........G
").unwrap();
        assert!(game.threat_map(White).contains(tile("e4")));
        assert!(game.protection_zone(Black).contains(tile("e4")));
        assert!(game.is_royal_safe(Black).unwrap());

        let mut exposed = Match::from_str("\
.........
.........
.........
....g....
.........
.........
....D....
.........
........G
").unwrap();
        assert!(!exposed.is_royal_safe(Black).unwrap());
        let rescues = exposed.legal_actions(Black).unwrap();
        assert!(notation(&rescues).contains("e4-d4"));
        assert!(!notation(&rescues).contains("e4-e3"));
        for a in rescues {
            assert_eq!(exposed.simulate(&a, |g| g.is_royal_safe(Black)), Ok(Some(true)));
        }
    }

    #[test]
    fn test_protected_tiles_exclude_captures() {
        let mut game = Match::from_str("\
g........
.........
.........
...s.....
....zJ...
....Z....
.........
.........
........G
").unwrap();
        assert!(game.protection_zone(Black).contains(tile("e5")));
        let infantry = game.piece_at(tile("e6")).unwrap();
        let trickster = game.piece_at(tile("f5")).unwrap();
        assert!(game.is_protected_from(infantry, tile("e5")));
        assert!(!game.is_protected_from(trickster, tile("e5")));

        let white = notation(&game.legal_actions(White).unwrap());
        assert!(!white.contains("e6xe5"));
        assert!(white.contains("f5xe5"));

        let black = notation(&game.legal_actions(Black).unwrap());
        assert!(black.contains("e5xe6"));
        assert!(black.contains("d4xe6"));
    }

    #[test]
    fn test_siege_checkmate_leaves_no_actions() {
        let mut game = Match::from_str("\
g........
.........
.........
.........
.........
.....c.c.
.........
.....c...
.....c..G
").unwrap();
        assert!(!game.is_royal_safe(White).unwrap());
        assert!(game.candidate_moves(White).is_empty());
        assert!(game.legal_actions(White).unwrap().is_empty());
        assert!(game.is_defeated(White).unwrap());
        assert!(!game.is_defeated(Black).unwrap());
    }

    #[test]
    fn test_checkmate_narrowing() {
        let mut game = Match::from_str("\
g........
.........
.........
.........
.......c.
.......c.
.........
.....c.S.
.....c..G
").unwrap();
        assert!(game.is_royal_safe(White).unwrap());
        let actions = game.legal_actions(Black).unwrap();
        assert!(actions.len() > 1);
        assert_eq!(count(&actions, Capture), 1);
        let mates = game.winning_actions(Black, actions).unwrap();
        assert_eq!(mates.len(), 1);
        assert_eq!(mates[0].to_string(), "h5xh8");
        assert!(!mates[0].is_applied());
        assert!(game.is_royal_safe(White).unwrap());
    }

    #[test]
    fn test_no_mate_keeps_candidates() {
        let mut game = Match::from_snapshot(rules::STANDARD, boards::STANDARD).unwrap();
        let actions = game.legal_actions(Black).unwrap();
        let narrowed = game.winning_actions(Black, actions.clone()).unwrap();
        assert_eq!(narrowed, actions);
    }

    #[test]
    fn test_play_turn_applies_choice() {
        let mut game = Match::from_snapshot(rules::STANDARD, boards::STANDARD).unwrap();
        let played = game.play_turn(White, &mut FirstChooser).unwrap().unwrap();
        assert_eq!(played.to_string(), "a8-a3");
        assert!(played.is_applied());
        assert_eq!(played.kind(), Relocate);
        assert_eq!(game.piece(played.actor()).tile, Some(played.target()));
        assert_eq!(game.evaluate(White), 0);
        assert_eq!(game.material(Black), 1059);
        let g = game.sovereign(White).unwrap();
        assert_eq!(game.piece(g).kind, Sovereign);
    }

    #[test]
    fn test_play_turn_without_actions() {
        let mut game = Match::from_str("\
g........
.........
.........
.........
.........
.....c.c.
.........
.....c...
.....c..G
").unwrap();
        let before = game.clone();
        assert_eq!(game.play_turn(White, &mut FirstChooser), Ok(None));
        assert_eq!(game, before);
    }
}
