use crate::error::{ActionInvalid, BoardError};
use crate::game::Match;
use crate::pieces::PieceKind::{Builder, Sapper, SiegeEngine, Trickster, Wall};
use crate::pieces::{PieceId, Side};
use crate::tiles::Tile;
use std::fmt::{Display, Formatter};

/// The four kinds of transition a piece can make.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum ActionKind {
    /// Move to an empty tile, or (for a trickster) swap places with a friendly piece.
    Relocate,
    /// Strike an enemy piece. Most pieces take its place; siege engines stay put and tricksters
    /// turn the target instead of removing it.
    Capture,
    /// A builder raises a wall on an empty tile.
    ConstructWall,
    /// A sapper tears down a wall and takes its place.
    DestroyWall
}

/// What an applied action needs to remember to reverse itself.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum UndoRecord {
    Relocated { swapped: Option<PieceId> },
    Captured { victim: PieceId, roster_index: usize, attacker_moved: bool },
    Defected { victim: PieceId, side: Side, roster_index: usize },
    Built { wall: PieceId },
    Demolished { wall: PieceId, roster_index: usize }
}

/// A single reversible transition. An action refers to pieces and tiles of a [`Match`] by handle
/// and does not own them. Once [`Action::apply`] has succeeded, [`Action::undo`] puts the match
/// back exactly as it was, including roster order.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Action {
    kind: ActionKind,
    actor: PieceId,
    origin: Tile,
    target: Tile,
    undo: Option<UndoRecord>
}

impl Action {
    pub fn new(kind: ActionKind, actor: PieceId, origin: Tile, target: Tile) -> Self {
        Self { kind, actor, origin, target, undo: None }
    }

    /// Create an action for whichever piece stands on `from`.
    pub fn from_tiles(game: &Match, kind: ActionKind, from: Tile, to: Tile) -> Result<Self, BoardError> {
        let actor = game.piece_at(from).ok_or(BoardError::CellEmpty(from))?;
        Ok(Self::new(kind, actor, from, to))
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn actor(&self) -> PieceId {
        self.actor
    }

    pub fn origin(&self) -> Tile {
        self.origin
    }

    pub fn target(&self) -> Tile {
        self.target
    }

    pub fn is_applied(&self) -> bool {
        self.undo.is_some()
    }

    /// The same action, not yet applied.
    pub fn fresh(&self) -> Self {
        Self { undo: None, ..self.clone() }
    }

    /// Check whether this action is legal in the given match, without changing anything.
    pub fn validate(&self, game: &Match) -> Result<(), ActionInvalid> {
        let piece = game.piece(self.actor);
        let at = piece.tile.ok_or(ActionInvalid::ActorOffBoard)?;
        if at != self.origin {
            return Err(ActionInvalid::StaleOrigin)
        }
        let side = piece.side.ok_or(ActionInvalid::NeutralActor)?;
        if !game.grid().tile_in_bounds(self.target) {
            return Err(ActionInvalid::OutOfBounds)
        }
        let occupant = game.piece_at(self.target).map(|id| game.piece(id));
        match self.kind {
            ActionKind::Relocate => {
                if !game.can_move_to(self.actor, self.target) {
                    return Err(ActionInvalid::RuleForbids)
                }
                match occupant {
                    None => Ok(()),
                    Some(o) if piece.kind == Trickster && o.is_on_side(side) && o.kind != Trickster => Ok(()),
                    Some(_) => Err(ActionInvalid::TargetOccupied)
                }
            },
            ActionKind::Capture => {
                let o = occupant.ok_or(ActionInvalid::TargetEmpty)?;
                if o.side.is_none() {
                    return Err(ActionInvalid::TargetIsWall)
                }
                if o.is_on_side(side) {
                    return Err(ActionInvalid::FriendlyTarget)
                }
                if !game.can_attack(self.actor, self.target) {
                    return Err(ActionInvalid::RuleForbids)
                }
                if game.is_protected_from(self.actor, self.target) {
                    return Err(ActionInvalid::Protected)
                }
                Ok(())
            },
            ActionKind::ConstructWall => {
                if piece.kind != Builder {
                    return Err(ActionInvalid::WrongPiece)
                }
                if occupant.is_some() {
                    return Err(ActionInvalid::TargetOccupied)
                }
                if !game.can_attack(self.actor, self.target) {
                    return Err(ActionInvalid::RuleForbids)
                }
                Ok(())
            },
            ActionKind::DestroyWall => {
                if piece.kind != Sapper {
                    return Err(ActionInvalid::WrongPiece)
                }
                let o = occupant.ok_or(ActionInvalid::TargetEmpty)?;
                if o.kind != Wall {
                    return Err(ActionInvalid::NotAWall)
                }
                if !game.can_attack(self.actor, self.target) {
                    return Err(ActionInvalid::RuleForbids)
                }
                Ok(())
            }
        }
    }

    /// Validate the action and, if it is legal, perform it. On `Err` the match is unchanged.
    pub fn apply(&mut self, game: &mut Match) -> Result<(), ActionInvalid> {
        if self.undo.is_some() {
            return Err(ActionInvalid::AlreadyApplied)
        }
        self.validate(game)?;
        let record = match self.kind {
            ActionKind::Relocate => self.apply_relocate(game)?,
            ActionKind::Capture => self.apply_capture(game)?,
            ActionKind::ConstructWall => UndoRecord::Built { wall: game.push_wall(self.target)? },
            ActionKind::DestroyWall => {
                let wall = game.piece_at(self.target).ok_or(BoardError::CellEmpty(self.target))?;
                game.lift(wall)?;
                let roster_index = game.discharge(wall).unwrap_or_default();
                game.relocate(self.actor, self.target)?;
                UndoRecord::Demolished { wall, roster_index }
            }
        };
        self.undo = Some(record);
        Ok(())
    }

    fn apply_relocate(&self, game: &mut Match) -> Result<UndoRecord, BoardError> {
        match game.piece_at(self.target) {
            None => {
                game.relocate(self.actor, self.target)?;
                Ok(UndoRecord::Relocated { swapped: None })
            },
            Some(friend) => {
                game.lift(friend)?;
                game.relocate(self.actor, self.target)?;
                game.put(friend, self.origin)?;
                Ok(UndoRecord::Relocated { swapped: Some(friend) })
            }
        }
    }

    fn apply_capture(&self, game: &mut Match) -> Result<UndoRecord, BoardError> {
        let victim = game.piece_at(self.target).ok_or(BoardError::CellEmpty(self.target))?;
        match game.piece(self.actor).kind {
            Trickster => {
                let side = game.piece(victim).side.ok_or(BoardError::NoAllegiance(victim))?;
                let roster_index = game.defect(victim)?;
                Ok(UndoRecord::Defected { victim, side, roster_index })
            },
            kind => {
                game.lift(victim)?;
                let roster_index = game.discharge(victim).unwrap_or_default();
                let attacker_moved = kind != SiegeEngine;
                if attacker_moved {
                    game.relocate(self.actor, self.target)?;
                }
                Ok(UndoRecord::Captured { victim, roster_index, attacker_moved })
            }
        }
    }

    /// Reverse a successfully applied action. Undo must happen in the reverse order of apply when
    /// several actions are stacked.
    pub fn undo(&mut self, game: &mut Match) -> Result<(), BoardError> {
        let record = self.undo.ok_or(BoardError::NotApplied)?;
        match record {
            UndoRecord::Relocated { swapped: None } => {
                game.relocate(self.actor, self.origin)?;
            },
            UndoRecord::Relocated { swapped: Some(friend) } => {
                game.lift(friend)?;
                game.relocate(self.actor, self.origin)?;
                game.put(friend, self.target)?;
            },
            UndoRecord::Captured { victim, roster_index, attacker_moved } => {
                if attacker_moved {
                    game.relocate(self.actor, self.origin)?;
                }
                game.put(victim, self.target)?;
                game.enlist(victim, roster_index);
            },
            UndoRecord::Defected { victim, side, roster_index } => {
                game.restore_allegiance(victim, side, roster_index);
            },
            UndoRecord::Built { wall } => {
                game.pop_wall(wall)?;
            },
            UndoRecord::Demolished { wall, roster_index } => {
                game.relocate(self.actor, self.origin)?;
                game.put(wall, self.target)?;
                game.enlist(wall, roster_index);
            }
        }
        self.undo = None;
        Ok(())
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sep = match self.kind {
            ActionKind::Relocate => "-",
            ActionKind::Capture => "x",
            ActionKind::ConstructWall => "#",
            ActionKind::DestroyWall => "x#"
        };
        write!(f, "{}{}{}", self.origin, sep, self.target)
    }
}
