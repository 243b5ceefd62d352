//! Interaction resolver
//!
//! Decides the game outcome of a contact from the pair of actor kinds and
//! the face of the *other* actor that was struck. The table is pure: all
//! state changes happen in the frame loop that applies the outcome.

use serde::{Deserialize, Serialize};

use super::actor::ActorKind;

/// Face of the other actor's box that the mover struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// Mover landed on it (floor contact)
    Top,
    /// Mover hit it from below (ceiling contact)
    Bottom,
    /// Mover's right edge hit it (right-wall contact)
    Left,
    /// Mover's left edge hit it (left-wall contact)
    Right,
}

impl Face {
    #[inline]
    pub fn is_side(self) -> bool {
        matches!(self, Face::Left | Face::Right)
    }
}

/// Result of a single contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Contact with no game effect
    None,
    /// Self is physically stopped, no damage
    Block,
    /// Other is killed and self rebounds (stomp)
    Bounce,
    /// Other is killed, self unaffected
    Kill,
    /// Self is removed
    Killed,
    /// Both are removed
    MutualKill,
    /// Other shatters into fragments
    Break,
    /// Self keeps its offset to a platform it rides
    DragAlign,
    /// Self turns around (patrol bounce)
    Reverse,
}

impl Outcome {
    /// Outcomes the frame loop has to act on
    pub fn is_significant(self) -> bool {
        matches!(
            self,
            Outcome::Bounce | Outcome::Kill | Outcome::Killed | Outcome::MutualKill | Outcome::Break
        )
    }
}

/// Pairs that never see each other in collision queries
pub fn passes_through(self_kind: ActorKind, other_kind: ActorKind) -> bool {
    use ActorKind::*;

    matches!(
        (self_kind, other_kind),
        (BrickFragment, _) | (_, BrickFragment) | (_, Fireball) | (Fireball, Player)
    )
}

/// Look up the outcome of `self_kind` striking `face` of `other_kind`
pub fn collide_actor(face: Face, self_kind: ActorKind, other_kind: ActorKind) -> Outcome {
    use ActorKind::*;

    if passes_through(self_kind, other_kind) {
        return Outcome::None;
    }

    match (self_kind, other_kind) {
        (Player, Enemy) => match face {
            Face::Top => Outcome::Bounce,
            Face::Bottom => Outcome::Kill,
            Face::Left | Face::Right => Outcome::Killed,
        },
        (Player, Platform) => match face {
            Face::Top => Outcome::DragAlign,
            _ => Outcome::Block,
        },
        (Player, Brick) => match face {
            Face::Bottom => Outcome::Break,
            _ => Outcome::Block,
        },

        (Fireball, Enemy) => match face {
            Face::Bottom => Outcome::None,
            _ => Outcome::MutualKill,
        },
        (Fireball, Platform | Brick) => {
            if face.is_side() {
                Outcome::Killed
            } else {
                Outcome::Block
            }
        }

        (Enemy, Enemy | Platform | Brick) => {
            if face.is_side() {
                Outcome::Reverse
            } else {
                Outcome::Block
            }
        }
        (Enemy, Player) => {
            if face.is_side() {
                Outcome::Kill
            } else {
                Outcome::None
            }
        }

        _ => Outcome::None,
    }
}
