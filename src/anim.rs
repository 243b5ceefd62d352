//! Visual state hook
//!
//! The simulation calls [`Animator::advance`] once per actor per tick with
//! the frame counter. Rendering lives outside this crate; [`SpriteAnimator`]
//! is a reference implementation that picks a sprite from the actor's
//! motion.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sim::{Actor, ActorId, ActorKind, Facing};

/// Per-actor visual update, called after physics each tick
pub trait Animator {
    fn advance(&mut self, _actor: &Actor, _frame: u64) {}
}

/// No-op animator
impl Animator for () {}

/// Sprite selection for one actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Stand(Facing),
    Jump(Facing),
    /// Running, alternating between two frames
    Run(Facing, u8),
    PlayerDead,
    Enemy,
    EnemySquashed,
    Fireball,
    Ground,
    Brick,
    Fragment,
}

/// Frames each run sprite is held for
const RUN_FRAME_HOLD: u64 = 4;

/// Pick a sprite for `actor`. Mid-jump with no horizontal motion keeps the
/// previous sprite.
pub fn select_sprite(actor: &Actor, frame: u64, previous: Option<Sprite>) -> Sprite {
    match actor.kind {
        ActorKind::Player => {
            if actor.dead {
                Sprite::PlayerDead
            } else if actor.jumping {
                if actor.vel.x > 0.0 {
                    Sprite::Jump(Facing::Right)
                } else if actor.vel.x < 0.0 {
                    Sprite::Jump(Facing::Left)
                } else {
                    previous.unwrap_or(Sprite::Jump(actor.facing))
                }
            } else if actor.vel.x.abs() > 1.0 {
                let facing = if actor.vel.x > 0.0 {
                    Facing::Right
                } else {
                    Facing::Left
                };
                Sprite::Run(facing, ((frame / RUN_FRAME_HOLD) % 2) as u8)
            } else {
                Sprite::Stand(actor.facing)
            }
        }
        ActorKind::Enemy if actor.dead => Sprite::EnemySquashed,
        ActorKind::Enemy => Sprite::Enemy,
        ActorKind::Fireball => Sprite::Fireball,
        ActorKind::Platform => Sprite::Ground,
        ActorKind::Brick => Sprite::Brick,
        ActorKind::BrickFragment => Sprite::Fragment,
    }
}

/// Tracks the current sprite of every actor it has seen
#[derive(Debug, Default)]
pub struct SpriteAnimator {
    sprites: HashMap<ActorId, Sprite>,
}

impl SpriteAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sprite(&self, id: ActorId) -> Option<Sprite> {
        self.sprites.get(&id).copied()
    }

    /// Drop entries for actors that no longer exist
    pub fn retain(&mut self, alive: impl Fn(ActorId) -> bool) {
        self.sprites.retain(|id, _| alive(*id));
    }
}

impl Animator for SpriteAnimator {
    fn advance(&mut self, actor: &Actor, frame: u64) {
        let previous = self.sprites.get(&actor.id).copied();
        self.sprites
            .insert(actor.id, select_sprite(actor, frame, previous));
    }
}
