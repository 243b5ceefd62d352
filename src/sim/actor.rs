//! Actor data model
//!
//! Every object that takes part in collision is an [`Actor`]: the player,
//! enemies, fireballs, scene tiles and brick fragments. Kind-specific
//! behaviour is selected by [`ActorKind`], never by type inspection.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::tick::Command;
use crate::consts::*;

/// Stable handle into the actor arena. Allocated in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Actor kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Enemy,
    Fireball,
    /// Solid ground or platform tile
    Platform,
    Brick,
    BrickFragment,
}

impl ActorKind {
    /// Scene geometry: never moves on its own, never initiates collision checks
    pub fn is_static(self) -> bool {
        matches!(self, ActorKind::Platform | ActorKind::Brick)
    }

    /// Default sprite size for a freshly spawned actor of this kind
    pub fn default_size(self) -> Vec2 {
        match self {
            ActorKind::Fireball => Vec2::splat(FIREBALL_SIZE),
            ActorKind::BrickFragment => Vec2::splat(TILE_SIZE / 2.0),
            _ => Vec2::splat(TILE_SIZE),
        }
    }

    /// Fireballs and fragments run their own physics but are never
    /// collision candidates for other actors
    pub fn reports_collidable(self) -> bool {
        !matches!(self, ActorKind::Fireball | ActorKind::BrickFragment)
    }
}

/// Horizontal facing, used only for animation and fireball direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Unit sign along x
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// A game object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    /// Top-left corner of the sprite (pixels)
    pub pos: Vec2,
    /// Velocity (pixels/frame)
    pub vel: Vec2,
    /// Sprite width and height
    pub size: Vec2,
    /// Horizontal inset of the hitbox on each side
    pub hitbox_inset: f32,
    pub collidable: bool,
    pub dead: bool,
    pub facing: Facing,
    pub jumping: bool,
    pub jump_held: bool,
    /// Direction of travel when the current jump started
    pub jump_direction: Option<Facing>,
    /// Set by an upward ceiling hit, cleared on the next landing
    pub hit_ceiling: bool,
    /// Offset to a platform being ridden (`platform.x - self.x`)
    pub platform_offset: Option<f32>,
    pub grown: bool,
}

impl Actor {
    pub fn new(id: ActorId, kind: ActorKind, pos: Vec2) -> Self {
        let mut actor = Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            size: Vec2::ZERO,
            hitbox_inset: 0.0,
            collidable: kind.reports_collidable(),
            dead: false,
            facing: Facing::default(),
            jumping: false,
            jump_held: false,
            jump_direction: None,
            hit_ceiling: false,
            platform_offset: None,
            grown: false,
        };
        actor.set_size(kind.default_size());

        if kind == ActorKind::Enemy {
            actor.vel.x = -ENEMY_SPEED;
            actor.facing = Facing::Left;
        }

        actor
    }

    /// Resize and recompute the hitbox so it stays horizontally centred
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
        self.hitbox_inset = match self.kind {
            ActorKind::Player => (1.0 - PLAYER_HITBOX_RATIO) * size.x / 2.0,
            _ => 0.0,
        };
    }

    /// Full sprite bounds
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Collision rectangle
    pub fn hitbox(&self) -> Rect {
        Rect::new(
            self.pos.x + self.hitbox_inset,
            self.pos.y,
            self.size.x - 2.0 * self.hitbox_inset,
            self.size.y,
        )
    }

    /// Candidate for other actors' collision queries
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.collidable && !self.dead
    }

    /// Position, velocity and size are all finite numbers
    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite() && self.size.is_finite()
    }

    /// Mark dead; the actor stops being a candidate immediately
    pub fn kill(&mut self) {
        self.dead = true;
        self.collidable = false;
    }

    /// Double in size, keeping the feet in place. No-op when already grown.
    pub fn grow(&mut self) -> bool {
        if self.kind != ActorKind::Player || self.grown {
            return false;
        }
        let old_height = self.size.y;
        self.set_size(self.size * 2.0);
        self.pos.y -= self.size.y - old_height;
        self.grown = true;
        true
    }

    /// Halve back to normal size. No-op when not grown.
    pub fn shrink(&mut self) -> bool {
        if self.kind != ActorKind::Player || !self.grown {
            return false;
        }
        let old_height = self.size.y;
        self.set_size(self.size / 2.0);
        self.pos.y += old_height - self.size.y;
        self.grown = false;
        true
    }

    /// Apply one decoded input command to the player
    pub fn apply_command(&mut self, command: Command, run: bool) {
        let speed = if run { RUN_SPEED } else { WALK_SPEED };

        match command {
            Command::Up => {
                if self.vel.y >= 0.0 && !self.jumping {
                    self.jumping = true;
                    self.jump_direction = Some(if self.vel.x > 0.0 {
                        Facing::Right
                    } else if self.vel.x < 0.0 {
                        Facing::Left
                    } else {
                        self.facing
                    });
                    self.vel.y = JUMP_IMPULSE;
                }
            }
            Command::Left => {
                self.vel.x = if self.jumping && self.jump_direction == Some(Facing::Right) {
                    -AIR_REVERSE_SPEED
                } else {
                    -speed
                };
                self.facing = Facing::Left;
            }
            Command::Right => {
                self.vel.x = if self.jumping && self.jump_direction == Some(Facing::Left) {
                    AIR_REVERSE_SPEED
                } else {
                    speed
                };
                self.facing = Facing::Right;
            }
            Command::None => {}
        }
    }

    /// Advance position by one frame of velocity
    pub fn integrate(&mut self) {
        self.pos += self.vel;

        if self.kind == ActorKind::Player && !self.jumping {
            self.vel.x *= VELOCITY_DECAY;
        }
    }
}
