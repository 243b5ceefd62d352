//! Per-actor collision resolution
//!
//! Runs the detector queries in fixed priority (ceiling, floor, walls),
//! corrects position and velocity, and reports each contact with the
//! outcome the interaction table assigns to it. The caller applies
//! outcomes that affect other actors.

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorKind, Facing};
use super::collision::{WallSide, ceiling_collision, close_enough, floor_collision, wall_collision};
use super::geom::Rect;
use super::interaction::{Face, Outcome, collide_actor};
use crate::consts::*;

/// A contact found while resolving one actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub other: ActorId,
    pub face: Face,
    pub outcome: Outcome,
}

/// Resolve `me` against `objects` for one frame.
///
/// `objects` may contain a stale copy of `me`; it is skipped by id. A stomp
/// or any other significant floor outcome returns early, so walls are not
/// checked on that frame.
pub fn resolve(me: &mut Actor, objects: &[Actor]) -> Vec<Contact> {
    let mut contacts = Vec::new();
    let mut bumped = false;

    if let Some(other) = ceiling_collision(me, objects) {
        // Only a rising mover strikes an underside; resting contact is inert
        let outcome = if me.vel.y < 0.0 {
            collide_actor(Face::Bottom, me.kind, other.kind)
        } else {
            Outcome::None
        };
        contacts.push(Contact {
            other: other.id,
            face: Face::Bottom,
            outcome,
        });
        release_platform(me, other.kind);

        if me.vel.y < 0.0 {
            me.hit_ceiling = true;
            me.vel.y = 0.0;
            me.pos.y = other.hitbox().bottom();
            bumped = true;
        }
    }

    if let Some(other) = floor_collision(me, objects) {
        let outcome = collide_actor(Face::Top, me.kind, other.kind);
        contacts.push(Contact {
            other: other.id,
            face: Face::Top,
            outcome,
        });

        match outcome {
            Outcome::Bounce => {
                me.vel.y = if me.jump_held {
                    STOMP_BOUNCE_HELD
                } else {
                    STOMP_BOUNCE
                };
                return contacts;
            }
            Outcome::DragAlign => drag_align(me, other),
            _ if outcome.is_significant() => return contacts,
            _ => {}
        }

        if me.vel.y > 0.0 || me.hit_ceiling {
            me.hit_ceiling = false;
            me.jumping = false;
            me.vel.y = 0.0;
            me.pos.y = other.hitbox().top() - me.size.y;
        }
    } else {
        me.platform_offset = None;
        // A head bump ends the rise; the fall starts next frame
        if !bumped {
            apply_gravity(me, objects);
        }
    }

    let wall = wall_collision(WallSide::Left, me, objects)
        .map(|other| (WallSide::Left, other))
        .or_else(|| wall_collision(WallSide::Right, me, objects).map(|other| (WallSide::Right, other)));

    if let Some((side, other)) = wall {
        let face = match side {
            WallSide::Left => Face::Right,
            WallSide::Right => Face::Left,
        };
        contacts.push(Contact {
            other: other.id,
            face,
            outcome: collide_actor(face, me.kind, other.kind),
        });
        release_platform(me, other.kind);
        push_out_of_wall(me, side, other.hitbox());
    }

    contacts
}

/// One airborne frame of gravity, skipped when resting or at terminal speed
fn apply_gravity(me: &mut Actor, objects: &[Actor]) {
    if me.vel.y >= TERMINAL_VELOCITY || close_enough(me, objects) {
        return;
    }
    me.vel.y = (me.vel.y + GRAVITY).min(TERMINAL_VELOCITY);
}

/// Keep a rider's offset to the platform while it is not steering
fn drag_align(me: &mut Actor, platform: &Actor) {
    let steering = me.vel.x.abs() >= DRAG_THRESHOLD;
    let offset = platform.pos.x - me.pos.x;

    match me.platform_offset {
        Some(locked) if !steering => me.pos.x = platform.pos.x - locked,
        Some(_) => me.platform_offset = Some(offset),
        None if !steering => me.platform_offset = Some(offset),
        None => {}
    }
}

/// Side or underside contact with a platform or enemy ends any ride
fn release_platform(me: &mut Actor, other: ActorKind) {
    if matches!(other, ActorKind::Platform | ActorKind::Enemy) {
        me.platform_offset = None;
    }
}

/// Snap the leading edge flush with the wall and cancel motion into it.
/// Enemies turn around instead of stopping.
fn push_out_of_wall(me: &mut Actor, side: WallSide, wall: Rect) {
    let into_wall = match side {
        WallSide::Left => {
            me.pos.x = wall.right() - me.hitbox_inset;
            me.vel.x < 0.0
        }
        WallSide::Right => {
            me.pos.x = wall.left() - me.size.x + me.hitbox_inset;
            me.vel.x > 0.0
        }
    };

    if !into_wall {
        return;
    }

    if me.kind == ActorKind::Enemy {
        me.vel.x = -me.vel.x;
        me.facing = match side {
            WallSide::Left => Facing::Right,
            WallSide::Right => Facing::Left,
        };
    } else {
        me.vel.x = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn actor(id: u32, kind: ActorKind, x: f32, y: f32) -> Actor {
        Actor::new(ActorId(id), kind, Vec2::new(x, y))
    }

    #[test]
    fn test_landing_is_flush() {
        let ground = actor(1, ActorKind::Platform, 0.0, 100.0);
        let mut me = actor(2, ActorKind::Player, 0.0, 70.5);
        me.vel.y = 4.0;
        me.jumping = true;

        let contacts = resolve(&mut me, &[ground]);
        assert_eq!(contacts[0].face, Face::Top);
        assert_eq!(me.vel.y, 0.0);
        assert_eq!(me.pos.y, 100.0 - me.size.y);
        assert!(!me.jumping);
    }

    #[test]
    fn test_ceiling_is_flush() {
        let brick = actor(1, ActorKind::Platform, 0.0, 0.0);
        let mut me = actor(2, ActorKind::Player, 0.0, 29.0);
        me.vel.y = -3.0;

        resolve(&mut me, &[brick]);
        assert_eq!(me.vel.y, 0.0);
        assert_eq!(me.pos.y, 32.0);
        assert!(me.hit_ceiling);
    }

    #[test]
    fn test_ceiling_ignored_when_falling() {
        let brick = actor(1, ActorKind::Platform, 0.0, 0.0);
        let mut me = actor(2, ActorKind::Player, 0.0, 29.0);
        me.vel.y = 2.0;

        let contacts = resolve(&mut me, &[brick]);
        assert_eq!(contacts[0].face, Face::Bottom);
        assert_eq!(contacts[0].outcome, Outcome::None);
        assert_eq!(me.pos.y, 29.0);
        // No floor below, so gravity still applies
        assert_eq!(me.vel.y, 2.5);
    }

    #[test]
    fn test_underside_needs_upward_motion() {
        let brick = actor(1, ActorKind::Brick, 0.0, 0.0);
        let mut me = actor(2, ActorKind::Player, 0.0, 32.0);
        let contacts = resolve(&mut me, &[brick]);
        assert_eq!(contacts[0].outcome, Outcome::None);

        me.vel.y = -2.0;
        let contacts = resolve(&mut me, &[brick]);
        assert_eq!(contacts[0].outcome, Outcome::Break);
    }

    #[test]
    fn test_stomp_bounce() {
        let enemy = actor(1, ActorKind::Enemy, 10.0, 100.0);
        let mut me = actor(2, ActorKind::Player, 0.0, 64.0);
        me.vel.y = 6.0;

        let contacts = resolve(&mut me, &[enemy]);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].outcome, Outcome::Bounce);
        assert_eq!(me.vel.y, STOMP_BOUNCE);

        let mut me = actor(2, ActorKind::Player, 0.0, 64.0);
        me.vel.y = 6.0;
        me.jump_held = true;
        resolve(&mut me, &[enemy]);
        assert_eq!(me.vel.y, STOMP_BOUNCE_HELD);
    }

    #[test]
    fn test_stomp_skips_walls() {
        let enemy = actor(1, ActorKind::Enemy, 10.0, 100.0);
        // A wall touching the player's right edge at the same height
        let wall = actor(3, ActorKind::Platform, 28.0, 70.0);
        let mut me = actor(2, ActorKind::Player, 0.0, 66.0);
        me.vel = Vec2::new(2.0, 6.0);

        let contacts = resolve(&mut me, &[enemy, wall]);
        assert_eq!(contacts.len(), 1);
        assert_eq!(me.vel.x, 2.0);
    }

    #[test]
    fn test_enemy_wall_bounce() {
        let wall = actor(1, ActorKind::Platform, 100.0, 0.0);
        let mut me = actor(2, ActorKind::Enemy, 69.5, 0.0);
        me.vel.x = 1.0;

        let contacts = resolve(&mut me, &[wall]);
        let side = contacts.iter().find(|c| c.face.is_side()).copied();
        assert_eq!(side.map(|c| c.outcome), Some(Outcome::Reverse));
        assert_eq!(me.vel.x, -1.0);
        assert_eq!(me.pos.x + me.size.x, 100.0);
    }

    #[test]
    fn test_enemy_bounces_off_enemy() {
        let other = actor(1, ActorKind::Enemy, 0.0, 0.0);
        let mut me = actor(2, ActorKind::Enemy, 31.0, 0.0);
        let before = me.vel.x;
        assert!(before < 0.0);

        resolve(&mut me, &[other]);
        assert_eq!(me.vel.x, -before);
    }

    #[test]
    fn test_player_stops_at_wall() {
        let wall = actor(1, ActorKind::Platform, 100.0, 0.0);
        let mut me = actor(2, ActorKind::Player, 74.0, 0.0);
        me.vel.x = 3.0;

        resolve(&mut me, &[wall]);
        assert_eq!(me.vel.x, 0.0);
        assert_eq!(me.hitbox().right(), 100.0);
    }

    #[test]
    fn test_player_leaves_wall() {
        let wall = actor(1, ActorKind::Platform, 100.0, 0.0);
        let mut me = actor(2, ActorKind::Player, 72.0, 0.0);
        me.vel.x = -3.0;

        resolve(&mut me, &[wall]);
        assert_eq!(me.vel.x, -3.0);
    }

    #[test]
    fn test_platform_drag_locks_offset() {
        let platform = actor(1, ActorKind::Platform, 0.0, 100.0);
        let mut me = actor(2, ActorKind::Player, 10.0, 68.0);

        resolve(&mut me, &[platform]);
        assert_eq!(me.platform_offset, Some(-10.0));

        // Platform shifts; the idle rider follows it
        let moved = actor(1, ActorKind::Platform, 5.0, 100.0);
        resolve(&mut me, &[moved]);
        assert_eq!(me.pos.x, 15.0);

        // Steering recalculates instead of locking
        me.vel.x = 3.0;
        me.pos.x = 20.0;
        resolve(&mut me, &[moved]);
        assert_eq!(me.pos.x, 20.0);
        assert_eq!(me.platform_offset, Some(-15.0));
    }

    #[test]
    fn test_leaving_floor_clears_drag() {
        let mut me = actor(2, ActorKind::Player, 10.0, 68.0);
        me.platform_offset = Some(-10.0);
        resolve(&mut me, &[]);
        assert_eq!(me.platform_offset, None);
    }

    #[test]
    fn test_inside_floor_band_no_gravity() {
        // Hovering 0.5px above a ledge counts as standing on it
        let ledge = actor(1, ActorKind::Brick, 0.0, 100.0);
        let mut me = actor(2, ActorKind::Enemy, 0.0, 67.5);
        me.vel.x = 0.0;
        let contacts = resolve(&mut me, &[ledge]);
        assert_eq!(contacts[0].face, Face::Top);
        assert_eq!(me.vel.y, 0.0);
    }

    proptest! {
        #[test]
        fn prop_free_fall_gravity(frames in 0u32..80) {
            let mut me = actor(1, ActorKind::Player, 0.0, 0.0);
            for _ in 0..frames {
                resolve(&mut me, &[]);
            }
            let expected = (GRAVITY * frames as f32).min(TERMINAL_VELOCITY);
            prop_assert!((me.vel.y - expected).abs() < 1e-4);
        }

        #[test]
        fn prop_gravity_monotonic(start in -10.0f32..10.0) {
            let mut me = actor(1, ActorKind::Enemy, 0.0, 0.0);
            me.vel.y = start;
            resolve(&mut me, &[]);
            prop_assert!(me.vel.y >= start);
            prop_assert!(me.vel.y <= TERMINAL_VELOCITY.max(start));
        }
    }
}
