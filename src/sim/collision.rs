//! Collision detection against the scene and other actors
//!
//! Four directional queries plus a resting test. Each query walks the
//! candidate slice in order and returns the *first* match, not the closest
//! one. Level feel depends on that policy, so it is kept as is.
//!
//! The 5px tolerance bands decide which face was struck: a mover whose top
//! edge is deeper than 5px into a box is not hitting its ceiling, and one
//! whose bottom edge is deeper than 5px has already passed its floor.

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorKind};
use super::geom::{Rect, Span, overlaps, overlaps_half_open};
use super::interaction::passes_through;
use crate::consts::{FACE_TOLERANCE, GROUND_TOLERANCE};

/// Which side of the mover a wall query checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    Left,
    Right,
}

/// Actors the mover can collide with, in iteration order
fn candidates(id: ActorId, kind: ActorKind, objects: &[Actor]) -> impl Iterator<Item = &Actor> {
    objects.iter().filter(move |other| {
        other.id != id
            && other.is_solid()
            && !passes_through(kind, other.kind)
            && !other.hitbox().is_degenerate()
    })
}

/// Mover's hitbox, or `None` when it cannot collide at all
fn mover_box(me: &Actor) -> Option<Rect> {
    let hitbox = me.hitbox();
    (!hitbox.is_degenerate()).then_some(hitbox)
}

/// Top edge is at least 5px past the candidate's bottom
#[inline]
fn too_far_up(me: &Rect, other: &Rect) -> bool {
    me.top() <= other.bottom() - FACE_TOLERANCE
}

/// Bottom edge is at least 5px past the candidate's top
#[inline]
fn too_far_down(me: &Rect, other: &Rect) -> bool {
    me.bottom() >= other.top() + FACE_TOLERANCE
}

/// Candidate whose underside the mover's top edge touches
pub fn ceiling_collision<'a>(me: &Actor, objects: &'a [Actor]) -> Option<&'a Actor> {
    let own = mover_box(me)?;

    candidates(me.id, me.kind, objects).find(|other| {
        let other = other.hitbox();
        other.y_span().contains(own.top())
            && overlaps(own.x_span(), other.x_span())
            && !too_far_up(&own, &other)
    })
}

/// Candidate the mover is standing on or landing on
pub fn floor_collision<'a>(me: &Actor, objects: &'a [Actor]) -> Option<&'a Actor> {
    let own = mover_box(me)?;

    candidates(me.id, me.kind, objects).find(|other| {
        let other = other.hitbox();
        let band = Span::new(other.top() - FACE_TOLERANCE, other.bottom());
        band.contains(own.bottom())
            && overlaps(own.x_span(), other.x_span())
            && !too_far_down(&own, &other)
    })
}

/// Candidate whose horizontal span contains the mover's leading edge
pub fn wall_collision<'a>(side: WallSide, me: &Actor, objects: &'a [Actor]) -> Option<&'a Actor> {
    let own = mover_box(me)?;
    let edge = match side {
        WallSide::Left => own.left(),
        WallSide::Right => own.right(),
    };

    candidates(me.id, me.kind, objects).find(|other| {
        let other = other.hitbox();
        other.x_span().contains(edge) && overlaps_half_open(own.y_span(), other.y_span())
    })
}

/// Bottom edge within 1px of some candidate's top edge
pub fn close_enough(me: &Actor, objects: &[Actor]) -> bool {
    let Some(own) = mover_box(me) else {
        return false;
    };

    candidates(me.id, me.kind, objects).any(|other| {
        let other = other.hitbox();
        (own.bottom() - other.top()).abs() <= GROUND_TOLERANCE
            && overlaps(own.x_span(), other.x_span())
    })
}
