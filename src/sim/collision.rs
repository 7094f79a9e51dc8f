//! Collision detection and resolution
//!
//! Contact is evaluated against the actor's candidate position in a fixed
//! order: platform landing, jump pad, hazard, door, fall. Landing and pads
//! adjust the candidate; hazards and the door end the attempt. Death is
//! checked before victory so a tick can never produce both.

use glam::Vec2;

use super::breakable;
use super::geometry::Rect;
use super::state::{Actor, DeathCause, GameEvent, GameState};
use crate::consts::*;
use crate::tuning::Tuning;

/// A platform the candidate position would land on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Landing {
    /// Static platform, by arena id
    Static { id: u32, top: f32 },
    /// Moving platform, by index
    Moving { index: usize, top: f32 },
}

/// How a tick ended for the actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Alive,
    Dead(DeathCause),
    Won,
}

/// Result of resolving one candidate position
#[derive(Debug, Clone)]
pub struct Resolution {
    pub outcome: Outcome,
    /// Resolved actor; only meaningful when `outcome` is `Alive`
    pub actor: Actor,
    pub events: Vec<GameEvent>,
}

/// Top-surface landing test shared by platforms and pads
///
/// The actor's bottom edge must sit within `window` below `rect`'s top, and
/// the actor must not be moving upward.
fn lands_on(rect: &Rect, pos: Vec2, size: Vec2, vel_y: f32, window: f32) -> bool {
    let bottom = pos.y + size.y;
    rect.overlaps_x(pos.x, pos.x + size.x) && bottom >= rect.y && bottom <= rect.y + window && vel_y >= 0.0
}

#[inline]
fn landing_window(rect: &Rect) -> f32 {
    rect.height.min(LANDING_WINDOW)
}

/// First platform the candidate lands on: static platforms first, in arena
/// order, then moving platforms
pub fn find_landing(state: &GameState, pos: Vec2, size: Vec2, vel_y: f32) -> Option<Landing> {
    let fixed = state
        .platforms
        .iter()
        .find(|p| lands_on(&p.rect, pos, size, vel_y, landing_window(&p.rect)))
        .map(|p| Landing::Static { id: p.id, top: p.rect.y });
    fixed.or_else(|| {
        state
            .moving_platforms
            .iter()
            .position(|p| lands_on(&p.rect, pos, size, vel_y, landing_window(&p.rect)))
            .map(|index| Landing::Moving {
                index,
                top: state.moving_platforms[index].rect.y,
            })
    })
}

/// Launch strength of the first pad in contact, if any
pub fn find_jump_pad(state: &GameState, pos: Vec2, size: Vec2, vel_y: f32) -> Option<f32> {
    state
        .jump_pads
        .iter()
        .find(|pad| lands_on(&pad.rect, pos, size, vel_y, pad.rect.height))
        .map(|pad| pad.strength)
}

/// Inset hazard test
///
/// The actor's box is shrunk horizontally and at its feet, with a little grace
/// below the hazard's bottom edge.
fn touches_hazard(hazard: &Rect, pos: Vec2, size: Vec2) -> bool {
    let bottom = pos.y + size.y;
    pos.x + size.x - HAZARD_INSET_X > hazard.x
        && pos.x + HAZARD_INSET_X < hazard.right()
        && bottom - HAZARD_INSET_TOP > hazard.y
        && bottom < hazard.bottom() + HAZARD_GRACE_BOTTOM
}

/// Static hazards, then moving hazards
pub fn hazard_contact(state: &GameState, pos: Vec2, size: Vec2) -> bool {
    state.hazards.iter().any(|h| touches_hazard(h, pos, size))
        || state.moving_hazards.iter().any(|h| touches_hazard(&h.rect, pos, size))
}

pub fn door_contact(door: &Rect, pos: Vec2, size: Vec2) -> bool {
    door.overlaps(&Rect::from_pos_size(pos, size))
}

#[inline]
pub fn out_of_bounds(pos: Vec2, tuning: &Tuning) -> bool {
    pos.y > tuning.world_height
}

/// Resolve an integrated actor against the world
///
/// `actor.pos` is the candidate position. May trigger a breakable platform on
/// landing, which mutates the arena. The actor in `state` is not touched; the
/// caller commits `Resolution::actor` only when the outcome is `Alive`.
pub fn resolve(state: &mut GameState, mut actor: Actor, tuning: &Tuning) -> Resolution {
    let vel_y = actor.vel.y;
    let size = actor.size;
    let mut events = Vec::new();

    if let Some(landing) = find_landing(state, actor.pos, size, vel_y) {
        let mut veto = false;
        if let Landing::Static { id, .. } = landing {
            let result = breakable::trigger(state, id, actor.pos.x, size.x);
            if let Some(breakage) = result.broken {
                events.push(GameEvent::PlatformBroken { id, breakage });
            }
            veto = result.ignore_collision;
        }

        if !veto {
            let top = match landing {
                Landing::Static { top, .. } | Landing::Moving { top, .. } => top,
            };
            actor.pos.y = top - size.y;
            actor.vel.y = 0.0;
            actor.airborne = false;

            if let Landing::Moving { index, .. } = landing {
                let platform = &state.moving_platforms[index];
                if platform.carry_player {
                    actor.pos.x = super::physics::clamp_x(actor.pos.x + platform.delta_x, tuning);
                }
                if let Some(bounce) = platform.bounce_strength {
                    actor.vel.y = bounce;
                    actor.airborne = true;
                }
            }
        }
    }

    // Uses the integrated velocity, so a pad overrides a bounce
    if let Some(strength) = find_jump_pad(state, actor.pos, size, vel_y) {
        actor.vel.y = strength;
        actor.airborne = true;
        events.push(GameEvent::JumpPadLaunch { strength });
    }

    let outcome = if hazard_contact(state, actor.pos, size) {
        Outcome::Dead(DeathCause::Hazard)
    } else if door_contact(&state.door, actor.pos, size) {
        Outcome::Won
    } else if out_of_bounds(actor.pos, tuning) {
        Outcome::Dead(DeathCause::Fall)
    } else {
        Outcome::Alive
    };

    match outcome {
        Outcome::Dead(cause) => events.push(GameEvent::Impact { cause }),
        Outcome::Won => events.push(GameEvent::DoorOpened),
        Outcome::Alive => {}
    }

    Resolution { outcome, actor, events }
}
