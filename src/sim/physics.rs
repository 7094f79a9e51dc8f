//! Kinematic integration for the actor
//!
//! No acceleration or friction: horizontal velocity comes straight from input,
//! vertical velocity accumulates gravity with no terminal cap.

use glam::Vec2;

use super::state::Actor;
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Apply a jump impulse if the actor is grounded
///
/// Returns true when the impulse was accepted. Jump intents while airborne
/// are dropped.
pub fn apply_jump(actor: &mut Actor, input: &TickInput, tuning: &Tuning) -> bool {
    if !input.jump || actor.airborne {
        return false;
    }
    actor.vel.y = tuning.jump_strength;
    actor.airborne = true;
    true
}

/// Horizontal velocity for this tick's held keys
#[inline]
pub fn horizontal_velocity(input: &TickInput, move_speed: f32) -> f32 {
    match (input.left, input.right) {
        (true, false) => -move_speed,
        (false, true) => move_speed,
        _ => 0.0,
    }
}

/// Clamp an x coordinate into the playable range
#[inline]
pub fn clamp_x(x: f32, tuning: &Tuning) -> f32 {
    x.clamp(0.0, tuning.max_actor_x())
}

/// Integrate one tick and return the candidate position
///
/// Updates `actor.vel` in place; the actor's position is left alone so the
/// caller can discard the candidate on a terminal outcome.
pub fn integrate(actor: &mut Actor, input: &TickInput, tuning: &Tuning) -> Vec2 {
    actor.vel.x = horizontal_velocity(input, tuning.move_speed);
    actor.vel.y += tuning.gravity;

    let mut candidate = actor.pos + actor.vel;
    candidate.x = clamp_x(candidate.x, tuning);
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn actor_at(x: f32, y: f32) -> Actor {
        Actor::new(Vec2::new(x, y), Tuning::default().actor_size())
    }

    #[test]
    fn test_left_and_right_cancel() {
        let both = TickInput { left: true, right: true, jump: false };
        assert_eq!(horizontal_velocity(&both, 5.0), 0.0);
        assert_eq!(horizontal_velocity(&TickInput::default(), 5.0), 0.0);
        let left = TickInput { left: true, ..Default::default() };
        assert_eq!(horizontal_velocity(&left, 5.0), -5.0);
    }

    #[test]
    fn test_gravity_accumulates() {
        let tuning = Tuning::default();
        let mut actor = actor_at(100.0, 100.0);
        let input = TickInput::default();
        integrate(&mut actor, &input, &tuning);
        let candidate = integrate(&mut actor, &input, &tuning);
        assert!((actor.vel.y - 1.2).abs() < 1e-5);
        // Position is not committed by integrate
        assert!((candidate.y - 101.2).abs() < 1e-4);
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let tuning = Tuning::default();
        let mut actor = actor_at(100.0, 100.0);
        let jump = TickInput { jump: true, ..Default::default() };

        assert!(apply_jump(&mut actor, &jump, &tuning));
        assert_eq!(actor.vel.y, -10.0);
        assert!(actor.airborne);

        actor.vel.y = -4.0;
        assert!(!apply_jump(&mut actor, &jump, &tuning));
        assert_eq!(actor.vel.y, -4.0);
    }

    #[test]
    fn test_candidate_clamped_at_walls() {
        let tuning = Tuning::default();
        let mut actor = actor_at(2.0, 100.0);
        let left = TickInput { left: true, ..Default::default() };
        assert_eq!(integrate(&mut actor, &left, &tuning).x, 0.0);

        let mut actor = actor_at(773.0, 100.0);
        let right = TickInput { right: true, ..Default::default() };
        assert_eq!(integrate(&mut actor, &right, &tuning).x, 775.0);
    }

    proptest! {
        #[test]
        fn candidate_x_always_in_bounds(
            x in -50.0f32..850.0,
            vx in -100.0f32..100.0,
            left in any::<bool>(),
            right in any::<bool>(),
        ) {
            let tuning = Tuning::default();
            let mut actor = actor_at(x, 0.0);
            actor.vel.x = vx;
            let candidate = integrate(&mut actor, &TickInput { left, right, jump: false }, &tuning);
            prop_assert!(candidate.x >= 0.0);
            prop_assert!(candidate.x <= tuning.max_actor_x());
        }
    }
}
