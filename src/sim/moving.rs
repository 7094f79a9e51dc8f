//! Moving entity controller
//!
//! Advances moving platforms, hazards and jump pads by one tick, in that
//! order. Never touches the actor; collision runs against the result.

use super::geometry::center_distance;
use super::state::{Actor, JumpPad, MovingHazard, MovingPlatform};
use crate::consts::STANDING_TOLERANCE;
use crate::level::Axis;

/// Step a coordinate toward a bound, flipping direction when it is reached
///
/// Returns the new `(position, direction)`.
fn oscillate(position: f32, direction: f32, speed: f32, min: f32, max: f32) -> (f32, f32) {
    let next = position + speed * direction;
    if direction < 0.0 && next <= min {
        (min, 1.0)
    } else if direction > 0.0 && next >= max {
        (max, -1.0)
    } else {
        (next, direction)
    }
}

/// Whether the actor is resting on top of a platform
fn is_standing_on(actor: &Actor, platform: &MovingPlatform) -> bool {
    platform.rect.overlaps_x(actor.pos.x, actor.pos.x + actor.size.x)
        && (actor.bottom() - platform.rect.y).abs() <= STANDING_TOLERANCE
}

/// Latch jump-triggered hazards
///
/// `trigger_center` is the actor's horizontal center at the jump. Returns the
/// indices of hazards that activated.
pub fn activate_hazards_on_jump(hazards: &mut [MovingHazard], trigger_center: f32) -> Vec<usize> {
    let mut activated = Vec::new();
    for (i, hazard) in hazards.iter_mut().enumerate() {
        if hazard.activated || !hazard.trigger_on_jump {
            continue;
        }
        let in_range = hazard
            .activation_range
            .is_none_or(|range| center_distance(trigger_center, hazard.rect.center_x()) <= range);
        if in_range {
            hazard.activated = true;
            hazard.direction = hazard.initial_direction;
            log::debug!("Hazard {} activated by jump", i);
            activated.push(i);
        }
    }
    activated
}

/// Advance moving platforms
///
/// Returns the indices of platforms that latched `activated` this tick.
pub fn advance_platforms(platforms: &mut [MovingPlatform], actor: &Actor) -> Vec<usize> {
    let mut activated = Vec::new();
    let actor_center = actor.center_x();

    for (i, platform) in platforms.iter_mut().enumerate() {
        platform.delta_x = 0.0;

        if let Some(range) = platform.activation_range {
            if !platform.pre_activated && center_distance(actor_center, platform.rect.center_x()) <= range {
                platform.pre_activated = true;
            }
        }

        let eligible = platform.pre_activated || platform.activation_range.is_none();
        if eligible && !platform.activated && is_standing_on(actor, platform) {
            platform.activated = true;
            log::debug!("Moving platform {} activated", i);
            activated.push(i);
        }

        if platform.activated && platform.progress < platform.travel_distance {
            let progress = (platform.progress + platform.speed).min(platform.travel_distance);
            let next_x = platform.start.x + platform.direction * progress;
            platform.delta_x = next_x - platform.rect.x;
            platform.rect.x = next_x;
            platform.progress = progress;
        }
    }
    activated
}

/// Advance activated hazards along their axis
pub fn advance_hazards(hazards: &mut [MovingHazard]) {
    for hazard in hazards.iter_mut() {
        if !hazard.activated || hazard.speed == 0.0 {
            continue;
        }
        let position = match hazard.axis {
            Axis::Horizontal => &mut hazard.rect.x,
            Axis::Vertical => &mut hazard.rect.y,
        };
        let (next, direction) = oscillate(*position, hazard.direction, hazard.speed, hazard.min, hazard.max);
        *position = next;
        hazard.direction = direction;
    }
}

/// Advance jump pads that have bounds and a nonzero speed
pub fn advance_pads(pads: &mut [JumpPad]) {
    for pad in pads.iter_mut() {
        let Some((min_x, max_x)) = pad.bounds else {
            continue;
        };
        if pad.speed == 0.0 {
            continue;
        }
        let next = pad.rect.x + pad.speed * pad.direction;
        // Pads clamp on either bound regardless of heading
        if next <= min_x {
            pad.rect.x = min_x;
            pad.direction = 1.0;
        } else if next >= max_x {
            pad.rect.x = max_x;
            pad.direction = -1.0;
        } else {
            pad.rect.x = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{JumpPadDef, MovingHazardDef, MovingPlatformDef};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn ferry(activation_range: Option<f32>) -> MovingPlatform {
        let def: MovingPlatformDef = serde_json::from_str(
            r#"{ "startX": 180, "startY": 240, "width": 110, "height": 18,
                 "travelDistance": 400, "speed": 2.2, "carryPlayer": true }"#,
        )
        .unwrap();
        MovingPlatform::from_def(&MovingPlatformDef { activation_range, ..def })
    }

    fn actor_on_top(x: f32, platform: &MovingPlatform) -> Actor {
        let size = Tuning::default().actor_size();
        Actor::new(Vec2::new(x, platform.rect.y - size.y), size)
    }

    #[test]
    fn test_platform_advances_once_boarded() {
        let mut platforms = vec![ferry(None)];
        let actor = actor_on_top(200.0, &platforms[0]);

        let activated = advance_platforms(&mut platforms, &actor);
        assert_eq!(activated, vec![0]);
        assert!((platforms[0].delta_x - 2.2).abs() < 1e-5);
        assert!((platforms[0].rect.x - 182.2).abs() < 1e-4);

        // Latch holds even once the actor steps off
        let away = actor_on_top(600.0, &platforms[0]);
        assert!(advance_platforms(&mut platforms, &away).is_empty());
        assert!((platforms[0].progress - 4.4).abs() < 1e-4);
    }

    #[test]
    fn test_platform_waits_for_activation_range() {
        let mut platforms = vec![ferry(Some(10.0))];
        // Standing on the edge, center 80 away from the platform's center
        let actor = actor_on_top(170.0, &platforms[0]);
        advance_platforms(&mut platforms, &actor);
        assert!(!platforms[0].activated);
        assert_eq!(platforms[0].delta_x, 0.0);

        let actor = actor_on_top(222.5, &platforms[0]);
        advance_platforms(&mut platforms, &actor);
        assert!(platforms[0].pre_activated);
        assert!(platforms[0].activated);
    }

    #[test]
    fn test_platform_not_activated_when_hovering() {
        let mut platforms = vec![ferry(None)];
        let mut actor = actor_on_top(200.0, &platforms[0]);
        actor.pos.y -= 10.0;
        advance_platforms(&mut platforms, &actor);
        assert!(!platforms[0].activated);
    }

    #[test]
    fn test_platform_holds_at_end_of_travel() {
        let mut platforms = vec![ferry(None)];
        platforms[0].activated = true;
        let actor = actor_on_top(0.0, &platforms[0]);
        for _ in 0..400 {
            advance_platforms(&mut platforms, &actor);
        }
        assert_eq!(platforms[0].progress, 400.0);
        assert_eq!(platforms[0].rect.x, 580.0);
        assert_eq!(platforms[0].delta_x, 0.0);
    }

    #[test]
    fn test_hazard_bounces_between_bounds() {
        let def: MovingHazardDef = serde_json::from_str(
            r#"{ "axis": "horizontal", "startX": 100, "startY": 0, "width": 10, "height": 10,
                 "travelDistance": 5, "speed": 3, "triggerOnStart": true }"#,
        )
        .unwrap();
        let mut hazards = vec![MovingHazard::from_def(&def)];
        let xs: Vec<f32> = (0..5)
            .map(|_| {
                advance_hazards(&mut hazards);
                hazards[0].rect.x
            })
            .collect();
        assert_eq!(xs, vec![97.0, 95.0, 98.0, 101.0, 104.0]);
        advance_hazards(&mut hazards);
        assert_eq!(hazards[0].rect.x, 105.0);
        assert_eq!(hazards[0].direction, -1.0);
    }

    #[test]
    fn test_inert_hazard_waits_for_jump() {
        let def: MovingHazardDef = serde_json::from_str(
            r#"{ "x": 400, "y": 300, "width": 20, "height": 10, "travelDistance": 60,
                 "speed": 2, "initialDirection": 1, "triggerOnJump": true, "activationRange": 50 }"#,
        )
        .unwrap();
        let mut hazards = vec![MovingHazard::from_def(&def)];
        advance_hazards(&mut hazards);
        assert_eq!(hazards[0].rect.y, 300.0);

        assert!(activate_hazards_on_jump(&mut hazards, 300.0).is_empty());
        assert_eq!(activate_hazards_on_jump(&mut hazards, 400.0), vec![0]);
        // Latched
        assert!(activate_hazards_on_jump(&mut hazards, 400.0).is_empty());

        advance_hazards(&mut hazards);
        assert_eq!(hazards[0].rect.y, 302.0);
    }

    #[test]
    fn test_pad_oscillates() {
        let def: JumpPadDef = serde_json::from_str(
            r#"{ "minX": 100, "maxX": 104, "y": 300, "width": 40, "height": 18, "speed": 3 }"#,
        )
        .unwrap();
        let mut pads = vec![JumpPad::from_def(&def, &Tuning::default())];
        advance_pads(&mut pads);
        assert_eq!(pads[0].rect.x, 103.0);
        advance_pads(&mut pads);
        assert_eq!((pads[0].rect.x, pads[0].direction), (104.0, -1.0));
        advance_pads(&mut pads);
        assert_eq!(pads[0].rect.x, 101.0);
        advance_pads(&mut pads);
        assert_eq!((pads[0].rect.x, pads[0].direction), (100.0, 1.0));
    }

    #[test]
    fn test_static_pad_never_moves() {
        let def: JumpPadDef =
            serde_json::from_str(r#"{ "x": 50, "y": 300, "width": 40, "height": 18, "speed": 3 }"#).unwrap();
        let mut pads = vec![JumpPad::from_def(&def, &Tuning::default())];
        advance_pads(&mut pads);
        assert_eq!(pads[0].rect.x, 50.0);
    }

    proptest! {
        #[test]
        fn progress_monotonic_and_bounded(
            travel in 0.0f32..500.0,
            speed in 0.0f32..10.0,
            ticks in 1usize..300,
        ) {
            let mut platforms = vec![ferry(None)];
            platforms[0].travel_distance = travel;
            platforms[0].speed = speed;
            platforms[0].activated = true;
            let actor = actor_on_top(0.0, &platforms[0]);

            let mut last = platforms[0].progress;
            for _ in 0..ticks {
                advance_platforms(&mut platforms, &actor);
                prop_assert!(platforms[0].progress >= last);
                prop_assert!(platforms[0].progress <= travel);
                last = platforms[0].progress;
            }
        }
    }
}
