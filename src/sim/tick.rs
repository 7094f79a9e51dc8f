//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Stage order is
//! part of the contract since later stages see what earlier ones mutated:
//! jump impulse, breakable auto-trigger, jump-triggered hazards, moving
//! platforms, moving hazards, jump pads, integration, collision.

use serde::{Deserialize, Serialize};

use super::collision::{self, Outcome};
use super::state::{GameEvent, GamePhase, GameState};
use super::{breakable, moving, physics};
use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Jump edge: true only on the tick the key went down
    pub jump: bool,
}

/// Advance the game state by one fixed timestep
///
/// Returns the events raised during the tick. Does nothing unless the phase
/// is `Playing`.
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) -> Vec<GameEvent> {
    if state.phase != GamePhase::Playing {
        return Vec::new();
    }
    state.time_ticks += 1;
    let mut events = Vec::new();

    // Work on a copy so a terminal outcome leaves the actor as it was
    let mut actor = state.actor.clone();
    let jumped = physics::apply_jump(&mut actor, input, tuning);
    if jumped {
        events.push(GameEvent::Jumped);
    }

    let (actor_x, actor_w) = (actor.pos.x, actor.size.x);
    if let Some((id, breakage)) = breakable::auto_trigger(state, actor_x, actor_w) {
        events.push(GameEvent::PlatformBroken { id, breakage });
    }

    if jumped {
        let center = actor.center_x();
        for index in moving::activate_hazards_on_jump(&mut state.moving_hazards, center) {
            events.push(GameEvent::HazardActivated { index });
        }
    }

    for index in moving::advance_platforms(&mut state.moving_platforms, &actor) {
        events.push(GameEvent::PlatformActivated { index });
    }
    moving::advance_hazards(&mut state.moving_hazards);
    moving::advance_pads(&mut state.jump_pads);

    actor.pos = physics::integrate(&mut actor, input, tuning);

    let resolution = collision::resolve(state, actor, tuning);
    events.extend(resolution.events);

    match resolution.outcome {
        Outcome::Alive => state.actor = resolution.actor,
        Outcome::Dead(cause) => {
            log::info!("Actor died ({:?}) at tick {}", cause, state.time_ticks);
            state.phase = GamePhase::Dead;
        }
        Outcome::Won => {
            log::info!("Door reached at tick {}", state.time_ticks);
            state.phase = GamePhase::Won;
        }
    }

    events
}
