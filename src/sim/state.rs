//! Game state and core simulation types
//!
//! Everything the tick pipeline mutates lives here. All of it is derived from
//! a [`LevelDefinition`] by [`GameState::from_level`], with every optional
//! authored field resolved to a concrete value up front.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::breakable::Breakage;
use super::geometry::Rect;
use crate::consts::*;
use crate::level::{
    Axis, BreakableDef, JumpPadDef, LevelDefinition, MovingHazardDef, MovingPlatformDef,
    PlatformVariant, StaticPlatformDef,
};
use crate::tuning::Tuning;

/// Lifecycle of one level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks are running
    Playing,
    /// Hit a hazard or fell out of the world
    Dead,
    /// Reached the door
    Won,
}

/// The single player-controlled body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left of the collision box
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision box, smaller than the sprite
    pub size: Vec2,
    /// Set by a jump, bounce or pad launch; cleared only by landing
    pub airborne: bool,
}

impl Actor {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            airborne: false,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Resolved destructive transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BreakKind {
    Split {
        left_width: f32,
        right_width: f32,
        gap: f32,
        minimum_segment: f32,
    },
    ShrinkFront {
        remaining_width: f32,
        minimum_width: f32,
    },
    Vanish,
}

/// One-shot transform attached to a static platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakable {
    pub kind: BreakKind,
    /// Proximity radius for triggering without contact
    pub auto_trigger_range: Option<f32>,
    /// Latches false -> true; never reset within an attempt
    pub triggered: bool,
}

impl Breakable {
    /// Resolve authored defaults against the platform's width
    pub fn from_def(def: &BreakableDef, platform_width: f32) -> Self {
        let kind = match *def {
            BreakableDef::Split {
                left_width,
                right_width,
                gap,
                minimum_segment,
                ..
            } => {
                let gap = gap.unwrap_or(DEFAULT_SPLIT_GAP);
                let minimum_segment = minimum_segment.unwrap_or(DEFAULT_MIN_SEGMENT);
                let usable = super::breakable::usable_span(platform_width, gap, minimum_segment);
                let left_width = left_width.unwrap_or((usable / 2.0).floor());
                let right_width = right_width.unwrap_or(usable - left_width);
                BreakKind::Split {
                    left_width,
                    right_width,
                    gap,
                    minimum_segment,
                }
            }
            BreakableDef::ShrinkFront {
                remaining_width,
                minimum_width,
                ..
            } => BreakKind::ShrinkFront {
                remaining_width: remaining_width.unwrap_or(platform_width / 2.0),
                minimum_width: minimum_width.unwrap_or(DEFAULT_SHRINK_MIN_WIDTH),
            },
            BreakableDef::Vanish { .. } => BreakKind::Vanish,
        };
        Self {
            kind,
            auto_trigger_range: def.auto_trigger_range(),
            triggered: false,
        }
    }
}

/// A static platform record in the platform arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticPlatform {
    /// Stable id; split segments get fresh ids
    pub id: u32,
    pub rect: Rect,
    pub variant: PlatformVariant,
    pub breakable: Option<Breakable>,
}

impl StaticPlatform {
    pub fn from_def(id: u32, def: &StaticPlatformDef) -> Self {
        let rect = def.rect.sanitized();
        Self {
            id,
            rect,
            variant: def.variant,
            breakable: def.breakable.as_ref().map(|b| Breakable::from_def(b, rect.width)),
        }
    }
}

/// A platform that travels once along x after the actor boards it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingPlatform {
    pub id: Option<String>,
    pub rect: Rect,
    pub start: Vec2,
    /// +1 or -1 along x
    pub direction: f32,
    pub travel_distance: f32,
    pub speed: f32,
    pub activation_range: Option<f32>,
    pub carry_player: bool,
    /// Negative launch velocity on landing; `None` means a plain landing
    pub bounce_strength: Option<f32>,
    pub variant: PlatformVariant,
    /// Distance travelled so far, in `0..=travel_distance`
    pub progress: f32,
    pub pre_activated: bool,
    pub activated: bool,
    /// Signed x displacement of the last tick
    pub delta_x: f32,
}

impl MovingPlatform {
    pub fn from_def(def: &MovingPlatformDef) -> Self {
        Self {
            id: def.id.clone(),
            rect: Rect::new(def.start_x, def.start_y, def.width, def.height),
            start: Vec2::new(def.start_x, def.start_y),
            direction: def.direction.sign(),
            travel_distance: def.travel_distance.max(0.0),
            speed: def.speed.max(0.0),
            activation_range: def.activation_range,
            carry_player: def.carry_player,
            bounce_strength: def.bounce_strength.filter(|b| *b != 0.0),
            variant: def.variant,
            progress: 0.0,
            pre_activated: false,
            activated: false,
            delta_x: 0.0,
        }
    }
}

/// A launch pad, optionally sliding between two x bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpPad {
    pub id: Option<String>,
    pub rect: Rect,
    /// `(min_x, max_x)`; pads without both bounds never move
    pub bounds: Option<(f32, f32)>,
    pub speed: f32,
    /// Vertical velocity imparted on contact
    pub strength: f32,
    pub direction: f32,
}

impl JumpPad {
    pub fn from_def(def: &JumpPadDef, tuning: &Tuning) -> Self {
        let start_x = def.start_x.or(def.x).or(def.min_x).unwrap_or(0.0);
        Self {
            id: def.id.clone(),
            rect: Rect::new(start_x, def.y, def.width, def.height),
            bounds: def.min_x.zip(def.max_x),
            speed: def.speed,
            strength: def.strength.unwrap_or(tuning.super_jump_strength),
            direction: def.initial_direction.unwrap_or(DEFAULT_PAD_DIRECTION),
        }
    }
}

/// A spike that oscillates along one axis once activated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingHazard {
    pub id: Option<String>,
    pub rect: Rect,
    pub axis: Axis,
    /// Bounds along `axis`
    pub min: f32,
    pub max: f32,
    pub speed: f32,
    pub direction: f32,
    pub initial_direction: f32,
    pub trigger_on_jump: bool,
    pub activation_range: Option<f32>,
    pub activated: bool,
}

impl MovingHazard {
    pub fn from_def(def: &MovingHazardDef) -> Self {
        let start_x = def.start_x.or(def.x).unwrap_or(0.0);
        let start_y = def.start_y.or(def.y).unwrap_or(0.0);
        let travel = def.travel_distance.unwrap_or(0.0);
        let travel_down = def.travel_distance_down.unwrap_or(travel);
        let (min, max) = match def.axis {
            Axis::Horizontal => (
                def.min_x.unwrap_or(start_x - travel),
                def.max_x.unwrap_or(start_x + travel),
            ),
            Axis::Vertical => (
                def.min_y.unwrap_or(start_y - travel),
                def.max_y.unwrap_or(start_y + travel_down),
            ),
        };
        let initial_direction = def.initial_direction.unwrap_or(DEFAULT_HAZARD_DIRECTION);
        Self {
            id: def.id.clone(),
            rect: Rect::new(start_x, start_y, def.width, def.height),
            axis: def.axis,
            min,
            max,
            speed: def.speed,
            direction: initial_direction,
            initial_direction,
            trigger_on_jump: def.trigger_on_jump,
            activation_range: def.activation_range,
            activated: def.trigger_on_start,
        }
    }
}

/// Events emitted during a simulation step
///
/// Fire-and-forget: consumers (audio, banners, progress) never feed back
/// into the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Fatal contact or fall
    Impact { cause: DeathCause },
    /// Door reached
    DoorOpened,
    /// Unlocked watermark raised
    LevelUnlocked { index: usize },
    /// A level was (re)initialized
    LevelLoaded { index: usize },
    /// A breakable platform applied its transform, with the resolved layout
    PlatformBroken { id: u32, breakage: Breakage },
    /// A moving platform latched on (index into `moving_platforms`)
    PlatformActivated { index: usize },
    /// A moving hazard latched on (index into `moving_hazards`)
    HazardActivated { index: usize },
    /// Launched by a jump pad
    JumpPadLaunch { strength: f32 },
    /// Jump impulse accepted
    Jumped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Hazard,
    Fall,
}

/// Complete runtime state of one level attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub actor: Actor,
    /// Platform arena; iteration order is level order
    pub platforms: Vec<StaticPlatform>,
    pub moving_platforms: Vec<MovingPlatform>,
    pub jump_pads: Vec<JumpPad>,
    pub hazards: Vec<Rect>,
    pub moving_hazards: Vec<MovingHazard>,
    pub door: Rect,
    /// Simulation tick counter for this attempt
    pub time_ticks: u64,
    /// Next platform id
    next_id: u32,
}

impl GameState {
    /// Build fresh runtime state from a level definition
    pub fn from_level(level: &LevelDefinition, tuning: &Tuning) -> Self {
        let mut state = Self {
            phase: GamePhase::Playing,
            actor: Actor::new(
                Vec2::new(level.start_position.x, level.start_position.y),
                tuning.actor_size(),
            ),
            platforms: Vec::with_capacity(level.platforms.len()),
            moving_platforms: level.moving_platforms.iter().map(MovingPlatform::from_def).collect(),
            jump_pads: level
                .jump_pads
                .iter()
                .map(|pad| JumpPad::from_def(pad, tuning))
                .collect(),
            hazards: level.spikes.iter().map(|s| s.sanitized()).collect(),
            moving_hazards: level.moving_spikes.iter().map(MovingHazard::from_def).collect(),
            door: level.door.sanitized(),
            time_ticks: 0,
            next_id: 1,
        };
        for def in &level.platforms {
            let id = state.next_platform_id();
            state.platforms.push(StaticPlatform::from_def(id, def));
        }
        state
    }

    /// Allocate a new platform id
    pub fn next_platform_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Index of a platform in the arena by id
    pub fn platform_index(&self, id: u32) -> Option<usize> {
        self.platforms.iter().position(|p| p.id == id)
    }
}
