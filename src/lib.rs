//! Devil Platformer - simulation core for a 2D side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, breakables, game state)
//! - `level`: Level definitions and the built-in catalog
//! - `tuning`: Data-driven physics constants
//! - `settings`: Runner and presentation preferences
//! - `progress`: Unlocked-level persistence
//! - `platform`: Input boundary (held keys to per-tick edges)
//! - `presentation`: Transient banner state driven by game events
//! - `audio`: Sound cue routing for game events

pub mod audio;
pub mod level;
pub mod platform;
pub mod presentation;
pub mod progress;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use level::{LevelDefinition, LevelError};
pub use progress::Progress;
pub use settings::Settings;
pub use sim::{Game, GameEvent, GamePhase, GameState, TickInput};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;

    /// Downward acceleration added to vertical velocity every tick
    pub const GRAVITY: f32 = 0.6;
    /// Vertical velocity applied on a jump
    pub const JUMP_STRENGTH: f32 = -10.0;
    /// Horizontal speed while a direction is held
    pub const MOVE_SPEED: f32 = 5.0;
    /// Launch velocity for jump pads without an authored strength
    pub const SUPER_JUMP_STRENGTH: f32 = -3.0;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 400.0;

    /// Actor collision box (smaller than the 40x50 sprite)
    pub const ACTOR_WIDTH: f32 = 25.0;
    pub const ACTOR_HEIGHT: f32 = 25.0;

    /// Maximum depth below a platform top that still counts as a landing
    pub const LANDING_WINDOW: f32 = 20.0;
    /// Vertical slack when deciding whether the actor stands on a mover
    pub const STANDING_TOLERANCE: f32 = 4.0;

    /// Hazard hitbox insets (forgiving edges)
    pub const HAZARD_INSET_X: f32 = 5.0;
    pub const HAZARD_INSET_TOP: f32 = 3.0;
    pub const HAZARD_GRACE_BOTTOM: f32 = 5.0;

    /// Breakable defaults
    pub const DEFAULT_SPLIT_GAP: f32 = 40.0;
    pub const DEFAULT_MIN_SEGMENT: f32 = 20.0;
    pub const DEFAULT_SHRINK_MIN_WIDTH: f32 = 20.0;

    /// Oscillation start directions
    pub const DEFAULT_HAZARD_DIRECTION: f32 = -1.0;
    pub const DEFAULT_PAD_DIRECTION: f32 = 1.0;
}
