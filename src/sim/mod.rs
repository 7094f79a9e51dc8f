//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (level order for platforms)
//! - No rendering, audio or platform dependencies

pub mod breakable;
pub mod collision;
pub mod game;
pub mod geometry;
pub mod moving;
pub mod physics;
pub mod state;
pub mod tick;

pub use breakable::{Breakage, SplitLayout};
pub use collision::{Landing, Outcome, Resolution, resolve};
pub use game::{Game, Snapshot};
pub use geometry::Rect;
pub use state::{
    Actor, BreakKind, Breakable, DeathCause, GameEvent, GamePhase, GameState, JumpPad, MovingHazard,
    MovingPlatform, StaticPlatform,
};
pub use tick::{TickInput, tick};
