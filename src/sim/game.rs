//! Level lifecycle state machine
//!
//! Owns the level catalog, the unlocked watermark and the runtime state of the
//! current attempt. `Playing` moves to `Dead` or `Won` inside [`Game::step`];
//! only a load, reset or level change brings it back to `Playing`.

use serde::Serialize;

use super::geometry::Rect;
use super::state::{Actor, GameEvent, GamePhase, GameState, JumpPad, MovingHazard, MovingPlatform, StaticPlatform};
use super::tick::{TickInput, tick};
use crate::level::{LevelDefinition, LevelError};
use crate::progress::Progress;
use crate::tuning::Tuning;

/// Read-only view of the world after a tick, for rendering
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub level_index: usize,
    pub level_name: &'a str,
    pub max_unlocked_level: usize,
    pub phase: GamePhase,
    pub time_ticks: u64,
    pub actor: &'a Actor,
    pub platforms: &'a [StaticPlatform],
    pub moving_platforms: &'a [MovingPlatform],
    pub jump_pads: &'a [JumpPad],
    pub spikes: &'a [Rect],
    pub moving_spikes: &'a [MovingHazard],
    pub door: Rect,
}

pub struct Game {
    levels: Vec<LevelDefinition>,
    tuning: Tuning,
    level_index: usize,
    progress: Progress,
    state: GameState,
}

impl Game {
    /// Start at level 0 with nothing unlocked beyond it
    pub fn new(levels: Vec<LevelDefinition>, tuning: Tuning) -> Result<Self, LevelError> {
        let first = levels.first().ok_or(LevelError::EmptyCatalog)?;
        let state = GameState::from_level(first, &tuning);
        log::info!("Loaded level 0: {}", first.name);
        Ok(Self {
            levels,
            tuning,
            level_index: 0,
            progress: Progress::new(),
            state,
        })
    }

    /// Start at level 0 with a saved watermark, clamped to the catalog
    pub fn with_progress(
        levels: Vec<LevelDefinition>,
        tuning: Tuning,
        progress: &Progress,
    ) -> Result<Self, LevelError> {
        let mut game = Self::new(levels, tuning)?;
        game.progress.unlock(progress.max_unlocked_level.min(game.last_index()));
        Ok(game)
    }

    #[inline]
    fn last_index(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn max_unlocked(&self) -> usize {
        self.progress.max_unlocked_level
    }

    pub fn level(&self) -> &LevelDefinition {
        &self.levels[self.level_index]
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn can_advance(&self) -> bool {
        self.level_index < self.max_unlocked() && self.level_index < self.last_index()
    }

    pub fn can_retreat(&self) -> bool {
        self.level_index > 0
    }

    /// Load a level, clamped to the unlocked watermark and the catalog
    pub fn load_level(&mut self, index: usize) -> Vec<GameEvent> {
        let index = index.min(self.max_unlocked()).min(self.last_index());
        self.level_index = index;
        self.reinitialize();
        log::info!("Loaded level {}: {}", index, self.levels[index].name);
        vec![GameEvent::LevelLoaded { index }]
    }

    /// Restart the current level from its definition
    pub fn reset_current_level(&mut self) -> Vec<GameEvent> {
        self.reinitialize();
        log::info!("Reset level {}", self.level_index);
        vec![GameEvent::LevelLoaded {
            index: self.level_index,
        }]
    }

    /// Move to the next level if it is unlocked; otherwise a no-op
    pub fn advance_level(&mut self) -> Vec<GameEvent> {
        if !self.can_advance() {
            return Vec::new();
        }
        self.load_level(self.level_index + 1)
    }

    /// Move to the previous level; a no-op at level 0
    pub fn retreat_level(&mut self) -> Vec<GameEvent> {
        if !self.can_retreat() {
            return Vec::new();
        }
        self.load_level(self.level_index - 1)
    }

    /// Run one simulation tick and apply its outcome to the watermark
    pub fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let mut events = tick(&mut self.state, input, &self.tuning);
        if events.contains(&GameEvent::DoorOpened) {
            let unlocked = (self.level_index + 1).min(self.last_index());
            if self.progress.unlock(unlocked) {
                log::info!("Unlocked level {}", unlocked);
                events.push(GameEvent::LevelUnlocked { index: unlocked });
            }
        }
        events
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            level_index: self.level_index,
            level_name: &self.level().name,
            max_unlocked_level: self.max_unlocked(),
            phase: self.state.phase,
            time_ticks: self.state.time_ticks,
            actor: &self.state.actor,
            platforms: &self.state.platforms,
            moving_platforms: &self.state.moving_platforms,
            jump_pads: &self.state.jump_pads,
            spikes: &self.state.hazards,
            moving_spikes: &self.state.moving_hazards,
            door: self.state.door,
        }
    }

    fn reinitialize(&mut self) {
        self.state = GameState::from_level(&self.levels[self.level_index], &self.tuning);
    }
}
