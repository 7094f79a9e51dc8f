//! Data-driven physics tuning
//!
//! Every value defaults to the matching constant in [`crate::consts`], so a
//! partial JSON file only overrides what it names.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics and world constants consumed by the tick pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tuning {
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    #[serde(default = "default_jump_strength")]
    pub jump_strength: f32,
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    #[serde(default = "default_super_jump")]
    pub super_jump_strength: f32,
    #[serde(default = "default_world_width")]
    pub world_width: f32,
    #[serde(default = "default_world_height")]
    pub world_height: f32,
    #[serde(default = "default_actor_width")]
    pub actor_width: f32,
    #[serde(default = "default_actor_height")]
    pub actor_height: f32,
}

fn default_gravity() -> f32 { GRAVITY }
fn default_jump_strength() -> f32 { JUMP_STRENGTH }
fn default_move_speed() -> f32 { MOVE_SPEED }
fn default_super_jump() -> f32 { SUPER_JUMP_STRENGTH }
fn default_world_width() -> f32 { WORLD_WIDTH }
fn default_world_height() -> f32 { WORLD_HEIGHT }
fn default_actor_width() -> f32 { ACTOR_WIDTH }
fn default_actor_height() -> f32 { ACTOR_HEIGHT }

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,
            move_speed: MOVE_SPEED,
            super_jump_strength: SUPER_JUMP_STRENGTH,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
        }
    }
}

impl Tuning {
    /// Actor collision box as a vector
    #[inline]
    pub fn actor_size(&self) -> Vec2 {
        Vec2::new(self.actor_width, self.actor_height)
    }

    /// Rightmost x the actor's left edge may occupy
    #[inline]
    pub fn max_actor_x(&self) -> f32 {
        (self.world_width - self.actor_width).max(0.0)
    }

    /// Parse tuning from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::debug!("No tuning file at {} ({e}), using defaults", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&text) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Tuning parse error in {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.8 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.8);
        assert_eq!(tuning.jump_strength, JUMP_STRENGTH);
        assert_eq!(tuning.world_width, WORLD_WIDTH);
    }

    #[test]
    fn test_max_actor_x() {
        let tuning = Tuning::default();
        assert_eq!(tuning.max_actor_x(), 775.0);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load(Path::new("/definitely/not/here/tuning.json"));
        assert_eq!(tuning, Tuning::default());
    }
}
