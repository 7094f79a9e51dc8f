//! Level definitions and catalog loading
//!
//! Levels are immutable input data. The simulation derives all of its mutable
//! runtime state from a [`LevelDefinition`] at load time and never writes back.
//! Field names follow the authored JSON (camelCase); optional fields are
//! resolved to concrete values once, when the runtime state is built.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::geometry::Rect;

/// Built-in level catalog, embedded at compile time
const BUILTIN_CATALOG: &str = include_str!("../levels/catalog.json");

/// Errors raised while reading level data
#[derive(Debug, Error)]
pub enum LevelError {
    /// The catalog file could not be read
    #[error("failed to read level catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The catalog is not valid level JSON
    #[error("malformed level data: {0}")]
    Parse(#[from] serde_json::Error),
    /// The catalog parsed but has nothing to play
    #[error("level catalog contains no levels")]
    EmptyCatalog,
}

/// Actor spawn point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StartPosition {
    pub x: f32,
    pub y: f32,
}

/// Visual/structural flavor of a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlatformVariant {
    Ground,
    #[default]
    Floating,
}

/// One-shot destructive behavior attached to a static platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BreakableDef {
    /// Break into two segments around a drop gap
    #[serde(rename_all = "camelCase")]
    Split {
        left_width: Option<f32>,
        right_width: Option<f32>,
        gap: Option<f32>,
        minimum_segment: Option<f32>,
        auto_trigger_range: Option<f32>,
    },
    /// Lose width from the leading (left) edge
    #[serde(rename_all = "camelCase")]
    ShrinkFront {
        remaining_width: Option<f32>,
        minimum_width: Option<f32>,
        auto_trigger_range: Option<f32>,
    },
    /// Disappear entirely
    #[serde(rename_all = "camelCase")]
    Vanish { auto_trigger_range: Option<f32> },
}

impl BreakableDef {
    pub fn auto_trigger_range(&self) -> Option<f32> {
        match self {
            BreakableDef::Split { auto_trigger_range, .. }
            | BreakableDef::ShrinkFront { auto_trigger_range, .. }
            | BreakableDef::Vanish { auto_trigger_range } => *auto_trigger_range,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticPlatformDef {
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(default)]
    pub variant: PlatformVariant,
    #[serde(default)]
    pub breakable: Option<BreakableDef>,
}

/// Travel direction of a moving platform along x
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TravelDirection {
    #[default]
    Positive,
    Negative,
}

impl TravelDirection {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            TravelDirection::Positive => 1.0,
            TravelDirection::Negative => -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingPlatformDef {
    #[serde(default)]
    pub id: Option<String>,
    pub start_x: f32,
    pub start_y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub travel_distance: f32,
    #[serde(default)]
    pub speed: f32,
    #[serde(default)]
    pub activation_range: Option<f32>,
    #[serde(default)]
    pub direction: TravelDirection,
    #[serde(default)]
    pub variant: PlatformVariant,
    #[serde(default)]
    pub carry_player: bool,
    #[serde(default)]
    pub bounce_strength: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JumpPadDef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub start_x: Option<f32>,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub min_x: Option<f32>,
    #[serde(default)]
    pub max_x: Option<f32>,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub speed: f32,
    #[serde(default)]
    pub strength: Option<f32>,
    #[serde(default)]
    pub initial_direction: Option<f32>,
}

/// Axis a moving hazard travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Horizontal,
    #[default]
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingHazardDef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub axis: Axis,
    #[serde(default)]
    pub start_x: Option<f32>,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub start_y: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub travel_distance: Option<f32>,
    #[serde(default)]
    pub travel_distance_down: Option<f32>,
    #[serde(default)]
    pub min_x: Option<f32>,
    #[serde(default)]
    pub max_x: Option<f32>,
    #[serde(default)]
    pub min_y: Option<f32>,
    #[serde(default)]
    pub max_y: Option<f32>,
    #[serde(default)]
    pub speed: f32,
    #[serde(default)]
    pub initial_direction: Option<f32>,
    #[serde(default)]
    pub trigger_on_start: bool,
    #[serde(default)]
    pub trigger_on_jump: bool,
    #[serde(default)]
    pub activation_range: Option<f32>,
}

/// A complete, read-only level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hint: Option<String>,
    pub start_position: StartPosition,
    pub door: Rect,
    #[serde(default)]
    pub platforms: Vec<StaticPlatformDef>,
    #[serde(default)]
    pub moving_platforms: Vec<MovingPlatformDef>,
    #[serde(default)]
    pub jump_pads: Vec<JumpPadDef>,
    #[serde(default)]
    pub spikes: Vec<Rect>,
    #[serde(default)]
    pub moving_spikes: Vec<MovingHazardDef>,
}

impl LevelDefinition {
    /// Authored hint, or a generic one depending on whether pads exist
    pub fn hint_text(&self) -> &str {
        match &self.hint {
            Some(hint) => hint,
            None if !self.jump_pads.is_empty() => {
                "Reach the blue door and use the moving jump pads for a super boost!"
            }
            None => "Reach the blue door with careful jumps - no jump pads to help this time!",
        }
    }
}

/// On-disk catalog shape: either a bare array or `{ "levels": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped { levels: Vec<LevelDefinition> },
    Bare(Vec<LevelDefinition>),
}

/// Parse a catalog from JSON text
pub fn parse_catalog(json: &str) -> Result<Vec<LevelDefinition>, LevelError> {
    let levels = match serde_json::from_str::<CatalogFile>(json)? {
        CatalogFile::Wrapped { levels } | CatalogFile::Bare(levels) => levels,
    };
    if levels.is_empty() {
        return Err(LevelError::EmptyCatalog);
    }
    Ok(levels)
}

/// Read and parse a catalog file
pub fn load_catalog(path: &Path) -> Result<Vec<LevelDefinition>, LevelError> {
    let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let levels = parse_catalog(&text)?;
    log::info!("Loaded {} levels from {}", levels.len(), path.display());
    Ok(levels)
}

/// The six built-in levels
pub fn builtin_catalog() -> Result<Vec<LevelDefinition>, LevelError> {
    parse_catalog(BUILTIN_CATALOG)
}
