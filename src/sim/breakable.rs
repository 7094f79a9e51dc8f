//! Breakable platforms
//!
//! A breakable static platform applies its transform exactly once, either when
//! the actor lands on it or when the actor comes within its auto-trigger
//! range. The platform record is replaced in the arena: split into two plain
//! segments, narrowed in place with its breakable marked `triggered`, or
//! removed.

use serde::{Deserialize, Serialize};

use super::state::{BreakKind, Breakable, GameState, StaticPlatform};

/// Transform as it was applied to the arena
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Breakage {
    /// Resolved segment widths and gap
    Split(SplitLayout),
    /// Width left after the shrink
    ShrinkFront { width: f32 },
    Vanish,
}

/// Result of a trigger attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerResult {
    /// The actor should fall through instead of landing this tick
    pub ignore_collision: bool,
    /// Transform that was applied, `None` for a no-op
    pub broken: Option<Breakage>,
}

impl TriggerResult {
    fn noop() -> Self {
        Self {
            ignore_collision: false,
            broken: None,
        }
    }
}

/// Final segment layout of a split
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitLayout {
    pub left_width: f32,
    pub right_width: f32,
    pub gap: f32,
}

/// Width left for the two segments once the (clamped) gap is carved out
pub fn usable_span(width: f32, requested_gap: f32, minimum_segment: f32) -> f32 {
    let max_gap = requested_gap.min(width - minimum_segment * 2.0).max(0.0);
    (width - max_gap).max(minimum_segment * 2.0)
}

/// Compute split segment widths
///
/// Segments never drop below `minimum_segment`; if the requested widths do not
/// fit beside the gap they are scaled down proportionally. The gap is whatever
/// width remains, so `left + right + gap == width` always holds.
pub fn split_layout(
    width: f32,
    left_width: f32,
    right_width: f32,
    requested_gap: f32,
    minimum_segment: f32,
) -> SplitLayout {
    let usable = usable_span(width, requested_gap, minimum_segment);
    let mut left = left_width.max(minimum_segment);
    let mut right = right_width.max(minimum_segment);

    let span = left + right;
    if span > usable {
        let scale = usable / span;
        left = (left * scale).floor().max(minimum_segment);
        right = (usable - left).max(minimum_segment);
    }

    SplitLayout {
        left_width: left,
        right_width: right,
        gap: width - (left + right),
    }
}

/// Width after a front shrink, within `[minimum_width, width]`
pub fn shrink_width(width: f32, remaining_width: f32, minimum_width: f32) -> f32 {
    remaining_width.min(width).max(minimum_width).min(width)
}

/// Apply a platform's transform, addressed by stable id
///
/// No-op when the id is gone (already replaced) or the platform is not an
/// untriggered breakable.
pub fn trigger(state: &mut GameState, id: u32, actor_x: f32, actor_width: f32) -> TriggerResult {
    let Some(index) = state.platform_index(id) else {
        return TriggerResult::noop();
    };
    let platform = state.platforms[index].clone();
    let Some(breakable) = platform.breakable else {
        return TriggerResult::noop();
    };
    if breakable.triggered {
        return TriggerResult::noop();
    }

    let rect = platform.rect;
    let (ignore_collision, broken) = match breakable.kind {
        BreakKind::Split {
            left_width,
            right_width,
            gap,
            minimum_segment,
        } => {
            let layout = split_layout(rect.width, left_width, right_width, gap, minimum_segment);
            let gap_start = rect.x + layout.left_width;
            let gap_end = gap_start + layout.gap;
            let falls = layout.gap > 0.0 && actor_x + actor_width > gap_start && actor_x < gap_end;

            let mut left = platform.clone();
            left.id = state.next_platform_id();
            left.rect.width = layout.left_width;
            left.breakable = None;

            let mut right = platform.clone();
            right.id = state.next_platform_id();
            right.rect.x = rect.x + layout.left_width + layout.gap;
            right.rect.width = layout.right_width;
            right.breakable = None;

            log::debug!(
                "Platform {} split into {}+{} with gap {} (falls={})",
                id,
                layout.left_width,
                layout.right_width,
                layout.gap,
                falls
            );
            state.platforms.splice(index..=index, [left, right]);
            (falls, Breakage::Split(layout))
        }
        BreakKind::ShrinkFront {
            remaining_width,
            minimum_width,
        } => {
            let new_width = shrink_width(rect.width, remaining_width, minimum_width);
            let new_x = rect.x + (rect.width - new_width);
            let falls = actor_x + actor_width / 2.0 < new_x;

            state.platforms[index] = StaticPlatform {
                rect: super::geometry::Rect::new(new_x, rect.y, new_width, rect.height),
                breakable: Some(Breakable {
                    triggered: true,
                    ..breakable
                }),
                ..platform
            };
            log::debug!("Platform {} shrank to {} at x={} (falls={})", id, new_width, new_x, falls);
            (falls, Breakage::ShrinkFront { width: new_width })
        }
        BreakKind::Vanish => {
            state.platforms.remove(index);
            log::debug!("Platform {} vanished", id);
            (true, Breakage::Vanish)
        }
    };

    TriggerResult {
        ignore_collision,
        broken: Some(broken),
    }
}

/// Proximity pass: trigger the first untriggered breakable in range
///
/// Runs once per tick before integration. Earlier platforms in level order
/// win; at most one platform triggers per tick.
pub fn auto_trigger(state: &mut GameState, actor_x: f32, actor_width: f32) -> Option<(u32, Breakage)> {
    let actor_center = actor_x + actor_width / 2.0;
    let id = state.platforms.iter().find_map(|platform| {
        let breakable = platform.breakable.as_ref()?;
        let range = breakable.auto_trigger_range?;
        let in_range = !breakable.triggered
            && super::geometry::center_distance(actor_center, platform.rect.center_x()) <= range;
        in_range.then_some(platform.id)
    })?;
    trigger(state, id, actor_x, actor_width).broken.map(|breakage| (id, breakage))
}
