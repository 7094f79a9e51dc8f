//! Transient banner state
//!
//! Driven only by game events and a per-tick countdown, never by wall-clock
//! timers. The death banner and screen shake clear after a fixed number of
//! ticks; the victory banner stays until the next level load.

use crate::sim::GameEvent;

/// What the banner is currently showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerMessage {
    Death,
    StageCleared { stage: usize },
    AllCleared,
}

impl BannerMessage {
    pub fn title(&self) -> String {
        match self {
            BannerMessage::Death => "SOUL CLAIMED!".to_string(),
            BannerMessage::StageCleared { stage } => format!("STAGE {stage} CLEARED!"),
            BannerMessage::AllCleared => "HELL CONQUERED!".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Banner {
    message: Option<BannerMessage>,
    shaking: bool,
    /// Ticks left before a timed banner clears
    remaining: Option<u32>,
    death_ticks: u32,
}

impl Banner {
    pub fn new(death_ticks: u32) -> Self {
        Self {
            message: None,
            shaking: false,
            remaining: None,
            death_ticks,
        }
    }

    /// React to the events of one step
    ///
    /// `level_index` and `level_count` pick the victory wording.
    pub fn handle_events(&mut self, events: &[GameEvent], level_index: usize, level_count: usize) {
        for event in events {
            match event {
                GameEvent::Impact { .. } => {
                    self.message = Some(BannerMessage::Death);
                    self.shaking = true;
                    self.remaining = Some(self.death_ticks);
                }
                GameEvent::DoorOpened => {
                    self.message = Some(if level_index + 1 >= level_count {
                        BannerMessage::AllCleared
                    } else {
                        BannerMessage::StageCleared { stage: level_index + 1 }
                    });
                    self.shaking = false;
                    self.remaining = None;
                }
                GameEvent::LevelLoaded { .. } => self.clear(),
                _ => {}
            }
        }
    }

    /// Advance the countdown by one tick
    pub fn tick(&mut self) {
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.clear();
            }
        }
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.shaking = false;
        self.remaining = None;
    }

    pub fn message(&self) -> Option<&BannerMessage> {
        self.message.as_ref()
    }

    pub fn is_shaking(&self) -> bool {
        self.shaking
    }
}
