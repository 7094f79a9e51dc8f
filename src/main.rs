//! Devil Platformer entry point
//!
//! Headless fixed-timestep runner: loads settings, tuning, levels and
//! progress, feeds recorded key frames through the simulation and prints the
//! final snapshot as JSON.
//!
//! Usage: `devil-platformer [--level N] [--catalog PATH] [--replay PATH]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use thiserror::Error;

    use devil_platformer::audio::{AudioManager, LogSink};
    use devil_platformer::level::{self, LevelError};
    use devil_platformer::platform::{InputLatch, KeyState};
    use devil_platformer::presentation::Banner;
    use devil_platformer::{Game, GamePhase, Progress, Settings, Tuning};

    /// Idle run length when no replay is given
    const IDLE_SECONDS: u32 = 5;

    /// Tick count for an idle run; saturates on absurd tick rates
    fn idle_frames(tick_hz: u32) -> usize {
        tick_hz.saturating_mul(IDLE_SECONDS) as usize
    }

    #[derive(Debug, Error)]
    pub enum RunError {
        #[error("{0}")]
        Usage(String),
        #[error(transparent)]
        Level(#[from] LevelError),
        #[error("failed to read replay {path}: {source}")]
        ReplayIo {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },
        #[error("malformed replay: {0}")]
        ReplayParse(#[source] serde_json::Error),
        #[error("failed to serialize snapshot: {0}")]
        Snapshot(#[source] serde_json::Error),
    }

    #[derive(Debug, Default)]
    struct Args {
        level: Option<usize>,
        catalog: Option<PathBuf>,
        replay: Option<PathBuf>,
    }

    fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, RunError> {
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .ok_or_else(|| RunError::Usage(format!("{flag} needs a value")))
            };
            match arg.as_str() {
                "--level" => {
                    let raw = value("--level")?;
                    let index = raw
                        .parse()
                        .map_err(|_| RunError::Usage(format!("invalid level index: {raw}")))?;
                    parsed.level = Some(index);
                }
                "--catalog" => parsed.catalog = Some(PathBuf::from(value("--catalog")?)),
                "--replay" => parsed.replay = Some(PathBuf::from(value("--replay")?)),
                other => return Err(RunError::Usage(format!("unknown argument: {other}"))),
            }
        }
        Ok(parsed)
    }

    fn load_replay(path: &Path) -> Result<Vec<KeyState>, RunError> {
        let json = std::fs::read_to_string(path).map_err(|source| RunError::ReplayIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(RunError::ReplayParse)
    }

    pub fn run() -> Result<(), RunError> {
        let args = parse_args(std::env::args().skip(1))?;

        let settings = Settings::load(Path::new(Settings::FILE_NAME));
        let tuning = settings
            .tuning_path
            .as_deref()
            .map(Tuning::load)
            .unwrap_or_default();

        let catalog = args.catalog.as_ref().or(settings.level_catalog.as_ref());
        let levels = match catalog {
            Some(path) => level::load_catalog(path)?,
            None => level::builtin_catalog()?,
        };

        let saved = Progress::load(&settings.progress_path);
        let mut game = Game::with_progress(levels, tuning, &saved)?;
        let mut banner = Banner::new(settings.death_banner_ticks);
        let mut audio = AudioManager::from_settings(LogSink, &settings);
        let mut latch = InputLatch::new();

        if let Some(index) = args.level {
            let events = game.load_level(index);
            banner.handle_events(&events, game.level_index(), game.level_count());
        }
        log::info!("Level {}: {}", game.level_index(), game.level().hint_text());

        let frames = match &args.replay {
            Some(path) => load_replay(path)?,
            None => vec![KeyState::default(); idle_frames(settings.tick_hz)],
        };
        log::info!(
            "Running {} ticks at {} Hz ({:.1} s simulated)",
            frames.len(),
            settings.tick_hz,
            frames.len() as f32 * settings.tick_seconds()
        );

        for keys in &frames {
            let input = latch.sample(keys);
            let events = game.step(&input);
            banner.handle_events(&events, game.level_index(), game.level_count());
            audio.handle_events(&events);
            banner.tick();
            if game.phase() != GamePhase::Playing {
                break;
            }
        }

        if let Some(message) = banner.message() {
            log::info!("Banner: {}", message.title());
        }

        let progress = game.progress();
        if progress != saved {
            progress.save(&settings.progress_path);
        }

        let snapshot = serde_json::to_string_pretty(&game.snapshot()).map_err(RunError::Snapshot)?;
        println!("{snapshot}");
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(list: &[&str]) -> Result<Args, RunError> {
            parse_args(list.iter().map(|s| s.to_string()))
        }

        #[test]
        fn test_parse_args() {
            let parsed = args(&["--level", "3", "--replay", "run.json"]).unwrap();
            assert_eq!(parsed.level, Some(3));
            assert_eq!(parsed.replay, Some(PathBuf::from("run.json")));
            assert!(parsed.catalog.is_none());
        }

        #[test]
        fn test_parse_args_rejects_bad_input() {
            assert!(matches!(args(&["--level"]), Err(RunError::Usage(_))));
            assert!(matches!(args(&["--level", "x"]), Err(RunError::Usage(_))));
            assert!(matches!(args(&["--fly"]), Err(RunError::Usage(_))));
        }

        #[test]
        fn test_idle_frames_saturate() {
            assert_eq!(idle_frames(60), 300);
            assert_eq!(idle_frames(u32::MAX), u32::MAX as usize);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Devil Platformer (headless) starting...");

    if let Err(e) = native::run() {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser frontends drive `Game::step` directly
}
