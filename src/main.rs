//! Voxel Invaders headless driver
//!
//! Runs a session with the autopilot at a fixed frame rate and logs what the
//! HUD would show. Records persist to a JSON file between runs.
//!
//! Usage: `voxel-invaders [frames] [settings.json] [records.json]`

use voxel_invaders::autopilot::Autopilot;
use voxel_invaders::consts::FRAME_MS;
use voxel_invaders::persistence::JsonFileStore;
use voxel_invaders::platform::{Hud, HudEvent, HudSnapshot, NullRenderer};
use voxel_invaders::sim::GamePhase;
use voxel_invaders::{Session, Settings};

const DEFAULT_FRAMES: u64 = 60 * 60 * 5;

/// HUD that writes to the log
#[derive(Default)]
struct LogHud {
    last_level: u32,
}

impl Hud for LogHud {
    fn update(&mut self, snapshot: &HudSnapshot) {
        if snapshot.level != self.last_level {
            log::info!(
                "Level {} | score {} | lives {} | best {} (level {})",
                snapshot.level,
                snapshot.score,
                snapshot.lives,
                snapshot.high_score,
                snapshot.highest_level
            );
            self.last_level = snapshot.level;
        }
        log::debug!("HUD {:?}", snapshot);
    }

    fn event(&mut self, event: &HudEvent) {
        match event {
            HudEvent::LevelComplete { level, score } => {
                log::info!("Level {} complete, score {}", level, score)
            }
            HudEvent::GameOver {
                score,
                levels_completed,
            } => log::info!(
                "Game over: score {}, {} levels completed",
                score,
                levels_completed
            ),
            HudEvent::Victory { score } => log::info!("Victory! Final score {}", score),
        }
    }
}

/// Frame count from the first argument, falling back to the default
fn frame_count(arg: Option<&str>) -> u64 {
    let Some(arg) = arg else {
        return DEFAULT_FRAMES;
    };
    match arg.parse::<u64>() {
        Ok(frames) => frames,
        Err(err) => {
            log::warn!(
                "Invalid frame count {:?} ({}), running {} frames",
                arg,
                err,
                DEFAULT_FRAMES
            );
            DEFAULT_FRAMES
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Voxel Invaders (headless) starting...");

    let mut args = std::env::args().skip(1);
    let frames = frame_count(args.next().as_deref());
    let settings = args
        .next()
        .map(|path| Settings::load_or_default(&path))
        .unwrap_or_default();
    let records_path = args
        .next()
        .unwrap_or_else(|| "voxel-invaders-records.json".to_string());

    let store = match JsonFileStore::open(&records_path) {
        Ok(store) => store,
        Err(err) => {
            log::error!("Cannot open record store {}: {}", records_path, err);
            std::process::exit(1);
        }
    };

    let mut session = Session::new(settings, NullRenderer, LogHud::default(), store);
    let mut pilot = Autopilot::new();
    let mut runs = 0;

    for _ in 0..frames {
        let was_over = matches!(
            session.state().phase,
            GamePhase::GameOver | GamePhase::Victory
        );
        let input = pilot.next_input(session.state());
        session.frame(&input, FRAME_MS);
        if was_over && session.state().phase == GamePhase::Playing {
            runs += 1;
        }
    }

    let records = session.records();
    log::info!(
        "Finished {} frames ({} restarts): high score {}, highest level {}",
        frames,
        runs,
        records.high_score,
        records.highest_level
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_count_argument() {
        assert_eq!(frame_count(None), DEFAULT_FRAMES);
        assert_eq!(frame_count(Some("600")), 600);
        assert_eq!(frame_count(Some("ten")), DEFAULT_FRAMES);
        assert_eq!(frame_count(Some("-5")), DEFAULT_FRAMES);
    }
}
