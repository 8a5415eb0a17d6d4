//! Long headless runs driven by the autopilot

use std::collections::HashSet;

use voxel_invaders::autopilot::Autopilot;
use voxel_invaders::consts::FRAME_MS;
use voxel_invaders::persistence::MemoryStore;
use voxel_invaders::platform::{RecordingHud, RecordingRenderer};
use voxel_invaders::sim::GamePhase;
use voxel_invaders::{Session, Settings};

fn run(seed: u64, frames: usize) -> Session<RecordingRenderer, RecordingHud, MemoryStore> {
    let settings = Settings {
        seed,
        ..Settings::default()
    };
    let mut session = Session::new(
        settings,
        RecordingRenderer::new(),
        RecordingHud::new(),
        MemoryStore::new(),
    );
    let mut pilot = Autopilot::new();

    for frame in 0..frames {
        let input = pilot.next_input(session.state());
        session.frame(&input, FRAME_MS);

        let state = session.state();
        let renderer = session.renderer();
        assert_eq!(renderer.stale_calls, 0, "stale renderer call by frame {frame}");

        // Bullets live in exactly one collection
        let player_ids: HashSet<_> = state.player_bullets.iter().map(|b| b.id).collect();
        assert!(state.enemy_bullets.iter().all(|b| !player_ids.contains(&b.id)));

        // The scene mirrors the world one-to-one
        assert_eq!(renderer.nodes.len(), state.render_list().len());

        if let Some(hud) = session.hud().latest() {
            assert!(hud.lives <= 3);
        }
    }
    session
}

#[test]
fn test_autopilot_plays_and_scores() {
    let session = run(2024, 6000);
    assert!(session.renderer().frames == 6000);
    assert_ne!(session.state().phase, GamePhase::Menu);
    let best = session.records().high_score.max(session.state().score);
    assert!(best > 0, "autopilot never scored");
}

#[test]
fn test_same_seed_same_run() {
    let a = run(77, 1500);
    let b = run(77, 1500);
    assert_eq!(a.state().score, b.state().score);
    assert_eq!(a.state().lives, b.state().lives);
    assert_eq!(a.state().level, b.state().level);
    assert_eq!(a.hud().snapshots, b.hud().snapshots);
}
