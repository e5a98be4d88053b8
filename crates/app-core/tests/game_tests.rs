use app_core::{
    build_instances, Game, Instance, Status, ToneEvent, TouchId, COUNTDOWN_START, SHAPE_BACKDROP,
    SHAPE_CIRCLE,
};
use glam::Vec2;

const BOUNDS: Vec2 = Vec2::new(1280.0, 720.0);
const DT: f32 = 1.0 / 60.0;

fn run_seconds(game: &mut Game, seconds: f32) -> Vec<ToneEvent> {
    let mut tones = Vec::new();
    let mut t = 0.0;
    while t < seconds {
        game.frame(DT, BOUNDS, &mut tones);
        t += DT;
    }
    tones
}

fn play_round(seed: u64, fingers: i32) -> Game {
    let mut game = Game::new(seed);
    game.start_round();
    for id in 0..fingers {
        game.touch_begin(TouchId(id), Vec2::new(200.0 + id as f32 * 150.0, 400.0));
    }
    run_seconds(&mut game, COUNTDOWN_START as f32 + 0.5);
    game
}

#[test]
fn a_full_round_ends_with_a_pinned_winner() {
    let game = play_round(11, 4);
    assert_eq!(game.status(), Status::Winner);
    assert!(game.replay_available());
    let winner = game.registry.pinned().expect("winner must be pinned");
    assert!(
        game.registry.get(winner).is_some(),
        "winner touch must still be live"
    );
    assert!(game.wipe.is_some(), "celebration starts the wipe");
    assert!(
        !game.particles.is_empty(),
        "every theme effect spawns particles"
    );
}

#[test]
fn status_counts_down_then_resolves() {
    let mut game = Game::new(3);
    assert_eq!(game.status(), Status::Splash);
    game.start_round();
    game.touch_begin(TouchId(0), Vec2::new(600.0, 300.0));
    assert_eq!(game.status(), Status::Count(COUNTDOWN_START));

    run_seconds(&mut game, 1.1);
    assert_eq!(game.status(), Status::Count(COUNTDOWN_START - 1));

    run_seconds(&mut game, COUNTDOWN_START as f32);
    assert_eq!(game.status(), Status::Winner);
}

#[test]
fn empty_table_resolves_to_no_touch() {
    let mut game = Game::new(5);
    game.start_round();
    run_seconds(&mut game, COUNTDOWN_START as f32 + 0.5);
    assert_eq!(game.status(), Status::NoTouch);
    assert!(game.replay_available());
    assert!(game.registry.pinned().is_none());
}

#[test]
fn rounds_emit_tones_for_ticks_and_the_fanfare() {
    let mut game = Game::new(11);
    game.start_round();
    game.touch_begin(TouchId(0), Vec2::new(600.0, 300.0));
    let tones = run_seconds(&mut game, COUNTDOWN_START as f32 + 0.5);
    // 2 remaining tick blips + touch-down pluck + fanfare (>= 3 notes),
    // plus the start blip drained on the first frame.
    assert!(
        tones.len() >= 6,
        "expected a full round of cues, got {}",
        tones.len()
    );
    for ev in &tones {
        assert!(ev.frequency_hz > 20.0 && ev.frequency_hz < 20_000.0);
        assert!(ev.duration_sec > 0.0);
    }
}

#[test]
fn same_seed_and_script_same_winner_and_theme() {
    let a = play_round(21, 5);
    let b = play_round(21, 5);
    assert_eq!(a.registry.pinned(), b.registry.pinned());
    assert_eq!(a.theme().name, b.theme().name);
}

#[test]
fn replay_keeps_held_fingers_in_play() {
    let mut game = play_round(2, 3);
    assert!(game.replay_available());
    game.replay();
    assert_eq!(game.status(), Status::Count(COUNTDOWN_START));
    assert!(game.registry.pinned().is_none(), "replay unpins the winner");
    assert!(game.particles.is_empty(), "replay clears the celebration");
    assert!(game.wipe.is_none());
    // The three fingers never lifted; they are candidates again
    assert_eq!(game.registry.candidates().len(), 3);

    run_seconds(&mut game, COUNTDOWN_START as f32 + 0.5);
    assert_eq!(game.status(), Status::Winner);
}

#[test]
fn replay_is_a_no_op_mid_countdown() {
    let mut game = Game::new(9);
    game.start_round();
    run_seconds(&mut game, 1.0);
    let before = game.status();
    game.replay();
    assert_eq!(game.status(), before, "replay must not reset a live round");
}

#[test]
fn scoreboard_tallies_session_wins() {
    let mut game = play_round(31, 2);
    let line = game.scoreboard();
    assert!(line.starts_with("Round 1"), "got {line:?}");
    assert!(line.contains('×'), "winner tally missing: {line:?}");

    game.replay();
    run_seconds(&mut game, COUNTDOWN_START as f32 + 0.5);
    assert!(game.scoreboard().starts_with("Round 2"));
}

#[test]
fn instances_layer_backdrop_first_then_blobs() {
    let mut game = Game::new(17);
    game.start_round();
    game.touch_begin(TouchId(0), Vec2::new(400.0, 400.0));
    game.touch_begin(TouchId(1), Vec2::new(800.0, 300.0));
    let mut tones = Vec::new();
    game.frame(DT, BOUNDS, &mut tones);

    let mut out: Vec<Instance> = Vec::new();
    build_instances(&game, BOUNDS, &mut out);
    assert_eq!(out[0].shape, SHAPE_BACKDROP);
    assert_eq!(out[0].size, BOUNDS.to_array());
    // Two blobs, each a glow halo plus a body, drawn on top
    let circles = out.iter().rev().take(4);
    assert!(circles.clone().count() == 4);
    for inst in circles {
        assert_eq!(inst.shape, SHAPE_CIRCLE);
    }
    // Halo is bigger than the body it sits under
    let n = out.len();
    assert!(out[n - 2].size[0] > out[n - 1].size[0]);
}

#[test]
fn winner_wipe_covers_the_screen_when_done() {
    let mut game = play_round(13, 3);
    run_seconds(&mut game, 2.0);
    let wipe = game.wipe.as_ref().unwrap();
    assert!(wipe.done());
    let mut out = Vec::new();
    build_instances(&game, BOUNDS, &mut out);
    // Wipe circle is the instance right after the backdrop
    assert_eq!(out[1].shape, SHAPE_CIRCLE);
    assert!(
        out[1].size[0] >= BOUNDS.x,
        "finished wipe should span the screen"
    );
}
