use app_core::{
    ParticleKind, ParticleSystem, CONFETTI_COUNT, MAX_PARTICLES, PARTICLE_BOUNDS_MARGIN, THEMES,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const BOUNDS: Vec2 = Vec2::new(1280.0, 720.0);

fn rng() -> StdRng {
    StdRng::seed_from_u64(99)
}

#[test]
fn confetti_burst_spawns_and_falls() {
    let mut sys = ParticleSystem::new();
    let mut rng = rng();
    let origin = Vec2::new(640.0, 360.0);
    sys.spawn_confetti(&mut rng, origin, THEMES[3].touch_palette);
    assert_eq!(sys.len(), CONFETTI_COUNT);

    // Initial burst goes upward
    assert!(sys.iter().all(|p| p.velocity.y < 0.0));

    // Gravity turns the fan around within a couple of seconds
    for _ in 0..120 {
        sys.step(1.0 / 60.0, BOUNDS);
    }
    assert!(
        sys.iter().any(|p| p.velocity.y > 0.0),
        "confetti should be falling by now"
    );
}

#[test]
fn dead_particles_are_pruned() {
    let mut sys = ParticleSystem::new();
    let mut rng = rng();
    sys.spawn_sparkles(&mut rng, Vec2::new(100.0, 100.0), [1.0, 1.0, 1.0]);
    assert!(!sys.is_empty());
    // Sparkle lifetimes top out near a second
    for _ in 0..90 {
        sys.step(1.0 / 30.0, BOUNDS);
    }
    assert!(sys.is_empty(), "expired sparkles must be removed");
}

#[test]
fn out_of_bounds_particles_are_pruned() {
    let mut sys = ParticleSystem::new();
    let mut rng = rng();
    sys.spawn_firework(&mut rng, Vec2::new(640.0, 360.0), [1.0, 0.5, 0.0]);
    let start = sys.len();
    assert!(start > 0);
    // March everything far past the margin by stepping with a huge dt so
    // sparks fly off-screen while still alive.
    sys.step(0.4, Vec2::new(10.0, 10.0));
    assert!(
        sys.len() < start,
        "sparks beyond bounds+{PARTICLE_BOUNDS_MARGIN} should be dropped"
    );
}

#[test]
fn population_cap_holds_across_repeated_bursts() {
    let mut sys = ParticleSystem::new();
    let mut rng = rng();
    for _ in 0..60 {
        sys.spawn_confetti(&mut rng, Vec2::new(640.0, 360.0), THEMES[3].touch_palette);
        sys.spawn_firework(&mut rng, Vec2::new(300.0, 300.0), [1.0, 1.0, 1.0]);
    }
    assert!(
        sys.len() <= MAX_PARTICLES,
        "cap exceeded: {}",
        sys.len()
    );
}

#[test]
fn ripples_grow_without_moving() {
    let mut sys = ParticleSystem::new();
    let mut rng = rng();
    let origin = Vec2::new(200.0, 200.0);
    sys.spawn_ripples(&mut rng, origin, [0.0, 0.8, 0.8], 3, 1.0);
    assert_eq!(sys.len(), 3);
    let before: Vec<f32> = sys.iter().map(|p| p.size.x).collect();
    sys.step(0.1, BOUNDS);
    for (p, b) in sys.iter().zip(before) {
        assert_eq!(p.position, origin, "ripples are anchored");
        assert!(p.size.x > b, "rings must expand");
    }
}

#[test]
fn rays_stay_anchored_and_rotate() {
    let mut sys = ParticleSystem::new();
    let mut rng = rng();
    let origin = Vec2::new(500.0, 400.0);
    sys.spawn_rays(&mut rng, origin, [0.0, 1.0, 1.0]);
    let before: Vec<f32> = sys.iter().map(|p| p.rotation).collect();
    sys.step(0.25, BOUNDS);
    for (p, b) in sys.iter().zip(before) {
        assert_eq!(p.kind, ParticleKind::Ray);
        assert_eq!(p.position, origin);
        assert!((p.rotation - b).abs() > 1e-4, "rays must keep turning");
    }
}

#[test]
fn bokeh_drifts_slowly_upward() {
    let mut sys = ParticleSystem::new();
    let mut rng = rng();
    sys.spawn_bokeh(&mut rng, BOUNDS, THEMES[4].touch_palette);
    assert!(sys.iter().all(|p| p.kind == ParticleKind::Bokeh));
    assert!(sys.iter().all(|p| p.velocity.y < 0.0));
    assert!(sys.iter().all(|p| p.color[3] < 0.5), "bokeh is translucent");
}

#[test]
fn life_frac_runs_from_one_to_zero() {
    let mut sys = ParticleSystem::new();
    let mut rng = rng();
    sys.spawn_firework(&mut rng, Vec2::new(640.0, 360.0), [1.0, 1.0, 1.0]);
    for p in sys.iter() {
        assert!((p.life_frac() - 1.0).abs() < 1e-6);
    }
    sys.step(0.2, BOUNDS);
    for p in sys.iter() {
        let f = p.life_frac();
        assert!(f > 0.0 && f < 1.0, "life_frac out of range: {f}");
    }
}
