use app_core::{ease_in_out_quad, ease_out_cubic, Wipe, WIPE_DURATION_SEC};
use glam::Vec2;

#[test]
fn ease_out_cubic_endpoints_and_monotonicity() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert!((ease_out_cubic(1.0) - 1.0).abs() < 1e-6);
    let mut prev = 0.0;
    for i in 1..=100 {
        let v = ease_out_cubic(i as f32 / 100.0);
        assert!(v >= prev, "easing must not reverse at step {i}");
        prev = v;
    }
    // Out-of-range inputs clamp instead of extrapolating
    assert_eq!(ease_out_cubic(-2.0), 0.0);
    assert!((ease_out_cubic(5.0) - 1.0).abs() < 1e-6);
}

#[test]
fn ease_out_cubic_front_loads_motion() {
    // Ease-out: first half covers more ground than the second
    let first = ease_out_cubic(0.5);
    assert!(first > 0.5, "ease-out should be past halfway at t=0.5");
}

#[test]
fn ease_in_out_quad_is_symmetric() {
    for i in 0..=50 {
        let t = i as f32 / 100.0;
        let a = ease_in_out_quad(t);
        let b = ease_in_out_quad(1.0 - t);
        assert!(
            (a + b - 1.0).abs() < 1e-5,
            "symmetry broken at t={t}: {a} vs {b}"
        );
    }
}

#[test]
fn wipe_reaches_the_farthest_corner() {
    let bounds = Vec2::new(1000.0, 600.0);
    // Origin near a corner: farthest corner is the opposite one
    let mut wipe = Wipe::new(Vec2::new(100.0, 100.0), [1.0, 0.0, 0.0]);
    assert_eq!(wipe.radius(bounds), 0.0);
    assert!(!wipe.done());

    wipe.step(WIPE_DURATION_SEC + 0.01);
    assert!(wipe.done());
    let expected = Vec2::new(100.0, 100.0).distance(bounds);
    assert!(
        (wipe.radius(bounds) - expected).abs() < 1e-3,
        "finished wipe must cover the whole screen"
    );
}

#[test]
fn wipe_radius_grows_monotonically() {
    let bounds = Vec2::new(800.0, 800.0);
    let mut wipe = Wipe::new(bounds * 0.5, [0.0, 1.0, 0.0]);
    let mut prev = 0.0;
    for _ in 0..40 {
        wipe.step(WIPE_DURATION_SEC / 30.0);
        let r = wipe.radius(bounds);
        assert!(r >= prev);
        prev = r;
    }
    assert!((wipe.progress() - 1.0).abs() < 1e-6);
}
