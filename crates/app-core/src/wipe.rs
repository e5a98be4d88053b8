//! Winner wipe: a radial fill of the winner's color spreading from their
//! touch point until it covers the screen. Easing helpers shared with the
//! blob pulse/shrink animations live here too.

use glam::Vec2;

use crate::constants::WIPE_DURATION_SEC;

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[derive(Clone, Debug)]
pub struct Wipe {
    pub origin: Vec2,
    pub color: [f32; 3],
    age: f32,
}

impl Wipe {
    pub fn new(origin: Vec2, color: [f32; 3]) -> Self {
        Self {
            origin,
            color,
            age: 0.0,
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.age += dt;
    }

    /// Eased completion in [0, 1].
    pub fn progress(&self) -> f32 {
        ease_out_cubic(self.age / WIPE_DURATION_SEC)
    }

    pub fn done(&self) -> bool {
        self.age >= WIPE_DURATION_SEC
    }

    /// Current fill radius: progress scaled by the distance from the origin
    /// to the farthest screen corner, so `done` always means fully covered.
    pub fn radius(&self, bounds: Vec2) -> f32 {
        let corners = [
            Vec2::ZERO,
            Vec2::new(bounds.x, 0.0),
            Vec2::new(0.0, bounds.y),
            bounds,
        ];
        let farthest = corners
            .iter()
            .map(|c| self.origin.distance(*c))
            .fold(0.0_f32, f32::max);
        farthest * self.progress()
    }
}
