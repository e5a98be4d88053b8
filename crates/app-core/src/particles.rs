//! Particle systems: confetti, firework sparks, sparkles, ripples, rays and
//! bokeh all live in one array with per-kind kinematics.

use glam::Vec2;
use rand::prelude::*;

use crate::constants::{
    BOKEH_COUNT, CONFETTI_COUNT, CONFETTI_GRAVITY, FIREWORK_DRAG, FIREWORK_GRAVITY,
    FIREWORK_SPARKS, MAX_PARTICLES, PARTICLE_BOUNDS_MARGIN, RAY_COUNT, SPARKLE_COUNT,
};
use crate::theme::TouchColor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Confetti,
    Spark,
    Sparkle,
    Ripple,
    Ray,
    Bokeh,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub kind: ParticleKind,
    pub position: Vec2,
    /// For ripples, `velocity.x` is the radial growth rate in px/s.
    pub velocity: Vec2,
    pub life: f32,
    pub initial_life: f32,
    pub size: Vec2,
    pub rotation: f32,
    pub spin: f32,
    pub color: [f32; 4],
}

impl Particle {
    /// 1 at birth, 0 at death.
    pub fn life_frac(&self) -> f32 {
        if self.initial_life > 0.0 {
            (self.life / self.initial_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// How many more particles fit under the population cap.
    fn budget(&self, wanted: usize) -> usize {
        wanted.min(MAX_PARTICLES.saturating_sub(self.particles.len()))
    }

    /// Upward fan of fluttering rectangles.
    pub fn spawn_confetti(&mut self, rng: &mut impl Rng, origin: Vec2, palette: &[TouchColor]) {
        for _ in 0..self.budget(CONFETTI_COUNT) {
            let angle = -std::f32::consts::FRAC_PI_2 + rng.gen_range(-1.05..1.05);
            let speed = rng.gen_range(300.0..700.0);
            let c = palette[rng.gen_range(0..palette.len())].rgb;
            self.particles.push(Particle {
                kind: ParticleKind::Confetti,
                position: origin,
                velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: rng.gen_range(2.2..3.4),
                initial_life: 3.4,
                size: Vec2::new(rng.gen_range(10.0..18.0), rng.gen_range(5.0..9.0)),
                rotation: rng.gen_range(0.0..std::f32::consts::TAU),
                spin: rng.gen_range(-8.0..8.0),
                color: [c[0], c[1], c[2], 1.0],
            });
        }
    }

    /// Radial spark ring with drag and a little gravity.
    pub fn spawn_firework(&mut self, rng: &mut impl Rng, origin: Vec2, color: [f32; 3]) {
        for _ in 0..self.budget(FIREWORK_SPARKS) {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(250.0..520.0);
            let life = rng.gen_range(0.8..1.4);
            self.particles.push(Particle {
                kind: ParticleKind::Spark,
                position: origin,
                velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
                life,
                initial_life: life,
                size: Vec2::splat(rng.gen_range(4.0..8.0)),
                rotation: 0.0,
                spin: 0.0,
                color: [color[0], color[1], color[2], 1.0],
            });
        }
    }

    /// Twinkling points scattered around the winner.
    pub fn spawn_sparkles(&mut self, rng: &mut impl Rng, origin: Vec2, color: [f32; 3]) {
        for _ in 0..self.budget(SPARKLE_COUNT) {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let dist = rng.gen_range(30.0..190.0);
            let life = rng.gen_range(0.3..1.0);
            self.particles.push(Particle {
                kind: ParticleKind::Sparkle,
                position: origin + Vec2::new(angle.cos(), angle.sin()) * dist,
                velocity: Vec2::new(rng.gen_range(-25.0..25.0), rng.gen_range(-25.0..25.0)),
                life,
                initial_life: life,
                size: Vec2::splat(rng.gen_range(5.0..11.0)),
                rotation: 0.0,
                spin: 0.0,
                color: [color[0], color[1], color[2], 1.0],
            });
        }
    }

    /// Expanding rings; `scale` distinguishes the big celebration ripple from
    /// the small touch-down feedback ring.
    pub fn spawn_ripples(
        &mut self,
        rng: &mut impl Rng,
        origin: Vec2,
        color: [f32; 3],
        rings: usize,
        scale: f32,
    ) {
        for i in 0..self.budget(rings) {
            let life = 0.9 * scale.max(0.4) + i as f32 * 0.18;
            self.particles.push(Particle {
                kind: ParticleKind::Ripple,
                position: origin,
                velocity: Vec2::new(rng.gen_range(380.0..460.0) * scale, 0.0),
                life,
                initial_life: life,
                size: Vec2::splat(10.0),
                rotation: 0.0,
                spin: 0.0,
                color: [color[0], color[1], color[2], 0.8],
            });
        }
    }

    /// Rotating streaks anchored to the winner point.
    pub fn spawn_rays(&mut self, rng: &mut impl Rng, origin: Vec2, color: [f32; 3]) {
        let n = self.budget(RAY_COUNT);
        for i in 0..n {
            let base = i as f32 / RAY_COUNT as f32 * std::f32::consts::TAU;
            self.particles.push(Particle {
                kind: ParticleKind::Ray,
                position: origin,
                velocity: Vec2::ZERO,
                life: 1.7,
                initial_life: 1.7,
                size: Vec2::new(rng.gen_range(380.0..560.0), rng.gen_range(14.0..26.0)),
                rotation: base + rng.gen_range(-0.1..0.1),
                spin: rng.gen_range(0.4..0.9) * if i % 2 == 0 { 1.0 } else { -1.0 },
                color: [color[0], color[1], color[2], 0.85],
            });
        }
    }

    /// Slow drifting soft orbs across the whole surface.
    pub fn spawn_bokeh(&mut self, rng: &mut impl Rng, bounds: Vec2, palette: &[TouchColor]) {
        for _ in 0..self.budget(BOKEH_COUNT) {
            let c = palette[rng.gen_range(0..palette.len())].rgb;
            let life = rng.gen_range(3.5..7.0);
            self.particles.push(Particle {
                kind: ParticleKind::Bokeh,
                position: Vec2::new(
                    rng.gen_range(0.0..bounds.x.max(1.0)),
                    rng.gen_range(0.0..bounds.y.max(1.0)),
                ),
                velocity: Vec2::new(rng.gen_range(-35.0..35.0), rng.gen_range(-50.0..-12.0)),
                life,
                initial_life: life,
                size: Vec2::splat(rng.gen_range(40.0..140.0)),
                rotation: 0.0,
                spin: 0.0,
                color: [c[0], c[1], c[2], rng.gen_range(0.12..0.3)],
            });
        }
    }

    /// Advance kinematics and prune dead or out-of-bounds particles.
    pub fn step(&mut self, dt: f32, bounds: Vec2) {
        for p in &mut self.particles {
            p.life -= dt;
            match p.kind {
                ParticleKind::Confetti => {
                    p.velocity.y += CONFETTI_GRAVITY * dt;
                    p.velocity.x *= (-1.2 * dt).exp();
                    p.position += p.velocity * dt;
                    p.rotation += p.spin * dt;
                }
                ParticleKind::Spark => {
                    let decay = (-FIREWORK_DRAG * dt).exp();
                    p.velocity *= decay;
                    p.velocity.y += FIREWORK_GRAVITY * dt;
                    p.position += p.velocity * dt;
                }
                ParticleKind::Sparkle | ParticleKind::Bokeh => {
                    p.position += p.velocity * dt;
                }
                ParticleKind::Ripple => {
                    // velocity.x carries the radial growth rate
                    p.size += Vec2::splat(p.velocity.x * dt * 2.0);
                }
                ParticleKind::Ray => {
                    p.rotation += p.spin * dt;
                }
            }
        }
        let lo = Vec2::splat(-PARTICLE_BOUNDS_MARGIN);
        let hi = bounds + Vec2::splat(PARTICLE_BOUNDS_MARGIN);
        self.particles.retain(|p| {
            p.life > 0.0
                && p.position.x >= lo.x
                && p.position.y >= lo.y
                && p.position.x <= hi.x
                && p.position.y <= hi.y
        });
    }
}
