//! GPU instance types shared by the web and native renderers, plus the
//! builder that flattens a [`Game`](crate::game::Game) frame into one
//! instance list. Both frontends draw the exact same scene because this is
//! the only place it is assembled.

use glam::Vec2;

use crate::constants::{
    TOUCH_GLOW_SCALE, TOUCH_PULSE_AMOUNT, TOUCH_RADIUS_PX, WINNER_PULSE_AMOUNT,
};
use crate::game::Game;
use crate::particles::ParticleKind;
use crate::wipe::ease_out_cubic;

pub const SHAPE_CIRCLE: u32 = 0;
pub const SHAPE_RECT: u32 = 1;
pub const SHAPE_RING: u32 = 2;
pub const SHAPE_STREAK: u32 = 3;
pub const SHAPE_BACKDROP: u32 = 4;

/// One quad instance in pixel space. 48 bytes, matches the WGSL vertex layout
/// in both frontends.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Instance {
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub rotation: f32,
    pub shape: u32,
    pub color: [f32; 4],
    pub glow: f32,
    pub _pad: f32,
}

impl Instance {
    fn new(pos: Vec2, size: Vec2, shape: u32, color: [f32; 4]) -> Self {
        Self {
            pos: pos.to_array(),
            size: size.to_array(),
            rotation: 0.0,
            shape,
            color,
            glow: 0.0,
            _pad: 0.0,
        }
    }
}

/// Flatten the current frame into draw order: backdrop, wipe, particles,
/// touch blobs on top.
pub fn build_instances(game: &Game, bounds: Vec2, out: &mut Vec<Instance>) {
    out.clear();

    out.push(Instance::new(
        bounds * 0.5,
        bounds,
        SHAPE_BACKDROP,
        [0.0; 4],
    ));

    if let Some(w) = &game.wipe {
        let r = w.radius(bounds);
        out.push(Instance::new(
            w.origin,
            Vec2::splat(r * 2.0),
            SHAPE_CIRCLE,
            [w.color[0], w.color[1], w.color[2], 1.0],
        ));
    }

    for p in game.particles.iter() {
        let frac = p.life_frac();
        let mut inst = Instance::new(p.position, p.size, SHAPE_CIRCLE, p.color);
        inst.rotation = p.rotation;
        match p.kind {
            ParticleKind::Confetti => {
                inst.shape = SHAPE_RECT;
                inst.color[3] *= frac.sqrt();
            }
            ParticleKind::Spark => {
                inst.size = (p.size * frac).to_array();
                inst.color[3] *= frac;
                inst.glow = 0.6;
            }
            ParticleKind::Sparkle => {
                // deterministic twinkle off the remaining life
                let twinkle = 0.5 + 0.5 * (p.life * 40.0).sin();
                inst.size = (p.size * frac).to_array();
                inst.color[3] *= frac * twinkle;
                inst.glow = 1.0;
            }
            ParticleKind::Ripple => {
                inst.shape = SHAPE_RING;
                inst.color[3] *= frac;
            }
            ParticleKind::Ray => {
                inst.shape = SHAPE_STREAK;
                // anchored at the winner point, extending outward
                let dir = Vec2::from_angle(p.rotation);
                inst.pos = (p.position + dir * p.size.x * 0.5).to_array();
                inst.color[3] *= (std::f32::consts::PI * frac).sin();
                inst.glow = 0.4;
            }
            ParticleKind::Bokeh => {
                let breathe = 1.0 + 0.1 * (p.life * 2.0).sin();
                inst.size = (p.size * breathe).to_array();
                inst.glow = 0.3;
            }
        }
        out.push(inst);
    }

    let theme = game.theme();
    let pinned = game.registry.pinned();
    for (id, t) in game.registry.iter() {
        let is_winner = pinned == Some(*id);
        let pulse_amount = if is_winner {
            WINNER_PULSE_AMOUNT
        } else {
            TOUCH_PULSE_AMOUNT
        };
        let radius = TOUCH_RADIUS_PX
            * ease_out_cubic(t.shrink)
            * (1.0 + pulse_amount * t.phase.sin());
        if radius <= 0.0 {
            continue;
        }
        let rgb = theme.color(t.color_index).rgb;

        // glow halo under the blob, in the theme's glow color
        let glow_alpha = if is_winner { 0.55 } else { 0.35 };
        let mut halo = Instance::new(
            t.position,
            Vec2::splat(radius * 2.0 * TOUCH_GLOW_SCALE),
            SHAPE_CIRCLE,
            [theme.glow[0], theme.glow[1], theme.glow[2], glow_alpha],
        );
        halo.glow = 0.5;
        out.push(halo);

        let mut body = Instance::new(
            t.position,
            Vec2::splat(radius * 2.0),
            SHAPE_CIRCLE,
            [rgb[0], rgb[1], rgb[2], 1.0],
        );
        body.glow = if is_winner { 0.8 } else { 0.15 };
        out.push(body);
    }
}
