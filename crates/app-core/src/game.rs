//! Top-level simulation: one `Game` owns the touch registry, the round state
//! machine, the particle pool and the wipe, and turns platform input plus
//! frame ticks into render state and audio cues. Both frontends drive this
//! and nothing else.

use fnv::FnvHashMap;
use glam::Vec2;
use rand::prelude::*;
use smallvec::SmallVec;

use crate::constants::{RIPPLE_RINGS, TOUCH_RIPPLE_RINGS};
use crate::cues::{self, Cue, ToneEvent};
use crate::particles::ParticleSystem;
use crate::round::{Phase, Round, RoundEvent};
use crate::theme::{CelebrationEffect, Theme, THEMES};
use crate::touch::{TouchId, TouchRegistry};
use crate::wipe::Wipe;

/// What the status line should read right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Splash,
    Count(u32),
    Winner,
    NoTouch,
}

pub struct Game {
    pub registry: TouchRegistry,
    pub round: Round,
    pub particles: ParticleSystem,
    pub wipe: Option<Wipe>,
    theme: &'static Theme,
    /// Session win tally by color name (names outlive theme switches).
    wins: FnvHashMap<&'static str, u32>,
    rng: StdRng,
    pending: Vec<ToneEvent>,
    now: f64,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self {
            registry: TouchRegistry::new(),
            round: Round::new(),
            particles: ParticleSystem::new(),
            wipe: None,
            theme: &THEMES[0],
            wins: FnvHashMap::default(),
            rng: StdRng::seed_from_u64(seed),
            pending: Vec::new(),
            now: 0.0,
        }
    }

    pub fn theme(&self) -> &'static Theme {
        self.theme
    }

    /// Begin a round: random theme, fresh countdown. Touches that are still
    /// held carry over, so a table of fingers can replay without lifting.
    pub fn start_round(&mut self) {
        if let Err(e) = self.round.start() {
            log::warn!("start_round ignored: {e}");
            return;
        }
        self.theme = Theme::pick(&mut self.rng);
        self.registry.unpin();
        self.particles.clear();
        self.wipe = None;
        self.cue(Cue::CountdownTick(crate::constants::COUNTDOWN_START));
        log::info!("round start, theme {}", self.theme.name);
    }

    /// Replay button: only meaningful once a round has resolved.
    pub fn replay(&mut self) {
        if self.round.is_terminal() {
            self.start_round();
        }
    }

    pub fn touch_begin(&mut self, id: TouchId, position: Vec2) {
        let fresh = self.registry.get(id).is_none();
        self.registry
            .begin(id, position, self.now, self.theme.touch_palette.len());
        if !fresh {
            return;
        }
        let Some(color_index) = self.registry.get(id).map(|t| t.color_index) else {
            return;
        };
        let rgb = self.theme.color(color_index).rgb;
        self.particles
            .spawn_ripples(&mut self.rng, position, rgb, TOUCH_RIPPLE_RINGS, 0.4);
        self.cue(Cue::TouchDown { color_index });
    }

    pub fn touch_move(&mut self, id: TouchId, position: Vec2) {
        self.registry.update(id, position);
    }

    pub fn touch_end(&mut self, id: TouchId) {
        self.registry.release(id);
    }

    /// Advance one frame. Expanded tone events for any cues fired this frame
    /// are appended to `tones` for the caller's synth.
    pub fn frame(&mut self, dt: f32, bounds: Vec2, tones: &mut Vec<ToneEvent>) {
        self.now += dt as f64;
        self.registry.step(dt);

        let mut events: SmallVec<[RoundEvent; 4]> = SmallVec::new();
        self.round
            .tick(dt as f64, &self.registry, &mut self.rng, &mut events);
        for ev in events {
            match ev {
                RoundEvent::Tick(n) => self.cue(Cue::CountdownTick(n)),
                RoundEvent::Winner { id, color_index } => self.celebrate(id, color_index, bounds),
                RoundEvent::NoTouch => {
                    self.cue(Cue::NoTouch);
                    log::info!("countdown expired with no touch");
                }
            }
        }

        if let Some(w) = &mut self.wipe {
            w.step(dt);
        }
        self.particles.step(dt, bounds);

        tones.append(&mut self.pending);
    }

    fn celebrate(&mut self, id: TouchId, color_index: usize, bounds: Vec2) {
        self.registry.pin(id);
        let origin = self
            .registry
            .get(id)
            .map(|t| t.position)
            .unwrap_or(bounds * 0.5);
        let color = self.theme.color(color_index).rgb;
        *self.wins.entry(self.theme.color(color_index).name).or_insert(0) += 1;
        self.wipe = Some(Wipe::new(origin, color));
        match self.theme.effect {
            CelebrationEffect::Confetti => {
                self.particles
                    .spawn_confetti(&mut self.rng, origin, self.theme.touch_palette)
            }
            CelebrationEffect::Fireworks => {
                self.particles.spawn_firework(&mut self.rng, origin, color)
            }
            CelebrationEffect::Sparkles => {
                self.particles.spawn_sparkles(&mut self.rng, origin, color)
            }
            CelebrationEffect::Ripples => {
                self.particles
                    .spawn_ripples(&mut self.rng, origin, color, RIPPLE_RINGS, 1.0)
            }
            CelebrationEffect::Rays => self.particles.spawn_rays(&mut self.rng, origin, color),
            CelebrationEffect::Bokeh => {
                self.particles
                    .spawn_bokeh(&mut self.rng, bounds, self.theme.touch_palette)
            }
        }
        self.cue(Cue::Winner);
        log::info!(
            "winner: touch {} ({})",
            id.0,
            self.theme.color(color_index).name
        );
    }

    pub fn status(&self) -> Status {
        match self.round.phase() {
            Phase::Splash => Status::Splash,
            Phase::Counting { .. } => Status::Count(self.round.displayed_second().unwrap_or(0)),
            Phase::Celebrating { .. } => Status::Winner,
            Phase::NoTouch => Status::NoTouch,
        }
    }

    pub fn replay_available(&self) -> bool {
        self.round.is_terminal()
    }

    /// Session scoreboard line, e.g. `Round 3 · Gold ×2 · Red ×1`.
    pub fn scoreboard(&self) -> String {
        if self.round.rounds_played == 0 {
            return String::new();
        }
        let mut line = format!("Round {}", self.round.rounds_played);
        let mut wins: SmallVec<[(&'static str, u32); 8]> =
            self.wins.iter().map(|(&n, &w)| (n, w)).collect();
        wins.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        for (name, count) in wins {
            line.push_str(&format!(" · {name} ×{count}"));
        }
        line
    }

    pub fn background(&self) -> [[f32; 3]; 2] {
        self.theme.background
    }

    fn cue(&mut self, cue: Cue) {
        cues::expand(cue, self.theme, &mut self.pending);
    }
}
