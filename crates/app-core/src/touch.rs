//! Live multi-touch registry.
//!
//! Touches are keyed by the ephemeral identifier the platform hands us (DOM
//! `Touch.identifier`, winit touch id, or a synthetic id for the mouse). A
//! released touch is not dropped immediately: it shrinks out over
//! [`TOUCH_SHRINK_SEC`](crate::constants::TOUCH_SHRINK_SEC) and is pruned once
//! its shrink scalar reaches zero.

use fnv::FnvHashMap;
use glam::Vec2;
use smallvec::SmallVec;

use crate::constants::{TOUCH_PULSE_HZ, TOUCH_SHRINK_SEC};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TouchId(pub i32);

#[derive(Clone, Debug)]
pub struct TouchPoint {
    pub position: Vec2,
    pub born_at: f64,
    /// Slot into the active theme's touch palette, stable for the touch's life.
    pub color_index: usize,
    /// Idle pulse phase in radians.
    pub phase: f32,
    /// 1 while held, decaying to 0 after release; pruned at 0.
    pub shrink: f32,
    pub released: bool,
}

#[derive(Default)]
pub struct TouchRegistry {
    touches: FnvHashMap<TouchId, TouchPoint>,
    color_cursor: usize,
    /// Winner touch kept alive through the celebration even if lifted.
    pinned: Option<TouchId>,
}

impl TouchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a touch, assigning the next free palette slot. Platforms reuse
    /// identifiers, so a begin on a live id just moves it.
    pub fn begin(&mut self, id: TouchId, position: Vec2, now: f64, palette_len: usize) {
        if let Some(t) = self.touches.get_mut(&id) {
            t.position = position;
            return;
        }
        let color_index = self.next_color_index(palette_len.max(1));
        self.color_cursor = color_index + 1;
        self.touches.insert(
            id,
            TouchPoint {
                position,
                born_at: now,
                color_index,
                phase: color_index as f32 * 1.3,
                shrink: 1.0,
                released: false,
            },
        );
        log::debug!("touch {} down, color slot {}", id.0, color_index);
    }

    pub fn update(&mut self, id: TouchId, position: Vec2) {
        if let Some(t) = self.touches.get_mut(&id) {
            if !t.released {
                t.position = position;
            }
        }
    }

    pub fn release(&mut self, id: TouchId) {
        if let Some(t) = self.touches.get_mut(&id) {
            t.released = true;
        }
    }

    /// Keep `id` alive (and unreleased-looking) through the celebration.
    pub fn pin(&mut self, id: TouchId) {
        self.pinned = Some(id);
    }

    pub fn unpin(&mut self) {
        self.pinned = None;
    }

    pub fn pinned(&self) -> Option<TouchId> {
        self.pinned
    }

    /// Advance pulse phases and shrink-outs; prune fully shrunk touches.
    pub fn step(&mut self, dt: f32) {
        let pinned = self.pinned;
        for (id, t) in self.touches.iter_mut() {
            t.phase += dt * std::f32::consts::TAU * TOUCH_PULSE_HZ;
            if t.released && pinned != Some(*id) {
                t.shrink -= dt / TOUCH_SHRINK_SEC;
            }
        }
        self.touches
            .retain(|id, t| t.shrink > 0.0 || pinned == Some(*id));
    }

    /// Touches eligible to win: held, never released.
    pub fn candidates(&self) -> SmallVec<[TouchId; 10]> {
        let mut ids: SmallVec<[TouchId; 10]> = self
            .touches
            .iter()
            .filter(|(_, t)| !t.released)
            .map(|(id, _)| *id)
            .collect();
        // Map iteration order is arbitrary; sort so a seeded pick is stable.
        ids.sort_unstable_by_key(|id| id.0);
        ids
    }

    pub fn live_count(&self) -> usize {
        self.touches.len()
    }

    pub fn get(&self, id: TouchId) -> Option<&TouchPoint> {
        self.touches.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TouchId, &TouchPoint)> {
        self.touches.iter()
    }

    fn next_color_index(&self, palette_len: usize) -> usize {
        let in_use: SmallVec<[usize; 10]> = self
            .touches
            .values()
            .map(|t| t.color_index % palette_len)
            .collect();
        for offset in 0..palette_len {
            let candidate = (self.color_cursor + offset) % palette_len;
            if !in_use.contains(&candidate) {
                return candidate;
            }
        }
        // More fingers than palette slots: wrap and share.
        self.color_cursor % palette_len
    }
}
