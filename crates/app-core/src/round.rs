//! Countdown state machine: splash, count, and the two ways a round ends.

use rand::prelude::*;
use smallvec::SmallVec;
use thiserror::Error;

use crate::constants::COUNTDOWN_START;
use crate::touch::{TouchId, TouchRegistry};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Splash,
    Counting { remaining: f64 },
    Celebrating { winner: TouchId, color_index: usize },
    NoTouch,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RoundEvent {
    /// A whole-second boundary was crossed; `0` is the pick moment.
    Tick(u32),
    Winner { id: TouchId, color_index: usize },
    NoTouch,
}

#[derive(Debug, Error)]
pub enum RoundError {
    #[error("round is already counting down")]
    AlreadyCounting,
}

pub struct Round {
    phase: Phase,
    /// Last whole second shown, so tick events fire once per boundary.
    shown: u32,
    pub rounds_played: u32,
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}

impl Round {
    pub fn new() -> Self {
        Self {
            phase: Phase::Splash,
            shown: COUNTDOWN_START,
            rounds_played: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Begin a countdown. Valid from the splash and from either terminal
    /// state (that's the replay button); a countdown cannot restart itself.
    pub fn start(&mut self) -> Result<(), RoundError> {
        if matches!(self.phase, Phase::Counting { .. }) {
            return Err(RoundError::AlreadyCounting);
        }
        self.phase = Phase::Counting {
            remaining: COUNTDOWN_START as f64,
        };
        self.shown = COUNTDOWN_START;
        Ok(())
    }

    /// Integrate `dt` seconds. The countdown runs whether or not anyone is
    /// touching; expiry with no live touch is the NoTouch outcome.
    pub fn tick(
        &mut self,
        dt: f64,
        registry: &TouchRegistry,
        rng: &mut impl Rng,
        out: &mut SmallVec<[RoundEvent; 4]>,
    ) {
        let Phase::Counting { remaining } = self.phase else {
            return;
        };
        let remaining = remaining - dt;

        let whole = remaining.max(0.0).ceil() as u32;
        if whole < self.shown && whole > 0 {
            self.shown = whole;
            out.push(RoundEvent::Tick(whole));
        }

        if remaining > 0.0 {
            self.phase = Phase::Counting { remaining };
            return;
        }

        self.rounds_played += 1;
        let candidates = registry.candidates();
        match candidates.choose(rng) {
            Some(&id) => {
                let color_index = registry.get(id).map(|t| t.color_index).unwrap_or(0);
                self.phase = Phase::Celebrating {
                    winner: id,
                    color_index,
                };
                out.push(RoundEvent::Winner { id, color_index });
            }
            None => {
                self.phase = Phase::NoTouch;
                out.push(RoundEvent::NoTouch);
            }
        }
    }

    /// Seconds digit currently shown, while counting.
    pub fn displayed_second(&self) -> Option<u32> {
        match self.phase {
            Phase::Counting { remaining } => Some(remaining.max(0.0).ceil() as u32),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Celebrating { .. } | Phase::NoTouch)
    }
}
