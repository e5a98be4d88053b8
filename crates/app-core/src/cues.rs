//! Procedural audio cues.
//!
//! Cues expand into plain [`ToneEvent`] lists; the frontends realize them with
//! whatever synth they have (WebAudio oscillators on web, a cpal mixer on
//! native). No sample assets anywhere.

use crate::theme::Theme;

#[derive(Clone, Copy, Debug)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
    Triangle,
}

/// One oscillator one-shot: frequency, placement on the cue timeline, and an
/// envelope peak. Frontends apply a short linear attack/release around it.
#[derive(Clone, Copy, Debug)]
pub struct ToneEvent {
    pub waveform: Waveform,
    pub frequency_hz: f32,
    pub start_offset_sec: f64,
    pub duration_sec: f64,
    pub velocity: f32,
}

#[derive(Clone, Copy, Debug)]
pub enum Cue {
    /// Countdown second boundary; `n` is the number now shown (3, 2, 1).
    CountdownTick(u32),
    /// A finger landed; pitched by its palette slot so players can tell
    /// themselves apart with eyes closed.
    TouchDown { color_index: usize },
    /// Winner revealed; flavored by the active theme's fanfare.
    Winner,
    /// Countdown expired with nobody touching.
    NoTouch,
}

pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}

/// Expand a cue into tone events appended to `out`.
pub fn expand(cue: Cue, theme: &Theme, out: &mut Vec<ToneEvent>) {
    match cue {
        Cue::CountdownTick(n) => {
            // Pitch climbs as the pick approaches: 3 -> D5, 2 -> E5, 1 -> F#5.
            let midi = 80.0 - 2.0 * n.min(3) as f32;
            out.push(ToneEvent {
                waveform: Waveform::Sine,
                frequency_hz: midi_to_hz(midi),
                start_offset_sec: 0.0,
                duration_sec: 0.12,
                velocity: 0.5,
            });
        }
        Cue::TouchDown { color_index } => {
            let midi = 64.0 + 2.0 * (color_index % 6) as f32;
            out.push(ToneEvent {
                waveform: Waveform::Triangle,
                frequency_hz: midi_to_hz(midi),
                start_offset_sec: 0.0,
                duration_sec: 0.18,
                velocity: 0.35,
            });
        }
        Cue::Winner => {
            let fanfare = theme.fanfare;
            for (i, degree) in fanfare.degrees.iter().enumerate() {
                let midi = 72 + degree;
                out.push(ToneEvent {
                    waveform: fanfare.waveform,
                    frequency_hz: midi_to_hz(midi as f32),
                    start_offset_sec: i as f64 * 0.09,
                    duration_sec: 0.35,
                    velocity: 0.6,
                });
            }
            // Held top note to finish the phrase
            if let Some(last) = fanfare.degrees.last() {
                out.push(ToneEvent {
                    waveform: fanfare.waveform,
                    frequency_hz: midi_to_hz((84 + last) as f32),
                    start_offset_sec: fanfare.degrees.len() as f64 * 0.09,
                    duration_sec: 0.7,
                    velocity: 0.5,
                });
            }
        }
        Cue::NoTouch => {
            for (i, midi) in [64.0_f32, 57.0].iter().enumerate() {
                out.push(ToneEvent {
                    waveform: Waveform::Saw,
                    frequency_hz: midi_to_hz(*midi),
                    start_offset_sec: i as f64 * 0.22,
                    duration_sec: 0.3,
                    velocity: 0.4,
                });
            }
        }
    }
}
