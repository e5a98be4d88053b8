//! WebAudio realization of the core's procedural cues.
//!
//! Graph: master gain feeding both a dry path and a soft arctan saturation
//! path into the destination. Individual tones are throwaway oscillators with
//! linear attack/release ramps.

use app_core::{ToneEvent, Waveform};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub struct AudioBus {
    ctx: web::AudioContext,
    master: web::GainNode,
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, ()> {
    match web::GainNode::new(ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

impl AudioBus {
    /// Create the context lazily from a user gesture so autoplay policy is
    /// satisfied; repeat calls are no-ops.
    pub fn ensure(slot: &Rc<RefCell<Option<AudioBus>>>) {
        if slot.borrow().is_some() {
            return;
        }
        match AudioBus::new() {
            Ok(bus) => {
                log::info!("audio graph started");
                *slot.borrow_mut() = Some(bus);
            }
            Err(()) => log::error!("audio graph unavailable"),
        }
    }

    fn new() -> Result<Self, ()> {
        let ctx = web::AudioContext::new().map_err(|e| {
            log::error!("AudioContext error: {:?}", e);
        })?;

        let master = create_gain(&ctx, 0.25, "Master")?;

        // Subtle master saturation (arctan) with wet/dry mix
        let sat_pre = create_gain(&ctx, 0.9, "sat pre")?;
        #[allow(deprecated)]
        let saturator = web::WaveShaperNode::new(&ctx).map_err(|e| {
            log::error!("WaveShaperNode error: {:?}", e);
        })?;
        let curve_len: u32 = 2048;
        let drive: f32 = 1.6;
        let mut curve: Vec<f32> = Vec::with_capacity(curve_len as usize);
        for i in 0..curve_len {
            let x = (i as f32 / (curve_len - 1) as f32) * 2.0 - 1.0;
            curve.push((2.0 / std::f32::consts::PI) * (drive * x).atan());
        }
        #[allow(deprecated)]
        saturator.set_curve(Some(curve.as_mut_slice()));
        let sat_wet = create_gain(&ctx, 0.35, "sat wet")?;
        let sat_dry = create_gain(&ctx, 0.65, "sat dry")?;

        let _ = master.connect_with_audio_node(&sat_pre);
        let _ = sat_pre.connect_with_audio_node(&saturator);
        let _ = saturator.connect_with_audio_node(&sat_wet);
        let _ = sat_wet.connect_with_audio_node(&ctx.destination());
        let _ = master.connect_with_audio_node(&sat_dry);
        let _ = sat_dry.connect_with_audio_node(&ctx.destination());

        Ok(Self { ctx, master })
    }

    /// Fire the frame's tone events as scheduled one-shot oscillators.
    pub fn play(&self, events: &[ToneEvent]) {
        let now = self.ctx.current_time();
        for ev in events {
            let Ok(src) = web::OscillatorNode::new(&self.ctx) else {
                continue;
            };
            match ev.waveform {
                Waveform::Sine => src.set_type(web::OscillatorType::Sine),
                Waveform::Square => src.set_type(web::OscillatorType::Square),
                Waveform::Saw => src.set_type(web::OscillatorType::Sawtooth),
                Waveform::Triangle => src.set_type(web::OscillatorType::Triangle),
            }
            src.frequency().set_value(ev.frequency_hz);

            let Ok(gain) = web::GainNode::new(&self.ctx) else {
                continue;
            };
            gain.gain().set_value(0.0);
            let t0 = now + 0.005 + ev.start_offset_sec;
            let _ = gain
                .gain()
                .linear_ramp_to_value_at_time(ev.velocity, t0 + 0.02);
            let _ = gain
                .gain()
                .linear_ramp_to_value_at_time(0.0, t0 + ev.duration_sec);

            let _ = src.connect_with_audio_node(&gain);
            let _ = gain.connect_with_audio_node(&self.master);

            let _ = src.start_with_when(t0);
            let _ = src.stop_with_when(t0 + ev.duration_sec + 0.05);
        }
    }
}
