//! Desktop frontend: a winit window with the shared instanced-quad pipeline
//! and a cpal oscillator bank for the cue audio. Touches come from a touch
//! screen when the platform has one; the left mouse button plays as a single
//! synthetic finger otherwise.

use std::sync::{Arc, Mutex};
use std::time::Instant;
use wgpu::util::DeviceExt;
use winit::{dpi::PhysicalPosition, event::*, event_loop::EventLoop, window::WindowBuilder};

use app_core::{
    build_instances, Game, Instance, Status, ToneEvent, TouchId, Waveform, MAX_PARTICLES,
    SPLASH_HOLD_SEC,
};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use glam::Vec2;

const MOUSE_TOUCH_ID: i32 = -1;
const INSTANCE_CAPACITY: usize = MAX_PARTICLES + 64;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    screen: [f32; 2],
    _pad: [f32; 2],
    bg_top: [f32; 4],
    bg_bottom: [f32; 4],
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(app_core::SPRITE_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Quad vertices for two triangles
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<Instance>() * INSTANCE_CAPACITY) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [
            // slot 0: quad positions
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: instance data (matches app_core::sprite::Instance)
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Instance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 8,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 16,
                        shader_location: 3,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Uint32,
                        offset: 20,
                        shader_location: 4,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 24,
                        shader_location: 5,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 40,
                        shader_location: 6,
                    },
                ],
            },
        ];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            quad_vb,
            instance_vb,
            bind_group,
            width: size.width.max(1),
            height: size.height.max(1),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn render(
        &mut self,
        instances: &[Instance],
        background: [[f32; 3]; 2],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let [top, bottom] = background;
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                screen: [self.width as f32, self.height as f32],
                _pad: [0.0, 0.0],
                bg_top: [top[0], top[1], top[2], 1.0],
                bg_bottom: [bottom[0], bottom[1], bottom[2], 1.0],
            }),
        );
        let count = instances.len().min(INSTANCE_CAPACITY);
        self.queue.write_buffer(
            &self.instance_vb,
            0,
            bytemuck::cast_slice(&instances[..count]),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bottom[0] as f64,
                            g: bottom[1] as f64,
                            b: bottom[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.draw(0..6, 0..(count as u32));
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(42);
    let mut game = Game::new(seed);

    let audio_state = Arc::new(Mutex::new(AudioState {
        sample_rate: 44_100.0,
        oscillators: Vec::new(),
    }));
    let _audio_stream = start_audio(Arc::clone(&audio_state));

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("tapwin")
        .build(&event_loop)
        .expect("window");

    let mut state = pollster::block_on(GpuState::new(&window)).expect("gpu");

    let start_instant = Instant::now();
    let mut last = start_instant;
    let mut started = false;
    let mut cursor: Option<PhysicalPosition<f64>> = None;
    let mut last_title_status: Option<Status> = None;
    let mut instances: Vec<Instance> = Vec::new();
    let mut tones: Vec<ToneEvent> = Vec::new();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => state.resize(size),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::WindowEvent {
                event: WindowEvent::Touch(touch),
                ..
            } => {
                let id = TouchId(touch.id as i32);
                let pos = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                match touch.phase {
                    TouchPhase::Started => {
                        // A tap anywhere doubles as the replay button
                        if game.replay_available() {
                            game.replay();
                        } else {
                            game.touch_begin(id, pos);
                        }
                    }
                    TouchPhase::Moved => game.touch_move(id, pos),
                    TouchPhase::Ended | TouchPhase::Cancelled => game.touch_end(id),
                }
            }
            Event::WindowEvent {
                event: WindowEvent::CursorMoved { position, .. },
                ..
            } => {
                cursor = Some(position);
                game.touch_move(
                    TouchId(MOUSE_TOUCH_ID),
                    Vec2::new(position.x as f32, position.y as f32),
                );
            }
            Event::WindowEvent {
                event:
                    WindowEvent::MouseInput {
                        state: button_state,
                        button: MouseButton::Left,
                        ..
                    },
                ..
            } => match button_state {
                ElementState::Pressed => {
                    if game.replay_available() {
                        game.replay();
                    } else if let Some(p) = cursor {
                        game.touch_begin(TouchId(MOUSE_TOUCH_ID), Vec2::new(p.x as f32, p.y as f32));
                    }
                }
                ElementState::Released => game.touch_end(TouchId(MOUSE_TOUCH_ID)),
            },
            Event::AboutToWait => {
                let now = Instant::now();
                let dt = (now - last).as_secs_f32();
                last = now;

                // Stand-in for the web splash: first round after a short dwell
                if !started && start_instant.elapsed().as_secs_f64() >= SPLASH_HOLD_SEC {
                    started = true;
                    game.start_round();
                }

                let bounds = Vec2::new(state.width as f32, state.height as f32);
                tones.clear();
                game.frame(dt.min(0.1), bounds, &mut tones);
                if !tones.is_empty() {
                    let mut guard = audio_state.lock().unwrap();
                    push_tones(&mut guard, &tones);
                }

                let status = game.status();
                if last_title_status != Some(status) {
                    last_title_status = Some(status);
                    state.window.set_title(&title_for(status, &game));
                }

                build_instances(&game, bounds, &mut instances);
                match state.render(&instances, game.background()) {
                    Ok(_) => state.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(_) => {}
                }
            }
            _ => {}
        })
        .unwrap();
}

fn title_for(status: Status, game: &Game) -> String {
    let label = match status {
        Status::Splash => "get ready".to_string(),
        Status::Count(n) => n.to_string(),
        Status::Winner => "Winner!".to_string(),
        Status::NoTouch => "No Touch!".to_string(),
    };
    let scoreboard = game.scoreboard();
    if scoreboard.is_empty() {
        format!("tapwin — {label}")
    } else {
        format!("tapwin — {label} — {scoreboard}")
    }
}

// ---------------- Native audio (cpal) ----------------

#[derive(Clone)]
struct ActiveOscillator {
    amplitude: f32,
    phase: f32,     // radians
    phase_inc: f32, // radians per sample
    delay_samples: u32,
    total_samples: u32,
    samples_emitted: u32,
    attack_samples: u32,
    release_samples: u32,
    wave: Waveform,
    left_gain: f32,
    right_gain: f32,
}

struct AudioState {
    sample_rate: f32,
    oscillators: Vec<ActiveOscillator>,
}

fn push_tones(state: &mut AudioState, events: &[ToneEvent]) {
    let sr = state.sample_rate;
    for ev in events {
        let total = (ev.duration_sec * sr as f64) as u32;
        let attack = (0.02 * sr) as u32;
        let release = (0.02 * sr) as u32;
        state.oscillators.push(ActiveOscillator {
            amplitude: ev.velocity.min(1.0),
            phase: 0.0,
            phase_inc: 2.0 * std::f32::consts::PI * ev.frequency_hz / sr,
            delay_samples: (ev.start_offset_sec * sr as f64) as u32,
            total_samples: total.max(1),
            samples_emitted: 0,
            attack_samples: attack.min(total),
            release_samples: release.min(total),
            wave: ev.waveform,
            // centered equal-power
            left_gain: std::f32::consts::FRAC_1_SQRT_2,
            right_gain: std::f32::consts::FRAC_1_SQRT_2,
        });
    }
}

fn start_audio(state: Arc<Mutex<AudioState>>) -> Option<cpal::Stream> {
    let host = cpal::default_host();
    let device = host.default_output_device()?;
    let config = device.default_output_config().ok()?;
    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    state.lock().unwrap().sample_rate = sample_rate;

    let err_fn = |err| eprintln!("audio stream error: {err}");

    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => {
            build_stream_f32(&device, &config.into(), channels, Arc::clone(&state), err_fn).ok()?
        }
        cpal::SampleFormat::I16 => {
            build_stream_i16(&device, &config.into(), channels, Arc::clone(&state), err_fn).ok()?
        }
        cpal::SampleFormat::U16 => {
            build_stream_u16(&device, &config.into(), channels, Arc::clone(&state), err_fn).ok()?
        }
        _ => return None,
    };

    stream.play().ok()?;
    Some(stream)
}

fn render_wave_sample(phase: f32, wave: Waveform) -> f32 {
    match wave {
        Waveform::Sine => phase.sin(),
        Waveform::Square => {
            if phase.sin() >= 0.0 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Saw => {
            // Map phase 0..2PI to -1..1
            let t = phase / (2.0 * std::f32::consts::PI);
            (2.0 * (t - t.floor())) * 2.0 - 1.0
        }
        Waveform::Triangle => {
            let saw = {
                let t = phase / (2.0 * std::f32::consts::PI);
                (2.0 * (t - t.floor())) * 2.0 - 1.0
            };
            (2.0 / std::f32::consts::PI) * saw.asin()
        }
    }
}

fn mix_sample_stereo(oscillators: &mut Vec<ActiveOscillator>) -> (f32, f32) {
    let mut left = 0.0f32;
    let mut right = 0.0f32;
    let mut i = 0usize;
    while i < oscillators.len() {
        let osc = &mut oscillators[i];
        if osc.delay_samples > 0 {
            osc.delay_samples -= 1;
            i += 1;
            continue;
        }
        // envelope
        let n = osc.samples_emitted;
        let a = if n < osc.attack_samples {
            n as f32 / osc.attack_samples.max(1) as f32
        } else if n > osc.total_samples.saturating_sub(osc.release_samples) {
            let rel_n = n.saturating_sub(osc.total_samples - osc.release_samples);
            1.0 - (rel_n as f32 / osc.release_samples.max(1) as f32)
        } else {
            1.0
        };
        let amp = osc.amplitude * a;
        let raw = render_wave_sample(osc.phase, osc.wave) * amp;
        left += raw * osc.left_gain;
        right += raw * osc.right_gain;
        osc.phase += osc.phase_inc;
        if osc.phase > 2.0 * std::f32::consts::PI {
            osc.phase -= 2.0 * std::f32::consts::PI;
        }
        osc.samples_emitted += 1;
        if osc.samples_emitted >= osc.total_samples {
            oscillators.swap_remove(i);
            continue;
        }
        i += 1;
    }
    (left.tanh(), right.tanh())
}

fn build_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    state: Arc<Mutex<AudioState>>,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    device.build_output_stream(
        config,
        move |data: &mut [f32], _| {
            let mut guard = state.lock().unwrap();
            let oscillators = &mut guard.oscillators;
            let mut frame = 0usize;
            while frame < data.len() {
                let (l, r) = mix_sample_stereo(oscillators);
                if channels >= 2 {
                    data[frame] = l;
                    if frame + 1 < data.len() {
                        data[frame + 1] = r;
                    }
                } else {
                    data[frame] = 0.5 * (l + r);
                }
                frame += channels;
            }
        },
        err_fn,
        None,
    )
}

fn build_stream_i16(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    state: Arc<Mutex<AudioState>>,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    device.build_output_stream(
        config,
        move |data: &mut [i16], _| {
            let mut guard = state.lock().unwrap();
            let oscillators = &mut guard.oscillators;
            let mut frame = 0usize;
            while frame < data.len() {
                let (l, r) = mix_sample_stereo(oscillators);
                let vl = (l * i16::MAX as f32) as i16;
                let vr = (r * i16::MAX as f32) as i16;
                if channels >= 2 {
                    data[frame] = vl;
                    if frame + 1 < data.len() {
                        data[frame + 1] = vr;
                    }
                } else {
                    data[frame] = ((vl as i32 + vr as i32) / 2) as i16;
                }
                frame += channels;
            }
        },
        err_fn,
        None,
    )
}

fn build_stream_u16(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    state: Arc<Mutex<AudioState>>,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    device.build_output_stream(
        config,
        move |data: &mut [u16], _| {
            let mut guard = state.lock().unwrap();
            let oscillators = &mut guard.oscillators;
            let mut frame = 0usize;
            while frame < data.len() {
                let (l, r) = mix_sample_stereo(oscillators);
                let vl = ((l * 0.5 + 0.5).clamp(0.0, 1.0) * u16::MAX as f32) as u16;
                let vr = ((r * 0.5 + 0.5).clamp(0.0, 1.0) * u16::MAX as f32) as u16;
                if channels >= 2 {
                    data[frame] = vl;
                    if frame + 1 < data.len() {
                        data[frame + 1] = vr;
                    }
                } else {
                    data[frame] = ((vl as u32 + vr as u32) / 2) as u16;
                }
                frame += channels;
            }
        },
        err_fn,
        None,
    )
}
