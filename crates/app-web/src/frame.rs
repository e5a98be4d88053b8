use app_core::{build_instances, Game, Instance, Status, ToneEvent};
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::AudioBus;
use crate::{dom, overlay, render};

pub struct FrameContext<'a> {
    pub game: Rc<RefCell<Game>>,
    pub canvas: web::HtmlCanvasElement,
    pub audio: Rc<RefCell<Option<AudioBus>>>,
    pub gpu: Option<render::GpuState<'a>>,

    pub last_instant: Instant,
    pub last_status: Option<Status>,
    pub last_scoreboard: String,
    pub instances: Vec<Instance>,
    pub tones: Vec<ToneEvent>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let bounds = Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32);

        self.tones.clear();
        let mut game = self.game.borrow_mut();
        // Clamp huge deltas after a background tab pause
        game.frame(dt.min(0.1), bounds, &mut self.tones);

        if let Some(bus) = self.audio.borrow().as_ref() {
            bus.play(&self.tones);
        }

        // DOM writes only on change
        let status = game.status();
        let replay = game.replay_available();
        if self.last_status != Some(status) {
            self.last_status = Some(status);
            if let Some(document) = dom::window_document() {
                overlay::apply_status(&document, status, replay);
            }
        }
        let scoreboard = game.scoreboard();
        if scoreboard != self.last_scoreboard {
            if let Some(document) = dom::window_document() {
                overlay::set_scoreboard(&document, &scoreboard);
            }
            self.last_scoreboard = scoreboard;
        }

        build_instances(&game, bounds, &mut self.instances);
        let background = game.background();
        drop(game);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(&self.instances, background) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
