#![cfg(target_arch = "wasm32")]
//! WASM entry point: DOM lookup, event wiring, splash, and the frame loop.

pub mod audio;
pub mod dom;
pub mod events;
pub mod frame;
pub mod input;
pub mod overlay;
pub mod render;

use app_core::{Game, SPLASH_HOLD_SEC};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("app-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("game-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #game-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    dom::sync_canvas_backing_size(&canvas);
    {
        let canvas_resize = canvas.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())
            .ok();
        resize_closure.forget();
    }

    // Every load deals a different table
    let seed = js_sys::Date::now() as u64;
    let game = Rc::new(RefCell::new(Game::new(seed)));
    let audio = Rc::new(RefCell::new(None));

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        game: game.clone(),
        audio: audio.clone(),
    });

    let gpu = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        game: game.clone(),
        canvas: canvas.clone(),
        audio,
        gpu,
        last_instant: Instant::now(),
        last_status: None,
        last_scoreboard: String::new(),
        instances: Vec::new(),
        tones: Vec::new(),
    }));
    frame::start_loop(frame_ctx);

    // Splash dwells briefly, then the first round begins
    {
        let game_splash = game.clone();
        let splash_closure = Closure::wrap(Box::new(move || {
            if let Some(document) = dom::window_document() {
                overlay::hide(&document, overlay::SPLASH_ID);
            }
            game_splash.borrow_mut().start_round();
        }) as Box<dyn FnMut()>);
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                splash_closure.as_ref().unchecked_ref(),
                (SPLASH_HOLD_SEC * 1000.0) as i32,
            )
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        splash_closure.forget();
    }

    Ok(())
}
