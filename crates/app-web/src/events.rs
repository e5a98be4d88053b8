//! Event wiring: multi-touch on the canvas, a pointer fallback so a mouse can
//! join in, and the replay button.

use app_core::{Game, TouchId};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::AudioBus;
use crate::input;
use crate::{dom, overlay};

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub game: Rc<RefCell<Game>>,
    pub audio: Rc<RefCell<Option<AudioBus>>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_touch(&w, "touchstart", TouchAction::Begin);
    wire_touch(&w, "touchmove", TouchAction::Move);
    wire_touch(&w, "touchend", TouchAction::End);
    wire_touch(&w, "touchcancel", TouchAction::End);
    wire_pointer(&w);
    wire_replay(&w);
}

#[derive(Clone, Copy, PartialEq)]
enum TouchAction {
    Begin,
    Move,
    End,
}

/// Touch handlers must be non-passive so `preventDefault` can stop the
/// browser from scrolling/zooming while fingers are on the table.
fn wire_touch(w: &InputWiring, event_name: &str, action: TouchAction) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        ev.prevent_default();
        if action == TouchAction::Begin {
            AudioBus::ensure(&w.audio);
        }
        let list = ev.changed_touches();
        let mut game = w.game.borrow_mut();
        for i in 0..list.length() {
            let Some(touch) = list.item(i) else { continue };
            let id = TouchId(touch.identifier());
            match action {
                TouchAction::Begin => {
                    let pos = input::touch_canvas_px(&touch, &w.canvas);
                    game.touch_begin(id, pos);
                }
                TouchAction::Move => {
                    let pos = input::touch_canvas_px(&touch, &w.canvas);
                    game.touch_move(id, pos);
                }
                TouchAction::End => game.touch_end(id),
            }
        }
    }) as Box<dyn FnMut(_)>);

    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    let _ = w
        .canvas
        .add_event_listener_with_callback_and_add_event_listener_options(
            event_name,
            closure.as_ref().unchecked_ref(),
            &opts,
        );
    closure.forget();
}

/// Mouse fallback: one synthetic touch so the game is playable at a desk.
/// Touch-derived pointer events are skipped; the touch handlers own those.
fn wire_pointer(w: &InputWiring) {
    {
        let w = w.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if ev.pointer_type() != "mouse" {
                return;
            }
            AudioBus::ensure(&w.audio);
            let pos = input::pointer_canvas_px(&ev, &w.canvas);
            w.game
                .borrow_mut()
                .touch_begin(TouchId(input::POINTER_TOUCH_ID), pos);
            let _ = w.canvas.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let w = w.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if ev.pointer_type() != "mouse" {
                return;
            }
            let pos = input::pointer_canvas_px(&ev, &w.canvas);
            w.game
                .borrow_mut()
                .touch_move(TouchId(input::POINTER_TOUCH_ID), pos);
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let w = w.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if ev.pointer_type() != "mouse" {
                return;
            }
            w.game
                .borrow_mut()
                .touch_end(TouchId(input::POINTER_TOUCH_ID));
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ =
                wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }
}

fn wire_replay(w: &InputWiring) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let game = w.game.clone();
    let audio = w.audio.clone();
    dom::add_click_listener(&document, overlay::REPLAY_ID, move || {
        AudioBus::ensure(&audio);
        game.borrow_mut().replay();
        log::info!("replay requested");
    });
}
