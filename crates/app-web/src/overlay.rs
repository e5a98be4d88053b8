//! Status overlay: splash screen, countdown/status label, replay button and
//! the session scoreboard line. All plain DOM elements toggled by id.

use app_core::Status;
use web_sys as web;

use crate::dom;

pub const SPLASH_ID: &str = "splash";
pub const STATUS_ID: &str = "countdown";
pub const REPLAY_ID: &str = "replay-btn";
pub const SCOREBOARD_ID: &str = "scoreboard";

#[inline]
pub fn show(document: &web::Document, element_id: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document, element_id: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let _ = el.set_attribute("style", "display:none");
    }
}

/// Push the current game status into the DOM. Called only when the status
/// actually changed.
pub fn apply_status(document: &web::Document, status: Status, replay_available: bool) {
    let label = match status {
        Status::Splash => String::new(),
        Status::Count(n) => n.to_string(),
        Status::Winner => "Winner!".to_string(),
        Status::NoTouch => "No Touch!".to_string(),
    };
    dom::set_text(document, STATUS_ID, &label);
    if replay_available {
        show(document, REPLAY_ID);
    } else {
        hide(document, REPLAY_ID);
    }
}

pub fn set_scoreboard(document: &web::Document, line: &str) {
    dom::set_text(document, SCOREBOARD_ID, line);
}
