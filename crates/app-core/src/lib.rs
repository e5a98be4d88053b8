pub static SPRITE_WGSL: &str = include_str!("../shaders/sprite.wgsl");

pub mod constants;
pub mod cues;
pub mod game;
pub mod particles;
pub mod round;
pub mod sprite;
pub mod theme;
pub mod touch;
pub mod wipe;

pub use constants::*;
pub use cues::*;
pub use game::*;
pub use particles::*;
pub use round::*;
pub use sprite::*;
pub use theme::*;
pub use touch::*;
pub use wipe::*;
