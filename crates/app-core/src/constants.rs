// Shared gameplay/visual tuning constants used by both frontends.

// Round timing
pub const COUNTDOWN_START: u32 = 3; // seconds from round start to the pick
pub const SPLASH_HOLD_SEC: f64 = 1.0; // splash screen dwell before the first round

// Touch blobs
pub const TOUCH_RADIUS_PX: f32 = 50.0; // idle blob radius
pub const TOUCH_PULSE_HZ: f32 = 1.4; // idle pulse frequency
pub const TOUCH_PULSE_AMOUNT: f32 = 0.08; // idle pulse amplitude (fraction of radius)
pub const WINNER_PULSE_AMOUNT: f32 = 0.35; // celebration pulse amplitude
pub const TOUCH_SHRINK_SEC: f32 = 0.25; // released blob shrink-out time
pub const TOUCH_GLOW_SCALE: f32 = 1.8; // glow halo size relative to the blob

// Winner wipe
pub const WIPE_DURATION_SEC: f32 = 1.2;

// Particles
pub const MAX_PARTICLES: usize = 2048;
pub const PARTICLE_BOUNDS_MARGIN: f32 = 120.0; // px past the screen edge before pruning

pub const CONFETTI_COUNT: usize = 160;
pub const CONFETTI_GRAVITY: f32 = 620.0; // px/s^2
pub const FIREWORK_SPARKS: usize = 110;
pub const FIREWORK_GRAVITY: f32 = 190.0;
pub const FIREWORK_DRAG: f32 = 1.8; // per-second velocity decay exponent
pub const SPARKLE_COUNT: usize = 90;
pub const RAY_COUNT: usize = 14;
pub const BOKEH_COUNT: usize = 36;
pub const RIPPLE_RINGS: usize = 4;
pub const TOUCH_RIPPLE_RINGS: usize = 1; // small touch-down feedback
