use rand::prelude::*;

use crate::cues::Waveform;

/// Which particle system a theme fires when its winner is revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CelebrationEffect {
    Confetti,
    Fireworks,
    Sparkles,
    Ripples,
    Rays,
    Bokeh,
}

/// A named touch color from a theme palette.
#[derive(Clone, Copy, Debug)]
pub struct TouchColor {
    pub name: &'static str,
    pub rgb: [f32; 3],
}

/// Waveform + scale degrees for the procedural win fanfare.
#[derive(Clone, Copy, Debug)]
pub struct Fanfare {
    pub waveform: Waveform,
    pub degrees: &'static [i32],
}

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    /// Distinct per-touch colors, assigned round-robin as fingers land.
    pub touch_palette: &'static [TouchColor],
    pub glow: [f32; 3],
    /// Vertical background gradient, top then bottom stop.
    pub background: [[f32; 3]; 2],
    pub effect: CelebrationEffect,
    pub fanfare: Fanfare,
}

impl Theme {
    pub fn pick(rng: &mut impl Rng) -> &'static Theme {
        THEMES.choose(rng).unwrap_or(&THEMES[0])
    }

    pub fn color(&self, color_index: usize) -> TouchColor {
        self.touch_palette[color_index % self.touch_palette.len()]
    }
}

pub static THEMES: [Theme; 6] = [
    Theme {
        name: "Neon Nights",
        touch_palette: &[
            TouchColor { name: "Cyan", rgb: [0.0, 1.0, 1.0] },
            TouchColor { name: "Magenta", rgb: [1.0, 0.0, 0.8] },
            TouchColor { name: "Lime", rgb: [0.4, 1.0, 0.2] },
            TouchColor { name: "Violet", rgb: [0.6, 0.3, 1.0] },
            TouchColor { name: "Amber", rgb: [1.0, 0.75, 0.1] },
            TouchColor { name: "Ice", rgb: [0.55, 0.85, 1.0] },
        ],
        glow: [1.0, 0.0, 0.667],
        background: [[0.0, 0.0, 0.0], [0.02, 0.0, 0.05]],
        effect: CelebrationEffect::Rays,
        fanfare: Fanfare { waveform: Waveform::Square, degrees: &[0, 4, 7, 12] },
    },
    Theme {
        name: "Arcade Gold",
        touch_palette: &[
            TouchColor { name: "Gold", rgb: [1.0, 0.843, 0.0] },
            TouchColor { name: "Purple", rgb: [0.545, 0.0, 1.0] },
            TouchColor { name: "Coral", rgb: [1.0, 0.4, 0.3] },
            TouchColor { name: "Teal", rgb: [0.1, 0.8, 0.75] },
            TouchColor { name: "Pink", rgb: [1.0, 0.45, 0.8] },
            TouchColor { name: "Silver", rgb: [0.8, 0.85, 0.9] },
        ],
        glow: [0.545, 0.0, 1.0],
        background: [[0.18, 0.0, 0.243], [0.212, 0.004, 0.247]],
        effect: CelebrationEffect::Fireworks,
        fanfare: Fanfare { waveform: Waveform::Saw, degrees: &[0, 4, 7, 12, 16] },
    },
    Theme {
        name: "Ocean Wave",
        touch_palette: &[
            TouchColor { name: "Turquoise", rgb: [0.0, 0.808, 0.82] },
            TouchColor { name: "Azure", rgb: [0.118, 0.565, 1.0] },
            TouchColor { name: "Foam", rgb: [0.7, 0.95, 0.95] },
            TouchColor { name: "Kelp", rgb: [0.2, 0.75, 0.45] },
            TouchColor { name: "Coral", rgb: [1.0, 0.5, 0.45] },
            TouchColor { name: "Sand", rgb: [0.93, 0.84, 0.6] },
        ],
        glow: [0.118, 0.565, 1.0],
        background: [[0.0, 0.306, 0.573], [0.0, 0.016, 0.157]],
        effect: CelebrationEffect::Ripples,
        fanfare: Fanfare { waveform: Waveform::Sine, degrees: &[0, 5, 9, 12] },
    },
    Theme {
        name: "Festival Pop",
        touch_palette: &[
            TouchColor { name: "Fuchsia", rgb: [1.0, 0.078, 0.576] },
            TouchColor { name: "Yellow", rgb: [1.0, 1.0, 0.0] },
            TouchColor { name: "Tangerine", rgb: [1.0, 0.549, 0.0] },
            TouchColor { name: "Mint", rgb: [0.25, 1.0, 0.65] },
            TouchColor { name: "Sky", rgb: [0.35, 0.7, 1.0] },
            TouchColor { name: "Grape", rgb: [0.7, 0.3, 0.95] },
        ],
        glow: [1.0, 1.0, 0.0],
        background: [[1.0, 0.0, 0.502], [1.0, 0.549, 0.0]],
        effect: CelebrationEffect::Confetti,
        fanfare: Fanfare { waveform: Waveform::Square, degrees: &[0, 2, 4, 7, 12] },
    },
    Theme {
        name: "Minimal Luxe",
        touch_palette: &[
            TouchColor { name: "White", rgb: [1.0, 1.0, 1.0] },
            TouchColor { name: "Gold", rgb: [1.0, 0.843, 0.0] },
            TouchColor { name: "Graphite", rgb: [0.35, 0.35, 0.38] },
            TouchColor { name: "Champagne", rgb: [0.95, 0.87, 0.7] },
            TouchColor { name: "Rose", rgb: [0.9, 0.6, 0.6] },
            TouchColor { name: "Slate", rgb: [0.55, 0.6, 0.68] },
        ],
        glow: [1.0, 0.843, 0.0],
        background: [[1.0, 1.0, 1.0], [0.93, 0.93, 0.95]],
        effect: CelebrationEffect::Bokeh,
        fanfare: Fanfare { waveform: Waveform::Triangle, degrees: &[0, 7, 12] },
    },
    Theme {
        name: "Peruvian",
        touch_palette: &[
            TouchColor { name: "Gold", rgb: [1.0, 0.843, 0.0] },
            TouchColor { name: "Red", rgb: [1.0, 0.0, 0.0] },
            TouchColor { name: "White", rgb: [1.0, 1.0, 1.0] },
            TouchColor { name: "Emerald", rgb: [0.1, 0.8, 0.4] },
            TouchColor { name: "Sunset", rgb: [1.0, 0.5, 0.15] },
            TouchColor { name: "Sky", rgb: [0.3, 0.65, 1.0] },
        ],
        glow: [1.0, 0.0, 0.0],
        background: [[1.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
        effect: CelebrationEffect::Sparkles,
        fanfare: Fanfare { waveform: Waveform::Triangle, degrees: &[0, 4, 7, 12, 16] },
    },
];
