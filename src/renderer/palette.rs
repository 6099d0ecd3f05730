//! Colors for the background, art layer and game elements

use crate::Rgb;
use crate::consts::PALETTE_COUNT;

/// One art-layer color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub grid: Rgb,
    pub line: Rgb,
    pub accent1: Rgb,
    pub accent2: Rgb,
    pub accent3: Rgb,
}

pub const PALETTES: [Palette; PALETTE_COUNT] = [
    Palette {
        grid: [22, 24, 34],
        line: [60, 80, 120],
        accent1: [255, 220, 80],
        accent2: [140, 200, 255],
        accent3: [180, 255, 190],
    },
    Palette {
        grid: [26, 22, 34],
        line: [120, 70, 120],
        accent1: [255, 160, 70],
        accent2: [255, 100, 140],
        accent3: [190, 255, 120],
    },
    Palette {
        grid: [20, 26, 24],
        line: [70, 120, 90],
        accent1: [180, 220, 255],
        accent2: [255, 200, 120],
        accent3: [255, 120, 160],
    },
];

/// Palette for an index; out-of-range indices wrap
pub fn palette(index: usize) -> &'static Palette {
    &PALETTES[index % PALETTES.len()]
}

/// Colors for game elements
pub mod colors {
    use crate::Rgb;

    pub const BACKGROUND: Rgb = [14, 16, 24];
    pub const PLAYER: Rgb = [80, 200, 255];
    pub const PLAYER_VISOR: Rgb = [255, 255, 255];
    pub const ENEMY_EYE: Rgb = [20, 20, 20];
    pub const COIN_CORE: Rgb = [255, 255, 180];
    pub const TEXT: Rgb = [235, 235, 245];
    pub const TEXT_GRACE: Rgb = [180, 220, 255];
}

/// Linear blend from `under` (alpha 0) to `over` (alpha 255)
pub fn blend(over: Rgb, under: Rgb, alpha: u8) -> Rgb {
    let t = alpha as f32 / 255.0;
    let mix = |a: u8, b: u8| (b as f32 + (a as f32 - b as f32) * t).round() as u8;
    [
        mix(over[0], under[0]),
        mix(over[1], under[1]),
        mix(over[2], under[2]),
    ]
}
