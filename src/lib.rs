//! Survival Dodger - a 2D arcade survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, waves, game flow)
//! - `renderer`: Drawing primitive interface and frame orchestration
//! - `platform`: Terminal frontend (keyboard input, character-cell raster output)
//! - `settings`: Runtime preferences loaded from JSON

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// 8-bit RGB color
pub type Rgb = [u8; 3];

/// Game configuration constants
pub mod consts {
    use crate::Rgb;

    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Target ticks per second
    pub const TICK_RATE: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta fed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 540.0;

    /// Seconds the player must survive to win
    pub const SURVIVE_TIME: f32 = 60.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 38.0;
    pub const PLAYER_ACCEL: f32 = 900.0;
    /// Multiplicative velocity damping applied every tick
    pub const PLAYER_FRICTION: f32 = 0.85;
    pub const PLAYER_MAX_SPEED: f32 = 340.0;
    /// Post-spawn invulnerability (seconds)
    pub const GRACE_TIME: f32 = 1.5;

    /// Enemies and coins spawned when a round starts
    pub const INITIAL_ENEMIES: usize = 5;
    pub const INITIAL_COINS: usize = 5;
    pub const ENEMY_SPAWN_MARGIN: f32 = 40.0;
    pub const COIN_SPAWN_MARGIN: f32 = 20.0;

    /// Wave cadence (seconds) and per-wave spawns
    pub const WAVE_INTERVAL: f32 = 7.0;
    pub const WAVE_ENEMIES: usize = 2;
    pub const WAVE_COINS: usize = 2;
    /// Enemy speed multiplier gained per difficulty level
    pub const DIFFICULTY_SPEED_STEP: f32 = 0.12;

    /// Burst emission
    pub const BURST_PARTICLES: usize = 18;
    pub const BURST_SPEED_MIN: f32 = 60.0;
    pub const BURST_SPEED_MAX: f32 = 220.0;
    pub const BURST_LIFE_MIN: f32 = 0.3;
    pub const BURST_LIFE_MAX: f32 = 0.9;
    pub const BURST_SIZE_MIN: u8 = 3;
    pub const BURST_SIZE_MAX: u8 = 6;
    pub const COIN_BURST_COLOR: Rgb = [255, 220, 80];
    pub const HIT_BURST_COLOR: Rgb = [255, 60, 60];

    /// Screen flash
    pub const FLASH_MAX: f32 = 255.0;
    pub const FLASH_DECAY: f32 = 10.0;
    pub const FLASH_COLOR: Rgb = [255, 50, 50];
    pub const HIT_FLASH_STRENGTH: f32 = 220.0;

    /// Screen shake on a fatal hit (intensity, duration seconds)
    pub const HIT_SHAKE_INTENSITY: f32 = 10.0;
    pub const HIT_SHAKE_DURATION: f32 = 0.35;

    /// Coin pulse (cosmetic only)
    pub const COIN_PULSE_AMPLITUDE: f32 = 0.1;
    pub const COIN_PULSE_RATE: f32 = 6.0;

    /// Number of selectable art-layer palettes
    pub const PALETTE_COUNT: usize = 3;
    /// Background grid spacing
    pub const GRID_SPACING: f32 = 32.0;

    /// Enemy archetype: collision/visual radius, body color, base speed
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct EnemyType {
        pub radius: f32,
        pub color: Rgb,
        pub base_speed: f32,
    }

    /// Coin archetype: base diameter, color, point value
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct CoinType {
        pub diameter: f32,
        pub color: Rgb,
        pub points: u32,
    }

    pub const ENEMY_TYPES: [EnemyType; 3] = [
        EnemyType { radius: 18.0, color: [240, 120, 90], base_speed: 140.0 },
        EnemyType { radius: 22.0, color: [220, 80, 120], base_speed: 110.0 },
        EnemyType { radius: 14.0, color: [255, 160, 70], base_speed: 170.0 },
    ];

    pub const COIN_TYPES: [CoinType; 3] = [
        CoinType { diameter: 22.0, color: [255, 220, 80], points: 10 },
        CoinType { diameter: 26.0, color: [170, 240, 170], points: 20 },
        CoinType { diameter: 16.0, color: [180, 220, 255], points: 5 },
    ];
}

/// Clamp helper that never panics on inverted bounds (min wins)
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Enemy speed multiplier for a difficulty level (difficulty starts at 1)
#[inline]
pub fn difficulty_speed_scale(difficulty: u32) -> f32 {
    1.0 + difficulty.saturating_sub(1) as f32 * consts::DIFFICULTY_SPEED_STEP
}
