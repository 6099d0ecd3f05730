//! Game state and core simulation types
//!
//! `GameState` is the single owner of every entity collection and all round
//! state. Entities never point back at it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{ScreenFlash, ScreenShake};
use super::entities::{Coin, Enemy, Particle, Player};
use crate::consts::*;
use crate::{Rgb, difficulty_speed_scale};

/// Current phase of the game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Active round
    Playing,
    /// Player touched an enemy; waits for restart
    GameOver,
    /// Player survived the full round; waits for restart
    Win,
}

impl GamePhase {
    /// Whether a restart command is accepted in this phase
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Win)
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RoundStarted,
    CoinCollected { points: u32, pos: Vec2 },
    PlayerHit { pos: Vec2 },
    WaveAdvanced { difficulty: u32 },
    RoundWon { score: u32 },
}

/// Presentation toggles owned by the controller and handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOptions {
    pub show_grid: bool,
    pub show_art: bool,
    /// Always in `0..PALETTE_COUNT`
    pub palette: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_art: true,
            palette: 0,
        }
    }
}

impl ViewOptions {
    /// Step to the next palette, wrapping around
    pub fn cycle_palette(&mut self) {
        self.palette = (self.palette + 1) % PALETTE_COUNT;
    }

    /// Set a palette index, wrapping out-of-range values
    pub fn set_palette(&mut self, index: usize) {
        self.palette = index % PALETTE_COUNT;
    }
}

/// Values shown in the heads-up display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub time_left: f32,
    pub score: u32,
    pub invulnerable: bool,
    pub difficulty: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was built from (0 when an RNG was injected)
    pub seed: u64,
    /// Source for spawn positions, particle trajectories and shake jitter
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Seconds left until the round is won, never negative
    pub time_left: f32,
    /// Seconds since the last wave
    pub wave_timer: f32,
    /// Starts at 1, +1 per wave
    pub difficulty: u32,
    /// Monotonic within a round
    pub score: u32,
    /// Simulation tick counter (playing ticks of the current round)
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub flash: ScreenFlash,
    pub shake: ScreenShake,
    pub view: ViewOptions,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game in the menu with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self::with_rng(Pcg32::seed_from_u64(seed));
        state.seed = seed;
        state
    }

    /// Create a new game in the menu drawing randomness from `rng`
    pub fn with_rng(rng: Pcg32) -> Self {
        let mut state = Self {
            seed: 0,
            rng,
            phase: GamePhase::Menu,
            time_left: SURVIVE_TIME,
            wave_timer: 0.0,
            difficulty: 1,
            score: 0,
            time_ticks: 0,
            player: Player::new(field_center()),
            enemies: Vec::new(),
            coins: Vec::new(),
            particles: Vec::new(),
            flash: ScreenFlash::default(),
            shake: ScreenShake::default(),
            view: ViewOptions::default(),
            events: Vec::new(),
        };

        // Populate so the menu has a scene behind it
        state.reset_round();
        state.events.clear();

        state
    }

    /// Reinitialize the player, repopulate enemies and coins, zero all round counters
    pub fn reset_round(&mut self) {
        self.player = Player::new(field_center());
        self.enemies.clear();
        self.coins.clear();
        self.particles.clear();
        self.time_left = SURVIVE_TIME;
        self.wave_timer = 0.0;
        self.difficulty = 1;
        self.score = 0;
        self.time_ticks = 0;

        for _ in 0..INITIAL_ENEMIES {
            self.spawn_enemy();
        }
        for _ in 0..INITIAL_COINS {
            self.spawn_coin();
        }

        self.events.push(GameEvent::RoundStarted);
    }

    /// Spawn one enemy of a random archetype, scaled by the current difficulty
    pub fn spawn_enemy(&mut self) {
        let pos = random_field_point(&mut self.rng, ENEMY_SPAWN_MARGIN);
        let kind = ENEMY_TYPES[self.rng.random_range(0..ENEMY_TYPES.len())];
        let dir = Vec2::new(random_sign(&mut self.rng), random_sign(&mut self.rng));
        let scale = difficulty_speed_scale(self.difficulty);
        self.enemies.push(Enemy::new(pos, &kind, dir, scale));
    }

    /// Spawn one coin of a random archetype
    pub fn spawn_coin(&mut self) {
        let pos = random_field_point(&mut self.rng, COIN_SPAWN_MARGIN);
        let kind = COIN_TYPES[self.rng.random_range(0..COIN_TYPES.len())];
        self.coins.push(Coin::new(pos, &kind));
    }

    /// Emit a burst of particles radiating from `pos`
    pub fn burst(&mut self, pos: Vec2, color: Rgb) {
        self.particles.reserve(BURST_PARTICLES);
        for _ in 0..BURST_PARTICLES {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(BURST_SPEED_MIN..=BURST_SPEED_MAX);
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            let life = self.rng.random_range(BURST_LIFE_MIN..=BURST_LIFE_MAX);
            let size = self.rng.random_range(BURST_SIZE_MIN..=BURST_SIZE_MAX) as f32;
            self.particles.push(Particle::new(pos, vel, life, size, color));
        }
    }

    /// Record an event for `drain_events`
    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud(&self) -> Hud {
        Hud {
            time_left: self.time_left,
            score: self.score,
            invulnerable: self.player.is_invulnerable(),
            difficulty: self.difficulty,
        }
    }

    /// Scene jitter for the current frame
    pub fn shake_offset(&self) -> Vec2 {
        self.shake.offset()
    }

    pub fn flash_intensity(&self) -> f32 {
        self.flash.intensity()
    }
}

/// Center of the play field (player spawn point)
pub fn field_center() -> Vec2 {
    Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0)
}

/// Uniform point at least `margin` away from every field edge
fn random_field_point<R: Rng>(rng: &mut R, margin: f32) -> Vec2 {
    Vec2::new(
        rng.random_range(margin..=FIELD_WIDTH - margin).round(),
        rng.random_range(margin..=FIELD_HEIGHT - margin).round(),
    )
}

fn random_sign<R: Rng>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}
