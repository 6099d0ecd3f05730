//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Timestep supplied by the caller
//! - Randomness only from the state's seeded RNG
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod effects;
pub mod entities;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use collision::{collect_coins, touches_any_enemy};
pub use effects::{ScreenFlash, ScreenShake};
pub use entities::{Coin, Enemy, Entity, Lifecycle, Particle, Player, Steering};
pub use state::{GameEvent, GamePhase, GameState, Hud, ViewOptions, field_center};
pub use tick::{TickInput, tick};
