//! Fixed timestep simulation tick
//!
//! Core game loop that applies commands, advances effects, and runs the
//! playing update.

use super::collision::{collect_coins, touches_any_enemy};
use super::entities::{Entity, Steering, update_all};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held directional keys
    pub steering: Steering,
    /// Start a round (Menu only)
    pub start: bool,
    /// Restart after GameOver/Win
    pub restart: bool,
    pub toggle_grid: bool,
    pub toggle_art: bool,
    pub cycle_palette: bool,
}

impl TickInput {
    /// Clear one-shot commands after a tick consumed them
    pub fn clear_commands(&mut self) {
        self.start = false;
        self.restart = false;
        self.toggle_grid = false;
        self.toggle_art = false;
        self.cycle_palette = false;
    }
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // View toggles work in every phase
    if input.toggle_grid {
        state.view.show_grid = !state.view.show_grid;
    }
    if input.toggle_art {
        state.view.show_art = !state.view.show_art;
    }
    if input.cycle_palette {
        state.view.cycle_palette();
    }

    let phase = state.phase;
    match phase {
        GamePhase::Menu if input.start => begin_round(state),
        phase if phase.is_finished() && input.restart => begin_round(state),
        _ => {}
    }

    state.flash.decay();
    state.shake.advance(dt, &mut state.rng);

    if state.phase == GamePhase::Playing {
        update_playing(state, input.steering, dt);
    }
}

fn begin_round(state: &mut GameState) {
    state.reset_round();
    state.phase = GamePhase::Playing;
    log::info!("Round started (seed {})", state.seed);
}

/// One playing step: timers, waves, movement, collisions, win check
fn update_playing(state: &mut GameState, steering: Steering, dt: f32) {
    state.time_ticks += 1;
    // Derived from the tick count so f32 steps cannot drift past the last tick
    let elapsed = state.time_ticks as f64 * f64::from(dt);
    state.time_left = (f64::from(SURVIVE_TIME) - elapsed).max(0.0) as f32;

    state.wave_timer += dt;
    if state.wave_timer >= WAVE_INTERVAL {
        advance_wave(state);
    }

    state.player.steering = steering;
    state.player.update(dt);
    update_all(&mut state.enemies, dt);
    update_all(&mut state.coins, dt);
    update_all(&mut state.particles, dt);
    debug_assert!(state.player.grace_time >= 0.0);
    debug_assert!(state.player.bounds().inside_field());

    let player_box = state.player.bounds();
    let player_pos = state.player.pos;

    for coin in collect_coins(&player_box, &mut state.coins) {
        state.score = state.score.saturating_add(coin.points);
        state.emit(GameEvent::CoinCollected {
            points: coin.points,
            pos: coin.pos,
        });
        state.burst(player_pos, COIN_BURST_COLOR);
        log::debug!("Coin +{} (score {})", coin.points, state.score);
    }

    // Invulnerable players skip the enemy test entirely
    if !state.player.is_invulnerable() && touches_any_enemy(&player_box, &state.enemies) {
        state.phase = GamePhase::GameOver;
        state.burst(player_pos, HIT_BURST_COLOR);
        state.flash.trigger(HIT_FLASH_STRENGTH);
        state.shake.shake(HIT_SHAKE_INTENSITY, HIT_SHAKE_DURATION);
        state.emit(GameEvent::PlayerHit { pos: player_pos });
        log::info!(
            "Game over at {:.1}s left, score {}",
            state.time_left,
            state.score
        );
        return;
    }

    if state.time_left <= 0.0 {
        state.phase = GamePhase::Win;
        state.emit(GameEvent::RoundWon { score: state.score });
        log::info!("Round won, final score {}", state.score);
    }
}

/// Reset the wave timer, raise difficulty, spawn the next batch
fn advance_wave(state: &mut GameState) {
    state.wave_timer = 0.0;
    state.difficulty += 1;
    for _ in 0..WAVE_ENEMIES {
        state.spawn_enemy();
    }
    for _ in 0..WAVE_COINS {
        state.spawn_coin();
    }
    state.emit(GameEvent::WaveAdvanced {
        difficulty: state.difficulty,
    });
    log::debug!(
        "Wave {}: {} enemies, {} coins",
        state.difficulty,
        state.enemies.len(),
        state.coins.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::Enemy;
    use glam::Vec2;

    fn start() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    fn restart() -> TickInput {
        TickInput {
            restart: true,
            ..Default::default()
        }
    }

    /// A playing state with no hazards near the player
    fn quiet_round(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(&mut state, &start(), SIM_DT);
        state.enemies.clear();
        state.coins.clear();
        state.drain_events();
        state
    }

    #[test]
    fn test_tick_menu_to_playing() {
        let mut state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Menu);

        // Tick without start - should stay in Menu
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &start(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.drain_events()[0], GameEvent::RoundStarted);
    }

    #[test]
    fn test_restart_ignored_in_menu_and_playing() {
        let mut state = GameState::new(1);
        tick(&mut state, &restart(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &start(), SIM_DT);
        let ticks = state.time_ticks;
        tick(&mut state, &restart(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_start_ignored_after_game_over() {
        let mut state = quiet_round(2);
        state.phase = GamePhase::GameOver;
        tick(&mut state, &start(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(&mut state, &restart(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.enemies.len(), INITIAL_ENEMIES);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_restart_from_win() {
        let mut state = quiet_round(3);
        state.phase = GamePhase::Win;
        state.score = 55;
        tick(&mut state, &restart(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_finished_phase_is_frozen() {
        let mut state = quiet_round(4);
        state.phase = GamePhase::GameOver;
        let time_left = state.time_left;
        let pos = state.player.pos;
        let input = TickInput {
            steering: Steering {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.time_left, time_left);
        assert_eq!(state.player.pos, pos);
    }

    #[test]
    fn test_view_toggles_in_any_phase() {
        let mut state = GameState::new(5);
        let input = TickInput {
            toggle_grid: true,
            toggle_art: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(!state.view.show_grid);
        assert!(!state.view.show_art);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_grace_skips_enemy_check() {
        let mut state = quiet_round(6);
        let pos = state.player.pos;
        state
            .enemies
            .push(Enemy::new(pos, &ENEMY_TYPES[0], Vec2::new(1.0, 1.0), 1.0));
        state.enemies[0].speed = 0.0;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.player.is_invulnerable());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_coin_pickup_scores_once() {
        let mut state = quiet_round(7);
        let pos = state.player.pos;
        state.spawn_coin();
        state.coins[0].pos = pos;
        let points = state.coins[0].points;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.coins.is_empty());
        assert_eq!(state.score, points);
        assert_eq!(state.particles.len(), BURST_PARTICLES);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, points);
    }

    #[test]
    fn test_wave_spawns_after_interval() {
        let mut state = quiet_round(8);
        state.player.grace_time = f32::MAX;
        let dt = 0.25;
        // The start tick already ran once at SIM_DT
        state.wave_timer = 0.0;
        for _ in 0..27 {
            tick(&mut state, &TickInput::default(), dt);
        }
        assert_eq!(state.enemies.len(), 0);
        tick(&mut state, &TickInput::default(), dt);
        assert_eq!(state.enemies.len(), WAVE_ENEMIES);
        assert_eq!(state.coins.len(), WAVE_COINS);
        assert_eq!(state.difficulty, 2);
        assert_eq!(state.wave_timer, 0.0);
    }

    #[test]
    fn test_flash_fades_once_per_tick() {
        let mut state = GameState::new(9);
        state.flash.trigger(HIT_FLASH_STRENGTH);
        for _ in 0..3 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.flash_intensity(), HIT_FLASH_STRENGTH - 3.0 * FLASH_DECAY);
    }

    #[test]
    fn test_clear_commands_keeps_steering() {
        let mut input = TickInput {
            steering: Steering {
                up: true,
                ..Default::default()
            },
            start: true,
            restart: true,
            toggle_grid: true,
            toggle_art: true,
            cycle_palette: true,
        };
        input.clear_commands();
        assert!(input.steering.up);
        assert!(!input.start && !input.restart && !input.cycle_palette);
        assert!(!input.toggle_grid && !input.toggle_art);
    }
}
