//! Frame orchestration: background, art layer, entities, HUD and overlays
//!
//! Reads `GameState` only. Every shape goes through the `Canvas` primitives.

use glam::Vec2;
use std::f32::consts::PI;

use super::palette::{blend, colors, palette};
use super::{Canvas, Rect, Stroke};
use crate::consts::*;
use crate::sim::{Coin, Enemy, GamePhase, GameState, Particle, Player};
use crate::{Rgb, Settings};

/// Presentation switches that come from settings rather than game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOptions {
    pub screen_shake: bool,
    pub screen_flash: bool,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            screen_shake: true,
            screen_flash: true,
        }
    }
}

impl From<&Settings> for FrameOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            screen_shake: settings.effective_screen_shake(),
            screen_flash: settings.effective_screen_flash(),
        }
    }
}

/// Draw one complete frame for the current phase
pub fn draw_frame<C: Canvas>(canvas: &mut C, state: &GameState, options: FrameOptions) {
    let offset = if options.screen_shake {
        state.shake_offset()
    } else {
        Vec2::ZERO
    };

    draw_background(canvas, state, offset);

    match state.phase {
        GamePhase::Menu => draw_menu(canvas),
        GamePhase::Playing => {
            draw_entities(canvas, state, offset);
            draw_hud(canvas, state);
        }
        GamePhase::GameOver => {
            draw_entities(canvas, state, offset);
            centered_text(canvas, "GAME OVER - you hit an enemy", 32.0, FIELD_HEIGHT / 2.0 - 40.0);
            centered_text(canvas, "[R] Restart   [ESC] Quit", 24.0, FIELD_HEIGHT / 2.0 + 10.0);
        }
        GamePhase::Win => {
            centered_text(canvas, "YOU WIN! You survived 60 s", 38.0, FIELD_HEIGHT / 2.0 - 30.0);
            let score = format!("Final score: {}", state.score);
            centered_text(canvas, &score, 26.0, FIELD_HEIGHT / 2.0 + 15.0);
            centered_text(canvas, "[R] Restart   [ESC] Quit", 24.0, FIELD_HEIGHT / 2.0 + 50.0);
        }
    }

    if options.screen_flash && state.flash.is_active() {
        canvas.wash(state.flash.color, state.flash_intensity() as u8);
    }
}

fn draw_background<C: Canvas>(canvas: &mut C, state: &GameState, offset: Vec2) {
    canvas.clear(colors::BACKGROUND);

    if state.view.show_grid {
        let grid = palette(state.view.palette).grid;
        let mut x = 0.0;
        while x < FIELD_WIDTH {
            canvas.line(
                Vec2::new(x + offset.x, 0.0),
                Vec2::new(x + offset.x, FIELD_HEIGHT),
                grid,
                1.0,
            );
            x += GRID_SPACING;
        }
        let mut y = 0.0;
        while y < FIELD_HEIGHT {
            canvas.line(
                Vec2::new(0.0, y + offset.y),
                Vec2::new(FIELD_WIDTH, y + offset.y),
                grid,
                1.0,
            );
            y += GRID_SPACING;
        }
    }

    if state.view.show_art {
        draw_art_layer(canvas, state.view.palette);
    }
}

/// Static ornamental shapes exercising every primitive
fn draw_art_layer<C: Canvas>(canvas: &mut C, palette_index: usize) {
    let p = palette(palette_index);
    let (w, h) = (FIELD_WIDTH, FIELD_HEIGHT);

    // Crossed diagonals
    canvas.line(Vec2::ZERO, Vec2::new(w, h), p.line, 2.0);
    canvas.line(Vec2::new(w, 0.0), Vec2::new(0.0, h), p.line, 2.0);

    // Frame
    canvas.rect(Rect::new(40.0, 30.0, w - 80.0, h - 60.0), p.accent2, Stroke::Outline(2.0), 12.0);

    canvas.circle(Vec2::new(120.0, 100.0), 18.0, p.accent1, Stroke::Outline(2.0));
    canvas.circle(Vec2::new(w - 120.0, h - 100.0), 22.0, p.accent3, Stroke::Outline(2.0));

    // Arrow
    let arrow = [
        Vec2::new(w / 2.0 - 30.0, 90.0),
        Vec2::new(w / 2.0 + 30.0, 90.0),
        Vec2::new(w / 2.0, 130.0),
    ];
    canvas.polygon(&arrow, p.accent1, Stroke::Fill);
    canvas.polygon(&arrow, p.line, Stroke::Outline(2.0));

    canvas.arc(Rect::new(w / 2.0 - 60.0, 60.0, 120.0, 60.0), PI, 2.0 * PI, p.accent3, 2.0);
}

fn draw_entities<C: Canvas>(canvas: &mut C, state: &GameState, offset: Vec2) {
    for coin in &state.coins {
        draw_coin(canvas, coin, offset);
    }
    for enemy in &state.enemies {
        draw_enemy(canvas, enemy, offset);
    }
    draw_player(canvas, &state.player, offset);

    // Particles are not shaken
    for particle in &state.particles {
        draw_particle(canvas, particle);
    }
}

fn draw_player<C: Canvas>(canvas: &mut C, player: &Player, offset: Vec2) {
    let body = Rect::centered(player.pos + offset, Vec2::splat(player.size));
    canvas.rect(body, colors::PLAYER, Stroke::Fill, 6.0);
    let visor = Rect::new(body.pos.x + 8.0, body.pos.y + 8.0, 22.0, 6.0);
    canvas.rect(visor, colors::PLAYER_VISOR, Stroke::Fill, 3.0);
}

fn draw_enemy<C: Canvas>(canvas: &mut C, enemy: &Enemy, offset: Vec2) {
    let center = enemy.pos + offset;
    canvas.circle(center, enemy.radius, enemy.color, Stroke::Fill);
    canvas.circle(center + Vec2::new(-4.0, -6.0), 3.0, colors::ENEMY_EYE, Stroke::Fill);
    canvas.circle(center + Vec2::new(4.0, -6.0), 3.0, colors::ENEMY_EYE, Stroke::Fill);
}

fn draw_coin<C: Canvas>(canvas: &mut C, coin: &Coin, offset: Vec2) {
    let center = coin.pos + offset;
    let scale = coin.pulse_scale();
    let radius = coin.diameter / 2.0 * scale;
    canvas.circle(center, radius, coin.color, Stroke::Fill);
    let core = (coin.diameter / 3.0).max(2.0) * scale;
    canvas.circle(center, core, colors::COIN_CORE, Stroke::Fill);
}

fn draw_particle<C: Canvas>(canvas: &mut C, particle: &Particle) {
    let color = blend(particle.color, colors::BACKGROUND, particle.alpha());
    canvas.circle(particle.pos, particle.size / 2.0, color, Stroke::Fill);
}

fn draw_hud<C: Canvas>(canvas: &mut C, state: &GameState) {
    let hud = state.hud();
    text(canvas, &format!("Time: {}s", hud.time_left as u32), 24.0, colors::TEXT, Vec2::new(10.0, 10.0));
    text(canvas, &format!("Score: {}", hud.score), 24.0, colors::TEXT, Vec2::new(10.0, 40.0));
    text(
        canvas,
        "[H] Art ON/OFF  [K] Cycle palette  [G] Grid",
        18.0,
        colors::TEXT,
        Vec2::new(10.0, 70.0),
    );
    if hud.invulnerable {
        text(canvas, "Invulnerable...", 18.0, colors::TEXT_GRACE, Vec2::new(10.0, 95.0));
    }
}

fn draw_menu<C: Canvas>(canvas: &mut C) {
    centered_text(canvas, "SURVIVAL DODGER", 48.0, 120.0);
    centered_text(canvas, "Avoid every enemy for 60 s. Coins = bonus.", 26.0, 210.0);
    centered_text(canvas, "Drawn with line/rect/circle/polygon/arc primitives.", 22.0, 245.0);
    centered_text(
        canvas,
        "[ENTER] Start   [H] Art   [K] Palette   [G] Grid   [ESC] Quit",
        20.0,
        290.0,
    );
}

fn text<C: Canvas>(canvas: &mut C, content: &str, size: f32, color: Rgb, pos: Vec2) {
    let surface = canvas.render_text(content, size, color);
    canvas.blit(&surface, pos);
}

fn centered_text<C: Canvas>(canvas: &mut C, content: &str, size: f32, y: f32) {
    let surface = canvas.render_text(content, size, colors::TEXT);
    let x = FIELD_WIDTH / 2.0 - surface.extent.x / 2.0;
    canvas.blit(&surface, Vec2::new(x, y));
}
