//! Keyboard mapping
//!
//! Turns crossterm key events into one-shot commands and held directional
//! state. Terminals without key-release reporting only send repeated
//! presses, so a direction counts as held while its last press or repeat
//! is at most `HOLD_WINDOW` frames old.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{Steering, TickInput};

/// Frames a direction stays live after its last press/repeat (~133 ms at 60 FPS)
pub const HOLD_WINDOW: u64 = 8;

/// Discrete commands from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleGrid,
    ToggleArt,
    CyclePalette,
    Start,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Command bound to a key, if any
pub fn command_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(Command::ToggleGrid),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Command::ToggleArt),
        KeyCode::Char('k') | KeyCode::Char('K') => Some(Command::CyclePalette),
        KeyCode::Enter => Some(Command::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        _ => None,
    }
}

/// Direction bound to a key (arrows and WASD)
pub fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

/// Accumulates key events into the next `TickInput`
#[derive(Debug, Default)]
pub struct InputMapper {
    /// Direction -> frame it was last seen
    held: HashMap<Direction, u64>,
    frame: u64,
    input: TickInput,
    quit: bool,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the frame counter used for hold expiry
    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        match event.kind {
            KeyEventKind::Press => {
                if let Some(dir) = direction_for(event.code) {
                    self.held.insert(dir, self.frame);
                } else if let Some(command) = command_for(event.code, event.modifiers) {
                    self.apply(command);
                }
            }
            KeyEventKind::Repeat => {
                if let Some(dir) = direction_for(event.code) {
                    self.held.insert(dir, self.frame);
                }
            }
            KeyEventKind::Release => {
                if let Some(dir) = direction_for(event.code) {
                    self.held.remove(&dir);
                }
            }
        }
    }

    fn apply(&mut self, command: Command) {
        log::debug!("Command {:?}", command);
        match command {
            Command::Quit => self.quit = true,
            Command::ToggleGrid => self.input.toggle_grid = true,
            Command::ToggleArt => self.input.toggle_art = true,
            Command::CyclePalette => self.input.cycle_palette = true,
            Command::Start => self.input.start = true,
            Command::Restart => self.input.restart = true,
        }
    }

    fn is_held(&self, dir: Direction) -> bool {
        self.held
            .get(&dir)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Input for the next tick, with directional state sampled now
    pub fn sample(&mut self) -> &TickInput {
        self.input.steering = Steering {
            up: self.is_held(Direction::Up),
            down: self.is_held(Direction::Down),
            left: self.is_held(Direction::Left),
            right: self.is_held(Direction::Right),
        };
        &self.input
    }

    /// Drop one-shot commands once a tick has consumed them
    pub fn consume_commands(&mut self) {
        self.input.clear_commands();
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}
