//! Survival Dodger entry point
//!
//! Sets up the terminal, runs the fixed-timestep game loop, and always
//! restores the terminal on the way out.

use std::io::{BufWriter, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal,
};

use survival_dodger::Settings;
use survival_dodger::consts::*;
use survival_dodger::platform::{InputMapper, TermCanvas};
use survival_dodger::renderer::{FrameOptions, draw_frame};
use survival_dodger::sim::{GameEvent, GameState, tick};

/// Game instance holding all state
struct Game {
    state: GameState,
    input: InputMapper,
    canvas: TermCanvas,
    frame_options: FrameOptions,
    accumulator: f32,
}

impl Game {
    fn new(seed: u64, settings: &Settings) -> std::io::Result<Self> {
        let mut state = GameState::new(seed);
        state.view = settings.view_options();
        let (cols, rows) = terminal::size()?;

        Ok(Self {
            state,
            input: InputMapper::new(),
            canvas: TermCanvas::new(cols, rows),
            frame_options: FrameOptions::from(settings),
            accumulator: 0.0,
        })
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.sample().clone();
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.consume_commands();
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        for event in self.state.drain_events() {
            match event {
                GameEvent::PlayerHit { pos } => log::debug!("Player hit at {pos}"),
                GameEvent::WaveAdvanced { difficulty } => {
                    log::debug!("Difficulty now {difficulty}")
                }
                other => log::trace!("{:?}", other),
            }
        }
    }

    /// Render the current frame
    fn render<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        let (cols, rows) = terminal::size()?;
        self.canvas.resize(cols, rows);
        draw_frame(&mut self.canvas, &self.state, self.frame_options);
        self.canvas.flush(out)
    }
}

fn init_logging(settings: &Settings) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = &settings.log_file {
        match std::fs::File::create(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Cannot open log file {}: {e}", path.display()),
        }
    }
    builder.init();
}

fn run<W: Write>(out: &mut W, settings: &Settings) -> std::io::Result<()> {
    let seed = settings.seed.unwrap_or_else(rand::random::<u64>);
    let mut game = Game::new(seed, settings)?;
    log::info!("Game initialized with seed: {}", seed);

    let frame_time = Duration::from_secs_f32(settings.frame_time());
    let mut last_time = Instant::now();

    loop {
        let frame_start = Instant::now();
        game.input.begin_frame();

        // Drain all pending input events (non-blocking)
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                game.input.handle_key(key);
            }
        }
        if game.input.quit_requested() {
            log::info!("Quit requested");
            return Ok(());
        }

        let now = Instant::now();
        game.update(now.duration_since(last_time).as_secs_f32());
        last_time = now;

        game.render(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}

fn main() -> std::io::Result<()> {
    let settings = Settings::load();
    init_logging(&settings);
    log::info!("Survival Dodger starting...");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-release events where the terminal supports them; others fall back to hold expiry
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = run(&mut out, &settings);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("Terminal error: {e}");
    }
    result
}
