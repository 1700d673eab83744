use std::io::{stdout, BufWriter, Write};
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyEvent, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use meteor_shooter::audio::{AudioSink, BellSink, NullSink};
use meteor_shooter::cli::CliArgs;
use meteor_shooter::clock::SystemClock;
use meteor_shooter::config::GameConfig;
use meteor_shooter::display::{self, Viewport};
use meteor_shooter::error::Result;
use meteor_shooter::game::{Flow, Session};
use meteor_shooter::input::InputMapper;
use meteor_shooter::logging;

// ── Startup ───────────────────────────────────────────────────────────────────

fn load_config(args: &CliArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };
    config.apply_cli_overrides(args);
    config.validate()?;
    Ok(config)
}

fn audio_sink(config: &GameConfig) -> Box<dyn AudioSink> {
    if config.audio.enabled {
        Box::new(BellSink::new(stdout(), config.audio.clone()))
    } else {
        Box::new(NullSink)
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Drain every pending key event without blocking.
fn pending_keys() -> std::io::Result<Vec<KeyEvent>> {
    let mut keys = Vec::new();
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            keys.push(key);
        }
    }
    Ok(keys)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Poll input, step, render, then sleep out the rest of the frame budget.
/// Returns when the player quits.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    seed: Option<u64>,
    keyboard_enhanced: bool,
) -> Result<()> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(config, SystemClock::new(), rng, audio_sink(config))?;
    let mut mapper = InputMapper::for_terminal(keyboard_enhanced);
    let budget = config.frame_budget();
    let (world_w, world_h) = (config.window.width as f32, config.window.height as f32);

    loop {
        let frame_start = Instant::now();

        let input = mapper.sample(pending_keys()?, session.state().status);
        if session.frame(&input) == Flow::Quit {
            return Ok(());
        }

        let (cols, rows) = terminal::size()?;
        display::render(out, session.state(), &Viewport::new(cols, rows, world_w, world_h))?;

        if let Some(budget) = budget {
            let elapsed = frame_start.elapsed();
            if elapsed < budget {
                thread::sleep(budget - elapsed);
            }
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn run(args: &CliArgs) -> Result<()> {
    // Config errors are reported before the terminal is taken over.
    let config = load_config(args)?;

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::SetTitle(&config.window.title))?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to hold windows.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    log::debug!("keyboard enhancement: {keyboard_enhanced}");

    let result = game_loop(&mut out, &config, args.seed, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    if let Err(e) = logging::init(args.log_file.as_deref()) {
        eprintln!("meteor_shooter: {e}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("meteor_shooter: {e}");
            ExitCode::FAILURE
        }
    }
}
