use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use space_invaders::clock::FrameClock;
use space_invaders::consts::FRAME_DELAY_MS;
use space_invaders::display::{self, TerminalCanvas};
use space_invaders::input::Key;
use space_invaders::{Control, GameError, Session};

const FRAME_DELAY: Duration = Duration::from_millis(FRAME_DELAY_MS);
const LOG_FILE: &str = "space_invaders.log";

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw alternate-screen mode, so log lines go to a file in
/// the temp dir instead of stderr.  `RUST_LOG` picks the level (default info).
fn init_logging() {
    let path = std::env::temp_dir().join(LOG_FILE);
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(&path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!("can't open log file {}: {e}; logging disabled", path.display());
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until escape / q / Ctrl+C.
///
/// Key events are drained at the top of every frame; they only feed the
/// session's key tracker and start gate.  The world is touched exclusively by
/// the frame passes below.
fn game_loop<W: Write>(
    canvas: &mut TerminalCanvas<W>,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
) -> Result<(), GameError> {
    let mut clock = FrameClock::new();

    loop {
        let delta = clock.tick();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }
                    let key = Key::from(code);
                    match kind {
                        KeyEventKind::Press => {
                            if session.key_pressed(key) == Control::Quit {
                                return Ok(());
                            }
                        }
                        KeyEventKind::Repeat => session.key_repeated(key),
                        KeyEventKind::Release => session.key_released(key),
                    }
                }
                Event::Resize(cols, rows) => canvas.resize(cols, rows),
                _ => {}
            }
        }

        session.step_movement(delta);
        display::render(canvas, session)?;
        session.resolve();
        session.apply_input();

        thread::sleep(FRAME_DELAY);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    init_logging();

    // Resolve every sprite before touching the terminal: a missing asset is
    // fatal and should print on a normal screen.
    let mut session = match Session::new() {
        Ok(session) => session,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    log::info!("session started");

    if let Err(e) = run(&mut session) {
        log::error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
    log::info!("session closed");
}

fn run(session: &mut Session) -> Result<(), GameError> {
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = terminal::size()
        .map_err(GameError::from)
        .and_then(|(cols, rows)| {
            let mut canvas = TerminalCanvas::new(&mut out, cols, rows);
            game_loop(&mut canvas, session, &rx)
        });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
