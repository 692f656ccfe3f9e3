//! Terminal Mandarin 10 runner (default binary).
//!
//! Uses crossterm for keyboard and mouse input and the framebuffer-based
//! renderer from `mandarin-term`.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event};

use mandarin_ten::app::App;
use mandarin_ten::config::{parse_args, AppConfig, USAGE};
use mandarin_ten::input::handle_mouse_event;
use mandarin_ten::logging;
use mandarin_ten::term::{FrameBuffer, RenderThrottle, TerminalRenderer, Viewport};

/// Redraw at least this often even when nothing changed.
const HEARTBEAT_MS: u64 = 500;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(config) = parse_args(AppConfig::from_env(), &args)? else {
        print!("{}", USAGE);
        return Ok(());
    };

    logging::init(&config)?;
    let seed = config.seed.unwrap_or_else(clock_seed);
    log::info!("mandarin-ten starting (seed {})", seed);
    let mut app = App::new(&config, seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        log::error!("exiting on error: {:#}", e);
    }
    log::logger().flush();
    result
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, app: &mut App, config: &AppConfig) -> Result<()> {
    let frame = Duration::from_millis(config.frame_ms as u64);
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);
    let mut fb = FrameBuffer::new(w, h);
    let mut throttle = RenderThrottle::new(HEARTBEAT_MS);

    let clock = Instant::now();
    let mut last_ms: u64 = 0;

    loop {
        // Whole milliseconds since start, so truncation never drifts the clock.
        let now_ms = clock.elapsed().as_millis() as u64;
        let elapsed = (now_ms - last_ms).min(u32::MAX as u64) as u32;
        last_ms = now_ms;
        app.advance(elapsed);

        // Render.
        if app.take_dirty() {
            throttle.invalidate();
        }
        let fingerprint = app.snapshot().fingerprint();
        if throttle.should_render(now_ms, fingerprint) {
            app.render_into(viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input, waiting at most until the next frame.
        let frame_start = Duration::from_millis(now_ms);
        let timeout = (frame_start + frame).saturating_sub(clock.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if !app.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(pointer) = handle_mouse_event(mouse) {
                        app.handle_pointer(viewport, pointer);
                    }
                }
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
        }
    }
}
