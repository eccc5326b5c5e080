//! Terminal 2048 runner (default binary).
//!
//! Owns the sequencing the engine deliberately leaves to callers: a move is
//! collapsed immediately, then the spawn / game-over / best-score phase runs
//! after a short pacing delay. At most one move is in flight at a time;
//! further move keys are ignored until the pending spawn settles.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_2048::core::GameState;
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::store::{BestScoreStore, FileBestScoreStore};
use tui_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_2048::types::{GameAction, MOVE_WATCHDOG_MS, SPAWN_DELAY_MS, TICK_MS};

/// How long a persistence failure stays on the footer line.
const STATUS_TTL: Duration = Duration::from_secs(3);

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut store = FileBestScoreStore::new(FileBestScoreStore::default_path());

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1);
    let mut game = GameState::new(seed);
    let mut saved_best = store.load();
    game.restore_best_score(saved_best);
    game.reset();

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    // In-flight guard: Some while a successful collapse waits for its spawn.
    let mut pending_since: Option<Instant> = None;
    let mut status: Option<(String, Instant)> = None;

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        status = status.filter(|(_, since)| since.elapsed() < STATUS_TTL);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let snap = game.snapshot();
        view.render_into(
            &mut fb,
            &snap,
            Viewport::new(w, h),
            status.as_ref().map(|(msg, _)| msg.as_str()),
        );
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        // Best effort: never lose a best score on exit.
                        let _ = save_best(&mut store, &game, &mut saved_best);
                        return Ok(());
                    }

                    match handle_key_event(key) {
                        Some(GameAction::Move(dir)) => {
                            // Single-flight: ignore moves while one settles.
                            if pending_since.is_none() && !game.game_over() {
                                let result = game.apply_move(dir);
                                if result.moved {
                                    pending_since = Some(Instant::now());
                                }
                            }
                        }
                        Some(GameAction::NewGame) => {
                            // Cancels any pending spawn inside the engine too.
                            game.reset();
                            pending_since = None;
                        }
                        None => {}
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            if let Some(since) = pending_since {
                let elapsed = since.elapsed().as_millis() as u32;
                if elapsed >= SPAWN_DELAY_MS && game.spawn_pending() {
                    pending_since = None;
                    game.settle();
                    if let Err(e) = save_best(&mut store, &game, &mut saved_best) {
                        status = Some((
                            format!("couldn't save best score: {:#}", e),
                            Instant::now(),
                        ));
                    }
                } else if elapsed >= MOVE_WATCHDOG_MS {
                    // The engine is no longer pending (e.g. the game was
                    // reset underneath us); never leave the guard stuck.
                    pending_since = None;
                }
            }
        }
    }
}

/// Persist the best score when it advanced past what the store last saw.
fn save_best(
    store: &mut FileBestScoreStore,
    game: &GameState,
    saved_best: &mut u32,
) -> Result<()> {
    if game.best_score() > *saved_best {
        store.save(game.best_score())?;
        *saved_best = game.best_score();
    }
    Ok(())
}
