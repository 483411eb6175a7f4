//! Terminal Tetris runner.
//!
//! Timer-driven single actor: a fixed 16 ms cadence advances the drop timer,
//! and key events apply discrete commands synchronously between ticks. Input
//! is gated on the game-over flag here, as the state machine expects.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use raster_tetris::core::{GameState, PieceQueue, Scoring};
use raster_tetris::input::{handle_key_event, should_quit};
use raster_tetris::term::{TermView, TerminalRenderer};
use raster_tetris::types::TICK_MS;

type Game = GameState<TermView, Rc<RefCell<Scoring>>, Rc<RefCell<PieceQueue>>>;

fn main() -> Result<()> {
    let scoring = Rc::new(RefCell::new(Scoring::new()));
    let queue = Rc::new(RefCell::new(PieceQueue::new(seed_from_clock())));
    let mut view = TermView::new(TerminalRenderer::new(), scoring.clone(), queue.clone());
    view.enter()?;

    let mut game = GameState::new(view, scoring, queue);
    game.start();

    let result = run(&mut game);

    // Always try to restore terminal state.
    let _ = game.into_view().exit();
    result
}

fn run(game: &mut Game) -> Result<()> {
    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let timeout = tick
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if !game.is_over() {
                        if let Some(action) = handle_key_event(key) {
                            game.apply(action);
                        }
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            if !game.is_over() {
                game.tick(TICK_MS);
            }
        }
    }
}

fn seed_from_clock() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos().wrapping_add(d.as_secs() as u32))
        .unwrap_or(1)
}
