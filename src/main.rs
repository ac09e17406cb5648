use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event};

use shattris::core::Game;
use shattris::driver::{FrameLoop, TickRequest};
use shattris::input;
use shattris::score_store::{FileScoreStore, ScoreStore};
use shattris::term::{TermView, TerminalRenderer};
use shattris::types::TICK_MS;

fn main() -> Result<()> {
    let mut renderer = TerminalRenderer::new();
    renderer.enter()?;
    let outcome = run(&mut renderer);
    // Restore the terminal even when the game loop failed.
    let restored = renderer.exit();
    outcome?;
    restored
}

fn run(renderer: &mut TerminalRenderer) -> Result<()> {
    let store = FileScoreStore::default_path();
    // A corrupt score file starts the record at zero instead of aborting.
    let mut saved_high = store.load().ok().flatten().unwrap_or(0);

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1);
    let mut game = Game::new(seed);
    game.set_high_score(saved_high);

    let (width, height) = crossterm::terminal::size()?;
    let mut view = TermView::new(width, height);
    let mut frames = FrameLoop::new();
    let clock = Instant::now();

    loop {
        let request = frames.frame(&mut game, clock.elapsed().as_millis() as u64);
        renderer.present(view.compose(&game))?;

        if game.game_over() && game.high_score() > saved_high {
            store.save(game.high_score())?;
            saved_high = game.high_score();
        }

        // While idle (paused or game over) block on input instead of
        // spinning; the frame loop re-baselines its clock on resume.
        let timeout = match request {
            TickRequest::Continue => Duration::from_millis(TICK_MS as u64),
            TickRequest::Idle => Duration::from_secs(3600),
        };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if input::is_quit(&key) {
                        break;
                    }
                    if let Some(command) = input::map_key(&key) {
                        game.apply(command);
                    }
                }
                Event::Resize(w, h) => {
                    view.set_viewport(w, h);
                    renderer.invalidate();
                }
                _ => {}
            }
        }
    }

    if game.high_score() > saved_high {
        store.save(game.high_score())?;
    }
    Ok(())
}
