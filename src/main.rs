//! Boxfall entry point
//!
//! Headless demo runner: advances the sim at the fixed tick rate with a
//! scripted input, presenting frames to a null sink. Useful for smoke
//! testing balance changes and watching the wave/session log.
//!
//! Usage: boxfall [seed] [ticks] [tuning.json]

use std::path::Path;

use boxfall::render::{NullSink, RenderSink, build_frame};
use boxfall::sim::{GamePhase, GameState, TickInput, tick};
use boxfall::tuning::Tuning;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| std::time::UNIX_EPOCH.elapsed().map(|d| d.as_secs()).unwrap_or(0));
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3600);
    let tuning = match args.next() {
        Some(path) => Tuning::load(Path::new(&path)),
        None => Tuning::default(),
    };

    log::info!("starting run: seed {seed}, {ticks} ticks");

    let mut state = GameState::new(seed, tuning);
    let mut sink = NullSink;

    for t in 0..ticks {
        let input = scripted_input(&state, t);
        if input.quit {
            break;
        }
        tick(&mut state, &input);
        sink.present(&build_frame(&state));
    }

    let records = &state.records;
    log::info!(
        "run finished at wave {}: {} sessions ended, best wave {:?}",
        state.wave,
        records.sessions(),
        records.best_wave()
    );
}

/// Canned demo input: paces back and forth, hops now and then, and always
/// takes the first card on offer.
fn scripted_input(state: &GameState, t: u64) -> TickInput {
    if state.phase == GamePhase::ChoosingCard {
        return TickInput {
            select: Some(0),
            ..Default::default()
        };
    }
    TickInput {
        left: (t / 120) % 2 == 0,
        right: (t / 120) % 2 == 1,
        jump: t % 90 == 0,
        hold: (t / 60) % 4 == 3,
        ..Default::default()
    }
}
