//! Main TUI runner - terminal lifecycle and event loop

use std::time::Duration;

use agri_app::Engine;
use agri_client::{FieldsApi, PredictionApi};
use agri_core::prelude::*;

use crate::{event, render, terminal};

/// How long to wait for a key before emitting a tick (10 FPS spinner)
const TICK_RATE: Duration = Duration::from_millis(100);

/// Run the TUI until the user quits
pub async fn run<P, F>(mut engine: Engine<P, F>) -> Result<()>
where
    P: PredictionApi + Sync + 'static,
    F: FieldsApi + Sync + 'static,
{
    let mut term = terminal::init();
    info!("Entering terminal UI");

    engine.start();
    let result = run_loop(&mut term, &mut engine);

    terminal::restore();
    info!("Terminal UI closed");
    result
}

/// Main event loop
fn run_loop<P, F>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<P, F>) -> Result<()>
where
    P: PredictionApi + Sync + 'static,
    F: FieldsApi + Sync + 'static,
{
    while !engine.should_quit() {
        // Completions from background requests
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll(TICK_RATE)? {
            engine.process_message(message);
        }
    }

    Ok(())
}
