//! Tally TUI entry point.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mockable::DefaultClock;
use ratatui::{backend::CrosstermBackend, Terminal};
use tally_tui::config::TuiConfig;
use tally_tui::error::TuiError;
use tally_tui::events::TuiEvent;
use tally_tui::keys::map_key;
use tally_tui::nav::View;
use tally_tui::state::{App, Effect};
use tally_tui::views::render_view;
use tally_tui::{logging, wiring};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    logging::init(&config.log_path)?;
    let tick_rate = config.tick_rate();
    let mut app = wiring::build_app(config, Arc::new(DefaultClock))?;

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    let initial = app.activate(View::Friends);
    run_effect(initial, &event_tx);

    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {}
            maybe_event = event_rx.recv() => {
                let Some(event) = maybe_event else { break };
                if handle_event(&mut app, event, &event_tx) {
                    break;
                }
            }
        }
    }

    tracing::info!("shutting down");
    Ok(())
}

/// Returns true when the app should quit.
fn handle_event(app: &mut App, event: TuiEvent, sender: &mpsc::Sender<TuiEvent>) -> bool {
    match event {
        TuiEvent::Input(key) => {
            if let Some(action) = map_key(key) {
                return run_effect(app.handle_action(action), sender);
            }
        }
        TuiEvent::Loaded(completion) => {
            let outcome = app.apply_completion(*completion);
            tracing::debug!(outcome = ?outcome, "load applied");
        }
        TuiEvent::Resize { .. } | TuiEvent::Tick => {}
    }
    false
}

fn run_effect(effect: Effect, sender: &mpsc::Sender<TuiEvent>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::Load(load) => {
            tracing::debug!(view = ?load.view, request_id = %load.request_id(), "spawning load");
            let sender = sender.clone();
            tokio::spawn(async move {
                let completion = load.run().await;
                if sender.send(TuiEvent::Loaded(Box::new(completion))).await.is_err() {
                    tracing::debug!("event loop gone; dropping load result");
                }
            });
            false
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) => sender.blocking_send(TuiEvent::Input(key)),
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}
