//! TUI Runner
//!
//! Main event loop and terminal setup for the TUI.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyEventKind},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use futures::StreamExt;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use tokio::sync::mpsc;

use super::app::{App, AppAction};
use super::render;
use crate::application::{
    ApplicationClient, ApplicationPayload, SubmissionOutcome, SubmitResponse,
};
use crate::error::TransportError;

/// Redraw interval while idle, so toasts expire on time
const TICK: Duration = Duration::from_millis(250);

type SubmissionResult = Result<SubmitResponse, TransportError>;

/// Run the wizard until the user quits.
///
/// Returns the reference number when the application was accepted.
pub async fn run(mut app: App, client: Arc<dyn ApplicationClient>) -> Result<Option<String>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to enter alternate screen")?;
    install_panic_hook();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_loop(&mut terminal, &mut app, client).await;

    restore_terminal();
    terminal.show_cursor()?;

    result.map(|_| app.screen.success.clone().flatten())
}

/// Main event loop
async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: Arc<dyn ApplicationClient>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut events = EventStream::new();
    let (tx, mut rx) = mpsc::channel::<SubmissionResult>(1);
    let mut title_step = 0;

    loop {
        app.screen.tick(Instant::now());
        if app.wizard.current_step() != title_step {
            title_step = app.wizard.current_step();
            let _ = execute!(io::stdout(), SetTitle(render::window_title(title_step)));
        }
        terminal.draw(|f| render::render(f, app))?;
        app.screen.scroll_requested = false;

        if app.should_quit {
            break;
        }

        tokio::select! {
            event = tokio::time::timeout(TICK, events.next()) => {
                match event {
                    Ok(Some(Ok(event))) => {
                        if let Some(payload) = handle_event(app, event) {
                            spawn_submission(payload, client.clone(), tx.clone());
                        }
                    }
                    Ok(Some(Err(e))) => return Err(e).context("Failed to read terminal event"),
                    // Input stream closed
                    Ok(None) => break,
                    Err(_) => {}
                }
            }
            Some(result) = rx.recv() => {
                match app.on_submission_result(result) {
                    SubmissionOutcome::Accepted { reference } => {
                        tracing::info!(?reference, "application accepted");
                    }
                    outcome => tracing::debug!(?outcome, "submission finished"),
                }
            }
        }
    }

    Ok(())
}

fn handle_event(app: &mut App, event: Event) -> Option<ApplicationPayload> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match app.handle_key(key) {
            AppAction::Submit(payload) => Some(payload),
            AppAction::Quit | AppAction::None => None,
        },
        Event::Paste(text) => {
            app.handle_paste(&text);
            None
        }
        _ => None,
    }
}

/// Send the request off the UI loop; the result comes back on `tx`
fn spawn_submission(
    payload: ApplicationPayload,
    client: Arc<dyn ApplicationClient>,
    tx: mpsc::Sender<SubmissionResult>,
) {
    tokio::spawn(async move {
        let result = client.submit(&payload).await;
        if tx.send(result).await.is_err() {
            tracing::warn!("submission finished after the UI closed");
        }
    });
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
}

/// Put the terminal back before the default hook prints the panic
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        tracing::error!("Application panicked: {}", info);
        default_hook(info);
    }));
}
